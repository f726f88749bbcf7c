//! 스타일 카탈로그.
//!
//! 프리셋 이름(`default`, `academic`, `business`, `minimal`)을 고정된
//! 역할(role) 팔레트로 해석한다. 역할마다 정수 ID가 선언 순서대로
//! 배정되며, 같은 프리셋이면 항상 같은 ID가 나온다. 렌더러는 이 ID를
//! `charPrIDRef`/`paraPrIDRef`/`styleIDRef`로 참조하고, `header.xml`은
//! 카탈로그가 역할당 정확히 한 번씩 내보낸다.

use crate::error::{ConvertError, Result};
use crate::hwpx::image::BinItem;
use crate::hwpx::xml::XmlElement;

/// 사용 가능한 프리셋 이름 (선언 순서 = CLI 노출 순서)
pub const PRESETS: [&str; 4] = ["default", "academic", "business", "minimal"];

pub const HR_BORDER_ID: u32 = 1;
pub const TABLE_BORDER_ID: u32 = 2;

pub const ORDERED_NUMBERING_ID: u32 = 1;
pub const BULLET_NUMBERING_ID: u32 = 2;
pub const TASK_CHECKED_NUMBERING_ID: u32 = 3;
pub const TASK_UNCHECKED_NUMBERING_ID: u32 = 4;

const MONO_HANGUL: &str = "D2Coding";
const MONO_LATIN: &str = "Consolas";

/// 글자 속성 역할. `as u32` 값이 곧 `charPrIDRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRole {
    Default,
    Bold,
    Italic,
    BoldItalic,
    Strike,
    InlineCode,
    Link,
    FootnoteRef,
}

impl CharRole {
    pub const ALL: [CharRole; 8] = [
        CharRole::Default,
        CharRole::Bold,
        CharRole::Italic,
        CharRole::BoldItalic,
        CharRole::Strike,
        CharRole::InlineCode,
        CharRole::Link,
        CharRole::FootnoteRef,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// 문단 속성 역할. `as u32` 값이 곧 `paraPrIDRef`이자 `styleIDRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParaRole {
    Body,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    CodeBlock,
    BlockQuote,
    ListItem,
    TableCell,
    FootnoteDef,
    Hr,
}

impl ParaRole {
    pub const ALL: [ParaRole; 13] = [
        ParaRole::Body,
        ParaRole::H1,
        ParaRole::H2,
        ParaRole::H3,
        ParaRole::H4,
        ParaRole::H5,
        ParaRole::H6,
        ParaRole::CodeBlock,
        ParaRole::BlockQuote,
        ParaRole::ListItem,
        ParaRole::TableCell,
        ParaRole::FootnoteDef,
        ParaRole::Hr,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    /// 1..=6 범위 밖은 가장 가까운 제목 레벨로 고정
    pub fn heading(level: u8) -> ParaRole {
        match level {
            0 | 1 => ParaRole::H1,
            2 => ParaRole::H2,
            3 => ParaRole::H3,
            4 => ParaRole::H4,
            5 => ParaRole::H5,
            _ => ParaRole::H6,
        }
    }

    fn names(self) -> (&'static str, &'static str) {
        match self {
            ParaRole::Body => ("바탕글", "Normal"),
            ParaRole::H1 => ("제목 1", "Heading 1"),
            ParaRole::H2 => ("제목 2", "Heading 2"),
            ParaRole::H3 => ("제목 3", "Heading 3"),
            ParaRole::H4 => ("제목 4", "Heading 4"),
            ParaRole::H5 => ("제목 5", "Heading 5"),
            ParaRole::H6 => ("제목 6", "Heading 6"),
            ParaRole::CodeBlock => ("코드", "Code"),
            ParaRole::BlockQuote => ("인용", "Quote"),
            ParaRole::ListItem => ("목록", "List"),
            ParaRole::TableCell => ("표", "Table Cell"),
            ParaRole::FootnoteDef => ("각주", "Footnote"),
            ParaRole::Hr => ("구분선", "Horizontal Rule"),
        }
    }
}

/// 인라인 렌더링 중에 누적되는 서식 능력 집합.
///
/// 중첩 강조는 합집합으로 합성된다 (굵게 속 기울임 → bold_italic 역할).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineCaps {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
    pub link: bool,
    pub footnote_ref: bool,
}

impl InlineCaps {
    /// 능력 집합을 단일 글자 역할로 해석한다. 역할 팔레트가 고정이므로
    /// 우선순위가 있다: 각주 참조 > 인라인 코드 > 링크 > 취소선 >
    /// 굵은기울임 > 굵게 > 기울임.
    pub fn resolve(self) -> CharRole {
        if self.footnote_ref {
            CharRole::FootnoteRef
        } else if self.code {
            CharRole::InlineCode
        } else if self.link {
            CharRole::Link
        } else if self.strike {
            CharRole::Strike
        } else if self.bold && self.italic {
            CharRole::BoldItalic
        } else if self.bold {
            CharRole::Bold
        } else if self.italic {
            CharRole::Italic
        } else {
            CharRole::Default
        }
    }
}

#[derive(Debug, Clone)]
pub struct CharProps {
    /// OWPML height (pt × 100)
    pub height: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// 취소선. 출력 시 `<hh:strikeout shape="SINGLE">`로 직렬화된다.
    pub strikeout: bool,
    /// 글자 기준선 오프셋(%) - 각주 참조 위첨자용
    pub offset: u32,
    pub color: &'static str,
    pub shade: &'static str,
    /// 고정폭 글꼴 사용 여부
    pub mono: bool,
}

#[derive(Debug, Clone)]
pub struct ParaProps {
    pub align: &'static str,
    /// 첫 줄 들여쓰기 (HWPUNIT, 음수 = 내어쓰기)
    pub indent: i32,
    pub left_margin: u32,
    pub space_before: u32,
    pub space_after: u32,
    pub line_spacing: u32,
}

struct PresetSpec {
    name: &'static str,
    hangul: &'static str,
    latin: &'static str,
    /// 본문 글자 크기 (pt × 100)
    base_height: u32,
    line_spacing: u32,
}

/// 프리셋 차이는 글꼴 가족, 글자 크기, 줄 간격뿐이다.
const PRESET_SPECS: [PresetSpec; 4] = [
    PresetSpec {
        name: "default",
        hangul: "맑은 고딕",
        latin: "Times New Roman",
        base_height: 1000,
        line_spacing: 160,
    },
    PresetSpec {
        name: "academic",
        hangul: "바탕",
        latin: "Times New Roman",
        base_height: 1100,
        line_spacing: 200,
    },
    PresetSpec {
        name: "business",
        hangul: "맑은 고딕",
        latin: "Arial",
        base_height: 1000,
        line_spacing: 150,
    },
    PresetSpec {
        name: "minimal",
        hangul: "나눔고딕",
        latin: "Helvetica Neue",
        base_height: 1000,
        line_spacing: 145,
    },
];

/// 제목 글자 크기 배율 (본문 대비 %)
const HEADING_SCALE: [u32; 6] = [220, 180, 140, 120, 110, 100];
const HEADING_SPACE_BEFORE: [u32; 6] = [1600, 1400, 1200, 1000, 800, 600];
const HEADING_SPACE_AFTER: [u32; 6] = [1000, 800, 600, 600, 400, 400];

/// 한 변환 동안 불변인 스타일 카탈로그
#[derive(Debug, Clone)]
pub struct Catalog {
    preset: &'static str,
    hangul: &'static str,
    latin: &'static str,
    chars: Vec<CharProps>,
    paras: Vec<ParaProps>,
    heading_heights: [u32; 6],
}

/// 프리셋 이름을 카탈로그로 해석한다. 알 수 없는 이름은 `ConfigError`.
pub fn resolve(preset: &str) -> Result<Catalog> {
    let spec = PRESET_SPECS
        .iter()
        .find(|s| s.name == preset)
        .ok_or_else(|| {
            ConvertError::Config(format!(
                "알 수 없는 프리셋: '{}' (사용 가능: {})",
                preset,
                PRESETS.join(", ")
            ))
        })?;
    Ok(Catalog::from_spec(spec))
}

impl Catalog {
    fn from_spec(spec: &PresetSpec) -> Self {
        let base = spec.base_height;
        let code_height = base * 90 / 100;
        let ls = spec.line_spacing;

        let plain = |bold: bool, italic: bool, strikeout: bool| CharProps {
            height: base,
            bold,
            italic,
            underline: false,
            strikeout,
            offset: 0,
            color: "#000000",
            shade: "none",
            mono: false,
        };

        // CharRole::ALL 선언 순서와 일치해야 한다
        let chars = vec![
            plain(false, false, false),
            plain(true, false, false),
            plain(false, true, false),
            plain(true, true, false),
            plain(false, false, true),
            CharProps {
                height: code_height,
                bold: false,
                italic: false,
                underline: false,
                strikeout: false,
                offset: 0,
                color: "#333333",
                shade: "#F0F0F0",
                mono: true,
            },
            CharProps {
                height: base,
                bold: false,
                italic: false,
                underline: true,
                strikeout: false,
                offset: 0,
                color: "#0563C1",
                shade: "none",
                mono: false,
            },
            CharProps {
                height: base * 70 / 100,
                bold: false,
                italic: false,
                underline: false,
                strikeout: false,
                offset: 30,
                color: "#0000FF",
                shade: "none",
                mono: false,
            },
        ];

        let body = ParaProps {
            align: "JUSTIFY",
            indent: 0,
            left_margin: 0,
            space_before: 0,
            space_after: 600,
            line_spacing: ls,
        };
        let heading = |level: usize| ParaProps {
            align: "LEFT",
            indent: 0,
            left_margin: 0,
            space_before: HEADING_SPACE_BEFORE[level],
            space_after: HEADING_SPACE_AFTER[level],
            line_spacing: ls,
        };

        // ParaRole::ALL 선언 순서와 일치해야 한다
        let paras = vec![
            body.clone(),
            heading(0),
            heading(1),
            heading(2),
            heading(3),
            heading(4),
            heading(5),
            ParaProps {
                align: "LEFT",
                indent: 0,
                left_margin: 0,
                space_before: 400,
                space_after: 400,
                line_spacing: 150,
            },
            ParaProps {
                align: "JUSTIFY",
                indent: 0,
                left_margin: 2000,
                space_before: 400,
                space_after: 400,
                line_spacing: ls,
            },
            ParaProps {
                align: "JUSTIFY",
                indent: -1000,
                left_margin: 2000,
                space_before: 0,
                space_after: 600,
                line_spacing: ls,
            },
            ParaProps {
                align: "LEFT",
                indent: 0,
                left_margin: 0,
                space_before: 200,
                space_after: 200,
                line_spacing: ls,
            },
            ParaProps {
                align: "JUSTIFY",
                indent: 0,
                left_margin: 0,
                space_before: 0,
                space_after: 200,
                line_spacing: 140,
            },
            ParaProps {
                align: "LEFT",
                indent: 0,
                left_margin: 0,
                space_before: 800,
                space_after: 800,
                line_spacing: ls,
            },
        ];

        let mut heading_heights = [0u32; 6];
        for (i, scale) in HEADING_SCALE.iter().enumerate() {
            heading_heights[i] = base * scale / 100;
        }

        Self {
            preset: spec.name,
            hangul: spec.hangul,
            latin: spec.latin,
            chars,
            paras,
            heading_heights,
        }
    }

    pub fn preset(&self) -> &'static str {
        self.preset
    }

    pub fn char_id(&self, role: CharRole) -> u32 {
        role.id()
    }

    pub fn para_id(&self, role: ParaRole) -> u32 {
        role.id()
    }

    /// 스타일은 문단 역할당 하나씩이며 같은 ID를 공유한다
    pub fn style_id(&self, role: ParaRole) -> u32 {
        role.id()
    }

    pub fn char_props(&self, role: CharRole) -> &CharProps {
        &self.chars[role.id() as usize]
    }

    pub fn para_props(&self, role: ParaRole) -> &ParaProps {
        &self.paras[role.id() as usize]
    }

    /// 제목 레벨별 글자 높이 오버레이 값 (pt × 100)
    pub fn heading_height(&self, level: u8) -> u32 {
        let idx = level.clamp(1, 6) as usize - 1;
        self.heading_heights[idx]
    }

    // ------------------------------------------------------------------
    // Contents/header.xml
    // ------------------------------------------------------------------

    /// Build the `hh:head` document declaring every role exactly once,
    /// in role-declaration order, plus border fills, numberings, and the
    /// resolved binary image items.
    pub fn header_xml(&self, bin_items: &[BinItem]) -> XmlElement {
        let mut head = XmlElement::new("hh:head")
            .attr("secCnt", "1")
            .attr("version", "1.5");

        head.push(
            XmlElement::new("hh:beginNum")
                .attr("endnote", "1")
                .attr("equation", "1")
                .attr("footnote", "1")
                .attr("page", "1")
                .attr("pic", "1")
                .attr("tbl", "1"),
        );

        let mut ref_list = XmlElement::new("hh:refList");
        ref_list.push(self.fontfaces());
        ref_list.push(self.border_fills());
        ref_list.push(self.char_properties());
        ref_list.push(
            XmlElement::new("hh:tabProperties").attr("itemCnt", "1").child(
                XmlElement::new("hh:tabPr")
                    .attr("autoTabLeft", "0")
                    .attr("autoTabRight", "0")
                    .attr("id", "0"),
            ),
        );
        ref_list.push(self.numberings());
        ref_list.push(self.para_properties());
        ref_list.push(self.styles());
        if !bin_items.is_empty() {
            ref_list.push(bin_data_items(bin_items));
        }
        head.push(ref_list);

        head.push(
            XmlElement::new("hh:compatibleDocument")
                .attr("targetProgram", "HWP201X")
                .child(XmlElement::new("hh:layoutCompatibility")),
        );
        head.push(
            XmlElement::new("hh:docOption").child(
                XmlElement::new("hh:linkinfo")
                    .attr("footnoteInherit", "0")
                    .attr("pageInherit", "0")
                    .attr("path", ""),
            ),
        );

        head
    }

    fn fonts(&self) -> [&'static str; 4] {
        [self.hangul, self.latin, MONO_HANGUL, MONO_LATIN]
    }

    fn fontfaces(&self) -> XmlElement {
        let fonts = self.fonts();
        let langs = [
            "HANGUL", "LATIN", "HANJA", "JAPANESE", "OTHER", "SYMBOL", "USER",
        ];
        let mut faces = XmlElement::new("hh:fontfaces").attr("itemCnt", langs.len().to_string());
        for lang in langs {
            let mut face = XmlElement::new("hh:fontface")
                .attr("fontCnt", fonts.len().to_string())
                .attr("lang", lang);
            for (id, name) in fonts.iter().enumerate() {
                face.push(
                    XmlElement::new("hh:font")
                        .attr("face", *name)
                        .attr("id", id.to_string())
                        .attr("isEmbedded", "0")
                        .attr("type", "TTF")
                        .child(
                            XmlElement::new("hh:typeInfo")
                                .attr("armStyle", "1")
                                .attr("contrast", "0")
                                .attr("familyType", "FCAT_GOTHIC")
                                .attr("letterform", "1")
                                .attr("midline", "1")
                                .attr("proportion", "4")
                                .attr("strokeVariation", "1")
                                .attr("weight", "6")
                                .attr("xHeight", "1"),
                        ),
                );
            }
            faces.push(face);
        }
        faces
    }

    fn border_fills(&self) -> XmlElement {
        let mut fills = XmlElement::new("hh:borderFills").attr("itemCnt", "2");

        // hr_border: 수평선 문단의 상단 실선만
        let mut hr = border_fill_shell(HR_BORDER_ID);
        hr.push(border_side("hh:leftBorder", "NONE", "0.1"));
        hr.push(border_side("hh:rightBorder", "NONE", "0.1"));
        hr.push(border_side("hh:topBorder", "SOLID", "0.4"));
        hr.push(border_side("hh:bottomBorder", "NONE", "0.1"));
        hr.push(border_side("hh:diagonal", "NONE", "0.1"));
        fills.push(hr);

        // table_border: 표 셀 사방 실선
        let mut tbl = border_fill_shell(TABLE_BORDER_ID);
        tbl.push(border_side("hh:leftBorder", "SOLID", "0.12"));
        tbl.push(border_side("hh:rightBorder", "SOLID", "0.12"));
        tbl.push(border_side("hh:topBorder", "SOLID", "0.12"));
        tbl.push(border_side("hh:bottomBorder", "SOLID", "0.12"));
        tbl.push(border_side("hh:diagonal", "NONE", "0.1"));
        fills.push(tbl);

        fills
    }

    fn char_properties(&self) -> XmlElement {
        let mut props =
            XmlElement::new("hh:charProperties").attr("itemCnt", self.chars.len().to_string());
        for role in CharRole::ALL {
            props.push(self.char_pr(role));
        }
        props
    }

    fn char_pr(&self, role: CharRole) -> XmlElement {
        let cp = self.char_props(role);
        let (hangul_id, latin_id) = if cp.mono { (2, 3) } else { (0, 1) };

        let mut pr = XmlElement::new("hh:charPr")
            .attr("height", cp.height.to_string())
            .attr("id", role.id().to_string())
            .attr("shadeColor", cp.shade)
            .attr("symMark", "NONE")
            .attr("textColor", cp.color)
            .attr("useFontSpace", "0")
            .attr("useKerning", "0");

        pr.push(per_lang("hh:fontRef", &hangul_id.to_string(), &latin_id.to_string()));
        if cp.bold {
            pr.push(XmlElement::new("hh:bold"));
        }
        if cp.italic {
            pr.push(XmlElement::new("hh:italic"));
        }
        pr.push(per_lang("hh:ratio", "100", "100"));
        pr.push(per_lang("hh:spacing", "0", "0"));
        pr.push(per_lang("hh:relSz", "100", "100"));
        pr.push(per_lang(
            "hh:offset",
            &cp.offset.to_string(),
            &cp.offset.to_string(),
        ));
        pr.push(
            XmlElement::new("hh:underline")
                .attr("color", "#000000")
                .attr("shape", "SOLID")
                .attr("type", if cp.underline { "BOTTOM" } else { "NONE" }),
        );
        // 일부 웹 뷰어가 SINGLE 취소선을 그리지 않지만 뷰어 쪽 결함이다.
        // 다른 글자 스타일로 대체하지 말 것.
        pr.push(
            XmlElement::new("hh:strikeout")
                .attr("color", "#000000")
                .attr("shape", if cp.strikeout { "SINGLE" } else { "NONE" }),
        );
        pr.push(XmlElement::new("hh:outline").attr("type", "NONE"));
        pr.push(
            XmlElement::new("hh:shadow")
                .attr("color", "#C0C0C0")
                .attr("offsetX", "10")
                .attr("offsetY", "10")
                .attr("type", "NONE"),
        );
        pr
    }

    fn numberings(&self) -> XmlElement {
        let entries: [(u32, &str, &str); 4] = [
            (ORDERED_NUMBERING_ID, "DIGIT", "^1."),
            (BULLET_NUMBERING_ID, "SYMBOL", "•"),
            (TASK_CHECKED_NUMBERING_ID, "SYMBOL", "☑"),
            (TASK_UNCHECKED_NUMBERING_ID, "SYMBOL", "☐"),
        ];
        let mut numberings =
            XmlElement::new("hh:numberings").attr("itemCnt", entries.len().to_string());
        for (id, format, head) in entries {
            numberings.push(
                XmlElement::new("hh:numbering")
                    .attr("id", id.to_string())
                    .attr("start", "1")
                    .child(
                        XmlElement::new("hh:paraHead")
                            .attr("align", "LEFT")
                            .attr("autoIndent", "1")
                            .attr("level", "1")
                            .attr("numFormat", format)
                            .attr("start", "1")
                            .attr("textOffset", "50")
                            .attr("textOffsetType", "PERCENT")
                            .attr("useInstWidth", "1")
                            .attr("widthAdjust", "0")
                            .text(head),
                    ),
            );
        }
        numberings
    }

    fn para_properties(&self) -> XmlElement {
        let mut props =
            XmlElement::new("hh:paraProperties").attr("itemCnt", self.paras.len().to_string());
        for role in ParaRole::ALL {
            props.push(self.para_pr(role));
        }
        props
    }

    fn para_pr(&self, role: ParaRole) -> XmlElement {
        let pp = self.para_props(role);
        let mut pr = XmlElement::new("hh:paraPr")
            .attr("condense", "0")
            .attr("fontLineHeight", "0")
            .attr("id", role.id().to_string())
            .attr("snapToGrid", "1")
            .attr("suppressLineNumbers", "0")
            .attr("tabPrIDRef", "0");

        pr.push(
            XmlElement::new("hh:align")
                .attr("horizontal", pp.align)
                .attr("vertical", "BASELINE"),
        );
        pr.push(
            XmlElement::new("hh:heading")
                .attr("idRef", "0")
                .attr("level", "0")
                .attr("type", "NONE"),
        );
        pr.push(
            XmlElement::new("hh:breakSetting")
                .attr("breakLatinWord", "KEEP_WORD")
                .attr("breakNonLatinWord", "BREAK_WORD")
                .attr("keepLines", "0")
                .attr("keepWithNext", "0")
                .attr("lineWrap", "BREAK")
                .attr("pageBreakBefore", "0")
                .attr("widowOrphan", "0"),
        );
        pr.push(
            XmlElement::new("hh:autoSpacing")
                .attr("eAsianEng", "0")
                .attr("eAsianNum", "0"),
        );
        let mut margin = XmlElement::new("hh:margin");
        margin.push(hwp_value("hc:intent", &pp.indent.to_string()));
        margin.push(hwp_value("hc:left", &pp.left_margin.to_string()));
        margin.push(hwp_value("hc:right", "0"));
        margin.push(hwp_value("hc:prev", &pp.space_before.to_string()));
        margin.push(hwp_value("hc:next", &pp.space_after.to_string()));
        pr.push(margin);
        pr.push(
            XmlElement::new("hh:lineSpacing")
                .attr("type", "PERCENT")
                .attr("unit", "HWPUNIT")
                .attr("value", pp.line_spacing.to_string()),
        );
        pr
    }

    fn styles(&self) -> XmlElement {
        let mut styles =
            XmlElement::new("hh:styles").attr("itemCnt", self.paras.len().to_string());
        for role in ParaRole::ALL {
            let (name, eng_name) = role.names();
            styles.push(
                XmlElement::new("hh:style")
                    .attr("charPrIDRef", "0")
                    .attr("engName", eng_name)
                    .attr("id", role.id().to_string())
                    .attr("langID", "1042")
                    .attr("lockForm", "0")
                    .attr("name", name)
                    .attr("nextStyleIDRef", role.id().to_string())
                    .attr("paraPrIDRef", role.id().to_string())
                    .attr("type", "PARA"),
            );
        }
        styles
    }
}

fn border_fill_shell(id: u32) -> XmlElement {
    let mut fill = XmlElement::new("hh:borderFill")
        .attr("breakCellSeparateLine", "0")
        .attr("centerLine", "NONE")
        .attr("id", id.to_string())
        .attr("shadow", "0")
        .attr("threeD", "0");
    fill.push(
        XmlElement::new("hh:slash")
            .attr("Crooked", "0")
            .attr("isCounter", "0")
            .attr("type", "NONE"),
    );
    fill.push(
        XmlElement::new("hh:backSlash")
            .attr("Crooked", "0")
            .attr("isCounter", "0")
            .attr("type", "NONE"),
    );
    fill
}

fn border_side(name: &str, kind: &str, width_mm: &str) -> XmlElement {
    XmlElement::new(name)
        .attr("color", "#000000")
        .attr("type", kind)
        .attr("width", format!("{} mm", width_mm))
}

fn per_lang(name: &str, hangul: &str, latin: &str) -> XmlElement {
    XmlElement::new(name)
        .attr("hangul", hangul)
        .attr("hanja", hangul)
        .attr("japanese", hangul)
        .attr("latin", latin)
        .attr("other", latin)
        .attr("symbol", latin)
        .attr("user", latin)
}

fn hwp_value(name: &str, value: &str) -> XmlElement {
    XmlElement::new(name)
        .attr("unit", "HWPUNIT")
        .attr("value", value)
}

fn bin_data_items(bin_items: &[BinItem]) -> XmlElement {
    let mut items =
        XmlElement::new("hh:binDataItems").attr("itemCnt", bin_items.len().to_string());
    for item in bin_items {
        items.push(
            XmlElement::new("hh:binDataItem")
                .attr("format", item.image.format.extension().to_uppercase())
                .attr("id", item.item_id())
                .attr("isEmbeded", "1")
                .attr("src", item.href()),
        );
    }
    items
}
