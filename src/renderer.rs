//! OWPML 렌더러.
//!
//! 문서 AST를 깊이 우선으로 걸으며 `Contents/section0.xml` 트리를
//! 만든다. 스타일은 카탈로그(C1)가 미리 선언한 ID만 참조하고, 문단
//! 단위 조정(정렬, 들여쓰기, 번호, 제목 글자 크기)은 새 스타일을 만들지
//! 않고 `hp:p` 속성 오버레이로 처리한다.
//!
//! 문단/각주/셀/필드 ID는 호출마다 0에서 시작하는 단조 카운터로
//! 배정된다. 정상적인 AST에 대해 렌더링은 실패하지 않는다.

use std::collections::{BTreeMap, BTreeSet};

use crate::ast::{plain_text, Block, Document, EmphasisKind, Inline, ListItem, TaskState};
use crate::converter::{ConvertOptions, ImageResolver};
use crate::error::{Warning, WarningKind};
use crate::hwpx::image::{BinImage, BinItem};
use crate::hwpx::xml::XmlElement;
use crate::styles::{
    Catalog, InlineCaps, ParaRole, BULLET_NUMBERING_ID, HR_BORDER_ID, ORDERED_NUMBERING_ID,
    TASK_CHECKED_NUMBERING_ID, TASK_UNCHECKED_NUMBERING_ID,
};

// A4 페이지 치수 (HWPUNIT, 1/7200 inch)
const A4_WIDTH: u32 = 59_528;
const A4_HEIGHT: u32 = 84_186;
const MARGIN_LEFT: u32 = 8_504;
const MARGIN_RIGHT: u32 = 8_504;
const MARGIN_TOP: u32 = 5_668;
const MARGIN_BOTTOM: u32 = 4_252;
const MARGIN_HEADER: u32 = 4_252;
const MARGIN_FOOTER: u32 = 4_252;

/// 본문 폭 = A4 - 좌우 여백. 이미지 최대 폭으로도 쓴다.
pub(crate) const CONTENT_WIDTH: u32 = A4_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

const PREVIEW_MAX_LINES: usize = 50;

/// 렌더링 결과: 섹션 문서와 부수 산출물
pub struct RenderOutput {
    pub section: XmlElement,
    pub bin_items: Vec<BinItem>,
    pub preview: String,
    pub warnings: Vec<Warning>,
}

/// 블록 렌더링 문맥. 인용/목록 중첩이 들여쓰기 단계로 합성된다.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BlockCtx {
    indent_level: u32,
    quoted: bool,
    in_list: bool,
    in_footnote: bool,
}

struct FootnoteEntry<'a> {
    blocks: &'a [Block],
    referenced: bool,
}

pub(crate) struct Renderer<'a> {
    pub(crate) catalog: &'a Catalog,
    base_indent: u32,
    resolver: Option<&'a ImageResolver>,
    para_id: u32,
    footnote_id: u32,
    pub(crate) cell_id: u32,
    field_id: u32,
    pub(crate) bin_items: Vec<BinItem>,
    footnotes: BTreeMap<&'a str, FootnoteEntry<'a>>,
    /// 렌더링 중인 각주 라벨 (자기 참조 각주의 무한 재귀 방지)
    in_flight: BTreeSet<&'a str>,
    warnings: Vec<Warning>,
    preview: Vec<String>,
}

/// 문서 AST를 섹션 XML로 렌더링한다.
pub fn render(catalog: &Catalog, options: &ConvertOptions, doc: &Document) -> RenderOutput {
    let mut r = Renderer {
        catalog,
        base_indent: options.base_indent,
        resolver: options.image_resolver.as_ref(),
        para_id: 0,
        footnote_id: 0,
        cell_id: 0,
        field_id: 0,
        bin_items: Vec::new(),
        footnotes: BTreeMap::new(),
        in_flight: BTreeSet::new(),
        warnings: Vec::new(),
        preview: Vec::new(),
    };

    // 각주 심볼 테이블 (라벨 → 정의, 첫 정의가 이긴다)
    for block in &doc.blocks {
        if let Block::FootnoteDefinition {
            label,
            line,
            children,
        } = block
        {
            if r.footnotes.contains_key(label.as_str()) {
                r.warnings.push(Warning::new(
                    WarningKind::DuplicateFootnote,
                    *line,
                    format!("중복된 각주 정의 '[^{}]'는 무시됨", label),
                ));
            } else {
                r.footnotes.insert(
                    label.as_str(),
                    FootnoteEntry {
                        blocks: children,
                        referenced: false,
                    },
                );
            }
        }
    }

    // 본문: 각주 정의는 참조 위치로 끌어올려지므로 건너뛴다
    let mut body: Vec<XmlElement> = Vec::new();
    for block in &doc.blocks {
        if matches!(block, Block::FootnoteDefinition { .. }) {
            continue;
        }
        r.render_block(block, BlockCtx::default(), &mut body);
    }

    // 한 번도 참조되지 않은 정의는 각주를 고아로 남기지 않도록 본문으로
    let mut emitted: BTreeSet<&str> = BTreeSet::new();
    for block in &doc.blocks {
        if let Block::FootnoteDefinition {
            label,
            line,
            children,
        } = block
        {
            let orphan = r
                .footnotes
                .get(label.as_str())
                .map(|e| !e.referenced)
                .unwrap_or(false);
            if orphan && emitted.insert(label.as_str()) {
                r.warnings.push(Warning::new(
                    WarningKind::OrphanFootnote,
                    *line,
                    format!("참조되지 않은 각주 '[^{}]'를 본문으로 출력", label),
                ));
                r.render_orphan_footnote(label, children, &mut body);
            }
        }
    }

    if body.is_empty() {
        let mut para = r.make_para(ParaRole::Body);
        para.push(r.text_run(InlineCaps::default(), ""));
        body.push(para);
    }

    // 첫 문단이 섹션 속성을 품는다
    body[0].push_front(section_properties_run(catalog));

    let mut section = XmlElement::new("hs:sec");
    for para in body {
        section.push(para);
    }

    let preview_len = r.preview.len().min(PREVIEW_MAX_LINES);
    RenderOutput {
        section,
        bin_items: r.bin_items,
        preview: r.preview[..preview_len].join("\n"),
        warnings: r.warnings,
    }
}

impl<'a> Renderer<'a> {
    // ------------------------------------------------------------------
    // 블록 렌더링
    // ------------------------------------------------------------------

    fn render_block(&mut self, block: &'a Block, ctx: BlockCtx, out: &mut Vec<XmlElement>) {
        match block {
            Block::Heading { level, content } => {
                let mut para = self.make_para(ParaRole::heading(*level));
                para.set_attr("charHeight", self.catalog.heading_height(*level).to_string());
                self.apply_indent(&mut para, ctx);
                let caps = InlineCaps {
                    bold: true,
                    ..Default::default()
                };
                self.render_inlines(&mut para, content, caps);
                if !ctx.in_footnote {
                    self.push_preview(plain_text(content));
                }
                out.push(para);
            }
            Block::Paragraph { content } => {
                let role = if ctx.in_footnote {
                    ParaRole::FootnoteDef
                } else if ctx.quoted {
                    ParaRole::BlockQuote
                } else if ctx.in_list {
                    ParaRole::ListItem
                } else {
                    ParaRole::Body
                };
                let mut para = self.make_para(role);
                self.apply_indent(&mut para, ctx);
                self.render_inlines(&mut para, content, InlineCaps::default());
                if !para.has_children() {
                    para.push(self.text_run(InlineCaps::default(), ""));
                }
                if !ctx.in_footnote {
                    let text = plain_text(content);
                    if !text.trim().is_empty() {
                        self.push_preview(text);
                    }
                }
                out.push(para);
            }
            Block::BulletList { items } => {
                self.render_list(items, None, ctx, out);
            }
            Block::OrderedList { start, items } => {
                self.render_list(items, Some(*start), ctx, out);
            }
            Block::CodeBlock { info, text } => {
                self.render_code_block(info, text, ctx, out);
            }
            Block::BlockQuote { children } => {
                let child_ctx = BlockCtx {
                    indent_level: ctx.indent_level + u32::from(ctx.quoted),
                    quoted: true,
                    ..ctx
                };
                for child in children {
                    self.render_block(child, child_ctx, out);
                }
            }
            Block::Table(table) => {
                out.push(self.render_table(table, ctx));
                self.push_preview("[Table]".to_string());
            }
            Block::ThematicBreak => {
                let mut para = self.make_para(ParaRole::Hr);
                para.set_attr("borderFillIDRef", HR_BORDER_ID.to_string());
                self.apply_indent(&mut para, ctx);
                para.push(self.text_run(InlineCaps::default(), ""));
                self.push_preview("---".to_string());
                out.push(para);
            }
            Block::FootnoteDefinition {
                label, children, ..
            } => {
                // 중첩 위치에 나타난 정의는 수집 대상이 아니므로 본문 처리
                self.render_orphan_footnote(label, children, out);
            }
        }
    }

    fn render_code_block(
        &mut self,
        info: &str,
        text: &str,
        ctx: BlockCtx,
        out: &mut Vec<XmlElement>,
    ) {
        let caps = InlineCaps {
            code: true,
            ..Default::default()
        };
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        for (idx, line) in lines.iter().enumerate() {
            let mut para = self.make_para(ParaRole::CodeBlock);
            if idx == 0 && !info.is_empty() {
                para.set_attr("info", info);
            }
            self.apply_indent(&mut para, ctx);
            para.push(self.text_run(caps, line));
            out.push(para);
        }
        // 빈 문단이 코드 블록을 닫는다
        let mut terminator = self.make_para(ParaRole::CodeBlock);
        self.apply_indent(&mut terminator, ctx);
        terminator.push(self.text_run(caps, ""));
        out.push(terminator);

        let mut preview: String = text.chars().take(200).collect();
        preview = preview.replace('\n', " ");
        self.push_preview(format!("[Code: {}]", preview));
    }

    fn render_list(
        &mut self,
        items: &'a [ListItem],
        ordered_start: Option<u64>,
        ctx: BlockCtx,
        out: &mut Vec<XmlElement>,
    ) {
        for (idx, item) in items.iter().enumerate() {
            let numbering = match (ordered_start, item.task) {
                (Some(_), _) => ORDERED_NUMBERING_ID,
                (None, TaskState::Checked) => TASK_CHECKED_NUMBERING_ID,
                (None, TaskState::Unchecked) => TASK_UNCHECKED_NUMBERING_ID,
                (None, TaskState::None) => BULLET_NUMBERING_ID,
            };

            let (lead, rest): (Option<&'a [Inline]>, &'a [Block]) = match item.children.first() {
                Some(Block::Paragraph { content }) => {
                    (Some(content.as_slice()), &item.children[1..])
                }
                Some(_) => (None, item.children.as_slice()),
                None => (None, &[]),
            };

            let mut para = self.make_para(ParaRole::ListItem);
            para.set_attr("indent", (self.base_indent * ctx.indent_level).to_string());
            para.set_attr("numberingIDRef", numbering.to_string());
            if let Some(start) = ordered_start {
                if idx == 0 && start != 1 {
                    para.set_attr("numberingStart", start.to_string());
                }
            }
            match lead {
                Some(content) => {
                    self.render_inlines(&mut para, content, InlineCaps::default());
                    if !ctx.in_footnote {
                        let marker = match (ordered_start, item.task) {
                            (Some(start), _) => format!("{}. ", start + idx as u64),
                            (None, TaskState::Checked) => "☑ ".to_string(),
                            (None, TaskState::Unchecked) => "☐ ".to_string(),
                            (None, TaskState::None) => "• ".to_string(),
                        };
                        self.push_preview(format!(
                            "{}{}{}",
                            "  ".repeat(ctx.indent_level as usize),
                            marker,
                            plain_text(content)
                        ));
                    }
                }
                None => para.push(self.text_run(InlineCaps::default(), "")),
            }
            out.push(para);

            let child_ctx = BlockCtx {
                indent_level: ctx.indent_level + 1,
                in_list: true,
                ..ctx
            };
            for child in rest {
                self.render_block(child, child_ctx, out);
            }
        }
    }

    /// 참조되지 않았거나 중첩 위치에 나타난 각주 정의를 본문 문단으로
    fn render_orphan_footnote(
        &mut self,
        label: &str,
        children: &'a [Block],
        out: &mut Vec<XmlElement>,
    ) {
        let mut rendered = Vec::new();
        for child in children {
            self.render_block(child, BlockCtx::default(), &mut rendered);
        }
        let label_run = self.text_run(InlineCaps::default(), &format!("[^{}] ", label));
        match rendered.first_mut() {
            Some(first) => first.push_front(label_run),
            None => {
                let mut para = self.make_para(ParaRole::Body);
                para.push(label_run);
                rendered.push(para);
            }
        }
        out.extend(rendered);
    }

    // ------------------------------------------------------------------
    // 인라인 렌더링
    // ------------------------------------------------------------------

    pub(crate) fn render_inlines(
        &mut self,
        para: &mut XmlElement,
        inlines: &'a [Inline],
        caps: InlineCaps,
    ) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => {
                    let run = self.text_run(caps, text);
                    para.push(run);
                }
                Inline::Emphasis { kind, children } => {
                    let mut inner = caps;
                    match kind {
                        EmphasisKind::Italic => inner.italic = true,
                        EmphasisKind::Bold => inner.bold = true,
                        EmphasisKind::BoldItalic => {
                            inner.bold = true;
                            inner.italic = true;
                        }
                    }
                    self.render_inlines(para, children, inner);
                }
                Inline::Strikethrough(children) => {
                    let mut inner = caps;
                    inner.strike = true;
                    self.render_inlines(para, children, inner);
                }
                Inline::Code(text) => {
                    let mut inner = caps;
                    inner.code = true;
                    let run = self.text_run(inner, text);
                    para.push(run);
                }
                Inline::Link {
                    href,
                    title,
                    children,
                } => {
                    self.render_link(para, href, title, children, caps);
                }
                Inline::Image {
                    src, alt, line, ..
                } => {
                    self.render_image(para, src, alt, *line, caps);
                }
                Inline::FootnoteReference { label, line } => {
                    self.render_footnote_ref(para, label, *line, caps);
                }
                Inline::HardBreak => {
                    let mut run = self.run_shell(caps);
                    run.push(XmlElement::new("hp:lineBreak"));
                    para.push(run);
                }
                Inline::SoftBreak => {
                    let run = self.text_run(caps, " ");
                    para.push(run);
                }
            }
        }
    }

    /// 링크는 필드 시작/끝 쌍으로 감싼다. 표시 텍스트는 자식 인라인.
    fn render_link(
        &mut self,
        para: &mut XmlElement,
        href: &str,
        title: &str,
        children: &'a [Inline],
        caps: InlineCaps,
    ) {
        let field_id = self.field_id;
        self.field_id += 1;

        let mut link_caps = caps;
        link_caps.link = true;

        let mut begin = XmlElement::new("hp:fieldBegin")
            .attr("command", href)
            .attr("dirty", "0")
            .attr("editable", "1")
            .attr("id", field_id.to_string())
            .attr("type", "HYPERLINK");
        if !title.is_empty() {
            begin.set_attr("tooltip", title);
        }
        let mut begin_run = self.run_shell(link_caps);
        begin_run.push(begin);
        para.push(begin_run);

        self.render_inlines(para, children, link_caps);

        let mut end_run = self.run_shell(link_caps);
        end_run.push(XmlElement::new("hp:fieldEnd").attr("beginIDRef", field_id.to_string()));
        para.push(end_run);
    }

    fn render_image(
        &mut self,
        para: &mut XmlElement,
        src: &str,
        alt: &str,
        line: usize,
        caps: InlineCaps,
    ) {
        let resolved = match self.resolver {
            Some(resolve) => match resolve(src) {
                Some(bytes) => match BinImage::from_bytes(bytes) {
                    Some(image) => Some(image),
                    None => {
                        self.warnings.push(Warning::new(
                            WarningKind::ImageUnavailable,
                            line,
                            format!("인식할 수 없는 이미지 포맷: {}", src),
                        ));
                        None
                    }
                },
                None => {
                    self.warnings.push(Warning::new(
                        WarningKind::ImageUnavailable,
                        line,
                        format!("이미지 바이트를 가져오지 못함: {}", src),
                    ));
                    None
                }
            },
            None => None,
        };

        let mut run = self.run_shell(caps);
        let pic = match resolved {
            Some(image) => {
                let id = self.bin_items.len() as u32 + 1;
                let (w, h) = image.hwp_size();
                self.bin_items.push(BinItem { id, image });
                build_pic(id, w, h)
            }
            None => build_pic(0, 14_173, 14_173),
        };
        run.push(pic);
        // 대체 텍스트는 이미지를 못 그리는 뷰어를 위한 예비 출력
        run.push(XmlElement::new("hp:t").text(alt));
        para.push(run);

        if !alt.is_empty() {
            self.push_preview(format!("[Image: {}]", alt));
        }
    }

    fn render_footnote_ref(
        &mut self,
        para: &mut XmlElement,
        label: &'a str,
        line: usize,
        caps: InlineCaps,
    ) {
        if self.in_flight.contains(label) {
            let run = self.text_run(caps, &format!("[^{}]", label));
            para.push(run);
            return;
        }
        let Some(blocks) = self.footnotes.get(label).map(|e| e.blocks) else {
            self.warnings.push(Warning::new(
                WarningKind::UnresolvedFootnote,
                line,
                format!("정의가 없는 각주 참조 '[^{}]'", label),
            ));
            let run = self.text_run(caps, &format!("[^{}]", label));
            para.push(run);
            return;
        };
        if let Some(entry) = self.footnotes.get_mut(label) {
            entry.referenced = true;
        }

        let footnote_id = self.footnote_id;
        self.footnote_id += 1;

        self.in_flight.insert(label);
        let mut content = Vec::new();
        let ctx = BlockCtx {
            in_footnote: true,
            ..Default::default()
        };
        for block in blocks {
            self.render_block(block, ctx, &mut content);
        }
        self.in_flight.remove(label);

        if content.is_empty() {
            let mut para = self.make_para(ParaRole::FootnoteDef);
            para.push(self.text_run(InlineCaps::default(), ""));
            content.push(para);
        }

        let mut sub_list = XmlElement::new("hp:subList")
            .attr("id", footnote_id.to_string())
            .attr("lineWrap", "BREAK")
            .attr("textDirection", "HORIZONTAL")
            .attr("vertAlign", "TOP");
        for p in content {
            sub_list.push(p);
        }

        let mut ref_caps = caps;
        ref_caps.footnote_ref = true;
        let mut run = self.run_shell(ref_caps);
        run.push(
            XmlElement::new("hp:footNote")
                .attr("id", footnote_id.to_string())
                .child(sub_list),
        );
        para.push(run);
    }

    // ------------------------------------------------------------------
    // 요소 구성 헬퍼
    // ------------------------------------------------------------------

    /// 새 `hp:p`. 문단 ID는 문서 순서대로 0부터 배정된다.
    pub(crate) fn make_para(&mut self, role: ParaRole) -> XmlElement {
        let id = self.para_id;
        self.para_id += 1;
        XmlElement::new("hp:p")
            .attr("columnBreak", "0")
            .attr("id", id.to_string())
            .attr("merged", "0")
            .attr("pageBreak", "0")
            .attr("paraPrIDRef", self.catalog.para_id(role).to_string())
            .attr("styleIDRef", self.catalog.style_id(role).to_string())
    }

    pub(crate) fn run_shell(&self, caps: InlineCaps) -> XmlElement {
        XmlElement::new("hp:run")
            .attr("charPrIDRef", self.catalog.char_id(caps.resolve()).to_string())
    }

    pub(crate) fn text_run(&self, caps: InlineCaps, text: &str) -> XmlElement {
        self.run_shell(caps).child(XmlElement::new("hp:t").text(text))
    }

    fn apply_indent(&self, para: &mut XmlElement, ctx: BlockCtx) {
        if ctx.indent_level > 0 {
            para.set_attr("indent", (self.base_indent * ctx.indent_level).to_string());
        }
    }

    fn push_preview(&mut self, line: String) {
        if self.preview.len() < PREVIEW_MAX_LINES {
            self.preview.push(line);
        }
    }
}

fn build_pic(bin_id: u32, width: u32, height: u32) -> XmlElement {
    // 본문 폭보다 넓으면 비율 유지 축소
    let (width, height) = if width > CONTENT_WIDTH {
        (
            CONTENT_WIDTH,
            (height as u64 * CONTENT_WIDTH as u64 / width.max(1) as u64) as u32,
        )
    } else {
        (width, height)
    };

    let mut pic = XmlElement::new("hp:pic")
        .attr("numberingType", "PICTURE")
        .attr("reverse", "0")
        .attr("textFlow", "BOTH_SIDES")
        .attr("textWrap", "TOP_AND_BOTTOM");
    pic.push(XmlElement::new("hp:offset").attr("x", "0").attr("y", "0"));
    pic.push(
        XmlElement::new("hp:orgSz")
            .attr("height", height.to_string())
            .attr("width", width.to_string()),
    );
    pic.push(
        XmlElement::new("hp:curSz")
            .attr("height", height.to_string())
            .attr("width", width.to_string()),
    );
    pic.push(
        XmlElement::new("hc:img")
            .attr("alpha", "0")
            .attr("binaryItemIDRef", bin_id.to_string())
            .attr("bright", "0")
            .attr("contrast", "0")
            .attr("effect", "REAL_PIC"),
    );
    pic.push(
        XmlElement::new("hp:sz")
            .attr("height", height.to_string())
            .attr("heightRelTo", "ABSOLUTE")
            .attr("protect", "0")
            .attr("width", width.to_string())
            .attr("widthRelTo", "ABSOLUTE"),
    );
    pic.push(
        XmlElement::new("hp:pos")
            .attr("affectLSpacing", "0")
            .attr("allowOverlap", "0")
            .attr("flowWithText", "1")
            .attr("holdAnchorAndSO", "0")
            .attr("horzAlign", "LEFT")
            .attr("horzOffset", "0")
            .attr("horzRelTo", "PARA")
            .attr("treatAsChar", "1")
            .attr("vertAlign", "TOP")
            .attr("vertOffset", "0")
            .attr("vertRelTo", "PARA"),
    );
    pic.push(
        XmlElement::new("hp:outMargin")
            .attr("bottom", "0")
            .attr("left", "0")
            .attr("right", "0")
            .attr("top", "0"),
    );
    pic
}

/// 섹션 머리 문단에 들어가는 `hp:secPr` + 단 설정 런
fn section_properties_run(catalog: &Catalog) -> XmlElement {
    let mut sec_pr = XmlElement::new("hp:secPr")
        .attr("id", "")
        .attr("memoShapeIDRef", "0")
        .attr("outlineShapeIDRef", "1")
        .attr("spaceColumns", "1134")
        .attr("tabStop", "8000")
        .attr("tabStopUnit", "HWPUNIT")
        .attr("tabStopVal", "4000")
        .attr("textDirection", "HORIZONTAL")
        .attr("textVerticalWidthHead", "0");

    sec_pr.push(
        XmlElement::new("hp:grid")
            .attr("charGrid", "0")
            .attr("lineGrid", "0")
            .attr("wonggojiFormat", "0"),
    );
    sec_pr.push(
        XmlElement::new("hp:startNum")
            .attr("equation", "0")
            .attr("page", "0")
            .attr("pageStartsOn", "BOTH")
            .attr("pic", "0")
            .attr("tbl", "0"),
    );
    sec_pr.push(
        XmlElement::new("hp:visibility")
            .attr("border", "SHOW_ALL")
            .attr("fill", "SHOW_ALL")
            .attr("hideFirstEmptyLine", "0")
            .attr("hideFirstFooter", "0")
            .attr("hideFirstHeader", "0")
            .attr("hideFirstMasterPage", "0")
            .attr("hideFirstPageNum", "0")
            .attr("showLineNumber", "0"),
    );
    sec_pr.push(
        XmlElement::new("hp:pagePr")
            .attr("gutterType", "LEFT_ONLY")
            .attr("height", A4_HEIGHT.to_string())
            .attr("landscape", "WIDELY")
            .attr("width", A4_WIDTH.to_string())
            .child(
                XmlElement::new("hp:margin")
                    .attr("bottom", MARGIN_BOTTOM.to_string())
                    .attr("footer", MARGIN_FOOTER.to_string())
                    .attr("gutter", "0")
                    .attr("header", MARGIN_HEADER.to_string())
                    .attr("left", MARGIN_LEFT.to_string())
                    .attr("right", MARGIN_RIGHT.to_string())
                    .attr("top", MARGIN_TOP.to_string()),
            ),
    );
    sec_pr.push(note_properties("hp:footNotePr", "EACH_COLUMN"));
    sec_pr.push(note_properties("hp:endNotePr", "END_OF_DOCUMENT"));
    for kind in ["BOTH", "EVEN", "ODD"] {
        sec_pr.push(
            XmlElement::new("hp:pageBorderFill")
                .attr("fillArea", "PAPER")
                .attr("footerInside", "0")
                .attr("headerInside", "0")
                .attr("textBorder", "PAPER")
                .attr("type", kind)
                .child(
                    XmlElement::new("hp:offset")
                        .attr("bottom", "1417")
                        .attr("left", "1417")
                        .attr("right", "1417")
                        .attr("top", "1417"),
                ),
        );
    }

    let ctrl = XmlElement::new("hp:ctrl").child(
        XmlElement::new("hp:colPr")
            .attr("colCount", "1")
            .attr("id", "")
            .attr("layout", "LEFT")
            .attr("sameGap", "0")
            .attr("sameSz", "1")
            .attr("type", "NEWSPAPER"),
    );

    XmlElement::new("hp:run")
        .attr(
            "charPrIDRef",
            catalog.char_id(crate::styles::CharRole::Default).to_string(),
        )
        .child(sec_pr)
        .child(ctrl)
}

fn note_properties(name: &str, place: &str) -> XmlElement {
    let mut pr = XmlElement::new(name);
    pr.push(
        XmlElement::new("hp:autoNumFormat")
            .attr("prefixChar", "")
            .attr("suffixChar", ")")
            .attr("supscript", "0")
            .attr("type", "DIGIT")
            .attr("userChar", ""),
    );
    pr.push(
        XmlElement::new("hp:noteLine")
            .attr("color", "#000000")
            .attr("length", "-1")
            .attr("type", "SOLID")
            .attr("width", "0.12 mm"),
    );
    pr.push(
        XmlElement::new("hp:noteSpacing")
            .attr("aboveLine", "850")
            .attr("belowLine", "567")
            .attr("betweenNotes", "283"),
    );
    pr.push(
        XmlElement::new("hp:numbering")
            .attr("newNum", "1")
            .attr("type", "CONTINUOUS"),
    );
    pr.push(
        XmlElement::new("hp:placement")
            .attr("beneathText", "0")
            .attr("place", place),
    );
    pr
}
