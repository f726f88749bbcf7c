//! 표 핸들러.
//!
//! Markdown 표 블록을 `<hp:tbl>` 서브트리로 변환한다. 열 폭은 전체
//! 쓰기 폭을 균등 분할하고 반올림 나머지는 마지막 열이 흡수한다.
//! 머리글 행 셀은 `header="1"`과 굵은 글자 오버레이를 받고, 열 정렬은
//! 새 스타일 ID 없이 셀 문단의 `align` 속성 오버레이로 붙는다.
//! Markdown 표에는 병합 문법이 없으므로 셀 병합은 출력하지 않는다.

use crate::ast::{ColumnAlign, Inline, Table};
use crate::hwpx::xml::XmlElement;
use crate::renderer::{BlockCtx, Renderer};
use crate::styles::{InlineCaps, ParaRole, TABLE_BORDER_ID};

/// 표 전체 쓰기 폭 기본값 (HWPUNIT)
pub const DEFAULT_TABLE_WIDTH: u32 = 40_000;

/// 표 배치 설정. 옵션 표면에는 노출하지 않고 코드에서 조정한다.
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    pub total_width: u32,
    pub row_height: u32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            total_width: DEFAULT_TABLE_WIDTH,
            row_height: 1000,
        }
    }
}

impl TableLayout {
    /// 균등 분할 열 폭. 마지막 열이 나머지를 흡수한다.
    pub fn column_widths(&self, cols: usize) -> Vec<u32> {
        if cols == 0 {
            return Vec::new();
        }
        let base = self.total_width / cols as u32;
        let mut widths = vec![base; cols];
        widths[cols - 1] = self.total_width - base * (cols as u32 - 1);
        widths
    }
}

impl<'a> Renderer<'a> {
    /// 표 블록을 래핑 문단(`hp:p` > `hp:run` > `hp:tbl`)으로 렌더링한다.
    pub(crate) fn render_table(&mut self, table: &'a Table, _ctx: BlockCtx) -> XmlElement {
        let layout = TableLayout::default();
        let cols = table.alignments.len();

        let mut wrap = self.make_para(ParaRole::Body);
        if cols == 0 {
            wrap.push(self.text_run(InlineCaps::default(), ""));
            return wrap;
        }
        let tbl_id = wrap.get_attr("id").unwrap_or("0").to_string();

        let widths = layout.column_widths(cols);
        let row_cnt = table.rows.len() + 1;

        let mut tbl = XmlElement::new("hp:tbl")
            .attr("borderFillIDRef", TABLE_BORDER_ID.to_string())
            .attr("cellSpacing", "0")
            .attr("colCnt", cols.to_string())
            .attr("id", tbl_id)
            .attr("noAdjust", "0")
            .attr("numberingType", "TABLE")
            .attr("pageBreak", "CELL")
            .attr("repeatHeader", "1")
            .attr("rowCnt", row_cnt.to_string())
            .attr("textFlow", "BOTH_SIDES")
            .attr("textWrap", "TOP_AND_BOTTOM");

        tbl.push(
            XmlElement::new("hp:sz")
                .attr("height", (layout.row_height * row_cnt as u32).to_string())
                .attr("heightRelTo", "ABSOLUTE")
                .attr("protect", "0")
                .attr("width", layout.total_width.to_string())
                .attr("widthRelTo", "ABSOLUTE"),
        );
        tbl.push(
            XmlElement::new("hp:pos")
                .attr("affectLSpacing", "0")
                .attr("allowOverlap", "0")
                .attr("flowWithText", "1")
                .attr("holdAnchorAndSO", "0")
                .attr("horzAlign", "LEFT")
                .attr("horzOffset", "0")
                .attr("horzRelTo", "COLUMN")
                .attr("treatAsChar", "0")
                .attr("vertAlign", "TOP")
                .attr("vertOffset", "0")
                .attr("vertRelTo", "PARA"),
        );
        tbl.push(cell_margin("hp:outMargin", 283));
        tbl.push(cell_margin("hp:inMargin", 142));

        tbl.push(self.render_row(table, &table.header, 0, &widths, &layout, true));
        for (idx, row) in table.rows.iter().enumerate() {
            tbl.push(self.render_row(table, row, idx + 1, &widths, &layout, false));
        }

        let mut run = self.run_shell(InlineCaps::default());
        run.push(tbl);
        run.push(XmlElement::new("hp:t").text(" "));
        wrap.push(run);
        wrap
    }

    fn render_row(
        &mut self,
        table: &'a Table,
        cells: &'a [Vec<Inline>],
        row_addr: usize,
        widths: &[u32],
        layout: &TableLayout,
        header: bool,
    ) -> XmlElement {
        let mut tr = XmlElement::new("hp:tr");
        let cols = table.alignments.len();
        static EMPTY: &[Inline] = &[];

        // 파서가 행 폭을 맞춰 주지만, 어떤 입력에서도 행마다 정확히
        // |alignments|개의 셀을 내보낸다
        for col in 0..cols {
            let content = cells.get(col).map(|c| c.as_slice()).unwrap_or(EMPTY);
            tr.push(self.render_cell(
                content,
                table.alignments[col],
                col,
                row_addr,
                widths[col],
                layout.row_height,
                header,
            ));
        }
        tr
    }

    #[allow(clippy::too_many_arguments)]
    fn render_cell(
        &mut self,
        content: &'a [Inline],
        align: ColumnAlign,
        col_addr: usize,
        row_addr: usize,
        width: u32,
        height: u32,
        header: bool,
    ) -> XmlElement {
        let cell_id = self.cell_id;
        self.cell_id += 1;

        let mut para = self.make_para(ParaRole::TableCell);
        if let Some(value) = align_attr(align) {
            para.set_attr("align", value);
        }
        let caps = InlineCaps {
            bold: header,
            ..Default::default()
        };
        self.render_inlines(&mut para, content, caps);
        if !para.has_children() {
            para.push(self.text_run(caps, ""));
        }

        let sub_list = XmlElement::new("hp:subList")
            .attr("id", cell_id.to_string())
            .attr("lineWrap", "BREAK")
            .attr("textDirection", "HORIZONTAL")
            .attr("vertAlign", "CENTER")
            .child(para);

        XmlElement::new("hp:tc")
            .attr("borderFillIDRef", TABLE_BORDER_ID.to_string())
            .attr("editable", "0")
            .attr("header", if header { "1" } else { "0" })
            .attr("name", "")
            .attr("protect", "0")
            .child(sub_list)
            .child(
                XmlElement::new("hp:cellAddr")
                    .attr("colAddr", col_addr.to_string())
                    .attr("rowAddr", row_addr.to_string()),
            )
            .child(
                XmlElement::new("hp:cellSpan")
                    .attr("colSpan", "1")
                    .attr("rowSpan", "1"),
            )
            .child(
                XmlElement::new("hp:cellSz")
                    .attr("height", height.to_string())
                    .attr("width", width.to_string()),
            )
            .child(cell_margin("hp:cellMargin", 142))
    }
}

fn align_attr(align: ColumnAlign) -> Option<&'static str> {
    match align {
        ColumnAlign::Default => None,
        ColumnAlign::Left => Some("LEFT"),
        ColumnAlign::Center => Some("CENTER"),
        ColumnAlign::Right => Some("RIGHT"),
    }
}

fn cell_margin(name: &str, value: u32) -> XmlElement {
    let v = value.to_string();
    XmlElement::new(name)
        .attr("bottom", v.clone())
        .attr("left", v.clone())
        .attr("right", v.clone())
        .attr("top", v)
}
