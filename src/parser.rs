//! Markdown 파서.
//!
//! `pulldown-cmark`로 토큰화한 이벤트 스트림을 [`crate::ast`]의 블록/인라인
//! 트리로 접는다. 표/취소선/각주/체크리스트 확장을 켜고, 그 외 문법은
//! CommonMark 그대로다. 입력 정규화(BOM 제거, CRLF → LF)를 제외하면
//! I/O가 없고, 같은 입력은 항상 같은 AST를 만든다.
//!
//! 복구 정책: 정렬 행이 깨진 표는 표로 인식되지 않아 문단으로 내려가고,
//! 닫히지 않은 코드 펜스는 입력 끝까지 이어지며, 짝이 안 맞는 강조
//! 구분자는 리터럴 문자가 된다. 행 길이가 선언과 다른 표 몸통 행은
//! 여기서 패딩/절단하고 경고를 남긴다.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::ast::{
    Block, ColumnAlign, Document, EmphasisKind, Inline, ListItem, Table, TaskState,
};
use crate::error::{Warning, WarningKind};

/// Markdown 소스를 문서 AST로 파싱한다.
pub fn parse(source: &str) -> (Document, Vec<Warning>) {
    let text = normalize(source);
    let mut builder = TreeBuilder::new(&text);

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;

    for (event, range) in Parser::new_ext(&text, options).into_offset_iter() {
        builder.handle(event, range.start);
    }

    builder.finish()
}

/// BOM 제거 + 줄 끝 정규화. 탭 확장(4칸 단위)은 CommonMark 규칙대로
/// 토크나이저가 수행한다.
pub fn normalize(source: &str) -> String {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    if !source.contains('\r') {
        return source.to_string();
    }
    source.replace("\r\n", "\n").replace('\r', "\n")
}

// ---------------------------------------------------------------------------
// 이벤트 → 트리 빌더
// ---------------------------------------------------------------------------

/// 열려 있는 컨테이너 하나. 모든 `Start`가 프레임을 하나 밀고 모든
/// `End`가 하나를 꺼내므로, 태그 종류와 무관하게 짝이 유지된다.
enum Frame {
    Paragraph {
        inlines: Vec<Inline>,
    },
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    BlockQuote {
        blocks: Vec<Block>,
    },
    CodeBlock {
        info: String,
        text: String,
    },
    List {
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Item {
        task: TaskState,
        blocks: Vec<Block>,
        /// 타이트 목록에서 문단 래핑 없이 오는 인라인 내용
        inlines: Vec<Inline>,
    },
    FootnoteDefinition {
        label: String,
        line: usize,
        blocks: Vec<Block>,
    },
    Table {
        alignments: Vec<ColumnAlign>,
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
        line: usize,
    },
    TableHead {
        cells: Vec<Vec<Inline>>,
    },
    TableRow {
        cells: Vec<Vec<Inline>>,
    },
    TableCell {
        inlines: Vec<Inline>,
    },
    Emphasis {
        strong: bool,
        inlines: Vec<Inline>,
    },
    Strikethrough {
        inlines: Vec<Inline>,
    },
    Link {
        href: String,
        title: String,
        inlines: Vec<Inline>,
    },
    Image {
        src: String,
        title: String,
        line: usize,
        inlines: Vec<Inline>,
    },
    /// 블록 HTML - 내용을 리터럴 텍스트 문단으로 내린다
    HtmlBlock {
        inlines: Vec<Inline>,
    },
    /// 켜지 않은 확장의 컨테이너. 현재 옵션 집합에서는 나타나지 않는다.
    Other,
}

struct TreeBuilder {
    root: Vec<Block>,
    stack: Vec<Frame>,
    warnings: Vec<Warning>,
    /// 각 행의 시작 바이트 오프셋 (행 번호 계산용)
    line_starts: Vec<usize>,
}

impl TreeBuilder {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            root: Vec::new(),
            stack: Vec::new(),
            warnings: Vec::new(),
            line_starts,
        }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&s| s <= offset)
    }

    fn finish(mut self) -> (Document, Vec<Warning>) {
        // 스택이 비어 있어야 정상이지만, 입력 끝에서 닫히지 않은
        // 컨테이너가 있으면 모두 닫는다
        while !self.stack.is_empty() {
            self.close_top();
        }
        (Document { blocks: self.root }, self.warnings)
    }

    fn handle(&mut self, event: Event<'_>, offset: usize) {
        match event {
            Event::Start(tag) => self.open(tag, offset),
            Event::End(_) => self.close_top(),
            Event::Text(text) => {
                if let Some(Frame::CodeBlock { text: buf, .. }) = self.stack.last_mut() {
                    buf.push_str(&text);
                } else {
                    self.push_inline(Inline::Text(text.to_string()));
                }
            }
            Event::Code(text) => self.push_inline(Inline::Code(text.to_string())),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_inline(Inline::Text(html.to_string()));
            }
            Event::FootnoteReference(label) => {
                let line = self.line_of(offset);
                self.push_inline(Inline::FootnoteReference {
                    label: label.to_string(),
                    line,
                });
            }
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::TaskListMarker(checked) => self.mark_task(checked),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>, offset: usize) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph {
                inlines: Vec::new(),
            },
            Tag::Heading { level, .. } => Frame::Heading {
                level: level as u8,
                inlines: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::BlockQuote {
                blocks: Vec::new(),
            },
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                info: match kind {
                    CodeBlockKind::Fenced(info) => info.trim().to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                text: String::new(),
            },
            Tag::List(start) => Frame::List {
                start,
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                task: TaskState::None,
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
            Tag::FootnoteDefinition(label) => Frame::FootnoteDefinition {
                label: label.to_string(),
                line: self.line_of(offset),
                blocks: Vec::new(),
            },
            Tag::Table(alignments) => Frame::Table {
                alignments: alignments.iter().map(|a| convert_alignment(*a)).collect(),
                header: Vec::new(),
                rows: Vec::new(),
                line: self.line_of(offset),
            },
            Tag::TableHead => Frame::TableHead { cells: Vec::new() },
            Tag::TableRow => Frame::TableRow { cells: Vec::new() },
            Tag::TableCell => Frame::TableCell {
                inlines: Vec::new(),
            },
            Tag::Emphasis => Frame::Emphasis {
                strong: false,
                inlines: Vec::new(),
            },
            Tag::Strong => Frame::Emphasis {
                strong: true,
                inlines: Vec::new(),
            },
            Tag::Strikethrough => Frame::Strikethrough {
                inlines: Vec::new(),
            },
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                href: dest_url.to_string(),
                title: title.to_string(),
                inlines: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
                line: self.line_of(offset),
                inlines: Vec::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock {
                inlines: Vec::new(),
            },
            _ => Frame::Other,
        };
        self.stack.push(frame);
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph { inlines } => {
                self.push_block(Block::Paragraph { content: inlines });
            }
            Frame::Heading { level, inlines } => {
                self.push_block(Block::Heading {
                    level,
                    content: inlines,
                });
            }
            Frame::BlockQuote { blocks } => {
                self.push_block(Block::BlockQuote { children: blocks });
            }
            Frame::CodeBlock { info, text } => {
                self.push_block(Block::CodeBlock { info, text });
            }
            Frame::List { start, items } => {
                let block = match start {
                    Some(start) => Block::OrderedList { start, items },
                    None => Block::BulletList { items },
                };
                self.push_block(block);
            }
            Frame::Item {
                task,
                mut blocks,
                inlines,
            } => {
                if !inlines.is_empty() {
                    blocks.push(Block::Paragraph { content: inlines });
                }
                // 체크 표시는 불릿 목록 항목에서만 유효
                let task = match self.stack.last() {
                    Some(Frame::List { start: None, .. }) => task,
                    _ => TaskState::None,
                };
                let item = ListItem {
                    task,
                    children: blocks,
                };
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(item);
                }
            }
            Frame::FootnoteDefinition {
                label,
                line,
                blocks,
            } => {
                self.push_block(Block::FootnoteDefinition {
                    label,
                    line,
                    children: blocks,
                });
            }
            Frame::Table {
                alignments,
                mut header,
                mut rows,
                line,
            } => {
                let cols = alignments.len();
                self.fix_row_width(&mut header, cols, line);
                for row in &mut rows {
                    self.fix_row_width(row, cols, line);
                }
                self.push_block(Block::Table(Table {
                    alignments,
                    header,
                    rows,
                    line,
                }));
            }
            Frame::TableHead { cells } => {
                if let Some(Frame::Table { header, .. }) = self.stack.last_mut() {
                    *header = cells;
                }
            }
            Frame::TableRow { cells } => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::TableCell { inlines } => {
                match self.stack.last_mut() {
                    Some(Frame::TableHead { cells }) | Some(Frame::TableRow { cells }) => {
                        cells.push(inlines);
                    }
                    _ => {}
                }
            }
            Frame::Emphasis { strong, inlines } => {
                let inline = make_emphasis(strong, inlines);
                self.push_inline(inline);
            }
            Frame::Strikethrough { inlines } => {
                self.push_inline(Inline::Strikethrough(inlines));
            }
            Frame::Link {
                href,
                title,
                inlines,
            } => {
                self.push_inline(Inline::Link {
                    href,
                    title,
                    children: inlines,
                });
            }
            Frame::Image {
                src,
                title,
                line,
                inlines,
            } => {
                let alt = crate::ast::plain_text(&inlines);
                self.push_inline(Inline::Image {
                    src,
                    title,
                    alt,
                    line,
                });
            }
            Frame::HtmlBlock { inlines } => {
                if !inlines.is_empty() {
                    self.push_block(Block::Paragraph { content: inlines });
                }
            }
            Frame::Other => {}
        }
    }

    fn fix_row_width(&mut self, row: &mut Vec<Vec<Inline>>, cols: usize, line: usize) {
        if row.len() != cols {
            self.warnings.push(Warning::new(
                WarningKind::TableShape,
                line,
                format!("표 행의 셀 수({}개)를 열 수({}개)에 맞춤", row.len(), cols),
            ));
            row.resize_with(cols, Vec::new);
        }
    }

    /// 완성된 블록을 가장 가까운 블록 컨테이너에 넣는다
    fn push_block(&mut self, block: Block) {
        for frame in self.stack.iter_mut().rev() {
            match frame {
                Frame::BlockQuote { blocks }
                | Frame::FootnoteDefinition { blocks, .. } => {
                    blocks.push(block);
                    return;
                }
                Frame::Item {
                    blocks, inlines, ..
                } => {
                    // 타이트 항목 인라인이 쌓여 있으면 먼저 문단으로 내린다
                    if !inlines.is_empty() {
                        blocks.push(Block::Paragraph {
                            content: std::mem::take(inlines),
                        });
                    }
                    blocks.push(block);
                    return;
                }
                _ => {}
            }
        }
        self.root.push(block);
    }

    /// 완성된 인라인을 가장 안쪽 인라인 수집기에 넣는다
    fn push_inline(&mut self, inline: Inline) {
        match self.stack.last_mut() {
            Some(Frame::Paragraph { inlines })
            | Some(Frame::Heading { inlines, .. })
            | Some(Frame::TableCell { inlines })
            | Some(Frame::Emphasis { inlines, .. })
            | Some(Frame::Strikethrough { inlines })
            | Some(Frame::Link { inlines, .. })
            | Some(Frame::Image { inlines, .. })
            | Some(Frame::HtmlBlock { inlines })
            | Some(Frame::Item { inlines, .. }) => inlines.push(inline),
            _ => {
                // 열려 있는 인라인 컨테이너가 없으면 단독 문단으로
                self.push_block(Block::Paragraph {
                    content: vec![inline],
                });
            }
        }
    }

    fn mark_task(&mut self, checked: bool) {
        // 마커는 현재 항목에 속한다. 순서 목록이면 리터럴 텍스트로 되돌린다.
        let mut item_idx = None;
        for (idx, frame) in self.stack.iter().enumerate().rev() {
            if matches!(frame, Frame::Item { .. }) {
                item_idx = Some(idx);
                break;
            }
        }
        let Some(idx) = item_idx else {
            return;
        };
        let ordered = idx > 0
            && matches!(
                self.stack.get(idx - 1),
                Some(Frame::List { start: Some(_), .. })
            );
        if ordered {
            let literal = if checked { "[x] " } else { "[ ] " };
            self.push_inline(Inline::Text(literal.to_string()));
            return;
        }
        if let Some(Frame::Item { task, .. }) = self.stack.get_mut(idx) {
            *task = if checked {
                TaskState::Checked
            } else {
                TaskState::Unchecked
            };
        }
    }
}

fn convert_alignment(a: pulldown_cmark::Alignment) -> ColumnAlign {
    match a {
        pulldown_cmark::Alignment::None => ColumnAlign::Default,
        pulldown_cmark::Alignment::Left => ColumnAlign::Left,
        pulldown_cmark::Alignment::Center => ColumnAlign::Center,
        pulldown_cmark::Alignment::Right => ColumnAlign::Right,
    }
}

/// 굵게/기울임이 바로 중첩되면 bold-italic으로 접는다
fn make_emphasis(strong: bool, mut children: Vec<Inline>) -> Inline {
    let collapsible = children.len() == 1
        && matches!(
            (&children[0], strong),
            (
                Inline::Emphasis {
                    kind: EmphasisKind::Italic,
                    ..
                },
                true
            ) | (
                Inline::Emphasis {
                    kind: EmphasisKind::Bold,
                    ..
                },
                false
            )
        );
    if collapsible {
        if let Some(Inline::Emphasis { children: inner, .. }) = children.pop() {
            return Inline::Emphasis {
                kind: EmphasisKind::BoldItalic,
                children: inner,
            };
        }
    }
    Inline::Emphasis {
        kind: if strong {
            EmphasisKind::Bold
        } else {
            EmphasisKind::Italic
        },
        children,
    }
}
