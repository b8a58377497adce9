// src/ui/markdown.rs
//
// Small markdown renderer for the narrative card. Parses with
// pulldown-cmark and renders blocks as wrapped LayoutJobs; covers the
// subset the service actually produces (headings, paragraphs, lists,
// emphasis, inline code, fenced code).
use eframe::egui::text::LayoutJob;
use eframe::egui::{self, Color32, FontId, TextFormat};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq)]
enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem { marker: String },
    CodeBlock,
    Rule,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Span {
    text: String,
    strong: bool,
    emphasis: bool,
    code: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Block {
    kind: BlockKind,
    spans: Vec<Span>,
}

#[derive(Default)]
struct Collector {
    blocks: Vec<Block>,
    kind: Option<BlockKind>,
    spans: Vec<Span>,
    strong: u32,
    emphasis: u32,
    list_stack: Vec<Option<u64>>,
}

impl Collector {
    fn start_block(&mut self, kind: BlockKind) {
        self.flush();
        self.kind = Some(kind);
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.blocks.push(Block {
                kind: self.kind.take().unwrap_or(BlockKind::Paragraph),
                spans: std::mem::take(&mut self.spans),
            });
        }
        self.kind = None;
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        self.spans.push(Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
        });
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        _ => 4,
    }
}

fn parse_blocks(source: &str) -> Vec<Block> {
    let mut c = Collector::default();
    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                c.start_block(BlockKind::Heading(heading_level(level)));
            }
            Event::End(TagEnd::Heading(_)) => c.flush(),
            Event::Start(Tag::Paragraph) => {
                // A paragraph opening a list item keeps the item's marker.
                if !c.spans.is_empty() {
                    c.flush();
                }
            }
            Event::End(TagEnd::Paragraph) => c.flush(),
            Event::Start(Tag::List(start)) => c.list_stack.push(start),
            Event::End(TagEnd::List(_)) => {
                c.list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                let marker = match c.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "\u{2022}".to_string(),
                };
                c.start_block(BlockKind::ListItem { marker });
            }
            Event::End(TagEnd::Item) => c.flush(),
            Event::Start(Tag::CodeBlock(_)) => c.start_block(BlockKind::CodeBlock),
            Event::End(TagEnd::CodeBlock) => {
                if let Some(last) = c.spans.last_mut() {
                    last.text.truncate(last.text.trim_end().len());
                }
                c.flush();
            }
            Event::Start(Tag::Strong) => c.strong += 1,
            Event::End(TagEnd::Strong) => c.strong = c.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => c.emphasis += 1,
            Event::End(TagEnd::Emphasis) => c.emphasis = c.emphasis.saturating_sub(1),
            Event::Text(text) => c.push_text(&text, false),
            Event::Code(text) => c.push_text(&text, true),
            Event::SoftBreak => c.push_text(" ", false),
            Event::HardBreak => c.push_text("\n", false),
            Event::Rule => {
                c.flush();
                c.blocks.push(Block {
                    kind: BlockKind::Rule,
                    spans: Vec::new(),
                });
            }
            _ => {}
        }
    }
    c.flush();
    c.blocks
}

pub fn render(ui: &mut egui::Ui, source: &str) {
    for block in parse_blocks(source) {
        match &block.kind {
            BlockKind::Rule => {
                ui.separator();
            }
            BlockKind::CodeBlock => {
                egui::Frame::none()
                    .fill(ui.visuals().code_bg_color)
                    .rounding(4.0)
                    .inner_margin(egui::Margin::same(8.0))
                    .show(ui, |ui| {
                        ui.label(block_job(ui, &block));
                    });
            }
            BlockKind::Heading(_) => {
                ui.add_space(6.0);
                ui.label(block_job(ui, &block));
                ui.add_space(2.0);
            }
            _ => {
                ui.label(block_job(ui, &block));
            }
        }
        ui.add_space(4.0);
    }
}

fn block_job(ui: &egui::Ui, block: &Block) -> LayoutJob {
    let body_color = ui.visuals().text_color();
    let strong_color = ui.visuals().strong_text_color();
    let code_bg = ui.visuals().code_bg_color;
    let (base_size, heading) = match block.kind {
        BlockKind::Heading(1) => (20.0, true),
        BlockKind::Heading(2) => (17.0, true),
        BlockKind::Heading(_) => (15.0, true),
        _ => (13.5, false),
    };

    let mut job = LayoutJob::default();
    if let BlockKind::ListItem { marker } = &block.kind {
        job.append(
            &format!("{marker} "),
            0.0,
            TextFormat {
                font_id: FontId::proportional(base_size),
                color: strong_color,
                ..Default::default()
            },
        );
    }
    for span in &block.spans {
        let monospace = span.code || block.kind == BlockKind::CodeBlock;
        job.append(
            &span.text,
            0.0,
            TextFormat {
                font_id: if monospace {
                    FontId::monospace(base_size - 1.0)
                } else {
                    FontId::proportional(base_size)
                },
                color: if heading || span.strong {
                    strong_color
                } else {
                    body_color
                },
                background: if span.code { code_bg } else { Color32::TRANSPARENT },
                italics: span.emphasis,
                ..Default::default()
            },
        );
    }
    job
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(block: &Block) -> String {
        block.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn headings_and_paragraphs_split_into_blocks() {
        let blocks = parse_blocks("## Strategy\n\nPods line the north wall.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Heading(2));
        assert_eq!(text_of(&blocks[0]), "Strategy");
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
        assert_eq!(text_of(&blocks[1]), "Pods line the north wall.");
    }

    #[test]
    fn strong_and_emphasis_mark_spans() {
        let blocks = parse_blocks("plain **bold** and *leaning*");
        let spans = &blocks[0].spans;
        assert!(!spans[0].strong && !spans[0].emphasis);
        assert!(spans[1].strong);
        assert_eq!(spans[1].text, "bold");
        assert!(spans[3].emphasis);
        assert_eq!(spans[3].text, "leaning");
    }

    #[test]
    fn bullet_items_get_dot_markers() {
        let blocks = parse_blocks("- first\n- second");
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            assert_eq!(
                block.kind,
                BlockKind::ListItem {
                    marker: "\u{2022}".to_string()
                }
            );
        }
    }

    #[test]
    fn ordered_items_count_up() {
        let blocks = parse_blocks("1. first\n2. second\n3. third");
        let markers: Vec<String> = blocks
            .iter()
            .map(|b| match &b.kind {
                BlockKind::ListItem { marker } => marker.clone(),
                other => panic!("expected list item, got {other:?}"),
            })
            .collect();
        assert_eq!(markers, ["1.", "2.", "3."]);
    }

    #[test]
    fn inline_code_is_flagged() {
        let blocks = parse_blocks("call `generate` once");
        let code: Vec<&Span> = blocks[0].spans.iter().filter(|s| s.code).collect();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].text, "generate");
    }

    #[test]
    fn soft_breaks_join_lines() {
        let blocks = parse_blocks("first line\nsecond line");
        assert_eq!(blocks.len(), 1);
        assert_eq!(text_of(&blocks[0]), "first line second line");
    }
}
