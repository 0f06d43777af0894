//! Structured document model shared by every export format.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Level 1..=3; deeper markdown headings are folded into 3.
    Heading { level: u8, text: String },
    Paragraph(String),
    NumberedItem { number: u64, text: String },
    BulletItem(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub metadata: Vec<(String, String)>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>, metadata: Vec<(String, String)>) -> Self {
        Self {
            title: title.into(),
            metadata,
            blocks: Vec::new(),
        }
    }

    /// Build from markdown using pulldown-cmark events. Inline formatting is
    /// flattened to plain text.
    pub fn from_markdown(title: impl Into<String>, metadata: Vec<(String, String)>, source: &str) -> Self {
        let mut builder = MarkdownBuilder::default();
        for event in Parser::new_ext(source, parser_options()) {
            builder.event(event);
        }
        builder.flush();
        Self {
            blocks: builder.blocks,
            ..Self::new(title, metadata)
        }
    }

    /// Build from unformatted AI output.
    ///
    /// Line rules: an all-caps line or a `#` line is a heading, `12. text` is a
    /// numbered item, `•`/`*`/`-` starts a bullet. Other consecutive lines form
    /// a paragraph, ended by a blank line.
    pub fn from_plain_text(title: impl Into<String>, metadata: Vec<(String, String)>, source: &str) -> Self {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in source.lines().map(str::trim) {
            if line.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                continue;
            }
            let block = if let Some((level, text)) = hash_heading(line) {
                Block::Heading { level, text: text.to_string() }
            } else if let Some((number, text)) = numbered_item(line) {
                Block::NumberedItem { number, text: text.to_string() }
            } else if let Some(text) = bullet_item(line) {
                Block::BulletItem(text.to_string())
            } else if is_caps_heading(line) {
                Block::Heading {
                    level: 2,
                    text: line.trim_end_matches(':').to_string(),
                }
            } else {
                paragraph.push(line);
                continue;
            };
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(block);
        }
        flush_paragraph(&mut paragraph, &mut blocks);

        Self {
            blocks,
            ..Self::new(title, metadata)
        }
    }

    /// Pick the builder for generated content: markdown when the text carries
    /// markdown structure, the plain-text heuristics otherwise.
    pub fn from_content(title: impl Into<String>, metadata: Vec<(String, String)>, content: &str) -> Self {
        if looks_like_markdown(content) {
            Self::from_markdown(title, metadata, content)
        } else {
            Self::from_plain_text(title, metadata, content)
        }
    }
}

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts
}

fn looks_like_markdown(content: &str) -> bool {
    content.contains("**")
        || content.contains("__")
        || content
            .lines()
            .map(str::trim_start)
            .any(|l| l.starts_with("# ") || l.starts_with("## ") || l.starts_with("### ") || l.starts_with('|'))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph(collapse(&lines.join(" "))));
        lines.clear();
    }
}

fn hash_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?.trim();
    Some((hashes.min(3) as u8, text))
}

/// `^(\d+)\.\s+(.*)`
fn numbered_item(line: &str) -> Option<(u64, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    let rest = line[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((number, rest.trim_start()))
}

fn bullet_item(line: &str) -> Option<&str> {
    ['•', '*', '-']
        .into_iter()
        .find_map(|marker| line.strip_prefix(marker))
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
}

fn is_caps_heading(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && line.chars().count() <= 80 && letters.iter().all(|c| c.is_uppercase())
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Open {
    Heading(u8),
    Paragraph,
    Item(Option<u64>),
}

#[derive(Default)]
struct MarkdownBuilder {
    blocks: Vec<Block>,
    text: String,
    open: Option<Open>,
    /// Next number of each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
}

impl MarkdownBuilder {
    fn flush(&mut self) {
        let text = collapse(&self.text);
        self.text.clear();
        let Some(open) = self.open.take() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        self.blocks.push(match open {
            Open::Heading(level) => Block::Heading { level, text },
            Open::Paragraph => Block::Paragraph(text),
            Open::Item(Some(number)) => Block::NumberedItem { number, text },
            Open::Item(None) => Block::BulletItem(text),
        });
    }

    fn in_item(&self) -> bool {
        matches!(self.open, Some(Open::Item(_)))
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                self.open = Some(Open::Heading((level as u8).clamp(1, 3)));
            }
            Event::Start(Tag::Paragraph) => {
                // Loose list items wrap their text in paragraphs.
                if !self.in_item() {
                    self.flush();
                    self.open = Some(Open::Paragraph);
                }
            }
            Event::Start(Tag::CodeBlock(_)) | Event::Start(Tag::Table(_)) => {
                self.flush();
                self.open = Some(Open::Paragraph);
            }
            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let number = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let n = *next;
                        *next += 1;
                        Some(n)
                    }
                    _ => None,
                };
                self.open = Some(Open::Item(number));
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
            }
            Event::End(TagEnd::Paragraph) if self.in_item() => self.text.push(' '),
            Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => self.flush(),
            Event::End(TagEnd::TableCell) => self.text.push_str(" | "),
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                let row = self.text.trim().trim_end_matches('|').to_string();
                self.text = row;
                self.open = Some(Open::Paragraph);
                self.flush();
                self.open = Some(Open::Paragraph);
            }
            Event::End(TagEnd::Table) => {
                self.text.clear();
                self.open = None;
            }
            Event::Text(text) | Event::Code(text) => {
                if self.open.is_none() {
                    self.open = Some(Open::Paragraph);
                }
                self.text.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => self.text.push(' '),
            Event::Rule => self.flush(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Vec<(String, String)> {
        vec![("Subject".into(), "Mathematics".into())]
    }

    #[test]
    fn test_markdown_blocks() {
        let doc = Document::from_markdown(
            "Algebra",
            meta(),
            "# Lesson Note\n\nIntro **bold** and `code`\ncontinues.\n\n## Objectives\n\n1. Define a variable\n2. Solve x + 2 = 5\n\n- chalk\n- board\n",
        );
        assert_eq!(doc.title, "Algebra");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading { level: 1, text: "Lesson Note".into() },
                Block::Paragraph("Intro bold and code continues.".into()),
                Block::Heading { level: 2, text: "Objectives".into() },
                Block::NumberedItem { number: 1, text: "Define a variable".into() },
                Block::NumberedItem { number: 2, text: "Solve x + 2 = 5".into() },
                Block::BulletItem("chalk".into()),
                Block::BulletItem("board".into()),
            ]
        );
    }

    #[test]
    fn test_markdown_ordered_list_start_and_loose_items() {
        let doc = Document::from_markdown("t", vec![], "3. first\n\n   more text\n\n4. second\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::NumberedItem { number: 3, text: "first more text".into() },
                Block::NumberedItem { number: 4, text: "second".into() },
            ]
        );
    }

    #[test]
    fn test_markdown_deep_heading_is_folded() {
        let doc = Document::from_markdown("t", vec![], "##### Tiny");
        assert_eq!(doc.blocks, vec![Block::Heading { level: 3, text: "Tiny".into() }]);
    }

    #[test]
    fn test_very_long_hash_run_stays_a_level_three_heading() {
        let line = format!("{} Appendix", "#".repeat(256));
        assert_eq!(hash_heading(&line), Some((3, "Appendix")));
    }

    #[test]
    fn test_plain_text_heuristics() {
        let text = "LESSON OBJECTIVES:\n1. Define a variable\n2.  Solve equations\n\n• Chalk\n* Board\n- Ruler\n\nStudents will work\nin pairs.\n\n## Evaluation\n2023. was a year";
        let doc = Document::from_plain_text("t", vec![], text);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading { level: 2, text: "LESSON OBJECTIVES".into() },
                Block::NumberedItem { number: 1, text: "Define a variable".into() },
                Block::NumberedItem { number: 2, text: "Solve equations".into() },
                Block::BulletItem("Chalk".into()),
                Block::BulletItem("Board".into()),
                Block::BulletItem("Ruler".into()),
                Block::Paragraph("Students will work in pairs.".into()),
                Block::Heading { level: 2, text: "Evaluation".into() },
                Block::NumberedItem { number: 2023, text: "was a year".into() },
            ]
        );
    }

    #[test]
    fn test_plain_text_non_matches() {
        let doc = Document::from_plain_text("t", vec![], "3.5 litres\n-5 degrees\nOK\n#hashtag");
        assert_eq!(doc.blocks, vec![Block::Paragraph("3.5 litres -5 degrees OK #hashtag".into())]);
    }

    #[test]
    fn test_from_content_picks_builder() {
        let md = Document::from_content("t", vec![], "## Aims\n\nText");
        assert_eq!(md.blocks[0], Block::Heading { level: 2, text: "Aims".into() });

        let plain = Document::from_content("t", vec![], "AIMS\n• one");
        assert_eq!(plain.blocks[1], Block::BulletItem("one".into()));
    }
}
