//! Plain-text rendering, wrapped to a fixed column width.

use super::document::{Block, Document};
use super::wrap::{columns, greedy};

pub const TEXT_WIDTH: usize = 80;

/// Wrap `text` after `prefix`, indenting continuation lines to the prefix width.
fn hanging(out: &mut String, prefix: &str, text: &str) {
    let indent = " ".repeat(prefix.chars().count());
    let width = TEXT_WIDTH.saturating_sub(indent.len()).max(1) as f32;
    for (i, line) in greedy(text, width, columns).iter().enumerate() {
        out.push_str(if i == 0 { prefix } else { indent.as_str() });
        out.push_str(line);
        out.push('\n');
    }
}

fn underline(out: &mut String, text: &str, ch: char) {
    for line in greedy(text, TEXT_WIDTH as f32, columns) {
        out.push_str(&line);
        out.push('\n');
    }
    let len = text.chars().count().min(TEXT_WIDTH);
    out.extend(std::iter::repeat(ch).take(len));
    out.push('\n');
}

pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();
    underline(&mut out, &doc.title, '=');
    for (key, value) in &doc.metadata {
        hanging(&mut out, &format!("{key}: "), value);
    }

    let mut previous: Option<&Block> = None;
    for block in &doc.blocks {
        let same_list = matches!(
            (previous, block),
            (Some(Block::NumberedItem { .. }), Block::NumberedItem { .. })
                | (Some(Block::BulletItem(_)), Block::BulletItem(_))
        );
        if !same_list {
            out.push('\n');
        }
        match block {
            Block::Heading { text, .. } => underline(&mut out, text, '-'),
            Block::Paragraph(text) => hanging(&mut out, "", text),
            Block::NumberedItem { number, text } => hanging(&mut out, &format!("{number}. "), text),
            Block::BulletItem(text) => hanging(&mut out, "• ", text),
        }
        previous = Some(block);
    }
    out
}
