//! # PDF export
//!
//! Two passes over a [`Document`]: [`layout`] positions wrapped lines on
//! pages using the standard Helvetica metrics, then [`render_pdf`] serialises
//! the pages into a minimal PDF 1.4 file. Only the two built-in base-14 fonts
//! are used, so nothing has to be embedded.
//!
//! Text is written in WinAnsi encoding. Characters outside it become `?`.

use store::config::ExportConfig;

use super::document::{Block, Document};
use super::wrap;

/// Page geometry in PDF points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub font_size: f32,
    /// Multiplier of the font size.
    pub line_height: f32,
}

impl From<&ExportConfig> for PageSetup {
    fn from(config: &ExportConfig) -> Self {
        Self {
            width: config.page_width,
            height: config.page_height,
            margin: config.margin,
            font_size: config.font_size,
            line_height: config.line_height,
        }
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl PageSetup {
    fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(self.font_size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// One positioned run of text; `y` is the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct PdfLine {
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PdfPage {
    pub lines: Vec<PdfLine>,
}

// Advance widths for ASCII 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(ch: char, font: Font) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    match ch {
        ' '..='~' => table[ch as usize - 32],
        '•' => 350,
        '—' => 1000,
        '‘' | '’' => 222,
        '“' | '”' => 333,
        '…' => 1000,
        _ => 556,
    }
}

/// Width of `text` in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, font))).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap against Helvetica metrics.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    wrap::greedy(text, max_width, |s| text_width(s, font, size))
}

struct Cursor<'a> {
    setup: &'a PageSetup,
    pages: Vec<PdfPage>,
    current: PdfPage,
    /// Top of the remaining free space on the current page.
    top: f32,
}

impl<'a> Cursor<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            current: PdfPage::default(),
            top: setup.height - setup.margin,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.top = self.setup.height - self.setup.margin;
    }

    /// Reserve one line of `size` and return its baseline.
    fn advance(&mut self, size: f32) -> f32 {
        let height = size * self.setup.line_height;
        if self.top - height < self.setup.margin && !self.current.lines.is_empty() {
            self.new_page();
        }
        let baseline = self.top - size;
        self.top -= height;
        baseline
    }

    fn gap(&mut self, amount: f32) {
        self.top -= amount;
    }

    fn put(&mut self, x: f32, y: f32, font: Font, size: f32, text: String) {
        self.current.lines.push(PdfLine { x, y, font, size, text });
    }

    /// Wrapped text with an optional first-line label hanging left of it.
    fn paragraph(&mut self, label: Option<(&str, Font)>, indent: f32, text: &str, font: Font, size: f32) {
        let x = self.setup.margin + indent;
        let width = self.setup.content_width() - indent;
        let lines = wrap_text(text, font, size, width);
        for (i, line) in lines.into_iter().enumerate() {
            let y = self.advance(size);
            if i == 0 {
                if let Some((label, label_font)) = label {
                    self.put(self.setup.margin, y, label_font, size, label.to_string());
                }
            }
            self.put(x, y, font, size, line);
        }
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.pages.push(self.current);
        self.pages
    }
}

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 1.4,
        2 => 1.25,
        _ => 1.1,
    }
}

/// Position every block on pages.
pub fn layout(doc: &Document, setup: &PageSetup) -> Vec<PdfPage> {
    let size = setup.font_size;
    let mut cursor = Cursor::new(setup);

    cursor.paragraph(None, 0.0, &doc.title, Font::Bold, size * 1.6);
    cursor.gap(size * 0.5);

    let key_width = doc
        .metadata
        .iter()
        .map(|(key, _)| text_width(&format!("{key}: "), Font::Bold, size))
        .fold(0.0_f32, f32::max);
    for (key, value) in &doc.metadata {
        let label = format!("{key}:");
        cursor.paragraph(Some((label.as_str(), Font::Bold)), key_width, value, Font::Regular, size);
    }

    let list_indent = text_width("00. ", Font::Regular, size);
    let mut previous: Option<&Block> = None;
    for block in &doc.blocks {
        let same_list = matches!(
            (previous, block),
            (Some(Block::NumberedItem { .. }), Block::NumberedItem { .. })
                | (Some(Block::BulletItem(_)), Block::BulletItem(_))
        );
        if !same_list {
            cursor.gap(size * 0.6);
        }
        match block {
            Block::Heading { level, text } => {
                cursor.paragraph(None, 0.0, text, Font::Bold, size * heading_scale(*level));
            }
            Block::Paragraph(text) => cursor.paragraph(None, 0.0, text, Font::Regular, size),
            Block::NumberedItem { number, text } => {
                let label = format!("{number}.");
                let indent = list_indent.max(text_width(&format!("{label} "), Font::Regular, size));
                cursor.paragraph(Some((label.as_str(), Font::Regular)), indent, text, Font::Regular, size);
            }
            Block::BulletItem(text) => {
                cursor.paragraph(Some(("•", Font::Regular)), list_indent, text, Font::Regular, size);
            }
        }
        previous = Some(block);
    }
    cursor.finish()
}

/// Escape a string for a PDF literal, encoding it as WinAnsi.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => match win_ansi(ch) {
                Some(byte) => out.push_str(&format!("\\{byte:03o}")),
                None => out.push('?'),
            },
        }
    }
    out.push(')');
    out
}

fn win_ansi(ch: char) -> Option<u8> {
    match ch {
        '€' => Some(0x80),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '\u{a0}'..='\u{ff}' => Some(ch as u8),
        _ => None,
    }
}

fn content_stream(page: &PdfPage) -> String {
    let mut out = String::new();
    for line in &page.lines {
        out.push_str(&format!(
            "BT /{} {:.2} Tf 1 0 0 1 {:.2} {:.2} Tm {} Tj ET\n",
            line.font.resource(),
            line.size,
            line.x,
            line.y,
            pdf_string(&line.text)
        ));
    }
    out
}

/// Serialise a document to PDF bytes.
pub fn render_pdf(doc: &Document, setup: &PageSetup) -> Vec<u8> {
    let pages = layout(doc, setup);

    // 1 catalog, 2 page tree, 3-4 fonts, then a page / contents pair per page.
    let page_id = |i: usize| 5 + 2 * i;
    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", page_id(i)))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    for (i, page) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            setup.width,
            setup.height,
            page_id(i) + 1
        ));
        let stream = content_stream(page);
        objects.push(format!("<< /Length {} >>\nstream\n{}endstream", stream.len(), stream));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    ));
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> PageSetup {
        PageSetup {
            width: 595.0,
            height: 842.0,
            margin: 48.0,
            font_size: 11.0,
            line_height: 1.4,
        }
    }

    fn sample() -> Document {
        Document {
            title: "Mathematics: Algebra".into(),
            metadata: vec![("Subject".into(), "Mathematics".into()), ("Class".into(), "JSS 1".into())],
            blocks: vec![
                Block::Heading { level: 1, text: "Objectives".into() },
                Block::NumberedItem { number: 1, text: "Define a variable ".repeat(10) },
                Block::BulletItem("Chalk (white)".into()),
            ],
        }
    }

    #[test]
    fn test_text_width_uses_metrics() {
        assert_eq!(text_width("i", Font::Regular, 1000.0), 222.0);
        assert_eq!(text_width("W", Font::Bold, 10.0), 9.44);
        assert!(text_width("mmm", Font::Regular, 11.0) > text_width("iii", Font::Regular, 11.0));
    }

    #[test]
    fn test_wrap_text_fits_width() {
        let text = "Students will identify the coefficient and constant term in a linear expression";
        let lines = wrap_text(text, Font::Regular, 11.0, 150.0);
        assert!(lines.len() > 2);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 11.0) <= 150.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_layout_stays_inside_margins() {
        let s = setup();
        let pages = layout(&sample(), &s);
        assert_eq!(pages.len(), 1);
        for line in &pages[0].lines {
            assert!(line.x >= s.margin);
            assert!(line.x + text_width(&line.text, line.font, line.size) <= s.width - s.margin + 0.01);
            assert!(line.y >= s.margin && line.y <= s.height - s.margin);
        }
    }

    #[test]
    fn test_list_items_hang() {
        let s = setup();
        let pages = layout(&sample(), &s);
        let lines = &pages[0].lines;
        let label = lines.iter().position(|l| l.text == "1.").unwrap();
        let first = &lines[label + 1];
        let second = &lines[label + 2];
        assert_eq!(lines[label].x, s.margin);
        assert!(first.x > s.margin);
        assert_eq!(first.x, second.x);
        assert_eq!(first.y, lines[label].y);
        assert!(second.y < first.y);
    }

    #[test]
    fn test_layout_breaks_pages() {
        let mut doc = Document::new("Long", vec![]);
        for i in 0..120 {
            doc.blocks.push(Block::Paragraph(format!("Paragraph number {i}")));
        }
        let s = setup();
        let pages = layout(&doc, &s);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.lines.is_empty());
            assert!(page.lines.iter().all(|l| l.y >= s.margin - 0.01));
        }
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 121);
    }

    #[test]
    fn test_pdf_string_escapes() {
        assert_eq!(pdf_string("a (b) \\"), "(a \\(b\\) \\\\)");
        assert_eq!(pdf_string("• café"), "(\\225 caf\\351)");
        assert_eq!(pdf_string("x ∑ y"), "(x ? y)");
    }

    #[test]
    fn test_render_pdf_structure() {
        let bytes = render_pdf(&sample(), &setup());
        let pdf = String::from_utf8(bytes).unwrap();
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/BaseFont /Helvetica "));
        assert!(pdf.contains("/BaseFont /Helvetica-Bold "));
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("(Chalk \\(white\\)) Tj"));

        // xref entries point at their objects
        let xref_at: usize = pdf
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(pdf[xref_at..].starts_with("xref\n"));
        let first_entry = pdf[xref_at..].lines().nth(3).unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(pdf[offset..].starts_with("1 0 obj"));
    }
}
