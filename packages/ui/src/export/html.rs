//! Standalone HTML rendering.

use super::document::{Block, Document};

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;max-width:48rem;margin:2rem auto;line-height:1.5;color:#1f2937}\
table.meta{border-collapse:collapse;margin-bottom:1.5rem}\
table.meta th{text-align:left;padding:.25rem 1rem .25rem 0;color:#6b7280}\
table.meta td{padding:.25rem 0}";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Clone, Copy, PartialEq)]
enum List {
    Ordered,
    Unordered,
}

fn close_list(out: &mut String, open: &mut Option<List>) {
    match open.take() {
        Some(List::Ordered) => out.push_str("</ol>\n"),
        Some(List::Unordered) => out.push_str("</ul>\n"),
        None => {}
    }
}

/// Render a complete HTML document. Consecutive items of the same kind share
/// one `<ol>` / `<ul>`.
pub fn render_html(doc: &Document) -> String {
    let title = html_escape(&doc.title);
    let mut out = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if !doc.metadata.is_empty() {
        out.push_str("<table class=\"meta\">\n");
        for (key, value) in &doc.metadata {
            out.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                html_escape(key),
                html_escape(value)
            ));
        }
        out.push_str("</table>\n");
    }

    let mut open: Option<List> = None;
    for block in &doc.blocks {
        match block {
            Block::NumberedItem { number, text } => {
                if open != Some(List::Ordered) {
                    close_list(&mut out, &mut open);
                    out.push_str(&format!("<ol start=\"{number}\">\n"));
                    open = Some(List::Ordered);
                }
                out.push_str(&format!("<li>{}</li>\n", html_escape(text)));
            }
            Block::BulletItem(text) => {
                if open != Some(List::Unordered) {
                    close_list(&mut out, &mut open);
                    out.push_str("<ul>\n");
                    open = Some(List::Unordered);
                }
                out.push_str(&format!("<li>{}</li>\n", html_escape(text)));
            }
            Block::Heading { level, text } => {
                close_list(&mut out, &mut open);
                let level = (*level).clamp(1, 3);
                out.push_str(&format!("<h{level}>{}</h{level}>\n", html_escape(text)));
            }
            Block::Paragraph(text) => {
                close_list(&mut out, &mut open);
                out.push_str(&format!("<p>{}</p>\n", html_escape(text)));
            }
        }
    }
    close_list(&mut out, &mut open);
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document {
            title: "Maths <Algebra>".into(),
            metadata: vec![("Class".into(), "JSS 1 & 2".into())],
            blocks: vec![
                Block::Heading { level: 2, text: "Steps".into() },
                Block::NumberedItem { number: 1, text: "a < b".into() },
                Block::NumberedItem { number: 2, text: "b".into() },
                Block::BulletItem("x".into()),
                Block::Paragraph("\"quoted\"".into()),
            ],
        }
    }

    #[test]
    fn test_escapes_text() {
        let html = render_html(&doc());
        assert!(html.contains("<title>Maths &lt;Algebra&gt;</title>"));
        assert!(html.contains("<td>JSS 1 &amp; 2</td>"));
        assert!(html.contains("<li>a &lt; b</li>"));
        assert!(html.contains("<p>&quot;quoted&quot;</p>"));
        assert!(!html.contains("<Algebra>"));
    }

    #[test]
    fn test_groups_lists() {
        let html = render_html(&doc());
        assert_eq!(html.matches("<ol start=\"1\">").count(), 1);
        assert_eq!(html.matches("</ol>").count(), 1);
        assert_eq!(html.matches("<ul>").count(), 1);
        let ol_end = html.find("</ol>").unwrap();
        let ul_start = html.find("<ul>").unwrap();
        assert!(ol_end < ul_start);
        assert!(html.contains("<h2>Steps</h2>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_no_metadata_table_when_empty() {
        let html = render_html(&Document::new("t", vec![]));
        assert!(!html.contains("<table"));
    }
}
