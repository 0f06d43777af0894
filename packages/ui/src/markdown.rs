//! Markdown to HTML for chat bubbles and document previews.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Relative URLs and the schemes in `SAFE_SCHEMES` pass; anything else
/// (`javascript:`, `data:`, `vbscript:`) does not. Browsers drop whitespace
/// and control characters inside a scheme, so those are ignored here too.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    match cleaned.find([':', '/', '?', '#']) {
        Some(i) if cleaned[i..].starts_with(':') => {
            let scheme = cleaned[..i].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn neutralise(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Render AI output as HTML. Raw HTML in the source is shown as text, and
/// link or image targets outside http(s) and mailto are replaced by `#`.
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralise(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralise(dest_url),
            title,
            id,
        }),
        other => other,
    });
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_structure() {
        let html = render_markdown("## Aims\n\n1. one\n2. two\n\n**bold**");
        assert!(html.contains("<h2>Aims</h2>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_script_urls_are_neutralised() {
        let html = render_markdown(
            "[Open worksheet](javascript:alert(document.cookie))\n\n\
             ![chart](data:text/html;base64,PHNjcmlwdD4=)\n\n\
             [again](  JavaScript:alert(1))",
        );
        assert!(!html.to_lowercase().contains("javascript:"), "{html}");
        assert!(!html.contains("data:"), "{html}");
        assert!(html.contains(r##"<a href="#">Open worksheet</a>"##), "{html}");
        assert!(html.contains(r##"<img src="#" alt="chart""##), "{html}");

        // autolinks keep their text but not their target
        let html = render_markdown("<javascript:alert(2)>");
        assert!(html.contains(r##"href="#""##), "{html}");
    }

    #[test]
    fn test_safe_urls_are_kept() {
        let html = render_markdown(
            "[syllabus](https://example.org/a?b=1) [mail](mailto:head@school.ng) [next](/detail/7) [top](#aims)",
        );
        assert!(html.contains(r#"href="https://example.org/a?b=1""#), "{html}");
        assert!(html.contains(r#"href="mailto:head@school.ng""#), "{html}");
        assert!(html.contains(r#"href="/detail/7""#), "{html}");
        assert!(html.contains(r##"href="#aims""##), "{html}");
    }

    #[test]
    fn test_url_scheme_check() {
        assert!(is_safe_url("HTTPS://example.org"));
        assert!(is_safe_url("notes/week-1.md"));
        assert!(is_safe_url("/path/with:colon"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url("vbscript:msgbox"));
        assert!(!is_safe_url("data:image/png;base64,AAAA"));
    }
}
