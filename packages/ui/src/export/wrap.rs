//! Greedy word wrap with a pluggable width measure.

/// Break `text` into lines no wider than `max` according to `measure`.
///
/// Whitespace runs collapse to one space. A word wider than `max` is split by
/// characters.
pub fn greedy<F>(text: &str, max: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let space = measure(" ");
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;

    for word in text.split_whitespace() {
        let word_width = measure(word);
        let needed = if line.is_empty() { word_width } else { width + space + word_width };
        if needed <= max {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            width = needed;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        }
        if word_width <= max {
            line.push_str(word);
            width = word_width;
            continue;
        }

        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let ch_width = measure(ch.encode_utf8(&mut buf));
            if !line.is_empty() && width + ch_width > max {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            line.push(ch);
            width += ch_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Column-count measure for monospace text output.
pub fn columns(s: &str) -> f32 {
    s.chars().count() as f32
}
