use crate::ui::theme::ThemeTokens;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
};
use unicode_width::UnicodeWidthStr;

/// Helper function to calculate centered popup position
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Styles one already-wrapped body line. Card bodies are markdown-ish:
/// headings, bullet lists, inline code and bare URLs get styled, and an
/// active search query is highlighted wherever it appears.
pub fn parse_body_spans(
    text: &str,
    tokens: &ThemeTokens,
    search_regex: Option<&regex::Regex>,
    search_style: Style,
) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    let leading_len = text.len().saturating_sub(text.trim_start().len());
    if leading_len > 0 {
        spans.push(Span::raw(text[..leading_len].to_string()));
    }

    let content = text.trim_start();
    if content.is_empty() {
        return spans;
    }

    if let Some(heading) = heading_text(content) {
        spans.push(Span::styled(
            heading.to_string(),
            Style::default()
                .fg(tokens.title)
                .add_modifier(Modifier::BOLD),
        ));
        return spans;
    }

    let content = if let Some(stripped) = strip_bullet_marker(content) {
        spans.push(Span::styled(
            "• ".to_string(),
            Style::default()
                .fg(tokens.muted)
                .add_modifier(Modifier::BOLD),
        ));
        stripped
    } else if let Some((marker, stripped)) = split_ordered_list_marker(content) {
        spans.push(Span::styled(
            format!("{marker} "),
            Style::default()
                .fg(tokens.muted)
                .add_modifier(Modifier::BOLD),
        ));
        stripped
    } else {
        content
    };

    // Inline code: split on backticks and style code segments.
    let mut is_code = false;
    for segment in content.split('`') {
        if is_code {
            spans.push(Span::styled(
                segment.to_string(),
                Style::default()
                    .fg(tokens.tag)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.extend(parse_words(segment, tokens, search_regex, search_style));
        }
        is_code = !is_code;
    }

    spans
}

fn strip_bullet_marker(content: &str) -> Option<&str> {
    content
        .strip_prefix("- ")
        .or_else(|| content.strip_prefix("* "))
        .or_else(|| content.strip_prefix("+ "))
}

fn split_ordered_list_marker(line: &str) -> Option<(String, &str)> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 || i + 1 >= bytes.len() {
        return None;
    }

    let punct = bytes[i];
    if (punct == b'.' || punct == b')') && bytes[i + 1] == b' ' {
        // Safe because digits/punct are ASCII.
        Some((line[..i + 1].to_string(), &line[i + 2..]))
    } else {
        None
    }
}

fn heading_text(line: &str) -> Option<&str> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }
    let after = &line[level..];
    if after.starts_with(' ') { Some(line) } else { None }
}

fn parse_words(
    text: &str,
    tokens: &ThemeTokens,
    search_regex: Option<&regex::Regex>,
    search_style: Style,
) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    static URL_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let url_regex = URL_REGEX.get_or_init(|| {
        regex::Regex::new(r"https?://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]").unwrap()
    });

    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".to_string()));
        }

        if word.starts_with('#') && word.len() > 1 {
            spans.push(Span::styled(
                word.to_string(),
                Style::default().fg(tokens.tag).add_modifier(Modifier::BOLD),
            ));
            continue;
        }

        if let Some(mat) = url_regex.find(word) {
            if mat.start() > 0 {
                spans.push(Span::raw(word[..mat.start()].to_string()));
            }
            spans.push(Span::styled(
                word[mat.start()..mat.end()].to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ));
            if mat.end() < word.len() {
                spans.push(Span::raw(word[mat.end()..].to_string()));
            }
            continue;
        }

        if let Some(regex) = search_regex {
            spans.extend(highlight_matches(word, Style::default(), search_style, regex));
        } else {
            spans.push(Span::raw(word.to_string()));
        }
    }

    spans
}

pub fn highlight_matches(
    text: &str,
    base_style: Style,
    search_style: Style,
    regex: &regex::Regex,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for mat in regex.find_iter(text) {
        if mat.start() > last {
            spans.push(Span::styled(
                text[last..mat.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[mat.start()..mat.end()].to_string(),
            base_style.patch(search_style),
        ));
        last = mat.end();
    }
    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base_style));
    }
    if spans.is_empty() {
        spans.push(Span::styled(text.to_string(), base_style));
    }
    spans
}

/// Wraps a body line to the given width, keeping list continuation lines
/// aligned under their text rather than under the marker.
pub fn wrap_body_line(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let (prefix, rest, prefix_width) = split_line_prefix(text);

    // When the prefix already eats the whole line, wrapping can't help.
    if prefix_width >= width {
        return vec![format!("{prefix}{rest}")];
    }

    let available = width.saturating_sub(prefix_width).max(1);
    let wrapped = textwrap::wrap(rest, available);

    if wrapped.is_empty() {
        return vec![prefix];
    }

    let mut out = Vec::with_capacity(wrapped.len());
    for (i, part) in wrapped.iter().enumerate() {
        if i == 0 {
            out.push(format!("{prefix}{part}"));
        } else {
            out.push(format!("{}{}", " ".repeat(prefix_width), part));
        }
    }
    out
}

fn split_line_prefix(text: &str) -> (String, &str, usize) {
    let leading_len = text.len() - text.trim_start().len();
    let leading = &text[..leading_len];
    let rest = &text[leading_len..];

    let marker = if rest.starts_with("- ") || rest.starts_with("* ") || rest.starts_with("+ ") {
        &rest[..2]
    } else if let Some((marker, _)) = split_ordered_list_marker(rest) {
        let len = marker.len() + 1;
        &rest[..len]
    } else {
        ""
    };

    let prefix = format!("{leading}{marker}");
    let width = UnicodeWidthStr::width(prefix.as_str());
    (prefix, &rest[marker.len()..], width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    fn tokens() -> ThemeTokens {
        ThemeTokens::from_theme(&Theme::default())
    }

    fn flatten(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wrap_keeps_short_lines_whole() {
        assert_eq!(wrap_body_line("short line", 40), vec!["short line"]);
    }

    #[test]
    fn wrap_indents_list_continuations() {
        let lines = wrap_body_line("- a bullet with a fairly long tail that wraps", 20);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("- "));
        assert!(lines[1].starts_with("  "));
        assert!(!lines[1].starts_with("- "));
    }

    #[test]
    fn wrap_zero_width_is_identity() {
        assert_eq!(wrap_body_line("anything", 0), vec!["anything"]);
    }

    #[test]
    fn bullets_are_replaced_with_a_dot() {
        let tokens = tokens();
        let spans = parse_body_spans("- tidy the module", &tokens, None, Style::default());
        assert_eq!(flatten(&spans), "• tidy the module");
    }

    #[test]
    fn inline_code_gets_its_own_span() {
        let tokens = tokens();
        let spans = parse_body_spans("run `cargo doc` soon", &tokens, None, Style::default());
        let code = spans
            .iter()
            .find(|s| s.content.as_ref() == "cargo doc")
            .unwrap();
        assert!(code.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn headings_come_back_bold() {
        let tokens = tokens();
        let spans = parse_body_spans("## Next steps", &tokens, None, Style::default());
        assert_eq!(spans.len(), 1);
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn search_matches_are_split_out() {
        let regex = regex::Regex::new("(?i)polish").unwrap();
        let style = Style::default().bg(Color::Rgb(50, 50, 50));
        let spans = highlight_matches("unpolished", Style::default(), style, &regex);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content.as_ref(), "polish");
        assert_eq!(spans[1].style.bg, Some(Color::Rgb(50, 50, 50)));
    }

    #[test]
    fn no_match_returns_one_span() {
        let regex = regex::Regex::new("(?i)zzz").unwrap();
        let spans = highlight_matches("plain", Style::default(), Style::default(), &regex);
        assert_eq!(spans.len(), 1);
    }
}
