use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::models::{CARD_TAG_LIMIT, InputMode, pretty_date};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

pub mod color_parser;
pub mod components;
pub mod popups;
pub mod theme;

use components::{highlight_matches, parse_body_spans, wrap_body_line};
use popups::{render_expanded_popup, render_help_popup};

pub fn ui(f: &mut Frame, app: &mut App) {
    let tokens = theme::ThemeTokens::from_theme(&app.config.theme);

    let (card_area, input_area, status_area) = match app.input_mode {
        InputMode::Navigate => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(f.area());
            (chunks[0], None, chunks[1])
        }
        InputMode::Search | InputMode::DateFilter => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(f.area());
            (chunks[0], Some(chunks[1]), chunks[2])
        }
    };

    render_card(f, card_area, app, &tokens);

    if let Some(area) = input_area {
        render_input(f, area, app, &tokens);
    }

    render_status_bar(f, status_area, app, &tokens);

    if app.expanded {
        render_expanded_popup(f, app);
    }
    if app.show_help_popup {
        render_help_popup(f, app);
    }
}

fn search_regex(app: &App) -> Option<Regex> {
    let query = app.search_highlight_query.as_deref()?.trim();
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

fn deck_title(app: &App) -> String {
    let mut title = format!(
        " DECK — {} showing / {} total · {} first ",
        app.deck.showing(),
        app.deck.total(),
        app.deck.sort_order().label()
    );

    if let Some(date) = app.deck.date_filter() {
        title.push_str(&format!("· {date} "));
    }
    let query = app.deck.title_filter().trim();
    if !query.is_empty() {
        title.push_str(&format!("· \"{query}\" "));
    }
    title
}

fn render_card(f: &mut Frame, area: Rect, app: &mut App, tokens: &theme::ThemeTokens) {
    let border_color = if app.deck.has_active_filters() {
        tokens.border_search
    } else {
        tokens.border_default
    };
    let block = Block::default()
        .title(deck_title(app))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(entry) = app.deck.current().cloned() else {
        render_empty_deck(f, inner, app, tokens);
        app.card_body_line_count = 0;
        app.card_viewport_height = 0;
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // date · mood · tags
            Constraint::Length(1),
            Constraint::Min(1),    // body
            Constraint::Length(1), // dots
        ])
        .margin(1)
        .split(inner);

    let regex = search_regex(app);
    let highlight_style = Style::default()
        .bg(tokens.highlight_bg)
        .add_modifier(Modifier::BOLD);

    let title_style = Style::default()
        .fg(tokens.title)
        .add_modifier(Modifier::BOLD);
    let title_spans = match regex.as_ref() {
        Some(regex) => highlight_matches(&entry.title, title_style, highlight_style, regex),
        None => vec![Span::styled(entry.title.clone(), title_style)],
    };
    f.render_widget(Paragraph::new(Line::from(title_spans)), chunks[0]);

    let mut meta_spans = vec![Span::styled(
        pretty_date(&entry.date),
        Style::default().fg(tokens.date),
    )];
    if !entry.mood.is_empty() {
        meta_spans.push(Span::styled(" · ", Style::default().fg(tokens.muted)));
        meta_spans.push(Span::styled(
            entry.mood.clone(),
            Style::default().fg(tokens.mood).add_modifier(Modifier::ITALIC),
        ));
    }
    for tag in entry.tags.iter().take(CARD_TAG_LIMIT) {
        meta_spans.push(Span::raw(" "));
        meta_spans.push(Span::styled(
            format!("#{tag}"),
            Style::default().fg(tokens.tag),
        ));
    }
    if entry.tags.len() > CARD_TAG_LIMIT {
        meta_spans.push(Span::styled(
            format!(" +{}", entry.tags.len() - CARD_TAG_LIMIT),
            Style::default().fg(tokens.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(meta_spans)), chunks[1]);

    let body_area = chunks[3];
    let width = body_area.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for raw_line in entry.body.lines() {
        for wrapped in wrap_body_line(raw_line, width) {
            lines.push(Line::from(parse_body_spans(
                &wrapped,
                tokens,
                regex.as_ref(),
                highlight_style,
            )));
        }
    }

    // The input layer clamps scrolling against these on the next event.
    app.card_body_line_count = lines.len();
    app.card_viewport_height = body_area.height as usize;
    let max_offset = lines.len().saturating_sub(body_area.height as usize);
    if app.card_scroll > max_offset {
        app.card_scroll = max_offset;
    }

    f.render_widget(
        Paragraph::new(lines).scroll((app.card_scroll as u16, 0)),
        body_area,
    );

    render_dots_row(f, chunks[4], app, tokens);
}

fn render_empty_deck(f: &mut Frame, area: Rect, app: &App, tokens: &theme::ThemeTokens) {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "No entries match.",
            Style::default()
                .fg(tokens.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    if app.deck.has_active_filters() {
        lines.push(Line::from(Span::styled(
            "c: clear filters · n: back to newest",
            Style::default().fg(tokens.muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Deck directory is empty: {}", app.config.data.deck_path.display()),
            Style::default().fg(tokens.muted),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn render_dots_row(f: &mut Frame, area: Rect, app: &App, tokens: &theme::ThemeTokens) {
    let Some(cursor) = app.deck.cursor() else {
        return;
    };
    let showing = app.deck.showing();

    let mut spans: Vec<Span> = Vec::new();
    for i in 0..showing {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if i == cursor {
            spans.push(Span::styled(
                "●",
                Style::default()
                    .fg(tokens.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled("○", Style::default().fg(tokens.muted)));
        }
    }
    spans.push(Span::styled(
        format!("  {}/{}", cursor + 1, showing),
        Style::default().fg(tokens.muted),
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_input(f: &mut Frame, area: Rect, app: &mut App, tokens: &theme::ThemeTokens) {
    let title = match app.input_mode {
        InputMode::Search => " Search titles ",
        InputMode::DateFilter => " Filter by date ",
        InputMode::Navigate => "",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.border_search));
    app.textarea.set_block(block);
    app.textarea.set_cursor_line_style(Style::default());
    f.render_widget(&app.textarea, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, tokens: &theme::ThemeTokens) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let mode_label = match app.input_mode {
        InputMode::Navigate => "DECK",
        InputMode::Search => "SEARCH",
        InputMode::DateFilter => "DATE",
    };

    let left_spans = vec![
        Span::styled(
            format!(" {mode_label} "),
            Style::default()
                .fg(tokens.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            "?: help".to_string(),
            Style::default().fg(tokens.muted),
        ),
    ];

    let mut right_plain = String::new();
    let mut right_spans = Vec::new();

    if let Some(toast) = app.toast_message.as_deref()
        && !toast.is_empty()
    {
        right_plain.push_str(toast);
        right_spans.push(Span::styled(
            toast,
            Style::default()
                .fg(tokens.toast)
                .add_modifier(Modifier::BOLD),
        ));
    } else if !app.config.repo.slug.is_empty() {
        let badge = match app.repo_stats.as_ref() {
            Some(stats) => format!("{} · {}", app.config.repo.slug, stats.badge()),
            None => app.config.repo.slug.clone(),
        };
        right_plain.push_str(&badge);
        right_spans.push(Span::styled(badge, Style::default().fg(tokens.muted)));
    }

    if !right_plain.is_empty() {
        right_plain.push(' ');
        right_spans.push(Span::raw(" "));
    }

    let min_left_width = 10u16;
    let mut right_width = UnicodeWidthStr::width(right_plain.as_str()) as u16;
    let max_right = area.width.saturating_sub(min_left_width);
    right_width = right_width.min(max_right);

    if right_plain.is_empty() || right_width == 0 {
        f.render_widget(Paragraph::new(Line::from(left_spans)), area);
        return;
    }

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(left_spans)), status_chunks[0]);
    f.render_widget(
        Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right),
        status_chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Entry;

    fn entry(id: &str, date: &str, title: &str) -> Entry {
        Entry {
            id: id.to_string(),
            date: date.to_string(),
            title: title.to_string(),
            mood: String::new(),
            tags: Vec::new(),
            body: String::new(),
        }
    }

    fn test_app() -> App<'static> {
        App::with_deck(
            Config::default(),
            vec![
                entry("a", "2026-01-16", "Build Log"),
                entry("b", "2026-01-17", "Little polish day"),
            ],
        )
    }

    #[test]
    fn deck_title_shows_counts_and_sort() {
        let app = test_app();
        assert_eq!(deck_title(&app), " DECK — 2 showing / 2 total · newest first ");
    }

    #[test]
    fn deck_title_includes_active_filters() {
        let mut app = test_app();
        app.apply_date_filter(Some("2026-01-17".to_string()));
        app.apply_title_filter("polish".to_string());
        let title = deck_title(&app);
        assert!(title.contains("1 showing / 2 total"));
        assert!(title.contains("2026-01-17"));
        assert!(title.contains("\"polish\""));
    }

    #[test]
    fn search_regex_is_case_insensitive_and_escaped() {
        let mut app = test_app();
        app.apply_title_filter("log".to_string());
        let regex = search_regex(&app).unwrap();
        assert!(regex.is_match("Build LOG"));

        app.apply_title_filter("soft-launch?".to_string());
        let regex = search_regex(&app).unwrap();
        assert!(regex.is_match("Soft-Launch energy"));
        assert!(!regex.is_match("soft launch"));
    }

    #[test]
    fn no_regex_without_a_query() {
        let app = test_app();
        assert!(search_regex(&app).is_none());
    }
}
