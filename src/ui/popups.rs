use crate::app::App;
use crate::models::pretty_date;
use crate::ui::components::{centered_rect, parse_body_spans, wrap_body_line};
use crate::ui::theme::ThemeTokens;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render_help_popup(f: &mut Frame, app: &App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.border_default));
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(2)
        .split(area);

    let bindings = &app.config.keybindings;
    let first = |keys: &[String]| keys.first().cloned().unwrap_or_default();

    let sections: Vec<(&str, Vec<(String, &str)>)> = vec![
        (
            "Deck",
            vec![
                (
                    format!("{} / {}", first(&bindings.deck.prev), first(&bindings.deck.next)),
                    "previous / next card",
                ),
                ("1-9".to_string(), "jump to card"),
                (first(&bindings.global.random), "random card"),
                (first(&bindings.deck.first), "first card"),
                (
                    format!(
                        "{} / {}",
                        first(&bindings.deck.scroll_up),
                        first(&bindings.deck.scroll_down)
                    ),
                    "scroll card body",
                ),
                (first(&bindings.global.expand), "expand card"),
            ],
        ),
        (
            "Filters & sort",
            vec![
                (first(&bindings.global.search), "search titles"),
                (first(&bindings.global.date_filter), "filter by date"),
                (first(&bindings.global.sort_toggle), "toggle sort order"),
                (first(&bindings.global.clear_filters), "clear filters"),
                (first(&bindings.global.reset), "newest + clear all"),
            ],
        ),
        (
            "Other",
            vec![
                (first(&bindings.global.open_repo), "open repository page"),
                (first(&bindings.global.help), "this help"),
                (first(&bindings.global.quit), "quit"),
            ],
        ),
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (title, entries) in &sections {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(tokens.accent)
                .add_modifier(Modifier::BOLD),
        )));
        for (keys, action) in entries {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<12}"), Style::default().fg(tokens.title)),
                Span::styled(action.to_string(), Style::default().fg(tokens.muted)),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner[0]);
    f.render_widget(
        Paragraph::new("Esc / q: close").style(Style::default().fg(tokens.muted)),
        inner[1],
    );
}

/// Full-screen reading view of the current card. Scroll offset is clamped
/// here because the wrapped line count depends on the popup width.
pub fn render_expanded_popup(f: &mut Frame, app: &mut App) {
    let tokens = ThemeTokens::from_theme(&app.config.theme);
    let Some(entry) = app.deck.current().cloned() else {
        return;
    };

    let area = centered_rect(90, 90, f.area());
    let block = Block::default()
        .title(format!(" {} — {} ", entry.title, pretty_date(&entry.date)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tokens.accent));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(inner);
    let body_area = chunks[0];

    let width = body_area.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for raw_line in entry.body.lines() {
        for wrapped in wrap_body_line(raw_line, width) {
            lines.push(Line::from(parse_body_spans(
                &wrapped,
                &tokens,
                None,
                Style::default(),
            )));
        }
    }

    let viewport = body_area.height as usize;
    let max_offset = lines.len().saturating_sub(viewport);
    if app.expanded_scroll > max_offset {
        app.expanded_scroll = max_offset;
    }

    let body = Paragraph::new(lines).scroll((app.expanded_scroll as u16, 0));
    f.render_widget(body, body_area);

    let footer = format!(
        "j/k: scroll · Esc / Enter: close{}",
        if max_offset > 0 {
            format!(" · {}/{}", app.expanded_scroll + 1, max_offset + 1)
        } else {
            String::new()
        }
    );
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(tokens.muted)),
        chunks[1],
    );
}
