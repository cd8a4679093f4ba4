use crate::{app::App, config::key_match, date_input::parse_date_filter_input, models::InputMode};
use chrono::Local;
use crossterm::event::KeyEvent;

/// Date filter input. Unlike search this applies on submit, since a
/// half-typed date matches nothing useful.
pub fn handle_date_filter_mode(app: &mut App, key: KeyEvent) {
    let bindings = app.config.keybindings.input.clone();

    if key_match(&key, &bindings.submit) {
        let raw = app.input_line();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            app.apply_date_filter(None);
            app.toast("Date filter cleared.");
            app.transition_to(InputMode::Navigate);
        } else if let Some(date) = parse_date_filter_input(trimmed, Local::now().date_naive()) {
            let formatted = date.format("%Y-%m-%d").to_string();
            app.toast(format!("Showing {formatted}."));
            app.apply_date_filter(Some(formatted));
            app.transition_to(InputMode::Navigate);
        } else {
            // Stay in the mode so the input can be fixed up.
            app.toast(format!("Couldn't read \"{trimmed}\" as a date."));
        }
    } else if key_match(&key, &bindings.cancel) {
        app.transition_to(InputMode::Navigate);
    } else if key_match(&key, &bindings.clear) {
        app.textarea.select_all();
        app.textarea.cut();
    } else {
        app.textarea.input(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Entry;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            date: date.to_string(),
            title: id.to_string(),
            mood: String::new(),
            tags: Vec::new(),
            body: String::new(),
        }
    }

    fn test_app() -> App<'static> {
        let mut app = App::with_deck(
            Config::default(),
            vec![entry("a", "2026-01-16"), entry("b", "2026-01-17")],
        );
        app.transition_to(InputMode::DateFilter);
        app
    }

    fn type_and_submit(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_date_filter_mode(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        handle_date_filter_mode(app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn explicit_date_applies_on_submit() {
        let mut app = test_app();
        type_and_submit(&mut app, "2026-01-17");
        assert!(matches!(app.input_mode, InputMode::Navigate));
        assert_eq!(app.deck.date_filter(), Some("2026-01-17"));
        assert_eq!(app.deck.showing(), 1);
    }

    #[test]
    fn empty_submit_clears_the_filter() {
        let mut app = test_app();
        type_and_submit(&mut app, "2026-01-17");
        app.transition_to(InputMode::DateFilter);
        app.textarea.select_all();
        app.textarea.cut();
        handle_date_filter_mode(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.deck.date_filter(), None);
        assert_eq!(app.deck.showing(), 2);
    }

    #[test]
    fn garbage_stays_in_the_mode_with_a_toast() {
        let mut app = test_app();
        type_and_submit(&mut app, "someday");
        assert!(matches!(app.input_mode, InputMode::DateFilter));
        assert_eq!(app.deck.date_filter(), None);
        assert!(app.toast_message.is_some());
    }

    #[test]
    fn esc_cancels_without_touching_the_filter() {
        let mut app = test_app();
        type_and_submit(&mut app, "2026-01-17");
        app.transition_to(InputMode::DateFilter);
        handle_date_filter_mode(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(app.input_mode, InputMode::Navigate));
        assert_eq!(app.deck.date_filter(), Some("2026-01-17"));
    }
}
