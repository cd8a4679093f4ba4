use crate::{app::App, config::key_match, models::InputMode};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_navigate_mode(app: &mut App, key: KeyEvent) {
    if key_match(&key, &app.config.keybindings.global.help) {
        app.show_help_popup = true;
    } else if key_match(&key, &app.config.keybindings.global.quit) {
        app.quit();
    } else if key_match(&key, &app.config.keybindings.global.search) {
        app.transition_to(InputMode::Search);
    } else if key_match(&key, &app.config.keybindings.global.date_filter) {
        app.transition_to(InputMode::DateFilter);
    } else if key_match(&key, &app.config.keybindings.global.sort_toggle) {
        app.toggle_sort();
    } else if key_match(&key, &app.config.keybindings.global.random) {
        app.random_card();
    } else if key_match(&key, &app.config.keybindings.global.reset) {
        app.reset_deck();
    } else if key_match(&key, &app.config.keybindings.global.clear_filters) {
        app.clear_filters();
    } else if key_match(&key, &app.config.keybindings.global.expand) {
        app.open_expanded();
    } else if key_match(&key, &app.config.keybindings.global.open_repo) {
        app.open_repo_page();
    } else if key_match(&key, &app.config.keybindings.deck.prev) {
        app.prev_card();
    } else if key_match(&key, &app.config.keybindings.deck.next) {
        app.next_card();
    } else if key_match(&key, &app.config.keybindings.deck.first) {
        app.first_card();
    } else if key_match(&key, &app.config.keybindings.deck.scroll_up) {
        app.scroll_card_up();
    } else if key_match(&key, &app.config.keybindings.deck.scroll_down) {
        app.scroll_card_down();
    } else if let KeyCode::Char(c) = key.code {
        // The dots row doubles as a jump target: 1-9 picks a card.
        if let Some(digit) = c.to_digit(10)
            && digit >= 1
        {
            app.jump_to_card((digit - 1) as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Entry;
    use crossterm::event::KeyModifiers;

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
        App::with_deck(
            Config::default(),
            vec![
                entry("a", "2026-01-16"),
                entry("b", "2026-01-17"),
                entry("c", "2026-01-18"),
            ],
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_navigate_mode(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_move_the_cursor_with_wraparound() {
        let mut app = test_app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.deck.cursor(), Some(1));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.deck.cursor(), Some(2));
    }

    #[test]
    fn digits_jump_to_dots() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.deck.cursor(), Some(2));
        // Out-of-range digit is ignored.
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.deck.cursor(), Some(2));
    }

    #[test]
    fn slash_opens_search_and_d_opens_date_filter() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(app.input_mode, InputMode::Search));

        let mut app = test_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.input_mode, InputMode::DateFilter));
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn enter_expands_the_current_card() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.expanded);
    }
}
