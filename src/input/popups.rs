use crate::{app::App, config::key_match};
use crossterm::event::{KeyCode, KeyEvent};

/// Returns true when a popup consumed the key. The expanded card and the
/// help popup are modal: while one is open nothing reaches the deck.
pub fn handle_popup_events(app: &mut App, key: KeyEvent) -> bool {
    if app.show_help_popup {
        if key_match(&key, &app.config.keybindings.popup.close) {
            app.show_help_popup = false;
        }
        return true;
    }

    if app.expanded {
        let popup = app.config.keybindings.popup.clone();
        if key_match(&key, &popup.close) || key.code == KeyCode::Enter {
            app.close_expanded();
        } else if key_match(&key, &popup.up) {
            app.expanded_scroll = app.expanded_scroll.saturating_sub(1);
        } else if key_match(&key, &popup.down) {
            app.expanded_scroll = app.expanded_scroll.saturating_add(1);
        }
        return true;
    }

    false
}
