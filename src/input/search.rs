use crate::{app::App, config::key_match, models::InputMode};
use crossterm::event::KeyEvent;

/// Title search filters live: every edit reapplies the query so the card
/// under the input always reflects what has been typed so far.
pub fn handle_search_mode(app: &mut App, key: KeyEvent) {
    let bindings = app.config.keybindings.input.clone();

    if key_match(&key, &bindings.submit) {
        // Keep whatever is active and drop back to the deck.
        app.transition_to(InputMode::Navigate);
    } else if key_match(&key, &bindings.cancel) {
        app.apply_title_filter(String::new());
        app.transition_to(InputMode::Navigate);
    } else if key_match(&key, &bindings.clear) {
        app.textarea.select_all();
        app.textarea.cut();
        app.apply_title_filter(String::new());
    } else if app.textarea.input(key) {
        let raw = app.input_line();
        app.apply_title_filter(raw);
    }
}
