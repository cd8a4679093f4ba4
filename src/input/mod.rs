pub(crate) mod date_filter;
pub(crate) mod navigate;
pub(crate) mod popups;
pub(crate) mod search;

use crate::{app::App, models::InputMode};
use crossterm::event::{self, Event, KeyEventKind};

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Mouse(mouse_event) => match mouse_event.kind {
            event::MouseEventKind::ScrollUp => {
                if app.expanded {
                    app.expanded_scroll = app.expanded_scroll.saturating_sub(1);
                } else {
                    app.scroll_card_up();
                }
            }
            event::MouseEventKind::ScrollDown => {
                if app.expanded {
                    app.expanded_scroll = app.expanded_scroll.saturating_add(1);
                } else {
                    app.scroll_card_down();
                }
            }
            _ => {}
        },
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Popups and the expanded modal take every key while open;
            // deck navigation stays suspended underneath them.
            if popups::handle_popup_events(app, key) {
                return;
            }
            match app.input_mode {
                InputMode::Navigate => navigate::handle_navigate_mode(app, key),
                InputMode::Search => search::handle_search_mode(app, key),
                InputMode::DateFilter => date_filter::handle_date_filter_mode(app, key),
            }
        }
        _ => {}
    }
}
