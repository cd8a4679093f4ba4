use crate::config::Config;
use crate::deck::{DeckView, normalize_title_query};
use crate::integrations::github::{self, RepoStats};
use crate::models::{Entry, InputMode};
use crate::storage;
use chrono::{DateTime, Duration, Local};
use std::sync::mpsc::Receiver;
use tui_textarea::TextArea;

pub const PLACEHOLDER_SEARCH: &str = "Search titles… (Enter keeps, Esc clears)";
pub const PLACEHOLDER_DATE: &str = "YYYY-MM-DD · today · -1w… (empty clears)";

pub struct App<'a> {
    pub input_mode: InputMode,
    pub deck: DeckView,
    pub textarea: TextArea<'a>,
    pub should_quit: bool,

    /// Full-screen view of the current card. While open, deck navigation
    /// is suspended (the popup handler eats the keys).
    pub expanded: bool,
    pub expanded_scroll: usize,

    // Row-based scroll within a card body taller than its viewport.
    // Line count and viewport height are cached during render.
    pub card_scroll: usize,
    pub card_body_line_count: usize,
    pub card_viewport_height: usize,

    pub show_help_popup: bool,

    pub toast_message: Option<String>,
    pub toast_expiry: Option<DateTime<Local>>,

    /// Normalized query echoed into the card as a highlight, when active.
    pub search_highlight_query: Option<String>,

    pub repo_stats: Option<RepoStats>,
    pub repo_stats_receiver: Option<Receiver<Option<RepoStats>>>,

    pub config: Config,
}

impl<'a> App<'a> {
    pub fn new() -> App<'a> {
        let config = Config::load();

        let mut entries = storage::load_deck(&config.data.deck_path).unwrap_or_else(|err| {
            eprintln!("journaldeck: failed to read deck directory: {err}");
            Vec::new()
        });
        if entries.is_empty() {
            entries = storage::builtin_deck();
        }

        let mut app = App::with_deck(config, entries);
        if !app.config.repo.slug.is_empty() {
            app.repo_stats_receiver = Some(github::spawn_stats_fetch(&app.config.repo.slug));
        }
        app
    }

    /// Everything except I/O; tests build their decks through here.
    pub fn with_deck(config: Config, entries: Vec<Entry>) -> App<'a> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER_SEARCH);

        App {
            input_mode: InputMode::Navigate,
            deck: DeckView::new(entries),
            textarea,
            should_quit: false,
            expanded: false,
            expanded_scroll: 0,
            card_scroll: 0,
            card_body_line_count: 0,
            card_viewport_height: 0,
            show_help_popup: false,
            toast_message: None,
            toast_expiry: None,
            search_highlight_query: None,
            repo_stats: None,
            repo_stats_receiver: None,
            config,
        }
    }

    pub fn transition_to(&mut self, mode: InputMode) {
        match mode {
            InputMode::Navigate => {
                self.textarea = TextArea::default();
            }
            InputMode::Search => {
                // Seed with the active query so the filter can be edited
                // instead of retyped.
                self.textarea = TextArea::from([self.deck.title_filter().to_string()]);
                self.textarea.set_placeholder_text(PLACEHOLDER_SEARCH);
                self.textarea
                    .move_cursor(tui_textarea::CursorMove::End);
            }
            InputMode::DateFilter => {
                let seed = self.deck.date_filter().unwrap_or("").to_string();
                self.textarea = TextArea::from([seed]);
                self.textarea.set_placeholder_text(PLACEHOLDER_DATE);
                self.textarea
                    .move_cursor(tui_textarea::CursorMove::End);
            }
        }
        self.input_mode = mode;
    }

    /// First line of the input textarea, i.e. what the user has typed.
    pub fn input_line(&self) -> String {
        self.textarea
            .lines()
            .first()
            .cloned()
            .unwrap_or_default()
    }

    fn reset_card_scroll(&mut self) {
        self.card_scroll = 0;
        self.expanded_scroll = 0;
    }

    pub fn next_card(&mut self) {
        self.deck.next();
        self.reset_card_scroll();
    }

    pub fn prev_card(&mut self) {
        self.deck.prev();
        self.reset_card_scroll();
    }

    pub fn random_card(&mut self) {
        self.deck.jump_random();
        self.reset_card_scroll();
    }

    pub fn jump_to_card(&mut self, index: usize) {
        self.deck.jump_to(index);
        self.reset_card_scroll();
    }

    pub fn first_card(&mut self) {
        self.deck.jump_to(0);
        self.reset_card_scroll();
    }

    pub fn toggle_sort(&mut self) {
        let order = self.deck.sort_order().toggled();
        self.deck.set_sort_order(order);
        self.reset_card_scroll();
        self.toast(format!("Sorted {} first.", order.label()));
    }

    /// The "Newest" button: default sort, both filters cleared.
    pub fn reset_deck(&mut self) {
        self.deck.reset();
        self.search_highlight_query = None;
        self.reset_card_scroll();
        self.toast("Back to newest, filters cleared.");
    }

    pub fn clear_filters(&mut self) {
        if !self.deck.has_active_filters() {
            self.toast("No filters active.");
            return;
        }
        self.deck.set_date_filter(None);
        self.deck.set_title_filter("");
        self.search_highlight_query = None;
        self.reset_card_scroll();
        self.toast("Filters cleared.");
    }

    /// Applied on every keystroke in search mode, like the web deck.
    pub fn apply_title_filter(&mut self, raw: String) {
        let normalized = normalize_title_query(&raw);
        self.search_highlight_query =
            (!normalized.is_empty()).then_some(normalized);
        self.deck.set_title_filter(raw);
        self.reset_card_scroll();
    }

    pub fn apply_date_filter(&mut self, date: Option<String>) {
        self.deck.set_date_filter(date);
        self.reset_card_scroll();
    }

    /// Scroll up within a tall card body.
    pub fn scroll_card_up(&mut self) {
        self.card_scroll = self.card_scroll.saturating_sub(1);
    }

    /// Scroll down within a tall card body, clamped to the last page.
    pub fn scroll_card_down(&mut self) {
        if self.card_body_line_count > self.card_viewport_height && self.card_viewport_height > 0 {
            let max_offset = self
                .card_body_line_count
                .saturating_sub(self.card_viewport_height);
            if self.card_scroll < max_offset {
                self.card_scroll += 1;
            }
        }
    }

    pub fn open_expanded(&mut self) {
        if self.deck.current().is_some() {
            self.expanded = true;
            self.expanded_scroll = 0;
        }
    }

    pub fn close_expanded(&mut self) {
        self.expanded = false;
        self.expanded_scroll = 0;
    }

    pub fn open_repo_page(&mut self) {
        if self.config.repo.slug.is_empty() {
            self.toast("No repository configured.");
            return;
        }
        let url = format!("https://github.com/{}", self.config.repo.slug);
        if let Err(e) = open::that(&url) {
            self.toast(format!("Couldn't open browser: {e}"));
        } else {
            self.toast(format!("Opened {url}"));
        }
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_expiry = Some(Local::now() + Duration::seconds(2));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
