//! Deck logic: sort order, date/title filters, and the navigation cursor.
//!
//! Everything here is plain state + pure functions. No I/O, no terminal,
//! no clocks; the UI layers call in and read the result back out. Every
//! operation is total — bad input is clamped or ignored, never an error.

use crate::models::Entry;
use rand::Rng;

/// Title queries are capped so a pasted wall of text can't turn into a
/// pathological substring scan.
pub const TITLE_QUERY_MAX_CHARS: usize = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "newest",
            SortOrder::OldestFirst => "oldest",
        }
    }
}

/// Sanitizes a raw title query: trim, lowercase, keep only letters,
/// digits, whitespace, apostrophes (both kinds), and hyphens, collapse
/// whitespace runs, cap at [`TITLE_QUERY_MAX_CHARS`].
///
/// Idempotent and total; input that is all punctuation comes back empty,
/// which callers treat as "no title constraint".
pub fn normalize_title_query(input: &str) -> String {
    let mut out = String::new();
    let mut pending_space = false;

    for ch in input.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if !(ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}' || ch == '-') {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    if out.chars().count() > TITLE_QUERY_MAX_CHARS {
        out = out.chars().take(TITLE_QUERY_MAX_CHARS).collect();
        // Truncation may land right after a word break; re-trim so the
        // function stays idempotent.
        while out.ends_with(' ') {
            out.pop();
        }
    }

    out
}

/// Returns a new vector ordered by date string. Stable: entries sharing a
/// date keep their relative input order in both directions.
pub fn sort_entries(entries: &[Entry], order: SortOrder) -> Vec<Entry> {
    let mut out = entries.to_vec();
    match order {
        SortOrder::NewestFirst => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::OldestFirst => out.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    out
}

/// Applies the date filter (exact string equality) and the normalized
/// title filter (case-folded substring) conjunctively, preserving input
/// order. A date filter of `None`/empty and a title query that normalizes
/// to empty are both inactive.
pub fn filter_entries(entries: &[Entry], date_filter: Option<&str>, title_query: &str) -> Vec<Entry> {
    let query = normalize_title_query(title_query);
    let date_filter = date_filter.filter(|d| !d.is_empty());

    entries
        .iter()
        .filter(|entry| {
            if let Some(date) = date_filter
                && entry.date != date
            {
                return false;
            }
            if !query.is_empty() && !entry.title.to_lowercase().contains(&query) {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// One viewing session over an immutable deck: sort order, the two
/// filters, and a cursor into the filtered view.
///
/// The cursor is always `0` when the view is empty (the "inert" state);
/// [`DeckView::cursor`] reports `None` then so callers can't index with
/// it. Any sort/filter change rebuilds the view and resets the cursor —
/// the deck never tries to keep "the same card" selected across filter
/// changes.
pub struct DeckView {
    entries: Vec<Entry>,
    sort: SortOrder,
    date_filter: Option<String>,
    title_filter: String,
    cursor: usize,
    visible: Vec<Entry>,
}

impl DeckView {
    pub fn new(entries: Vec<Entry>) -> DeckView {
        let mut view = DeckView {
            entries,
            sort: SortOrder::NewestFirst,
            date_filter: None,
            title_filter: String::new(),
            cursor: 0,
            visible: Vec::new(),
        };
        view.recompute();
        view
    }

    fn recompute(&mut self) {
        let sorted = sort_entries(&self.entries, self.sort);
        self.visible = filter_entries(&sorted, self.date_filter.as_deref(), &self.title_filter);
        self.cursor = 0;
    }

    /// The filtered, sorted view the UI renders.
    pub fn visible(&self) -> &[Entry] {
        &self.visible
    }

    /// Size of the whole deck, filters ignored.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Size of the filtered view ("showing" in the UI).
    pub fn showing(&self) -> usize {
        self.visible.len()
    }

    /// `None` while no entry matches the filters.
    pub fn cursor(&self) -> Option<usize> {
        if self.visible.is_empty() { None } else { Some(self.cursor) }
    }

    pub fn current(&self) -> Option<&Entry> {
        self.visible.get(self.cursor)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn date_filter(&self) -> Option<&str> {
        self.date_filter.as_deref()
    }

    pub fn title_filter(&self) -> &str {
        &self.title_filter
    }

    pub fn has_active_filters(&self) -> bool {
        self.date_filter.is_some() || !normalize_title_query(&self.title_filter).is_empty()
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.visible.len();
    }

    pub fn prev(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = (self.cursor + self.visible.len() - 1) % self.visible.len();
    }

    /// Uniform jump anywhere in the view, current position included.
    pub fn jump_random(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = rand::thread_rng().gen_range(0..self.visible.len());
    }

    /// Out-of-range targets are ignored, never clamped into range.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.visible.len() {
            self.cursor = index;
        }
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort = order;
        self.recompute();
    }

    /// Empty strings clear the filter.
    pub fn set_date_filter(&mut self, date: Option<String>) {
        self.date_filter = date.filter(|d| !d.is_empty());
        self.recompute();
    }

    /// Stores the raw query; normalization happens at filter time so the
    /// UI can echo back exactly what was typed.
    pub fn set_title_filter(&mut self, query: impl Into<String>) {
        self.title_filter = query.into();
        self.recompute();
    }

    /// Back to the default view: newest first, no filters, first card.
    pub fn reset(&mut self) {
        self.sort = SortOrder::NewestFirst;
        self.date_filter = None;
        self.title_filter.clear();
        self.recompute();
    }
}
