use crate::models::{Entry, is_valid_entry_date};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

const BUILTIN_DECK: &str = include_str!("../assets/deck.toml");

#[derive(Deserialize, Default)]
struct DeckFile {
    #[serde(default)]
    entry: Vec<Entry>,
}

/// Reads every `*.toml` file in the deck directory (sorted by file name,
/// so multi-file decks have a predictable base order) and concatenates
/// their `[[entry]]` tables. Files that fail to parse are skipped with a
/// warning rather than failing the whole deck.
pub fn load_deck(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    if !dir.is_dir() {
        return Ok(entries);
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|item| item.ok())
        .map(|item| item.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("toml"))
        .collect();
    files.sort();

    for path in files {
        let content = fs::read_to_string(&path)?;
        match toml::from_str::<DeckFile>(&content) {
            Ok(file) => entries.extend(file.entry),
            Err(err) => eprintln!("journaldeck: skipping {}: {err}", path.display()),
        }
    }

    Ok(validate(entries))
}

/// The bundled sample deck, used when the deck directory yields nothing.
pub fn builtin_deck() -> Vec<Entry> {
    match toml::from_str::<DeckFile>(BUILTIN_DECK) {
        Ok(file) => validate(file.entry),
        Err(err) => {
            eprintln!("journaldeck: built-in deck failed to parse: {err}");
            Vec::new()
        }
    }
}

/// Drops entries the viewer can't order (malformed date) and later
/// duplicates of an id (first occurrence wins).
fn validate(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());

    for entry in entries {
        if !is_valid_entry_date(&entry.date) {
            eprintln!(
                "journaldeck: skipping entry {:?}: bad date {:?} (want YYYY-MM-DD)",
                entry.id, entry.date
            );
            continue;
        }
        if !seen_ids.insert(entry.id.clone()) {
            eprintln!("journaldeck: skipping duplicate entry id {:?}", entry.id);
            continue;
        }
        out.push(entry);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "journaldeck-test-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn builtin_deck_parses_and_validates() {
        let deck = builtin_deck();
        assert_eq!(deck.len(), 4);
        assert!(deck.iter().any(|e| e.title == "Build Log"));
        assert!(deck.iter().all(|e| is_valid_entry_date(&e.date)));
    }

    #[test]
    fn missing_directory_is_an_empty_deck() {
        let dir = std::env::temp_dir().join("journaldeck-test-does-not-exist");
        assert!(load_deck(&dir).unwrap().is_empty());
    }

    #[test]
    fn loads_entries_across_files_in_name_order() {
        let dir = scratch_dir("multi");
        fs::write(
            dir.join("b.toml"),
            "[[entry]]\nid = \"b1\"\ndate = \"2026-01-17\"\ntitle = \"Second file\"\n",
        )
        .unwrap();
        fs::write(
            dir.join("a.toml"),
            "[[entry]]\nid = \"a1\"\ndate = \"2026-01-16\"\ntitle = \"First file\"\n",
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let deck = load_deck(&dir).unwrap();
        let ids: Vec<&str> = deck.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn validation_skips_bad_dates_and_duplicate_ids() {
        let dir = scratch_dir("validate");
        fs::write(
            dir.join("deck.toml"),
            concat!(
                "[[entry]]\nid = \"ok\"\ndate = \"2026-01-16\"\ntitle = \"Keeper\"\n",
                "[[entry]]\nid = \"bad\"\ndate = \"01/16/2026\"\ntitle = \"Wrong date\"\n",
                "[[entry]]\nid = \"ok\"\ndate = \"2026-01-17\"\ntitle = \"Dup id\"\n",
            ),
        )
        .unwrap();

        let deck = load_deck(&dir).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].title, "Keeper");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unparseable_file_is_skipped_not_fatal() {
        let dir = scratch_dir("broken");
        fs::write(dir.join("broken.toml"), "this is { not toml").unwrap();
        fs::write(
            dir.join("good.toml"),
            "[[entry]]\nid = \"g\"\ndate = \"2026-01-18\"\ntitle = \"Survivor\"\n",
        )
        .unwrap();

        let deck = load_deck(&dir).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].id, "g");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn optional_fields_default() {
        let dir = scratch_dir("defaults");
        fs::write(
            dir.join("deck.toml"),
            "[[entry]]\nid = \"min\"\ndate = \"2026-01-19\"\ntitle = \"Minimal\"\n",
        )
        .unwrap();

        let deck = load_deck(&dir).unwrap();
        assert_eq!(deck[0].mood, "");
        assert!(deck[0].tags.is_empty());
        assert_eq!(deck[0].body, "");

        let _ = fs::remove_dir_all(&dir);
    }
}
