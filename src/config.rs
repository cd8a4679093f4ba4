use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// True when the key event matches any of the configured binding strings
/// (e.g. "ctrl+q", "shift+enter", "left", "/").
pub fn key_match(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|binding| is_match(key, binding))
}

fn is_match(key: &KeyEvent, binding: &str) -> bool {
    let binding = binding.to_lowercase();

    let mut target_modifiers = KeyModifiers::NONE;
    let mut target_code = KeyCode::Null;

    for part in binding.split('+') {
        match part {
            "ctrl" => target_modifiers.insert(KeyModifiers::CONTROL),
            "opt" | "alt" => target_modifiers.insert(KeyModifiers::ALT),
            "shift" => target_modifiers.insert(KeyModifiers::SHIFT),
            "enter" => target_code = KeyCode::Enter,
            "esc" => target_code = KeyCode::Esc,
            "backspace" => target_code = KeyCode::Backspace,
            "tab" => target_code = KeyCode::Tab,
            "space" => target_code = KeyCode::Char(' '),
            "up" => target_code = KeyCode::Up,
            "down" => target_code = KeyCode::Down,
            "left" => target_code = KeyCode::Left,
            "right" => target_code = KeyCode::Right,
            "home" => target_code = KeyCode::Home,
            "end" => target_code = KeyCode::End,
            "pageup" => target_code = KeyCode::PageUp,
            "pagedown" => target_code = KeyCode::PageDown,
            part if part.chars().count() == 1 => {
                if let Some(ch) = part.chars().next() {
                    target_code = KeyCode::Char(ch);
                }
            }
            _ => {}
        }
    }

    let code_matches = if key.code == target_code {
        true
    } else if let (KeyCode::Char(c), KeyCode::Char(tc)) = (key.code, target_code) {
        c.to_lowercase().next() == Some(tc)
    } else {
        false
    };
    if !code_matches {
        return false;
    }

    // Enter must match modifiers exactly so plain Enter and shift+enter
    // can coexist; for other keys Shift is ignored unless asked for
    // (char keys like '?' arrive with SHIFT set on many terminals).
    if target_code == KeyCode::Enter {
        return key.modifiers == target_modifiers;
    }

    let mut key_mods = key.modifiers;
    if !target_modifiers.contains(KeyModifiers::SHIFT) {
        key_mods.remove(KeyModifiers::SHIFT);
    }
    key_mods.contains(target_modifiers)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("co", "missjess", "journaldeck")
}

fn default_deck_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("JOURNALDECK_DECK_DIR") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.data_dir().join("deck");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".journaldeck")
        .join("deck")
}

pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("JOURNALDECK_CONFIG") {
        return PathBuf::from(path);
    }
    if let Some(dirs) = project_dirs() {
        return dirs.config_dir().join("config.toml");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".journaldeck-config.toml")
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub data: DataConfig,
    pub repo: RepoConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub deck_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            deck_path: default_deck_dir(),
        }
    }
}

/// Repository shown as the status-bar badge. Stats are fetched once,
/// best-effort; an empty slug disables the fetch entirely.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RepoConfig {
    pub slug: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            slug: "missjess/journaldeck".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindings {
    pub global: GlobalBindings,
    pub deck: DeckBindings,
    pub input: InputBindings,
    pub popup: PopupBindings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GlobalBindings {
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub search: Vec<String>,
    pub date_filter: Vec<String>,
    pub sort_toggle: Vec<String>,
    pub random: Vec<String>,
    pub reset: Vec<String>,
    pub clear_filters: Vec<String>,
    pub expand: Vec<String>,
    pub open_repo: Vec<String>,
}

impl Default for GlobalBindings {
    fn default() -> Self {
        Self {
            quit: vec!["ctrl+q".to_string(), "q".to_string()],
            help: vec!["?".to_string()],
            search: vec!["/".to_string()],
            date_filter: vec!["d".to_string()],
            sort_toggle: vec!["s".to_string()],
            random: vec!["r".to_string()],
            reset: vec!["n".to_string()],
            clear_filters: vec!["c".to_string()],
            expand: vec!["enter".to_string()],
            open_repo: vec!["o".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DeckBindings {
    pub prev: Vec<String>,
    pub next: Vec<String>,
    pub first: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
}

impl Default for DeckBindings {
    fn default() -> Self {
        Self {
            prev: vec!["left".to_string(), "h".to_string()],
            next: vec!["right".to_string(), "l".to_string()],
            first: vec!["home".to_string()],
            scroll_up: vec!["k".to_string(), "up".to_string()],
            scroll_down: vec!["j".to_string(), "down".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct InputBindings {
    pub submit: Vec<String>,
    pub cancel: Vec<String>,
    pub clear: Vec<String>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            submit: vec!["enter".to_string()],
            cancel: vec!["esc".to_string()],
            clear: vec!["ctrl+l".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PopupBindings {
    pub close: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl Default for PopupBindings {
    fn default() -> Self {
        Self {
            close: vec!["esc".to_string(), "q".to_string()],
            up: vec!["k".to_string(), "up".to_string()],
            down: vec!["j".to_string(), "down".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    pub border_default: String,
    pub border_search: String,
    pub accent: String,
    pub muted: String,
    pub title: String,
    pub date: String,
    pub mood: String,
    pub tag: String,
    pub highlight_bg: String,
    pub toast: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_default: "Reset".to_string(),
            border_search: "Cyan".to_string(),
            accent: "LightBlue".to_string(),
            muted: "DarkGray".to_string(),
            title: "White".to_string(),
            date: "Blue".to_string(),
            mood: "Magenta".to_string(),
            tag: "Yellow".to_string(),
            highlight_bg: "50,50,50".to_string(),
            toast: "Cyan".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = config_path();

        let mut config = if let Ok(content) = fs::read_to_string(&config_path) {
            match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse config.toml ({config_path:?}), using defaults: {e}");
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        let changed = config.normalize_paths();

        if changed || !config_path.exists() {
            let _ = config.save_to_path(&config_path);
        }

        config
    }

    pub fn save_to_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).unwrap_or_default();
        fs::write(path, content)
    }

    fn normalize_paths(&mut self) -> bool {
        let mut changed = false;

        if self.data.deck_path.as_os_str().is_empty() {
            self.data.deck_path = default_deck_dir();
            changed = true;
        }

        if self.data.deck_path.is_relative() {
            self.data.deck_path = default_deck_dir()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.data.deck_path);
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut event = KeyEvent::new(code, modifiers);
        event.kind = KeyEventKind::Press;
        event
    }

    #[test]
    fn matches_plain_char_case_insensitive() {
        let bindings = vec!["q".to_string()];
        assert!(key_match(&key(KeyCode::Char('q'), KeyModifiers::NONE), &bindings));
        assert!(key_match(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT), &bindings));
        assert!(!key_match(&key(KeyCode::Char('x'), KeyModifiers::NONE), &bindings));
    }

    #[test]
    fn matches_modified_keys() {
        let bindings = vec!["ctrl+q".to_string()];
        assert!(key_match(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &bindings));
        assert!(!key_match(&key(KeyCode::Char('q'), KeyModifiers::NONE), &bindings));
    }

    #[test]
    fn enter_requires_exact_modifiers() {
        let plain = vec!["enter".to_string()];
        assert!(key_match(&key(KeyCode::Enter, KeyModifiers::NONE), &plain));
        assert!(!key_match(&key(KeyCode::Enter, KeyModifiers::SHIFT), &plain));

        let shifted = vec!["shift+enter".to_string()];
        assert!(key_match(&key(KeyCode::Enter, KeyModifiers::SHIFT), &shifted));
        assert!(!key_match(&key(KeyCode::Enter, KeyModifiers::NONE), &shifted));
    }

    #[test]
    fn matches_named_keys() {
        assert!(key_match(
            &key(KeyCode::Left, KeyModifiers::NONE),
            &["left".to_string()]
        ));
        assert!(key_match(
            &key(KeyCode::Esc, KeyModifiers::NONE),
            &["esc".to_string()]
        ));
    }

    #[test]
    fn any_binding_in_the_list_matches() {
        let bindings = vec!["left".to_string(), "h".to_string()];
        assert!(key_match(&key(KeyCode::Char('h'), KeyModifiers::NONE), &bindings));
        assert!(key_match(&key(KeyCode::Left, KeyModifiers::NONE), &bindings));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.keybindings.global.quit, config.keybindings.global.quit);
        assert_eq!(back.repo.slug, config.repo.slug);
    }

    #[test]
    fn unknown_theme_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[theme]\naccent = \"Green\"\n").unwrap();
        assert_eq!(config.theme.accent, "Green");
        assert_eq!(config.theme.mood, Theme::default().mood);
    }
}
