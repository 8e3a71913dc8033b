//! User configuration: the title style, grid shape and keybindings.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/tab-pager/config.toml` (default `~/.config/tab-pager/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tab_pager::{GridConfig, TitlePosition, TitleStyle};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextPage,
    PrevPage,
    SwitchDemo,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the file).
    pub const ALL: &[Action] = &[
        Action::NextPage,
        Action::PrevPage,
        Action::SwitchDemo,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::NextPage => "next_page",
            Action::PrevPage => "prev_page",
            Action::SwitchDemo => "switch_demo",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "next_page" => Some(Action::NextPage),
            "prev_page" => Some(Action::PrevPage),
            "switch_demo" => Some(Action::SwitchDemo),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short form for the status bar (e.g. `"→"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            _ => self.code_name(),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Right"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&self.code_name());
        s
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    fn code_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Right"`, `"q"`, `"Tab"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and the look of the demo.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub style: TitleStyle,
    pub grid: GridConfig,
    pub title_position: TitlePosition,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            style: TitleStyle::default(),
            grid: GridConfig::default(),
            title_position: TitlePosition::Top,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(NextPage, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(PrevPage, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(SwitchDemo, vec![KeyBind::new(Tab, n)]);
        m.insert(
            Quit,
            vec![
                KeyBind::new(Char('q'), n),
                KeyBind::new(Char('c'), KeyModifiers::CONTROL),
            ],
        );

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: page | {}: switch demo | {}: quit | drag to swipe",
            self.short_binding(Action::PrevPage),
            self.short_binding(Action::NextPage),
            self.short_binding(Action::SwitchDemo),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.  Returns the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if config.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Apply one style / grid setting.  Returns `false` when `key` is not a
    /// setting; unparsable values keep the default.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        let style = &mut self.style;
        match key {
            "title_height" => set_parsed(&mut style.height, value),
            "normal_color" => set_parsed(&mut style.normal_color, value),
            "selected_color" => set_parsed(&mut style.selected_color, value),
            "underline_color" => set_parsed(&mut style.underline_color, value),
            "bold" => set_parsed(&mut style.bold, value),
            "scroll_titles" => set_parsed(&mut style.scroll_enabled, value),
            "item_margin" => set_parsed(&mut style.item_margin, value),
            "show_underline" => set_parsed(&mut style.show_underline, value),
            "underline_height" => set_parsed(&mut style.underline_height, value),
            "scale" => set_parsed(&mut style.scale_enabled, value),
            "scale_factor" => set_parsed(&mut style.scale_factor, value),
            "grid_cols" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.grid.cols = v.max(1);
                }
            }
            "grid_rows" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.grid.rows = v.max(1);
                }
            }
            "title_position" => match value {
                "top" => self.title_position = TitlePosition::Top,
                "bottom" => self.title_position = TitlePosition::Bottom,
                _ => tracing::warn!(value, "unknown title_position"),
            },
            _ => return false,
        }
        true
    }

    fn serialise(&self) -> String {
        let style = &self.style;
        let position = match self.title_position {
            TitlePosition::Top => "top",
            TitlePosition::Bottom => "bottom",
        };
        let mut lines = vec![
            "# tab-pager configuration".to_string(),
            String::new(),
            "# Title strip".to_string(),
            format!("title_height = {}", style.height),
            format!("title_position = {position}"),
            format!("normal_color = {}", style.normal_color.to_hex()),
            format!("selected_color = {}", style.selected_color.to_hex()),
            format!("bold = {}", style.bold),
            format!("scroll_titles = {}", style.scroll_enabled),
            format!("item_margin = {}", style.item_margin),
            format!("show_underline = {}", style.show_underline),
            format!("underline_height = {}", style.underline_height),
            format!("underline_color = {}", style.underline_color.to_hex()),
            format!("scale = {}", style.scale_enabled),
            format!("scale_factor = {}", style.scale_factor),
            String::new(),
            "# Grid demo".to_string(),
            format!("grid_cols = {}", self.grid.cols),
            format!("grid_rows = {}", self.grid.rows),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, value: &str) {
    match value.parse() {
        Ok(v) => *slot = v,
        Err(_) => tracing::warn!(value, "ignoring unparsable config value"),
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/tab-pager/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("tab-pager").join("config.toml")
}
