//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub refresh: Vec<String>,
    pub clear: Vec<String>,
    pub raise_min_magnitude: Vec<String>,
    pub lower_min_magnitude: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "Ctrl+c".to_string()],
            move_up: vec!["k".to_string(), "Up".to_string()],
            move_down: vec!["j".to_string(), "Down".to_string()],
            next_page: vec!["n".to_string(), "PageDown".to_string()],
            prev_page: vec!["p".to_string(), "PageUp".to_string()],
            open_in_browser: vec!["o".to_string(), "Enter".to_string()],
            refresh: vec!["R".to_string(), "F5".to_string()],
            clear: vec!["c".to_string()],
            raise_min_magnitude: vec!["Plus".to_string(), "=".to_string()],
            lower_min_magnitude: vec!["Minus".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.next_page, Action::NextPage),
            (&self.prev_page, Action::PrevPage),
            (&self.open_in_browser, Action::OpenInBrowser),
            (&self.refresh, Action::Refresh),
            (&self.clear, Action::Clear),
            (&self.raise_min_magnitude, Action::RaiseMinMagnitude),
            (&self.lower_min_magnitude, Action::LowerMinMagnitude),
        ];

        table
            .into_iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|binding| {
        parse_key_string(binding)
            .map(|parsed| parsed.matches(key))
            .unwrap_or(false)
    })
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "="
/// - Special keys: "Enter", "Tab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space",
///   "Plus", "Minus", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        "plus" => Ok(KeyCode::Char('+')),
        "minus" => Ok(KeyCode::Char('-')),
        f if f.starts_with('f') => f[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
