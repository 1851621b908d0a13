use crate::core::MenuError;
use crate::tui::action::Action;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps KeyEvents to menu Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(rename = "bindings")]
    bindings_list: Vec<KeyBinding>,

    #[serde(skip)]
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBindings {
    pub fn new(bindings_list: Vec<KeyBinding>) -> Self {
        let bindings_map = Self::build_map(&bindings_list);
        Self {
            bindings_list,
            bindings_map,
        }
    }

    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings_list
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings_map.get(&KeyPattern::from_event(key)).copied()
    }

    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let bindings: KeyBindings = serde_json::from_str(&content)?;
        Ok(Self::new(bindings.bindings_list))
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Keys bound to an action, for the hint line
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }

    pub fn get_unbound_actions(&self) -> Vec<(Action, &'static str)> {
        let bound: HashSet<Action> = self.bindings_list.iter().map(|b| b.action).collect();
        Action::all()
            .into_iter()
            .filter(|action| !bound.contains(action))
            .map(|action| (action, action.description()))
            .collect()
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen: HashMap<&str, Action> = HashMap::new();
        for binding in &self.bindings_list {
            match seen.get(binding.key.as_str()) {
                Some(existing) if *existing != binding.action => warnings.push(format!(
                    "Duplicate key '{}': bound to both {:?} and {:?}",
                    binding.key, existing, binding.action
                )),
                Some(_) => {}
                None => {
                    seen.insert(binding.key.as_str(), binding.action);
                }
            }
        }

        for (action, _) in self.get_unbound_actions() {
            warnings.push(format!("No key bound to {:?}", action));
        }

        for binding in &self.bindings_list {
            if let Err(e) = KeyPattern::from_string(&binding.key) {
                warnings.push(e.to_string());
            }
        }

        warnings
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(vec![
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("Shift+Tab", Action::MoveUp),
            KeyBinding::new("Tab", Action::MoveDown),
            KeyBinding::new("Home", Action::Home),
            KeyBinding::new("End", Action::End),
            KeyBinding::new("Enter", Action::Confirm),
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("c", Action::Copy),
            KeyBinding::new("Ctrl+c", Action::Quit),
            KeyBinding::new("q", Action::Quit),
        ])
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        // crossterm reports Shift+Tab as BackTab with SHIFT set
        if event.code == KeyCode::BackTab {
            return Self::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        }
        Self::new(event.code, event.modifiers)
    }

    /// Parse from string (e.g. "Ctrl+c", "Shift+Tab", "j")
    pub fn from_string(s: &str) -> Result<Self, MenuError> {
        let invalid = |reason: String| MenuError::InvalidKeyPattern {
            pattern: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split('+').collect();
        let (modifier_parts, key_part) = match parts.split_last() {
            Some((key, mods)) if !key.is_empty() => (mods, *key),
            _ => return Err(invalid("missing key".to_string())),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                other => return Err(invalid(format!("unknown modifier '{other}'"))),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => {
                        if ch.is_ascii_uppercase() {
                            modifiers |= KeyModifiers::SHIFT;
                        }
                        KeyCode::Char(ch)
                    }
                    _ => return Err(invalid(format!("unknown key '{key_part}'"))),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}
