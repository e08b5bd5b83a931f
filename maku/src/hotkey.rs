use std::collections::HashMap;

use maku_ipc::Command;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    /// DOM `KeyboardEvent.key` value; single characters are lowercased
    pub key: String,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }
}

pub fn parse_hotkey(key_str: &str) -> Result<Hotkey, String> {
    if key_str.is_empty() {
        return Err("Empty key string".to_string());
    }

    // "-" and "ctrl--" bind the minus key itself
    let (modifier_part, key_part) = if key_str == "-" {
        ("", "-")
    } else if let Some(prefix) = key_str.strip_suffix("--") {
        (prefix, "-")
    } else {
        match key_str.rsplit_once('-') {
            Some((prefix, key)) => (prefix, key),
            None => ("", key_str),
        }
    };

    let mut modifiers = Modifiers::default();
    if !modifier_part.is_empty() {
        for part in modifier_part.split('-') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "opt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
    }

    Ok(Hotkey {
        key: normalize_key(key_part)?,
        modifiers,
    })
}

pub fn format_hotkey(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.ctrl {
        parts.push("ctrl");
    }
    if hotkey.modifiers.alt {
        parts.push("alt");
    }
    if hotkey.modifiers.shift {
        parts.push("shift");
    }
    if hotkey.modifiers.meta {
        parts.push("meta");
    }
    parts.push(key_to_str(&hotkey.key));
    parts.join("-")
}

fn normalize_key(key: &str) -> Result<String, String> {
    if key.is_empty() {
        return Err("Missing key".to_string());
    }
    if key.chars().count() == 1 {
        return Ok(key.to_lowercase());
    }
    let named = match key.to_lowercase().as_str() {
        "space" => " ",
        "esc" | "escape" => "Escape",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "left" => "ArrowLeft",
        "right" => "ArrowRight",
        "up" => "ArrowUp",
        "down" => "ArrowDown",
        "home" => "Home",
        "end" => "End",
        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",
        _ => return Err(format!("Unknown key: {}", key)),
    };
    Ok(named.to_string())
}

fn key_to_str(key: &str) -> &str {
    match key {
        " " => "space",
        "Escape" => "esc",
        "Enter" => "enter",
        "Tab" => "tab",
        "Backspace" => "backspace",
        "Delete" => "delete",
        "ArrowLeft" => "left",
        "ArrowRight" => "right",
        "ArrowUp" => "up",
        "ArrowDown" => "down",
        "Home" => "home",
        "End" => "end",
        other => other,
    }
}

/// Short name of a bindable command, used when listing bindings
pub fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Mount => "mount",
        Command::Unmount => "unmount",
        Command::CenterOverlay => "center-overlay",
        Command::ToggleVisibility => "toggle-visibility",
        Command::Bind { .. } => "bind",
        Command::Unbind { .. } => "unbind",
        Command::ListBindings => "list-bindings",
        Command::GetState => "get-state",
        Command::Quit => "quit",
    }
}

fn is_bindable(command: &Command) -> bool {
    matches!(
        command,
        Command::Mount | Command::Unmount | Command::CenterOverlay | Command::ToggleVisibility
    )
}

pub struct KeyBindings {
    bindings: HashMap<Hotkey, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// `[` centers the overlay, `]` toggles it.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        for (key, command) in [
            ("[", Command::CenterOverlay),
            ("]", Command::ToggleVisibility),
        ] {
            let hotkey = Hotkey {
                key: key.to_string(),
                modifiers: Modifiers::default(),
            };
            bindings.bindings.insert(hotkey, command);
        }
        bindings
    }

    pub fn bind(&mut self, key_str: &str, command: Command) -> Result<(), String> {
        if !is_bindable(&command) {
            return Err(format!("{} cannot be bound to a key", command_name(&command)));
        }
        let hotkey = parse_hotkey(key_str)?;
        tracing::info!("Binding {} to {:?}", key_str, command);
        self.bindings.insert(hotkey, command);
        Ok(())
    }

    pub fn unbind(&mut self, key_str: &str) -> Result<(), String> {
        let hotkey = parse_hotkey(key_str)?;
        if self.bindings.remove(&hotkey).is_none() {
            return Err(format!("No binding for {}", key_str));
        }
        tracing::info!("Unbound {}", key_str);
        Ok(())
    }

    pub fn list_bindings(&self) -> Vec<(String, Command)> {
        let mut list: Vec<(String, Command)> = self
            .bindings
            .iter()
            .map(|(hotkey, cmd)| (format_hotkey(hotkey), cmd.clone()))
            .collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list
    }

    /// Exact match first; a binding without modifiers also matches the key
    /// pressed with modifiers held.
    pub fn lookup(&self, key: &str, modifiers: Modifiers) -> Option<&Command> {
        let key = if key.chars().count() == 1 {
            key.to_lowercase()
        } else {
            key.to_string()
        };
        let exact = Hotkey {
            key: key.clone(),
            modifiers,
        };
        if let Some(command) = self.bindings.get(&exact) {
            return Some(command);
        }
        if modifiers.none() {
            return None;
        }
        self.bindings.get(&Hotkey {
            key,
            modifiers: Modifiers::default(),
        })
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let hotkey = parse_hotkey("[").unwrap();
        assert_eq!(hotkey.key, "[");
        assert!(hotkey.modifiers.none());
    }

    #[test]
    fn test_parse_with_modifiers() {
        let hotkey = parse_hotkey("ctrl-shift-c").unwrap();
        assert_eq!(hotkey.key, "c");
        assert!(hotkey.modifiers.ctrl);
        assert!(hotkey.modifiers.shift);
        assert!(!hotkey.modifiers.alt);
        assert!(!hotkey.modifiers.meta);
    }

    #[test]
    fn test_parse_minus_key() {
        assert_eq!(parse_hotkey("-").unwrap().key, "-");
        let hotkey = parse_hotkey("ctrl--").unwrap();
        assert_eq!(hotkey.key, "-");
        assert!(hotkey.modifiers.ctrl);
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_hotkey("space").unwrap().key, " ");
        assert_eq!(parse_hotkey("esc").unwrap().key, "Escape");
        assert_eq!(parse_hotkey("alt-Left").unwrap().key, "ArrowLeft");
        assert_eq!(parse_hotkey("F5").unwrap().key, "F5");
    }

    #[test]
    fn test_parse_case_insensitive() {
        let hotkey = parse_hotkey("CTRL-A").unwrap();
        assert!(hotkey.modifiers.ctrl);
        assert_eq!(hotkey.key, "a");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_hotkey("").is_err());
        assert!(parse_hotkey("hyper-a").is_err());
        assert!(parse_hotkey("ctrl-pageup").is_err());
        assert!(parse_hotkey("ctrl-").is_err());
    }

    #[test]
    fn test_format_hotkey() {
        let hotkey = parse_hotkey("shift-alt-space").unwrap();
        assert_eq!(format_hotkey(&hotkey), "alt-shift-space");
        assert_eq!(format_hotkey(&parse_hotkey("]").unwrap()), "]");
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::with_defaults();
        assert_eq!(
            bindings.lookup("[", Modifiers::default()),
            Some(&Command::CenterOverlay)
        );
        assert_eq!(
            bindings.lookup("]", Modifiers::default()),
            Some(&Command::ToggleVisibility)
        );
        assert_eq!(bindings.lookup("a", Modifiers::default()), None);
    }

    #[test]
    fn test_lookup_falls_back_to_unmodified_binding() {
        let bindings = KeyBindings::with_defaults();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(bindings.lookup("[", ctrl), Some(&Command::CenterOverlay));
    }

    #[test]
    fn test_lookup_prefers_exact_match() {
        let mut bindings = KeyBindings::with_defaults();
        bindings.bind("ctrl-[", Command::Unmount).unwrap();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(bindings.lookup("[", ctrl), Some(&Command::Unmount));
        assert_eq!(
            bindings.lookup("[", Modifiers::default()),
            Some(&Command::CenterOverlay)
        );
    }

    #[test]
    fn test_lookup_single_char_case_insensitive() {
        let mut bindings = KeyBindings::new();
        bindings.bind("h", Command::ToggleVisibility).unwrap();
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert_eq!(bindings.lookup("H", shift), Some(&Command::ToggleVisibility));
    }

    #[test]
    fn test_bind_rejects_queries() {
        let mut bindings = KeyBindings::new();
        assert!(bindings.bind("a", Command::GetState).is_err());
        assert!(bindings.bind("a", Command::Quit).is_err());
        assert!(bindings.list_bindings().is_empty());
    }

    #[test]
    fn test_unbind() {
        let mut bindings = KeyBindings::with_defaults();
        bindings.unbind("]").unwrap();
        assert_eq!(bindings.lookup("]", Modifiers::default()), None);
        assert!(bindings.unbind("]").is_err());
    }

    #[test]
    fn test_list_bindings_sorted() {
        let bindings = KeyBindings::with_defaults();
        let list = bindings.list_bindings();
        assert_eq!(
            list,
            vec![
                ("[".to_string(), Command::CenterOverlay),
                ("]".to_string(), Command::ToggleVisibility),
            ]
        );
    }
}
