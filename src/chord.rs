use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modifier keys held while the chord's key is pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// A key plus modifiers, written as `"alt+j"` or `"command+enter"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyChord {
    pub modifiers: Modifiers,
    /// Lowercased key name, e.g. `j`, `enter`, `/`
    pub key: String,
}

impl KeyChord {
    pub fn new(modifiers: Modifiers, key: &str) -> Self {
        Self {
            modifiers,
            key: normalize_key(key),
        }
    }
}

fn normalize_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "return" => "enter".to_string(),
        "esc" => "escape".to_string(),
        "slash" => "/".to_string(),
        other => other.to_string(),
    }
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty chord".to_string());
        }

        // "+" is only the key when it stands alone or follows a separator ("ctrl++")
        let (mods, key) = if s == "+" {
            ("", "+")
        } else if let Some(head) = s.strip_suffix("++") {
            (head, "+")
        } else {
            match s.rsplit_once('+') {
                Some((_, "")) => return Err("missing key".to_string()),
                Some((head, tail)) => (head, tail),
                None => ("", s),
            }
        };
        if key.trim().is_empty() {
            return Err("missing key".to_string());
        }

        let mut modifiers = Modifiers::default();
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "cmd" | "command" | "meta" | "super" => modifiers.meta = true,
                other => return Err(format!("unknown modifier '{}'", other)),
            }
        }

        Ok(KeyChord::new(modifiers, key.trim()))
    }
}

impl TryFrom<String> for KeyChord {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyChord> for String {
    fn from(chord: KeyChord) -> Self {
        chord.to_string()
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        if m.ctrl {
            f.write_str("ctrl+")?;
        }
        if m.alt {
            f.write_str("alt+")?;
        }
        if m.shift {
            f.write_str("shift+")?;
        }
        if m.meta {
            f.write_str("command+")?;
        }
        f.write_str(&self.key)
    }
}
