//! Key chord parsing for global copy hotkeys.
//!
//! Bindings are written as `"Ctrl+Shift+H"`. Parsing is case-insensitive and
//! modifier order does not matter, so a binding written one way matches a
//! key event the host reports another way.

use std::fmt;
use std::str::FromStr;

/// A key plus the set of modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// The non-modifier key, uppercased (e.g. "H", "F5").
    pub key: String,
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chord = KeyChord {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: String::new(),
        };

        for token in s.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(format!("empty key in chord '{}'", s));
            }

            let flag = match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => &mut chord.ctrl,
                "shift" => &mut chord.shift,
                "alt" | "option" => &mut chord.alt,
                "meta" | "cmd" | "command" | "super" => &mut chord.meta,
                _ => {
                    if !chord.key.is_empty() {
                        return Err(format!("more than one key in chord '{}'", s));
                    }
                    chord.key = token.to_ascii_uppercase();
                    continue;
                }
            };

            if *flag {
                return Err(format!("repeated modifier '{}' in chord '{}'", token, s));
            }
            *flag = true;
        }

        if chord.key.is_empty() {
            return Err(format!("chord '{}' has no key", s));
        }

        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.ctrl, "Ctrl"),
            (self.shift, "Shift"),
            (self.alt, "Alt"),
            (self.meta, "Meta"),
        ];
        for (_, name) in modifiers.iter().filter(|(held, _)| *held) {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}
