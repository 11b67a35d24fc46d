//! Runtime-agnostic input event types.
//!
//! The web runtime converts DOM keyboard events into these types before
//! handing them to the index filter.

/// Keys the index filter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppKeyCode {
    Char(char),
    Enter,
    Backspace,
    /// Anything else, including "no event".
    #[default]
    Other,
}

impl AppKeyCode {
    /// Converts a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => AppKeyCode::Enter,
            "Backspace" => AppKeyCode::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => AppKeyCode::Char(c),
                    _ => AppKeyCode::Other,
                }
            }
        }
    }

    /// Converts a legacy `KeyboardEvent.keyCode`, for engines without `key`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            13 => AppKeyCode::Enter,
            8 => AppKeyCode::Backspace,
            _ => AppKeyCode::Other,
        }
    }

    /// `true` for the key that jumps straight to the matching entry.
    pub fn is_activate(self) -> bool {
        self == AppKeyCode::Enter
    }
}

#[cfg(test)]
mod tests {
    use super::AppKeyCode;

    #[test]
    fn dom_keys() {
        assert_eq!(AppKeyCode::from_dom_key("Enter"), AppKeyCode::Enter);
        assert_eq!(AppKeyCode::from_dom_key("a"), AppKeyCode::Char('a'));
        assert_eq!(AppKeyCode::from_dom_key("é"), AppKeyCode::Char('é'));
        assert_eq!(AppKeyCode::from_dom_key("Shift"), AppKeyCode::Other);
        assert_eq!(AppKeyCode::from_dom_key(""), AppKeyCode::Other);
        assert_eq!(AppKeyCode::from_dom_key("Escape"), AppKeyCode::Other);
        assert_eq!(AppKeyCode::from_dom_key("Backspace"), AppKeyCode::Backspace);
    }

    #[test]
    fn legacy_key_codes() {
        assert!(AppKeyCode::from_key_code(13).is_activate());
        assert!(!AppKeyCode::from_key_code(65).is_activate());
        assert_eq!(AppKeyCode::from_key_code(8), AppKeyCode::Backspace);
        assert_eq!(AppKeyCode::from_key_code(46), AppKeyCode::Other);
    }
}
