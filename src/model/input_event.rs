#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char), // 'A'-'Z'
    Backspace,
    Enter,
}

impl Key {
    /// Parses the names produced by physical keyboards ("Enter",
    /// "Backspace", "q") and by on-screen keys ("ENTER", "DEL").
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "ENTER" => Some(Key::Enter),
            "BACKSPACE" | "DEL" => Some(Key::Backspace),
            _ => {
                let mut chars = upper.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) if letter.is_ascii_uppercase() => {
                        Some(Key::Letter(letter))
                    }
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Raw key from a physical keyboard.
    KeyPressed(Key),
    /// Key tapped on a rendered on-screen keyboard.
    VirtualKeyPressed(Key),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_action_keys() {
        assert_eq!(Key::from_name("ENTER"), Some(Key::Enter));
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("Backspace"), Some(Key::Backspace));
        assert_eq!(Key::from_name("DEL"), Some(Key::Backspace));
    }

    #[test]
    fn test_from_name_letters_are_uppercased() {
        assert_eq!(Key::from_name("q"), Some(Key::Letter('Q')));
        assert_eq!(Key::from_name("Q"), Some(Key::Letter('Q')));
    }

    #[test]
    fn test_from_name_rejects_everything_else() {
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("1"), None);
        assert_eq!(Key::from_name(" "), None);
        assert_eq!(Key::from_name("Shift"), None);
        assert_eq!(Key::from_name("AB"), None);
    }
}
