use serde::{Deserialize, Serialize};

use super::LetterStatus;

#[derive(Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tile {
    pub letter: char, // 'A'-'Z'
    pub status: LetterStatus,
}

impl Tile {
    pub fn new(letter: char, status: LetterStatus) -> Self {
        Self { letter, status }
    }

    pub fn pending(letter: char) -> Self {
        Self {
            letter,
            status: LetterStatus::Pending,
        }
    }

    #[cfg(test)]
    /// Build a committed row from letters plus a status string of the same
    /// length, where 'c' = correct, 'p' = present, 'a' = absent.
    pub fn parse_row(letters: &str, statuses: &str) -> Vec<Self> {
        assert_eq!(letters.len(), statuses.len());
        letters
            .chars()
            .zip(statuses.chars())
            .map(|(letter, status)| {
                let status = match status {
                    'c' => LetterStatus::Correct,
                    'p' => LetterStatus::Present,
                    'a' => LetterStatus::Absent,
                    other => panic!("unknown status char: {}", other),
                };
                Self::new(letter.to_ascii_uppercase(), status)
            })
            .collect()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter)
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:?}", self.letter, self.status)
    }
}
