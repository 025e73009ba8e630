use std::collections::HashMap;

use super::{LetterStatus, Tile};

/// Best-known status per letter, for coloring an on-screen keyboard. The
/// map is rebuilt wholesale from the committed rows after every submission
/// and on resume, so both paths agree; a letter's hint never downgrades.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardHints {
    statuses: HashMap<char, LetterStatus>,
}

impl KeyboardHints {
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<Tile>>,
    {
        let mut statuses: HashMap<char, LetterStatus> = HashMap::new();
        for row in rows {
            for tile in row {
                if tile.status == LetterStatus::Pending {
                    continue;
                }
                let entry = statuses.entry(tile.letter).or_insert(tile.status);
                if tile.status.rank() > entry.rank() {
                    *entry = tile.status;
                }
            }
        }
        Self { statuses }
    }

    pub fn status_of(&self, letter: char) -> Option<LetterStatus> {
        self.statuses.get(&letter.to_ascii_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
