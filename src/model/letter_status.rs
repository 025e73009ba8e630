use serde::{Deserialize, Serialize};

/// Feedback color for a single letter. `Pending` is a tile that has been
/// typed but not yet submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
    Pending,
}

impl LetterStatus {
    // precedence when folding keyboard hints; a higher rank never downgrades
    pub fn rank(self) -> u8 {
        match self {
            LetterStatus::Pending => 0,
            LetterStatus::Absent => 1,
            LetterStatus::Present => 2,
            LetterStatus::Correct => 3,
        }
    }
}
