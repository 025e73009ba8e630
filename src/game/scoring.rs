use crate::model::{GameState, LetterStatus, MAX_ATTEMPTS, WORD_LENGTH};

/// Final score for a board. Worth nothing unless the last committed row is
/// the solution; a win starts from 1000, loses a point per elapsed second,
/// and earns bonuses for spare rows and for every colored tile on the way
/// down, floored at zero.
pub fn compute_score(state: &GameState) -> u32 {
    let won = state
        .submitted_rows()
        .last()
        .map(|row| {
            row.len() == WORD_LENGTH && row.iter().all(|tile| tile.status == LetterStatus::Correct)
        })
        .unwrap_or(false);
    if !won {
        return 0;
    }

    let mut corrects = 0i64;
    let mut presents = 0i64;
    for row in state.submitted_rows() {
        for tile in row {
            match tile.status {
                LetterStatus::Correct => corrects += 1,
                LetterStatus::Present => presents += 1,
                _ => {}
            }
        }
    }

    let unused_rows = (MAX_ATTEMPTS - state.row_index) as i64;
    let score =
        1000 - state.time_taken as i64 + unused_rows * 100 + corrects * 10 + presents * 5;
    score.max(0) as u32
}
