use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tile;

pub const MAX_ATTEMPTS: usize = 6;
pub const WORD_LENGTH: usize = 5;

/// Ceiling for a restored play clock.
const MAX_SAVED_PLAY_SECONDS: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Full state of one playthrough. Fields are readable everywhere but only
/// mutable through the methods below, so consumers of emitted snapshots
/// cannot put the board in an inconsistent state.
#[readonly::make]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Always `MAX_ATTEMPTS` rows; a row is empty until submitted.
    pub guesses: Vec<Vec<Tile>>,
    pub current_guess: String,
    pub solution: String,
    pub status: GameStatus,
    /// Number of submitted rows, which is also the index of the next row.
    pub row_index: usize,
    /// Stays 0 until a win is finalized; always 0 on a loss.
    pub score: u32,
    /// Whole seconds since the game started; frozen on win or loss.
    pub time_taken: u64,
    pub game_id: Uuid,
}

impl GameState {
    pub fn new(solution: &str) -> Self {
        Self {
            guesses: vec![Vec::new(); MAX_ATTEMPTS],
            current_guess: String::new(),
            solution: solution.to_ascii_uppercase(),
            status: GameStatus::Playing,
            row_index: 0,
            score: 0,
            time_taken: 0,
            game_id: Uuid::new_v4(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Appends an already-validated letter; returns false when the row is
    /// full.
    pub fn push_char(&mut self, letter: char) -> bool {
        if self.current_guess.len() < WORD_LENGTH {
            self.current_guess.push(letter.to_ascii_uppercase());
            true
        } else {
            false
        }
    }

    pub fn pop_char(&mut self) -> bool {
        self.current_guess.pop().is_some()
    }

    /// Writes the evaluated row at the cursor, advances it, and clears the
    /// working guess.
    pub fn commit_row(&mut self, tiles: Vec<Tile>) {
        self.guesses[self.row_index] = tiles;
        self.row_index += 1;
        self.current_guess.clear();
    }

    pub fn mark_won(&mut self, score: u32) {
        self.status = GameStatus::Won;
        self.score = score;
    }

    pub fn mark_lost(&mut self) {
        self.status = GameStatus::Lost;
        self.score = 0;
    }

    pub fn set_time_taken(&mut self, seconds: u64) {
        self.time_taken = seconds;
    }

    pub fn submitted_rows(&self) -> impl Iterator<Item = &Vec<Tile>> {
        self.guesses.iter().filter(|row| !row.is_empty())
    }

    /// Uppercases a candidate solution, returning `None` for anything that
    /// is not exactly `WORD_LENGTH` ASCII letters.
    pub fn normalize_solution(word: &str) -> Option<String> {
        let word = word.to_ascii_uppercase();
        if word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(word)
        } else {
            None
        }
    }

    /// Repairs a state loaded from storage: derived fields are recomputed
    /// from the committed rows rather than trusted. Returns false when the
    /// solution itself is unusable and the snapshot must be discarded.
    pub fn reconcile(&mut self) -> bool {
        match Self::normalize_solution(&self.solution) {
            Some(solution) => self.solution = solution,
            None => return false,
        }

        self.guesses.retain(|row| !row.is_empty());
        self.guesses.truncate(MAX_ATTEMPTS);
        self.row_index = self.guesses.len();
        self.guesses.resize(MAX_ATTEMPTS, Vec::new());

        self.current_guess = self.current_guess.to_ascii_uppercase();
        self.current_guess.retain(|c| c.is_ascii_uppercase());
        self.current_guess.truncate(WORD_LENGTH);
        self.time_taken = self.time_taken.min(MAX_SAVED_PLAY_SECONDS);

        if self.status != GameStatus::Playing {
            self.current_guess.clear();
        } else if self.row_index >= MAX_ATTEMPTS {
            // every row consumed without a recorded result
            self.mark_lost();
        }
        true
    }
}
