use super::{GameState, KeyboardHints, Statistics};

#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub won: bool,
    pub solution: String,
    pub score: u32,
    pub time_taken: u64,
    pub guesses_used: usize,
}

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    /// Full board snapshot after any visible mutation.
    BoardUpdated(GameState),
    /// Replacement keyboard hint map; consumers swap, never merge.
    HintsUpdated(KeyboardHints),
    StatisticsUpdated(Statistics),
    /// `Some(row)` while the rejected row should shake, then `None` when the
    /// animation window ends.
    RowShakeChanged(Option<usize>),
    /// Elapsed whole seconds, emitted only when the value advances.
    TimeTakenChanged(u64),
    GameCompleted(GameSummary),
}
