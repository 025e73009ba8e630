#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineCommand {
    /// Load persisted stats and either restore the saved session or start a
    /// fresh game. Sent once by the host after wiring.
    Initialize,
    /// Abandon the current board and start over; `Some` forces the solution
    /// (used by tests and debug tooling).
    NewGame(Option<String>),
    AppendCharacter(char),
    DeleteCharacter,
    SubmitGuess,
}
