mod game_engine_command;
mod game_engine_event;
mod game_state;
mod input_event;
mod keyboard_hints;
mod letter_status;
mod statistics;
mod tile;

pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::{GameEngineEvent, GameSummary};
pub use game_state::{GameState, GameStatus, MAX_ATTEMPTS, WORD_LENGTH};
pub use input_event::{InputEvent, Key};
pub use keyboard_hints::KeyboardHints;
pub use letter_status::LetterStatus;
pub use statistics::Statistics;
pub use tile::Tile;
