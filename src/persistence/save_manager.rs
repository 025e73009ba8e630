use std::rc::Rc;

use log::{trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{GameState, Statistics};
use crate::persistence::KeyValueStore;

pub const STATE_KEY: &str = "game_state";
pub const STATS_KEY: &str = "statistics";

/// Persistence gateway for the engine. Writes happen after every
/// accepted mutation; an unreadable or missing payload loads as `None`
/// so a corrupt save never takes the game down with it.
pub struct SaveManager {
    store: Rc<dyn KeyValueStore>,
}

impl SaveManager {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, state: &GameState, statistics: &Statistics) {
        self.save_value(STATE_KEY, state);
        self.save_value(STATS_KEY, statistics);
    }

    /// Loads the in-progress board, repairing any drift between the
    /// stored rows and the derived cursor before handing it out. A
    /// snapshot whose solution is not a playable word is dropped like
    /// any other corrupt payload.
    pub fn load_state(&self) -> Option<GameState> {
        let mut state: GameState = self.load_value(STATE_KEY)?;
        if !state.reconcile() {
            warn!(target: "persistence", "Discarding saved game with an unplayable solution");
            return None;
        }
        trace!(target: "persistence", "Loaded saved game {:?}", state.game_id);
        Some(state)
    }

    pub fn load_statistics(&self) -> Option<Statistics> {
        self.load_value(STATS_KEY)
    }

    fn save_value<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(contents) => self.store.set(key, &contents),
            Err(e) => warn!(target: "persistence", "Failed to serialize {}: {}", key, e),
        }
    }

    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let contents = self.store.get(key)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(target: "persistence", "Discarding unreadable {}: {}", key, e);
                None
            }
        }
    }
}
