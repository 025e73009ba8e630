mod save_manager;
mod store;

pub use save_manager::{SaveManager, STATE_KEY, STATS_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
