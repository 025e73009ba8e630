mod destroyable;

pub mod clock;
pub mod events;
pub mod game;
pub mod model;
pub mod persistence;

pub use destroyable::Destroyable;
