mod channel;
mod scheduler;

pub use channel::{Channel, EventEmitter, EventObserver, Unsubscriber};
pub use scheduler::{Continue, Scheduler, TaskHandle};
