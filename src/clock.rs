use std::time::SystemTime;

/// Source of wall-clock time. The engine never calls `SystemTime::now()`
/// directly so tests can drive time explicitly.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
