use std::time::Instant;

/// Port for reading the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}
