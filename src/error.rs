use thiserror::Error;

/// Growth was requested past the configured maximum capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("requested capacity of {requested} exceeds the configured maximum of {max}")]
pub struct CapacityError {
    /// Total capacity the operation needed, in slots.
    pub requested: usize,
    /// Configured upper bound on total capacity, in slots.
    pub max: usize,
}

/// A push was rejected; the value is handed back to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError<T> {
    /// The buffer is at its configured maximum capacity and cannot grow.
    #[error("ring buffer is at its configured maximum capacity")]
    MaxCapacity(T),
}

impl<T> PushError<T> {
    /// Takes the rejected value back out of the error.
    pub fn into_inner(self) -> T {
        match self {
            Self::MaxCapacity(value) => value,
        }
    }
}
