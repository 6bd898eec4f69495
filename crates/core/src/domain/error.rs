// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid time sample: {hour:02}:{minute:02}:{second:02}")]
    InvalidTimeSample { hour: u32, minute: u32, second: u32 },

    #[error("Invalid ticker state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
