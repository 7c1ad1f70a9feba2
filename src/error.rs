//! Errors surfaced by session construction

use thiserror::Error;

/// Fatal problems detected before any session state is built
#[derive(Debug, Error)]
pub enum SessionError {
    /// Arena dimensions are non-finite or non-positive
    #[error("invalid arena dimensions {width} x {height}")]
    InvalidArena { width: f32, height: f32 },
    /// Arena cannot hold its borders plus one entity
    #[error("arena {width} x {height} is too small, need more than {min} on each side")]
    ArenaTooSmall { width: f32, height: f32, min: f32 },
    /// A tuning value is out of range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    /// Tuning JSON failed to parse
    #[error("tuning parse error: {0}")]
    TuningParse(#[from] serde_json::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
