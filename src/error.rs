// File: ./src/error.rs
//! Error types for the command layer and the task file.
//!
//! The `Display` text of each `CommandError` is the reply the user sees, so
//! the session can turn any failure into a response with `to_string()`.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    /// Wrong argument count, empty required field or a non-numeric index.
    #[error("{0}")]
    InputFormat(&'static str),

    #[error("Out of bounds. Get your head in the game, please.")]
    IndexOutOfRange { index: i64, len: usize },

    #[error(
        "Ugh, I don't get it. Date should be in yyyy-MM-dd format... And keep the title spaceless!"
    )]
    DateFormat(String),

    #[error("I don't think we can time-travel. How come it ends before it starts? Lol...")]
    LogicalOrder,

    #[error("I don't understand what you just said, stupid...")]
    NotUnderstood,

    #[error("Couldn't save that. Your stuff is still here, for now. ({0})")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("task file is corrupt at line {line}: {reason}")]
    CorruptData { line: usize, reason: String },

    #[error("task file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
