//! Error types for the tintnotes application.
//!
//! This module defines the error variants that can surface from note
//! persistence, colour parsing and the command-line front end.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the tintnotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// A position outside the current note list.
    #[error("No note at position {position} (store holds {len} notes)")]
    InvalidPosition { position: usize, len: usize },

    /// Custom colour that is not a 6-digit hex triple.
    #[error("Invalid colour '{value}': expected 6 hex digits, optionally prefixed with '#'")]
    InvalidColor { value: String },

    /// Date argument that could not be parsed.
    #[error("Invalid date '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { value: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
