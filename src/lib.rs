//! Colour-tagged personal notes library
//!
//! This library keeps an ordered list of short notes, each tagged with an
//! optional colour, persists the whole list as one blob in a local key-value
//! slot, and provides the search filter and command-line front end over it.

mod cli;
mod color;
mod config;
mod errors;
mod helper;
mod note;
mod search;
mod storage;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use color::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use search::*;
pub use storage::*;
pub use store::*;
pub use types::*;
