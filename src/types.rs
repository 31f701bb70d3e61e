//! Shared types for the tintnotes application.
//!
//! This module contains the crate-wide `Result` alias and the subcommands of
//! the command-line front end.
use clap::Subcommand;

use crate::{ColorKind, NotesError};

/// A specialized Result type for tintnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Available subcommands for the tintnotes application
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new note at the top of the list
    Add {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Body text of the note
        #[clap(short, long)]
        content: Option<String>,

        /// Where the note was taken or what place it is about
        #[clap(short, long)]
        location: Option<String>,

        /// The note's own date (YYYY-MM-DD or RFC 3339), defaults to now
        #[clap(short, long)]
        date: Option<String>,

        /// Colour tag
        #[clap(long, value_enum)]
        color: Option<ColorKind>,

        /// Custom colour as RRGGBB, implies --color custom
        #[clap(long)]
        hex: Option<String>,

        /// Write the content in an editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// List notes, most recently changed first
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Only show positions, colours and titles
        #[clap(short, long)]
        brief: bool,
    },

    /// Show notes whose title, content, location or colour contains the query
    Search {
        /// Case-insensitive search text
        query: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Show a single note
    View {
        /// List position or note id
        target: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Rewrite fields of an existing note and move it to the top
    Edit {
        /// List position or note id
        target: String,

        /// New title
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body text
        #[clap(short, long)]
        content: Option<String>,

        /// New location
        #[clap(short, long)]
        location: Option<String>,

        /// New date (YYYY-MM-DD or RFC 3339)
        #[clap(short, long)]
        date: Option<String>,

        /// New colour tag
        #[clap(long, value_enum)]
        color: Option<ColorKind>,

        /// New custom colour as RRGGBB, implies --color custom
        #[clap(long)]
        hex: Option<String>,

        /// Edit the content in an editor
        #[clap(short, long)]
        edit: bool,
    },

    /// Delete notes by list position or id
    Delete {
        /// List positions or note ids
        #[clap(required = true)]
        targets: Vec<String>,

        /// Count positions as 0-based rows of this search's results instead of full-list positions
        #[clap(short, long)]
        query: Option<String>,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show the available colour tags
    Colors,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
