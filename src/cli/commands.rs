//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - add: create a todo
//! - list: list all todos
//! - show: print one todo
//! - edit: replace a todo's text
//! - remove: delete a todo

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// todostore - durable one-file-per-todo storage
#[derive(Parser, Debug)]
#[command(name = "todostore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new todo
    Add {
        /// Todo text
        text: String,
    },

    /// List all todos
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single todo
    Show {
        /// Todo ID
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the text of a todo
    Edit {
        /// Todo ID
        id: String,

        /// New text
        text: String,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Remove {
        /// Todo ID
        id: String,
    },
}
