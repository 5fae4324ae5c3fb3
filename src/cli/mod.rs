//! CLI module for todostore - command-line interface and subcommands.
//!
//! Thin front end over `FileStore`: every subcommand maps to one store
//! operation.

pub mod commands;

pub use commands::Cli;
