//! Domain types for todostore

pub mod todo;

pub use todo::Todo;
