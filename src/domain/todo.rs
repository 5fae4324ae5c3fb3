//! Todo record
//!
//! A todo is an id/text pair. On disk it is a single `<id>.txt` file whose
//! entire contents are the text.

use serde::{Deserialize, Serialize};

/// A stored todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Zero-padded sequential id ("00001"), fixed at creation
    pub id: String,

    /// Raw record contents
    pub text: String,
}

impl Todo {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// First line of the text, for one-line listings.
    pub fn title(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}
