//! Fixed-width id utilities for todostore
//!
//! Ids are decimal integers rendered with leading zeros to a fixed width.
//! They double as record filename stems, so only well-formed ids may ever
//! be turned into a path.

use crate::error::{Result, TodoError};

/// Number of digits in every id
pub const ID_WIDTH: usize = 5;

/// Largest value that fits in `ID_WIDTH` digits
pub const MAX_ID: u64 = 99_999;

/// Render a counter value as a zero-padded id
///
/// Format: `{value:05}`
/// Example: `41` -> `"00041"`
pub fn format_id(value: u64) -> Result<String> {
    if value > MAX_ID {
        return Err(TodoError::CounterOverflow { value });
    }
    Ok(format!("{:0width$}", value, width = ID_WIDTH))
}

/// Parse counter file contents.
///
/// Surrounding whitespace is ignored and an empty file reads as 0.
/// Returns `None` when the contents are not a decimal number.
pub fn parse_counter(contents: &str) -> Option<u64> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Check whether `id` could name a record: exactly `ID_WIDTH` ASCII digits.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_WIDTH && id.bytes().all(|b| b.is_ascii_digit())
}
