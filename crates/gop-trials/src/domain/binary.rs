//! Binary text codec for hidden payloads.
//!
//! Each character becomes its code point in base 2, zero-padded to at least
//! eight digits; groups are separated by single spaces.

use thiserror::Error;

/// A binary string that does not decode to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinaryError {
    /// A group is not a base-2 number.
    #[error("invalid binary group: {0:?}")]
    InvalidGroup(String),
    /// A group decodes to a value that is not a character.
    #[error("code point {0:#x} is not a valid character")]
    InvalidCodePoint(u32),
}

/// Encodes `text` as space-separated binary groups.
#[must_use]
pub fn encode(text: &str) -> String {
    text.chars()
        .map(|c| format!("{:08b}", u32::from(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes space-separated binary groups back into text.
///
/// # Errors
///
/// Returns `BinaryError` if a group is not base 2 or is not a valid
/// character.
pub fn decode(binary: &str) -> Result<String, BinaryError> {
    binary
        .split_whitespace()
        .map(|group| {
            let value = u32::from_str_radix(group, 2)
                .map_err(|_| BinaryError::InvalidGroup(group.to_owned()))?;
            char::from_u32(value).ok_or(BinaryError::InvalidCodePoint(value))
        })
        .collect()
}
