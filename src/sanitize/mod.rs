//! Canonicalisation of raw strings into storage-compliant volume names.
//!
//! The downstream storage system accepts lowercase names made of ASCII
//! letters, digits, and single hyphens, never starting or ending with a
//! hyphen and never longer than [`MAX_VOLUME_NAME_LEN`] characters.

use thiserror::Error;

/// Maximum number of characters permitted in a volume name.
pub const MAX_VOLUME_NAME_LEN: usize = 128;

const SEPARATOR: char = '-';

/// Errors raised while sanitising a candidate name.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NameError {
    /// Raised when nothing usable survives sanitisation.
    #[error("name is empty after sanitization")]
    Empty,
}

/// Returns `true` for characters that may appear between separators.
const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit()
}

/// Simple one-to-one lowercase mapping. `İ` maps to `i` rather than to `i`
/// followed by a combining dot.
fn lowercase_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Sanitises `raw` into a valid volume name.
///
/// Surrounding whitespace is trimmed and each character lowercased. Underscores,
/// periods, hyphens, and every run of other disallowed characters become a
/// single separator; separators never lead, trail, or repeat. Names longer
/// than [`MAX_VOLUME_NAME_LEN`] are cut to that length and any hyphen exposed
/// by the cut is dropped.
///
/// # Errors
///
/// Returns [`NameError::Empty`] when no letters or digits remain.
pub fn sanitize_volume_name(raw: &str) -> Result<String, NameError> {
    let trimmed = raw.trim();
    let mut name = String::with_capacity(trimmed.len());
    let mut pending_separator = false;

    for ch in trimmed.chars().map(lowercase_char) {
        if is_name_char(ch) {
            if pending_separator && !name.is_empty() {
                name.push(SEPARATOR);
            }
            pending_separator = false;
            name.push(ch);
        } else {
            pending_separator = true;
        }
    }

    if name.is_empty() {
        return Err(NameError::Empty);
    }

    // Every retained character is ASCII, so byte and character counts agree.
    if name.len() > MAX_VOLUME_NAME_LEN {
        name.truncate(MAX_VOLUME_NAME_LEN);
        let kept = name.trim_end_matches(SEPARATOR).len();
        name.truncate(kept);
    }

    Ok(name)
}

/// Returns `true` when `name` already satisfies the naming contract.
#[must_use]
pub fn is_valid_volume_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_VOLUME_NAME_LEN
        && name.chars().all(|ch| is_name_char(ch) || ch == SEPARATOR)
        && !name.starts_with(SEPARATOR)
        && !name.ends_with(SEPARATOR)
        && !name.contains("--")
}
