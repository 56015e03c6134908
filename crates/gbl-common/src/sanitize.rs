//! String sanitization for incoming metadata values
//!
//! Upload files arrive from several operator workstations and regularly carry
//! smart quotes, BOMs, and Windows line endings. Values are reduced to 7-bit
//! ASCII before they are indexed: every non-ASCII character becomes a single
//! space, then surrounding whitespace is trimmed and internal runs collapsed.

/// Sanitize a raw metadata value.
///
/// Replaces each non-ASCII character with one space, trims the result, and
/// collapses internal whitespace runs (including newlines) to a single space.
pub fn sanitize_string(raw: &str) -> String {
    let ascii: String = raw
        .chars()
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect();

    squish(&ascii)
}

/// Trim and collapse all whitespace runs to single spaces.
pub fn squish(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
