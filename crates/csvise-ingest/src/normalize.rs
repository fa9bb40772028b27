//! Field text normalization.

/// Byte-order mark stripped from the start of the input.
const BOM: char = '\u{feff}';

/// Trim leading and trailing whitespace. Internal content is left untouched.
pub fn normalize_field(raw: &str) -> String {
    raw.trim().to_string()
}

/// Drop a leading UTF-8 byte-order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}
