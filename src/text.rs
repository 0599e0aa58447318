//! Free-text normalization used for keyword matching and deduplication keys

/// Lower-case, trim and collapse internal whitespace runs to single spaces.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
