//! Name normalization
//!
//! Turns a raw name into the comparison key used by every scorer: accents
//! folded, punctuation dropped, lower-cased, and tokens sorted so that
//! "Hama Bande" and "BANDE Hama" produce the same key.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a name into its comparison key.
///
/// Blank or all-punctuation input yields an empty key. The function is
/// idempotent.
pub fn normalize(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut tokens: Vec<&str> = folded.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
