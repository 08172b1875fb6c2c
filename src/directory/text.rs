//! Text transforms applied while constructing directory records

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("static pattern"));

/// Discards every character that is not an ASCII digit.
pub fn extract_digits(raw: &str) -> String {
    NON_DIGITS.replace_all(raw, "").into_owned()
}

/// Decomposes the text and drops combining marks, mapping accented Latin
/// letters to their unaccented form. Characters without a decomposition pass
/// through unchanged.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}
