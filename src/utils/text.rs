//! Text normalization helpers.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip combining diacritical marks from a string.
///
/// Decomposes to NFD and drops combining marks, so `"José"` becomes `"Jose"`.
/// Used to produce the normalized display name carried on a request principal
/// for accent-insensitive matching. Characters that do not decompose (e.g.
/// Vietnamese "đ") are left untouched.
pub fn strip_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
