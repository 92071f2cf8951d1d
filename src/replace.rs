//! Whole-document replace built on the search matcher
//!
//! Replace reuses [`crate::search::find_forward`] to locate matches, so
//! both case modes share one algorithm and produce exactly the match
//! boundaries a search would.

use crate::search::find_forward;

/// Replace every non-overlapping occurrence of `find` in `text` with
/// `replace`, scanning left to right.
///
/// Scanning resumes after each match, so a replacement that itself
/// contains `find` is never re-matched. Returns the new text and the
/// number of substitutions; an empty `find` is a no-op returning
/// `(text, 0)`.
pub fn replace_all(
    text: &str,
    find: &str,
    replace: &str,
    case_sensitive: bool,
) -> (String, usize) {
    if find.is_empty() {
        return (text.to_string(), 0);
    }

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut count = 0;

    // ASCII case folding preserves byte lengths, so in both case modes the
    // matched span is exactly find.len() bytes of the original text.
    while let Some(pos) = find_forward(text, find, cursor, case_sensitive) {
        result.push_str(&text[cursor..pos]);
        result.push_str(replace);
        cursor = pos + find.len();
        count += 1;
    }
    result.push_str(&text[cursor..]);

    (result, count)
}
