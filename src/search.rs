//! Forward and backward substring search over document text
//!
//! Searches are stateless linear scans that return byte offsets into the
//! haystack. Case-insensitive mode folds both sides to ASCII lowercase;
//! the fold preserves byte lengths, so offsets into the folded text are
//! valid offsets into the original.
//!
//! Wrap-around is deliberately not handled here. A caller that wants a
//! search to continue from the opposite end retries once from index 0
//! (or from the end of the text for backward searches) when the first
//! attempt returns `None`, and only then reports "not found".

use std::borrow::Cow;

/// Fold text for comparison under the requested case rule
fn fold(text: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_ascii_lowercase())
    }
}

/// Find the first occurrence of `needle` at or after `start`.
///
/// Returns the byte offset of the match. Returns `None` when the needle
/// is empty, when `start` is out of bounds or not a char boundary, or
/// when there is no match.
pub fn find_forward(
    haystack: &str,
    needle: &str,
    start: usize,
    case_sensitive: bool,
) -> Option<usize> {
    if needle.is_empty() || start > haystack.len() || !haystack.is_char_boundary(start) {
        return None;
    }

    let hay = fold(haystack, case_sensitive);
    let pat = fold(needle, case_sensitive);
    hay[start..].find(pat.as_ref()).map(|pos| start + pos)
}

/// Find the last occurrence of `needle` that ends at or before `start`.
///
/// The search domain is `haystack[..start]`. Same emptiness and bounds
/// rules as [`find_forward`].
pub fn find_backward(
    haystack: &str,
    needle: &str,
    start: usize,
    case_sensitive: bool,
) -> Option<usize> {
    if needle.is_empty() || start > haystack.len() || !haystack.is_char_boundary(start) {
        return None;
    }

    let hay = fold(haystack, case_sensitive);
    let pat = fold(needle, case_sensitive);
    hay[..start].rfind(pat.as_ref())
}
