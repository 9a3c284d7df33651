//! Search and pagination helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and the repository layer.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of characters per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of characters per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Maximum number of tags returned by a tag search.
pub const TAG_SEARCH_LIMIT: i64 = 10;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Pattern helpers
// ---------------------------------------------------------------------------

/// Escape a user-supplied term for use inside a `LIKE`/`ILIKE` pattern.
///
/// `%`, `_` and the escape character itself are prefixed with `\` so they
/// match literally. Returns `None` when the trimmed term is empty, in which
/// case callers should fall back to an unfiltered listing.
pub fn escape_like_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
