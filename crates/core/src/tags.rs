//! Tag-name normalization.
//!
//! Tag names are stored lowercase with ASCII letters, digits and hyphens
//! only. The text model is instructed to produce names in exactly that
//! shape, but model output is untrusted, so every candidate passes through
//! [`normalize_tag_name`] before it reaches the database.

/// Maximum length of a stored tag name.
pub const MAX_TAG_NAME_LEN: usize = 64;

/// Normalize a candidate tag name to the stored form.
///
/// - lowercases ASCII letters
/// - maps whitespace runs to a single hyphen
/// - drops every other character outside `[a-z0-9-]`
/// - collapses repeated hyphens and trims leading/trailing ones
///
/// Returns `None` when nothing usable remains or the result exceeds
/// [`MAX_TAG_NAME_LEN`].
pub fn normalize_tag_name(raw: &str) -> Option<String> {
    let mut name = String::with_capacity(raw.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in raw.trim().chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            '-' => Some('-'),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        };

        match mapped {
            Some('-') => {
                if !last_was_hyphen {
                    name.push('-');
                    last_was_hyphen = true;
                }
            }
            Some(c) => {
                name.push(c);
                last_was_hyphen = false;
            }
            None => {}
        }
    }

    while name.ends_with('-') {
        name.pop();
    }

    if name.is_empty() || name.len() > MAX_TAG_NAME_LEN {
        None
    } else {
        Some(name)
    }
}

/// Normalize a batch of candidates, dropping unusable ones and duplicates
/// while preserving first-seen order.
pub fn normalize_candidates<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for candidate in candidates {
        if let Some(name) = normalize_tag_name(candidate.as_ref()) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_clean_names_through() {
        assert_eq!(normalize_tag_name("robot"), Some("robot".to_string()));
        assert_eq!(normalize_tag_name("sci-fi"), Some("sci-fi".to_string()));
    }

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(normalize_tag_name("Robot AI"), Some("robot-ai".to_string()));
    }

    #[test]
    fn strips_special_characters() {
        assert_eq!(normalize_tag_name("c.a.l.m!"), Some("calm".to_string()));
        assert_eq!(normalize_tag_name("¡robótica!"), Some("robtica".to_string()));
    }

    #[test]
    fn collapses_hyphen_runs() {
        assert_eq!(normalize_tag_name("a -- b"), Some("a-b".to_string()));
        assert_eq!(normalize_tag_name("--edge--"), Some("edge".to_string()));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert_eq!(normalize_tag_name(""), None);
        assert_eq!(normalize_tag_name("!!!"), None);
        assert_eq!(normalize_tag_name(&"x".repeat(MAX_TAG_NAME_LEN + 1)), None);
    }

    #[test]
    fn batch_dedups_preserving_order() {
        let out = normalize_candidates(["Robot", "bot", "robot", "", "BOT"]);
        assert_eq!(out, vec!["robot", "bot"]);
    }
}
