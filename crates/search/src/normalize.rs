//! Text normalization shared by search scoring and indexing
//!
//! One normal form everywhere: lowercase, punctuation replaced by spaces,
//! whitespace collapsed. Scorers and the index builder must agree on this or
//! indexed terms stop matching queries.

/// Normalize text for matching
///
/// Lowercases, replaces every character that is neither alphanumeric nor
/// whitespace with a space, collapses consecutive whitespace, and trims.
/// Total and deterministic; never fails.
///
/// # Example
///
/// ```
/// use pawsy_search::normalize;
///
/// assert_eq!(normalize("  Squeaky DOG-Ball!! "), "squeaky dog ball");
/// ```
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    replaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize optional text; absent input maps to the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("Dog TOY"), "dog toy");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("cat's feather-wand!"), "cat s feather wand");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  a \t b\n\nc "), "a b c");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ...  "), "");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(normalize("Pack of 12 (large)"), "pack of 12 large");
    }

    #[test]
    fn test_absent_input() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("Dog")), "dog");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("Squeaky DOG-Ball!!");
        assert_eq!(normalize(&once), once);
    }
}
