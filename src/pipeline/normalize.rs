//! Review text normalization.

/// Normalize raw review text for the classifiers.
///
/// Lowercases, keeps ASCII letters only, collapses whitespace runs to single
/// spaces, and trims. Every non-letter becomes a space first, so
/// "Great!!!film" normalizes to "great film". Never fails; empty input
/// yields the empty string.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push(c.to_ascii_lowercase());
            pending_space = false;
        } else {
            pending_space = true;
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("This Movie was GREAT!!!"), "this movie was great");
    }

    #[test]
    fn test_non_letters_become_separators() {
        assert_eq!(normalize("good,bad"), "good bad");
        assert_eq!(normalize("rated 10/10 stars"), "rated stars");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(normalize("  so \t\n  good  "), "so good");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("123 !!! ???"), "");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(normalize("café naïve"), "caf na ve");
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_output_is_lowercase_letters_and_single_spaces(text in ".*") {
                let normalized = normalize(&text);
                prop_assert!(normalized
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == ' '));
                prop_assert!(!normalized.contains("  "));
                prop_assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
            }

            #[test]
            fn prop_normalize_is_idempotent(text in ".*") {
                let once = normalize(&text);
                prop_assert_eq!(normalize(&once), once);
            }
        }
    }
}
