//! Log sanitization utilities
//!
//! Provider payloads are cut to a short excerpt and API tokens are masked before they reach
//! the log.

/// Longest excerpt of a provider payload written to the log, in characters.
const EXCERPT_CHARS: usize = 200;

/// Number of leading characters of a secret kept visible by [`mask_secret`].
const MASK_VISIBLE: usize = 4;

/// Cut `s` to [`EXCERPT_CHARS`] characters, noting how many were dropped.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(EXCERPT_CHARS) {
        None => s.to_string(),
        Some((cut, _)) => {
            let dropped = s[cut..].chars().count();
            format!("{}... (+{dropped} chars)", &s[..cut])
        }
    }
}

/// Mask a secret for logging, keeping only a short prefix.
///
/// Secrets shorter than twice the visible prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let char_count = secret.chars().count();
    if char_count < MASK_VISIBLE * 2 {
        return "*".repeat(char_count.max(1));
    }
    let prefix: String = secret.chars().take(MASK_VISIBLE).collect();
    format!("{prefix}***({char_count} chars)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_unchanged() {
        let body = r#"{"success":true}"#;
        assert_eq!(truncate_for_log(body), body);
        let exact = "x".repeat(EXCERPT_CHARS);
        assert_eq!(truncate_for_log(&exact), exact);
    }

    #[test]
    fn long_payload_cut_with_count() {
        let body = "x".repeat(EXCERPT_CHARS + 50);
        assert_eq!(
            truncate_for_log(&body),
            format!("{}... (+50 chars)", "x".repeat(EXCERPT_CHARS))
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let body = "é".repeat(EXCERPT_CHARS + 1);
        let excerpt = truncate_for_log(&body);
        assert!(excerpt.starts_with(&"é".repeat(EXCERPT_CHARS)));
        assert!(excerpt.ends_with("(+1 chars)"));
    }

    #[test]
    fn mask_keeps_prefix_only() {
        let masked = mask_secret("abcdefghijklmnop");
        assert_eq!(masked, "abcd***(16 chars)");
    }

    #[test]
    fn mask_short_secret_fully() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "*");
    }
}
