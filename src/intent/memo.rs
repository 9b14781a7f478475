//! Payment memo sanitization and encoding.

/// Submitted memos are capped at 100 characters.
pub const MEMO_MAX_CHARS: usize = 100;

/// Characters kept when truncating, leaving room for the ellipsis.
const TRUNCATED_CHARS: usize = 97;

/// Fallback when sanitization leaves nothing usable.
const FALLBACK_MEMO: &str = "XRP payment";

/// Sanitize a memo for submission: strip control characters, trim, and
/// truncate anything over 100 characters to the first 97 plus `...`.
/// An empty result falls back to a fixed string.
pub fn sanitize_memo(memo: &str) -> String {
    let cleaned: String = memo
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.is_empty() {
        return FALLBACK_MEMO.to_string();
    }

    if cleaned.chars().count() > MEMO_MAX_CHARS {
        let truncated: String = cleaned.chars().take(TRUNCATED_CHARS).collect();
        format!("{}...", truncated)
    } else {
        cleaned
    }
}

/// Hex-encode a memo for the ledger's MemoData field.
pub fn memo_to_hex(memo: &str) -> String {
    hex::encode(memo.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_memo_unchanged() {
        assert_eq!(sanitize_memo("for the coffee"), "for the coffee");
    }

    #[test]
    fn test_long_memo_truncated_to_97_plus_ellipsis() {
        let long = "x".repeat(150);
        let sanitized = sanitize_memo(&long);
        assert_eq!(sanitized.chars().count(), 100);
        assert_eq!(sanitized, format!("{}...", "x".repeat(97)));
    }

    #[test]
    fn test_exactly_100_chars_kept() {
        let memo = "y".repeat(100);
        assert_eq!(sanitize_memo(&memo), memo);
    }

    #[test]
    fn test_control_characters_stripped() {
        assert_eq!(sanitize_memo("pay\nment\t!"), "payment!");
    }

    #[test]
    fn test_empty_memo_falls_back() {
        assert_eq!(sanitize_memo(""), "XRP payment");
        assert_eq!(sanitize_memo("\n\t  "), "XRP payment");
    }

    #[test]
    fn test_memo_hex_encoding() {
        assert_eq!(memo_to_hex("test"), "74657374");
    }

    proptest! {
        #[test]
        fn prop_sanitized_memo_never_exceeds_cap(memo in ".*") {
            let sanitized = sanitize_memo(&memo);
            prop_assert!(sanitized.chars().count() <= MEMO_MAX_CHARS);
            prop_assert!(!sanitized.is_empty());
        }

        #[test]
        fn prop_long_memos_end_with_ellipsis(memo in "[a-zA-Z0-9]{101,300}") {
            let sanitized = sanitize_memo(&memo);
            prop_assert!(sanitized.ends_with("..."));
            prop_assert_eq!(sanitized.chars().count(), 100);
        }
    }
}
