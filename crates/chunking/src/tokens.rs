//! Token estimation.

/// Average characters per token used for every size calculation.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `ceil(chars / 4)`.
///
/// Length is counted in Unicode scalar values so multi-byte text is not
/// over-counted.
pub fn estimate_token_count(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Character budget for a token budget.
pub(crate) fn tokens_to_chars(tokens: usize) -> usize {
    tokens.saturating_mul(CHARS_PER_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_zero() {
        assert_eq!(estimate_token_count(""), 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_token_count("test"), 1);
        assert_eq!(estimate_token_count("testtest"), 2);
        assert_eq!(estimate_token_count("Hello World!"), 3);
        assert_eq!(estimate_token_count("a"), 1);
        assert_eq!(estimate_token_count("abcde"), 2);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert_eq!(estimate_token_count("éééé"), 1);
    }
}
