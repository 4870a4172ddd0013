//! Token overlap between consecutive text chunks.

/// Trailing `overlap_chars` of `previous`, snapped forward to a word start.
///
/// Returns `None` when there is nothing to carry over: zero overlap, blank
/// input, or a tail that is one unbroken word.
pub(crate) fn overlap_tail(previous: &str, overlap_chars: usize) -> Option<&str> {
    if overlap_chars == 0 {
        return None;
    }

    let previous = previous.trim_end();
    let total = previous.chars().count();
    if total == 0 {
        return None;
    }

    if total <= overlap_chars {
        return Some(previous.trim_start()).filter(|tail| !tail.is_empty());
    }

    let (start, _) = previous.char_indices().nth(total - overlap_chars)?;
    let tail = &previous[start..];

    let at_word_start = previous[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);

    let tail = if at_word_start {
        tail
    } else {
        let space = tail.find(char::is_whitespace)?;
        &tail[space..]
    };

    Some(tail.trim_start()).filter(|tail| !tail.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_overlap() {
        assert_eq!(overlap_tail("some words here", 0), None);
    }

    #[test]
    fn test_short_previous_is_taken_whole() {
        assert_eq!(overlap_tail("tiny chunk", 50), Some("tiny chunk"));
    }

    #[test]
    fn test_snaps_to_next_word() {
        // last 7 chars are "r words", which starts mid-word
        assert_eq!(overlap_tail("some other words", 7), Some("words"));
    }

    #[test]
    fn test_keeps_tail_already_on_word_start() {
        // last 5 chars are "words", preceded by a space
        assert_eq!(overlap_tail("some other words", 5), Some("words"));
    }

    #[test]
    fn test_single_long_word_gives_nothing() {
        assert_eq!(overlap_tail("supercalifragilistic", 5), None);
    }

    #[test]
    fn test_ignores_trailing_whitespace() {
        assert_eq!(overlap_tail("alpha beta gamma\n\n", 5), Some("gamma"));
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(overlap_tail("café crème brûlée", 8), Some("brûlée"));
    }
}
