//! Recursive character text splitter.
//!
//! Splits on the coarsest separator first and only falls through to finer
//! ones for pieces that are still over budget:
//! paragraph → line → sentence → hard cut.

/// A split piece and the byte offset where it starts in the split input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct Separator {
    pattern: &'static str,
    /// Bytes of the pattern that stay with the preceding piece
    keep: usize,
    joiner: &'static str,
}

const SEPARATORS: [Separator; 3] = [
    Separator {
        pattern: "\n\n",
        keep: 0,
        joiner: "\n\n",
    },
    Separator {
        pattern: "\n",
        keep: 0,
        joiner: "\n",
    },
    Separator {
        pattern: ". ",
        keep: 1,
        joiner: " ",
    },
];

/// Split `text` into pieces of at most `target_size` characters.
///
/// Input that already fits is returned unchanged as a single element. Pieces
/// are trimmed and blank pieces are dropped, so the result never contains an
/// empty string.
pub fn recursive_character_text_splitter(text: &str, target_size: usize) -> Vec<String> {
    split_with_offsets(text, target_size)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

/// Offset-aware variant used by the chunk pipeline for page assignment.
pub(crate) fn split_with_offsets(text: &str, target_size: usize) -> Vec<Segment> {
    let target = target_size.max(1);

    if text.trim().is_empty() {
        return Vec::new();
    }

    if char_len(text) <= target {
        return vec![Segment {
            start: 0,
            text: text.to_string(),
        }];
    }

    split_recursive(text, 0, target, &SEPARATORS)
}

fn split_recursive(text: &str, base: usize, target: usize, separators: &[Separator]) -> Vec<Segment> {
    let Some((separator, finer)) = separators.split_first() else {
        return hard_cut(text, base, target);
    };

    let mut units = Vec::new();
    for (offset, piece) in split_on(text, separator) {
        if char_len(piece) <= target {
            units.push(Segment {
                start: base + offset,
                text: piece.to_string(),
            });
        } else {
            units.extend(split_recursive(piece, base + offset, target, finer));
        }
    }

    merge_units(units, separator.joiner, target)
}

/// Split on one separator, returning trimmed non-blank pieces with offsets.
fn split_on<'a>(text: &'a str, separator: &Separator) -> Vec<(usize, &'a str)> {
    let mut pieces = Vec::new();
    let mut previous = 0;

    for (index, matched) in text.match_indices(separator.pattern) {
        push_trimmed(&mut pieces, text, previous, index + separator.keep);
        previous = index + matched.len();
    }
    push_trimmed(&mut pieces, text, previous, text.len());

    pieces
}

fn push_trimmed<'a>(pieces: &mut Vec<(usize, &'a str)>, text: &'a str, start: usize, end: usize) {
    if start >= end {
        return;
    }

    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }

    let leading = raw.len() - raw.trim_start().len();
    pieces.push((start + leading, trimmed));
}

/// Cut into windows of `target` chars, preferring the last whitespace in each.
fn hard_cut(text: &str, base: usize, target: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let rest = &text[start..];
        let skipped = rest.len() - rest.trim_start().len();
        start += skipped;
        if start >= text.len() {
            break;
        }

        let rest = &text[start..];
        let window_end = rest
            .char_indices()
            .nth(target)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());

        let mut end = window_end;
        if window_end < rest.len() {
            // Break at a word boundary when the window has one
            if let Some(space) = rest[..window_end].rfind(char::is_whitespace) {
                if space > 0 {
                    end = space;
                }
            }
        }

        let piece = rest[..end].trim_end();
        if !piece.is_empty() {
            segments.push(Segment {
                start: base + start,
                text: piece.to_string(),
            });
        }

        start += end;
    }

    segments
}

/// Greedily join neighbouring units while they fit in the budget.
fn merge_units(units: Vec<Segment>, joiner: &str, target: usize) -> Vec<Segment> {
    let joiner_len = char_len(joiner);
    let mut merged: Vec<Segment> = Vec::with_capacity(units.len());

    for unit in units {
        if let Some(last) = merged.last_mut() {
            if char_len(&last.text) + joiner_len + char_len(&unit.text) <= target {
                last.text.push_str(joiner);
                last.text.push_str(&unit.text);
                continue;
            }
        }
        merged.push(unit);
    }

    merged
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
