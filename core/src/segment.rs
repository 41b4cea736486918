//! Pipe segmentation and delimiter spacing checks.
//!
//! Segments keep their surrounding characters so the spacing rules can be
//! checked by position: exactly one space on each side of every `|`.
//! Only ASCII bytes are inspected, which is safe on UTF-8 input because
//! neither `|` nor ` ` can appear inside a multi-byte sequence.

use crate::error::ParseError;

const PIPE: char = '|';

/// Split on every `|`, keeping each raw segment untrimmed.
///
/// Leading or trailing pipes yield empty segments; input without a pipe
/// yields itself as the only segment.
pub fn split_segments(input: &str) -> Vec<&str> {
    input.split(PIPE).collect()
}

/// Check the spacing around every delimiter between adjacent segments.
pub fn check_delimiter_spacing(segments: &[&str]) -> Result<(), ParseError> {
    for pair in segments.windows(2) {
        let left = pair[0].as_bytes();
        let right = pair[1].as_bytes();

        if left.last() != Some(&b' ') || right.first() != Some(&b' ') {
            return Err(ParseError::InvalidPipeSpacing);
        }
        if left.len() >= 2 && left[left.len() - 2] == b' ' {
            return Err(ParseError::MultipleSpaces);
        }
        if right.len() >= 2 && right[1] == b' ' {
            return Err(ParseError::MultipleSpaces);
        }
    }
    Ok(())
}

/// Segment, validate spacing, then trim each segment to its logical content.
pub fn segments(input: &str) -> Result<Vec<&str>, ParseError> {
    let raw = split_segments(input);
    check_delimiter_spacing(&raw)?;
    Ok(raw.into_iter().map(str::trim).collect())
}
