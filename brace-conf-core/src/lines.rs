/// Classification of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// First non-whitespace character is `#`.
    Comment,
    /// Anything else.
    Content,
}

/// Split raw text into lines on CR, LF or CRLF.
///
/// Line `n` (1-based) of the input is element `n - 1` of the result. A
/// trailing line terminator yields a final empty line, so the number of
/// elements is always one more than the number of terminators.
pub fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['\r', '\n']) {
        lines.push(&rest[..pos]);
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
    }
    lines.push(rest);

    lines
}

/// Classify a line after trimming surrounding whitespace.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Content
    }
}

/// Return true for blank and comment lines.
pub fn is_skippable(line: &str) -> bool {
    classify(line) != LineKind::Content
}
