use thiserror::Error;

/// Errors that can occur while extracting a brace-delimited block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Input ran out while the block was still open.
    #[error("block starting at line index {start} is not terminated ({depth} brace(s) still open at end of input)")]
    Unterminated {
        /// Index of the first line that was scanned (the line after the opener).
        start: usize,
        /// Depth remaining when input was exhausted.
        depth: usize,
    },
}

/// A balanced block cut out of a line slice.
///
/// `lines` holds every consumed line verbatim: the body followed by the line
/// that brought the depth back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Index of the first consumed line.
    pub start: usize,
    /// Index of the line immediately after the terminating line.
    pub next: usize,
    /// Consumed lines, terminator included.
    pub lines: &'a [&'a str],
}

impl<'a> Block<'a> {
    /// Lines before the terminating line.
    pub fn body(&self) -> &'a [&'a str] {
        &self.lines[..self.lines.len() - 1]
    }

    /// The line that closed the block.
    pub fn terminator(&self) -> &'a str {
        self.lines[self.lines.len() - 1]
    }

    /// All consumed lines joined verbatim, each followed by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Extract a block whose opening brace sits on the line before `start`.
pub fn extract<'a>(lines: &'a [&'a str], start: usize) -> Result<Block<'a>, BlockError> {
    extract_nested(lines, start, 1)
}

/// Extract a block when `depth` braces are already open.
///
/// Depth is tracked per line: a line containing `{` opens one level and a
/// line containing `}` closes one, so `} else {` leaves the depth unchanged.
/// Every line counts, comment lines included. Scanning stops on the line that
/// brings the depth to zero.
pub fn extract_nested<'a>(
    lines: &'a [&'a str],
    start: usize,
    depth: usize,
) -> Result<Block<'a>, BlockError> {
    let mut depth = depth;
    let mut index = start;

    while index < lines.len() {
        let line = lines[index];
        if line.contains('{') {
            depth += 1;
        }
        if line.contains('}') {
            depth = depth.saturating_sub(1);
        }
        index += 1;

        if depth == 0 {
            return Ok(Block {
                start,
                next: index,
                lines: &lines[start..index],
            });
        }
    }

    Err(BlockError::Unterminated { start, depth })
}
