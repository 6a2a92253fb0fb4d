//! Generic line-scanning and brace-block primitives used by higher-level
//! configuration parsers.
//!
//! Nothing in this crate knows about DHCP. It splits raw text into lines,
//! classifies them, and extracts balanced `{ ... }` blocks so that callers can
//! recurse into nested declarations with a single extraction routine.

pub mod block;
pub mod lines;

pub use block::{extract, extract_nested, Block, BlockError};
pub use lines::{classify, is_skippable, split_lines, LineKind};
