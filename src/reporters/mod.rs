//! Output formatting for river lines
//!
//! The graph engine only produces the lane glyphs. Reporters splice in the
//! commit metadata (hash, date, author, refs, summary) on the commit line
//! and blank metadata columns on connector lines.

mod text;

pub use text::{LineFormatter, SUMMARY_LIMIT};
