//! Source location tracking
//!
//! Positions are resolved lazily: the document reader records byte offsets
//! and a `SourceMap` turns them into line/column pairs when a diagnostic is
//! built.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tracks line starts for offset to position lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceMap {
    /// Create a new source map from source text
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the line and column for a byte offset.
    ///
    /// Columns count bytes; management documents are overwhelmingly ASCII
    /// and the reader never holds the decoded text of earlier lines.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = offset - line_start;

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Format an error message with source context
    pub fn format_error(&self, source: &str, position: Position, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("Error: {}\n", message));
        result.push_str(&format!("  --> {}:{}\n", position.line, position.column));

        if let Some(line) = self.get_line(source, position.line) {
            let line_num_str = format!("{}", position.line);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("   {} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));
            result.push_str(&format!(
                "   {} | {}^\n",
                padding,
                " ".repeat(position.column.saturating_sub(1) as usize)
            ));
        }

        result
    }

    /// Get a line of text by line number (1-based)
    fn get_line<'a>(&self, source: &'a str, line_num: u32) -> Option<&'a str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(source.len());

        source
            .get(start..end)
            .map(|line| line.trim_end_matches(['\r', '\n']))
    }
}
