use std::{fmt, ops::Range};

use crate::interpreter::lexer::tag::Tag;

/// 1-based line and column of a character in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub line:   usize,
    pub column: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A location inside a region: its document coordinate and its byte offset
/// into the region text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub coord:  Coordinate,
    pub offset: usize,
}

/// Maps byte offsets of a region to document coordinates.
///
/// `\r\n` and `\n` both count as a single line break.
#[derive(Debug, Clone)]
pub struct LineIndex {
    origin: Coordinate,
    starts: Vec<usize>,
}

impl LineIndex {
    /// Indexes `text`, whose first byte sits at `origin` in the document.
    #[must_use]
    pub fn new(text: &str, origin: Coordinate) -> Self {
        let starts = std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
                                       .collect();
        Self { origin, starts }
    }

    #[must_use]
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let line = self.starts.partition_point(|start| *start <= offset).saturating_sub(1);
        let start = self.starts.get(line).copied().unwrap_or(0);
        let chars = text.get(start..offset).map_or(0, |s| s.trim_end_matches('\r').chars().count());
        let column = if line == 0 { self.origin.column + chars } else { chars + 1 };

        Position { coord: Coordinate::new(self.origin.line + line, column),
                   offset }
    }
}

/// A lexed token.
///
/// `start` and `end` delimit the source text the token came from. Tokens
/// synthesized by desugaring share the span of the construct that produced
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tag:   Tag,
    pub start: Position,
    pub end:   Position,
    /// Source text, or the synthesized name for desugared tokens.
    pub raw:   String,
}

impl Token {
    #[must_use]
    pub fn new(tag: Tag, start: Position, end: Position, raw: impl Into<String>) -> Self {
        Self { tag,
               start,
               end,
               raw: raw.into() }
    }

    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        self.start.coord
    }

    /// Byte range of the token inside the region.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }

    /// Diagnostic name: the source text when there is any, else the tag.
    #[must_use]
    pub fn name(&self) -> String {
        if self.raw.is_empty() { self.tag.to_string() } else { self.raw.clone() }
    }
}
