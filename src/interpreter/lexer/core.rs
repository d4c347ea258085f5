use std::{ops::Range, rc::Rc};

use logos::Logos;

use crate::{
    error::LexError,
    interpreter::{
        lexer::{
            raw::Lexeme,
            tag::Tag,
            token::{Coordinate, LineIndex, Position, Token},
        },
        value::dimension::Dimension,
    },
};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Role of an open `{` waiting for its `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BraceRole {
    Group,
    /// Opened by `\floor{` or `\ceil{`, closes as `)`.
    Call,
}

/// Kind of desugared accumulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LoopKind {
    Sum,
    Product,
}

/// Desugared `\sum`/`\prod` loops waiting for the end of their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PendingLoops {
    Idle,
    AwaitingSumClose(usize),
    AwaitingProductClose(usize),
}

/// Turns region text into tokens.
///
/// Each call to [`Lexer::next_tokens`] consumes one lexeme and returns the
/// tokens it stands for: usually one, none for skipped input, several for
/// desugared constructs. [`Lexer::tokenize`] drives it to the end and drops
/// whitespace markers.
pub struct Lexer<'src> {
    pub(super) source:       &'src str,
    /// Offset of the lexed slice inside `source`.
    pub(super) base:         usize,
    pub(super) limit:        usize,
    pub(super) raw:          logos::Lexer<'src, Lexeme>,
    pub(super) lines:        Rc<LineIndex>,
    braces:                  Vec<BraceRole>,
    pub(super) loops:        PendingLoops,
    pub(super) accumulators: Vec<Token>,
    pub(super) iterators:    Vec<Token>,
    finished:                bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for a region whose first byte sits at `origin` in the
    /// document.
    #[must_use]
    pub fn new(source: &'src str, origin: Coordinate) -> Self {
        let lines = Rc::new(LineIndex::new(source, origin));
        Self::fragment(source, 0..source.len(), lines)
    }

    /// Creates a lexer over `range` of `source`, reporting positions relative
    /// to the whole of `source`.
    pub(super) fn fragment(source: &'src str, range: Range<usize>, lines: Rc<LineIndex>) -> Self {
        let text = source.get(range.clone()).unwrap_or_default();
        Self { source,
               base: range.start,
               limit: range.end,
               raw: Lexeme::lexer(text),
               lines,
               braces: Vec::new(),
               loops: PendingLoops::Idle,
               accumulators: Vec::new(),
               iterators: Vec::new(),
               finished: false }
    }

    /// Lexes the whole input.
    ///
    /// Whitespace and skip markers are dropped, the list ends with a
    /// [`Tag::None`] token.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::lexer::{core::Lexer, tag::Tag, token::Coordinate};
    ///
    /// let tokens = Lexer::new("x := 2 \\cdot m", Coordinate::default()).tokenize().unwrap();
    /// let tags: Vec<Tag> = tokens.iter().map(|t| t.tag).collect();
    ///
    /// assert_eq!(tags, [Tag::Ident, Tag::Set, Tag::Number, Tag::Mul, Tag::Dimension, Tag::None]);
    /// ```
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while !self.finished {
            for token in self.next_tokens()? {
                match token.tag {
                    Tag::Space | Tag::Skip => {},
                    Tag::Error => {
                        return Err(LexError::UnexpectedCharacter { symbol: token.raw,
                                                                   coord:  token.start.coord, });
                    },
                    _ => tokens.push(token),
                }
            }
        }
        Ok(tokens)
    }

    /// Lexes the next lexeme.
    ///
    /// Returns the pending loop closes and a [`Tag::None`] token once the
    /// input is exhausted, and nothing after that.
    pub fn next_tokens(&mut self) -> LexResult<Vec<Token>> {
        if self.finished {
            return Ok(Vec::new());
        }

        let Some(lexeme) = self.raw.next() else {
            self.finished = true;
            let at = self.position(self.limit);
            let mut tokens = self.close_loops(at)?;
            tokens.push(Token::new(Tag::None, at, at, ""));
            return Ok(tokens);
        };

        let (start, end) = self.span();
        let slice = self.raw.slice();

        let Ok(lexeme) = lexeme else {
            return Ok(vec![Token::new(Tag::Error, start, end, slice)]);
        };

        let single = |tag: Tag| -> LexResult<Vec<Token>> { Ok(vec![Token::new(tag, start, end, slice)]) };

        match lexeme {
            Lexeme::Blank => single(Tag::Space),
            Lexeme::Newline => {
                let mut tokens = self.close_loops(start)?;
                tokens.push(Token::new(Tag::Space, start, end, slice));
                Ok(tokens)
            },
            Lexeme::Percent => {
                let rest = self.raw.remainder();
                let len = rest.find(['\r', '\n']).unwrap_or(rest.len());
                self.raw.bump(len);
                Ok(vec![Token::new(Tag::Space, start, self.span().1, "")])
            },
            Lexeme::LineBreak => {
                let mut tokens = self.close_loops(start)?;
                tokens.push(Token::new(Tag::Break, start, end, slice));
                Ok(tokens)
            },
            Lexeme::Command => self.command(slice, start, end),
            Lexeme::Backslash => single(Tag::Error),
            Lexeme::Word => self.word(slice, start, end),
            Lexeme::Number => single(Tag::Number),
            Lexeme::Assign => single(Tag::Set),
            Lexeme::Plus => single(Tag::Add),
            Lexeme::Minus => single(Tag::Sub),
            Lexeme::Star => single(Tag::Mul),
            Lexeme::Slash => single(Tag::Div),
            Lexeme::Caret => single(Tag::Pow),
            Lexeme::LParen => single(Tag::LParen),
            Lexeme::RParen => single(Tag::RParen),
            Lexeme::LBrace => {
                self.braces.push(BraceRole::Group);
                single(Tag::LBrace)
            },
            Lexeme::RBrace => match self.braces.pop() {
                Some(BraceRole::Call) => single(Tag::RParen),
                _ => single(Tag::RBrace),
            },
            Lexeme::LBracket => single(Tag::LBracket),
            Lexeme::RBracket => single(Tag::RBracket),
            Lexeme::Comma => single(Tag::Comma),
            Lexeme::Underscore => single(Tag::Index),
            Lexeme::Less => single(Tag::Lt),
            Lexeme::Greater => single(Tag::Gt),
            Lexeme::Equals => single(Tag::Eq),
            Lexeme::Ampersand => single(Tag::Amp),
        }
    }

    /// Position of an absolute byte offset into the region.
    pub(super) fn position(&self, offset: usize) -> Position {
        self.lines.position(self.source, offset)
    }

    /// Start and end positions of the lexeme just read.
    pub(super) fn span(&self) -> (Position, Position) {
        let span = self.raw.span();
        (self.position(self.base + span.start), self.position(self.base + span.end))
    }

    /// Absolute offset of the first unread byte.
    pub(super) fn cursor(&self) -> usize {
        self.base + self.raw.span().end
    }

    /// Skips whitespace and consumes `expected` if it comes next.
    pub(super) fn eat(&mut self, expected: char) -> bool {
        let rest = self.raw.remainder();
        let trimmed = rest.trim_start();
        if trimmed.starts_with(expected) {
            self.raw.bump(rest.len() - trimmed.len() + expected.len_utf8());
            true
        } else {
            false
        }
    }

    /// Reads a balanced `{...}` attribute and returns its absolute byte range,
    /// braces included.
    ///
    /// A backslash escapes the following character, so `\{` does not count
    /// towards the nesting.
    pub(super) fn attribute(&mut self, command: &str) -> LexResult<Range<usize>> {
        let rest = self.raw.remainder();
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.cursor() + skipped;
        let body = &rest[skipped..];

        let coord = self.position(start).coord;
        let missing = || LexError::ExpectedAttribute { command: command.to_string(),
                                                       coord };

        if !body.starts_with('{') {
            return Err(missing());
        }

        let mut depth = 0usize;
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.raw.bump(skipped + i + 1);
                        return Ok(start..start + i + 1);
                    }
                },
                _ => {},
            }
        }
        Err(missing())
    }

    /// Text between the braces of an attribute range.
    pub(super) fn attribute_text(&self, range: &Range<usize>) -> &'src str {
        self.source.get(range.start + 1..range.end - 1).unwrap_or_default()
    }

    fn command(&mut self, name: &str, start: Position, end: Position) -> LexResult<Vec<Token>> {
        match Tag::from_command(name) {
            Tag::Begin | Tag::End => self.environment(name, start),
            Tag::Sum => self.open_loop(LoopKind::Sum, name, start),
            Tag::Product => self.open_loop(LoopKind::Product, name, start),
            Tag::Floor | Tag::Ceil => {
                self.eat('*');
                if !self.eat('{') {
                    return Err(LexError::ExpectedAttribute { command: name.to_string(),
                                                             coord:   end.coord, });
                }
                self.braces.push(BraceRole::Call);
                let (_, open) = self.span();
                Ok(vec![Token::new(Tag::Keyword, start, end, name),
                        Token::new(Tag::LParen, end, open, "{")])
            },
            Tag::Placeholder => self.placeholder(start),
            Tag::Text => {
                let range = self.attribute(name)?;
                Ok(vec![Token::new(Tag::Space, start, self.position(range.end), "")])
            },
            tag => Ok(vec![Token::new(tag, start, end, name)]),
        }
    }

    fn environment(&mut self, name: &str, start: Position) -> LexResult<Vec<Token>> {
        let range = self.attribute(name)?;
        let end = self.position(range.end);
        let opening = name == "\\begin";
        let tag = match (self.attribute_text(&range).trim(), opening) {
            ("block", true) => Tag::BeginB,
            ("block", false) => Tag::EndB,
            ("caseblock", true) => Tag::BeginC,
            ("caseblock", false) => Tag::EndC,
            ("pmatrix", true) => Tag::BeginM,
            ("pmatrix", false) => Tag::EndM,
            (other, _) => {
                return Err(LexError::UnknownEnvironment { name:  other.to_string(),
                                                          coord: start.coord, });
            },
        };
        let raw = self.source.get(start.offset..end.offset).unwrap_or(name);
        Ok(vec![Token::new(tag, start, end, raw)])
    }

    /// Identifiers, optionally with a `_\text{...}` subscript, and SI units.
    fn word(&mut self, text: &str, start: Position, end: Position) -> LexResult<Vec<Token>> {
        let rest = self.raw.remainder();
        if let Some(after) = rest.strip_prefix("_\\") {
            let is_text = after.strip_prefix("text")
                               .is_some_and(|s| !s.starts_with(|c: char| c.is_ascii_alphabetic()));
            if !is_text {
                return Err(LexError::ExpectedText { coord: end.coord });
            }
            self.raw.bump("_\\text".len());
            let range = self.attribute("\\text")?;
            let end = self.position(range.end);
            let raw = self.source.get(start.offset..end.offset).unwrap_or(text);
            return Ok(vec![Token::new(Tag::Ident, start, end, raw)]);
        }

        let tag = if Dimension::from_unit(text).is_some() { Tag::Dimension } else { Tag::Ident };
        Ok(vec![Token::new(tag, start, end, text)])
    }
}
