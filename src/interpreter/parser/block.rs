use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{
            tag::Tag,
            token::{Coordinate, Token},
        },
        parser::core::{ParseResult, next_token, parse_expression, peek_is},
    },
};

/// Parses statements until `stop` without consuming it.
///
/// Statements need no separator; `\\` line breaks between them are skipped.
///
/// # Errors
/// `UnexpectedEndOfInput` if the region ends before `stop`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, stop: Tag) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut statements = Vec::new();

    while let Some(&token) = tokens.peek() {
        match token.tag {
            tag if tag == stop => return Ok(statements),
            Tag::Break => {
                tokens.next();
            },
            Tag::None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: stop.to_string(),
                                                              coord:    token.coord(), });
            },
            _ => statements.push(parse_expression(tokens, 0)?),
        }
    }

    Err(ParseError::UnexpectedEndOfInput { expected: stop.to_string(),
                                           coord:    Coordinate::default(), })
}

/// Parses the alternatives of a case block up to `\end{caseblock}`.
///
/// ```text
///     value \when condition \\
///     value \otherwise
/// ```
/// Each alternative becomes an [`Tag::Alt`] node with the value in `right`
/// and the guard, if any, in `cond`.
///
/// # Errors
/// `MalformedCase` if a value is followed by neither `\when` nor
/// `\otherwise`.
pub fn parse_cases<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut alternatives = Vec::new();

    while let Some(&token) = tokens.peek() {
        match token.tag {
            Tag::EndC => break,
            Tag::Break => {
                tokens.next();
                continue;
            },
            _ => {},
        }

        let value = parse_expression(tokens, 0)?;
        let mut alternative = Node::new(Tag::Alt, value.coord, "ALT").with_right(value);

        let guard = next_token(tokens, "\\when or \\otherwise")?;
        match guard.tag {
            Tag::When => alternative = alternative.with_cond(parse_expression(tokens, 0)?),
            Tag::Otherwise => {},
            Tag::None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "\\when or \\otherwise".to_string(),
                                                              coord:    guard.coord(), });
            },
            _ => {
                return Err(ParseError::MalformedCase { token: guard.name(),
                                                       coord: guard.coord(), });
            },
        }

        alternatives.push(alternative);
    }

    Ok(alternatives)
}

/// Parses the rows of a `pmatrix` up to `\end{pmatrix}`.
///
/// Cells are separated by `&`, rows by `\\`. A trailing `\\` before the end
/// is allowed. Each row becomes a [`Tag::List`] node of cells.
///
/// # Errors
/// - `BadMatrix` if a row starts with a separator or the matrix is empty.
/// - `MatrixNotRectangular` if a row's length differs from the first row's.
pub fn parse_matrix<'a, I>(tokens: &mut Peekable<I>, coord: Coordinate) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut rows: Vec<Node> = Vec::new();

    while let Some(&token) = tokens.peek() {
        match token.tag {
            Tag::EndM => break,
            Tag::Amp | Tag::Break => return Err(ParseError::BadMatrix { coord: token.coord() }),
            _ => {},
        }

        let mut row = Node::new(Tag::List, token.coord(), "LIST");
        row.fields.push(parse_expression(tokens, 0)?);
        while peek_is(tokens, Tag::Amp) {
            tokens.next();
            row.fields.push(parse_expression(tokens, 0)?);
        }
        rows.push(row);

        if peek_is(tokens, Tag::Break) {
            tokens.next();
        }
    }

    let Some(first) = rows.first() else {
        return Err(ParseError::BadMatrix { coord });
    };
    let expected = first.fields.len();
    if let Some((row, found)) = rows.iter()
                                    .map(|r| r.fields.len())
                                    .enumerate()
                                    .find(|(_, len)| *len != expected)
    {
        return Err(ParseError::MatrixNotRectangular { row,
                                                      expected,
                                                      found,
                                                      coord });
    }

    Ok(rows)
}
