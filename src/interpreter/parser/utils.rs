use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{tag::Tag, token::Token},
        parser::core::{ARGUMENT_PRECEDENCE, ParseResult, next_token, parse_expression},
    },
};

/// Parses a comma-separated list between an opening token and `close`.
///
/// The opening token is consumed whatever it is. An immediately
/// encountered `close` produces an empty list.
///
/// Grammar (simplified): `list := open (expression ("," expression)*)? close`
///
/// # Returns
/// The parsed items and the closing token.
///
/// # Errors
/// `ListNotClosed` if an item is followed by anything but a comma or
/// `close`.
pub(in crate::interpreter::parser) fn parse_delimited<'a, I>(tokens: &mut Peekable<I>,
                                                             close: Tag)
                                                             -> ParseResult<(Vec<Node>, &'a Token)>
    where I: Iterator<Item = &'a Token> + Clone
{
    next_token(tokens, "list")?;

    let mut items = Vec::new();
    if let Some(&token) = tokens.peek()
       && token.tag == close
    {
        tokens.next();
        return Ok((items, token));
    }

    loop {
        items.push(parse_expression(tokens, 0)?);
        let token = next_token(tokens, close.info().name)?;
        match token.tag {
            Tag::Comma => {},
            tag if tag == close => return Ok((items, token)),
            Tag::None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: close.to_string(),
                                                              coord:    token.coord(), });
            },
            _ => {
                return Err(ParseError::ListNotClosed { token: token.name(),
                                                       coord: token.coord(), });
            },
        }
    }
}

/// Like [`parse_delimited`], dropping the closing token.
pub(in crate::interpreter::parser) fn parse_list<'a, I>(tokens: &mut Peekable<I>,
                                                        close: Tag)
                                                        -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_delimited(tokens, close).map(|(items, _)| items)
}

/// Parses one command argument that must start with `open`, such as the
/// `{a}` of `\frac{a}{b}`.
///
/// # Errors
/// `ExpectedArgument` if the next token is not `open`.
pub(in crate::interpreter::parser) fn parse_argument<'a, I>(tokens: &mut Peekable<I>,
                                                            open: Tag)
                                                            -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek() {
        Some(token) if token.tag == open => parse_expression(tokens, ARGUMENT_PRECEDENCE),
        Some(token) => Err(ParseError::ExpectedArgument { expected: open.to_string(),
                                                          token:    token.name(),
                                                          coord:    token.coord(), }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: open.to_string(),
                                                       coord:    Default::default(), }),
    }
}

/// Consumes a `{...}` group without building nodes and returns the byte
/// range it covers, braces included.
pub(in crate::interpreter::parser) fn skip_group<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<std::ops::Range<usize>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let open = next_token(tokens, "{")?;
    let mut depth = 1usize;

    loop {
        let token = next_token(tokens, "}")?;
        match token.tag {
            Tag::LBrace => depth += 1,
            Tag::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open.start.offset..token.end.offset);
                }
            },
            Tag::None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "}".to_string(),
                                                              coord:    token.coord(), });
            },
            _ => {},
        }
    }
}

/// Consumes a `\\` only when `\otherwise` follows it.
pub(in crate::interpreter::parser) fn skip_break_before_otherwise<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut ahead = tokens.clone();
    if ahead.next().is_some_and(|t| t.tag == Tag::Break) && ahead.peek().is_some_and(|t| t.tag == Tag::Otherwise)
    {
        tokens.next();
    }
}
