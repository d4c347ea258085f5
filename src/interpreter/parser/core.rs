use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{tag::Tag, token::Token},
        parser::{binary::parse_binary, block::parse_block, unary::parse_unary},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Threshold used for command arguments such as `\frac{a}{b}`: no infix
/// operator binds tighter, so exactly one primary term is read.
pub const ARGUMENT_PRECEDENCE: u8 = u8::MAX;

/// Parses a whole region.
///
/// The region is a block of statements terminated by the final
/// [`Tag::None`] token. The statements become the fields of a
/// [`Tag::Root`] node.
///
/// # Example
/// ```
/// use texcalc::interpreter::{
///     lexer::{core::Lexer, token::Coordinate},
///     parser::core::parse_program,
/// };
///
/// let tokens = Lexer::new("3+4*2", Coordinate::default()).tokenize().unwrap();
/// let root = parse_program(&tokens).unwrap();
///
/// assert_eq!(root.fields[0].to_sexpr(), "ADD(3, MUL(4, 2))");
/// ```
pub fn parse_program(tokens: &[Token]) -> ParseResult<Node> {
    let coord = tokens.first().map(Token::coord).unwrap_or_default();
    let mut iter = tokens.iter().peekable();

    let mut root = Node::new(Tag::Root, coord, "ROOT");
    root.fields = parse_block(&mut iter, Tag::None)?;
    Ok(root)
}

/// Parses an expression by precedence climbing.
///
/// Reads one term in prefix position, then folds every following infix
/// operator whose precedence exceeds `min_precedence`. Prefix-only
/// operators such as `\neg` end the expression.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of the term.
/// - `min_precedence`: Operators at or below this level are left to the
///   caller.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, min_precedence: u8) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let first = next_token(tokens, "expression")?;
    let mut node = parse_unary(tokens, first)?;

    while let Some(&op) = tokens.peek()
          && op.tag.to_binary().info().is_binary
          && min_precedence < op.tag.to_binary().precedence()
    {
        tokens.next();
        node = parse_binary(tokens, op, node)?;
    }

    Ok(node)
}

/// Takes the next token, failing if the stream is exhausted.
pub(in crate::interpreter::parser) fn next_token<'a, I>(tokens: &mut Peekable<I>,
                                                        expected: &str)
                                                        -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.next().ok_or_else(|| ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                                   coord:    Default::default(), })
}

/// Returns `true` if the next token has the given tag.
pub(in crate::interpreter::parser) fn peek_is<'a, I>(tokens: &mut Peekable<I>, tag: Tag) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    tokens.peek().is_some_and(|t| t.tag == tag)
}

/// Consumes the required closing tag.
///
/// # Errors
/// `UnexpectedEndOfInput` if the region ends first, `UnexpectedToken` for
/// anything else.
pub(in crate::interpreter::parser) fn expect_close<'a, I>(tokens: &mut Peekable<I>,
                                                          close: Tag)
                                                          -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = next_token(tokens, close.info().name)?;
    match token.tag {
        tag if tag == close => Ok(token),
        Tag::None => Err(ParseError::UnexpectedEndOfInput { expected: close.to_string(),
                                                            coord:    token.coord(), }),
        _ => Err(ParseError::UnexpectedToken { token: token.name(),
                                               coord: token.coord(), }),
    }
}
