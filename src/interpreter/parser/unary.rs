use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{tag::Tag, token::Token},
        parser::{
            block::{parse_block, parse_cases, parse_matrix},
            core::{ParseResult, expect_close, next_token, parse_expression, peek_is},
            utils::{parse_argument, parse_delimited, parse_list, skip_break_before_otherwise, skip_group},
        },
    },
};

/// Parses the term that starts with `token`, which is in prefix position.
///
/// Binary operators with a prefix form (`+`, `-`) are converted first.
/// The term is one of:
/// - a literal, unit, placeholder or identifier (possibly indexed or
///   called),
/// - a bracketed group or a `block`/`caseblock`/`pmatrix` environment,
/// - a command with arguments (`\frac`, `\range`, `\transpose`,
///   `\ifexpr`, `\graphic`),
/// - a loop (`\while` or a desugared sum/product),
/// - a prefix operator applied to the expression that follows.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `token`.
/// - `token`: The first token of the term.
///
/// # Errors
/// `UnexpectedToken` for tokens that cannot start a term, and
/// `UnexpectedEndOfInput` at the end of the region.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, token: &'a Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let tag = token.tag.to_unary();

    match tag {
        Tag::Number | Tag::Dimension | Tag::Placeholder => Ok(Node::from_token(token)),
        Tag::Ident => parse_identifier(tokens, token),
        Tag::Keyword => {
            let mut node = Node::from_token(token);
            if peek_is(tokens, Tag::LParen) {
                node.fields = parse_list(tokens, Tag::RParen)?;
            }
            Ok(node)
        },
        Tag::LParen | Tag::LBrace | Tag::LBracket => {
            let inner = parse_expression(tokens, 0)?;
            if let Some(close) = tag.close_tag() {
                expect_close(tokens, close)?;
            }
            Ok(inner)
        },
        Tag::BeginB => {
            let mut node = Node::new(tag, token.coord(), "block");
            node.fields = parse_block(tokens, Tag::EndB)?;
            expect_close(tokens, Tag::EndB)?;
            Ok(node)
        },
        Tag::BeginC => {
            let mut node = Node::new(tag, token.coord(), "caseblock");
            node.fields = parse_cases(tokens)?;
            expect_close(tokens, Tag::EndC)?;
            Ok(node)
        },
        Tag::BeginM => {
            let mut node = Node::new(tag, token.coord(), "pmatrix");
            node.fields = parse_matrix(tokens, token.coord())?;
            expect_close(tokens, Tag::EndM)?;
            Ok(node)
        },
        Tag::Range => {
            let mut node = Node::from_token(token);
            if peek_is(tokens, Tag::LBracket) {
                node = node.with_cond(parse_argument(tokens, Tag::LBracket)?);
            }
            Ok(node.with_left(parse_argument(tokens, Tag::LBrace)?)
                   .with_right(parse_argument(tokens, Tag::LBrace)?))
        },
        Tag::Transp => Ok(Node::from_token(token).with_left(parse_argument(tokens, Tag::LBrace)?)),
        Tag::Frac => Ok(Node::from_token(token).with_left(parse_argument(tokens, Tag::LBrace)?)
                                               .with_right(parse_argument(tokens, Tag::LBrace)?)),
        Tag::If => parse_if(tokens, token),
        Tag::While | Tag::Sum | Tag::Product => {
            let cond = parse_expression(tokens, 0)?;
            if peek_is(tokens, Tag::Break) {
                tokens.next();
            }
            let body = parse_expression(tokens, 0)?;
            Ok(Node::from_token(token).with_cond(cond).with_right(body))
        },
        Tag::Graphic => parse_graphic(tokens),
        Tag::UAdd | Tag::USub | Tag::Not | Tag::Abs => {
            let operand = parse_expression(tokens, tag.precedence())?;
            Ok(Node::new(tag, token.coord(), token.name()).with_right(operand))
        },
        Tag::None => Err(ParseError::UnexpectedEndOfInput { expected: "expression".to_string(),
                                                            coord:    token.coord(), }),
        _ => Err(ParseError::UnexpectedToken { token: token.name(),
                                               coord: token.coord(), }),
    }
}

/// Parses an identifier with its optional index or call suffix.
///
/// - `x_1` and `x_{i, j}` keep the tag [`Tag::Ident`] and store one or two
///   index expressions in `fields`.
/// - `f(a, b)` becomes [`Tag::Func`] with the arguments in `fields`.
///
/// # Errors
/// `BadIndex` if a braced index has no or more than two components.
fn parse_identifier<'a, I>(tokens: &mut Peekable<I>, token: &'a Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut node = Node::from_token(token);

    if peek_is(tokens, Tag::Index) {
        tokens.next();
        if peek_is(tokens, Tag::LBrace) {
            node.fields = parse_list(tokens, Tag::RBrace)?;
            if !(1..=2).contains(&node.fields.len()) {
                return Err(ParseError::BadIndex { count: node.fields.len(),
                                                  coord: token.coord(), });
            }
        } else {
            let index = next_token(tokens, "index")?;
            node.fields.push(parse_unary(tokens, index)?);
        }
    } else if peek_is(tokens, Tag::LParen) {
        node.tag = Tag::Func;
        node.fields = parse_list(tokens, Tag::RParen)?;
    }

    Ok(node)
}

/// Parses `\ifexpr{cond} then \otherwise else`.
///
/// A `\\` may separate the condition from the then branch and the then
/// branch from `\otherwise`. Without `\otherwise` the node has no `left`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, token: &'a Token) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let cond = parse_argument(tokens, Tag::LBrace)?;
    if peek_is(tokens, Tag::Break) {
        tokens.next();
    }
    let mut node = Node::from_token(token).with_cond(cond)
                                          .with_right(parse_expression(tokens, 0)?);

    skip_break_before_otherwise(tokens);
    if peek_is(tokens, Tag::Otherwise) {
        tokens.next();
        if peek_is(tokens, Tag::Break) {
            tokens.next();
        }
        node = node.with_left(parse_expression(tokens, 0)?);
    }

    Ok(node)
}

/// Parses `\graphic{f}{fields}{payload}`.
///
/// The fields are the arguments `f` is sampled with, one of which must be a
/// `\range`. The optional payload holds the points of a previous run; it is
/// skipped and its span becomes the replacement range. Without a payload
/// the points are inserted right after the fields.
///
/// # Errors
/// `ExpectedIdentifier` if the function name is not a plain identifier.
fn parse_graphic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let name = parse_argument(tokens, Tag::LBrace)?;
    if !name.is_bare_identifier() {
        return Err(ParseError::ExpectedIdentifier { token: name.label,
                                                    coord: name.coord, });
    }

    let mut node = Node::new(Tag::Graphic, name.coord, name.label);

    match tokens.peek() {
        Some(token) if token.tag == Tag::LBrace => {},
        Some(token) => {
            return Err(ParseError::ExpectedArgument { expected: Tag::LBrace.to_string(),
                                                      token:    token.name(),
                                                      coord:    token.coord(), });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected: Tag::LBrace.to_string(),
                                                          coord:    node.coord, });
        },
    }
    let (fields, close) = parse_delimited(tokens, Tag::RBrace)?;
    node.fields = fields;

    node.extent = if peek_is(tokens, Tag::LBrace) {
        Some(skip_group(tokens)?)
    } else {
        Some(close.end.offset..close.end.offset)
    };

    Ok(node)
}
