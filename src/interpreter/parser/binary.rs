use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::token::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Builds the node for an infix operator whose left operand is already
/// parsed.
///
/// The operator token is converted to its binary form. Its right operand is
/// parsed with the operator's own precedence as threshold, which makes
/// chains left-associative: `a - b - c` is `(a - b) - c`. Inverted
/// operators (`:=` and `^`) lower the threshold by one and associate to the
/// right instead: `a ^ b ^ c` is `a ^ (b ^ c)`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the operator.
/// - `op`: The operator token.
/// - `left`: The parsed left operand.
///
/// # Returns
/// The binary node with `left` and `right` filled in.
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>, op: &Token, left: Node) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let tag = op.tag.to_binary();
    let info = tag.info();
    let threshold = if info.is_inverted { info.precedence - 1 } else { info.precedence };

    let right = parse_expression(tokens, threshold)?;

    Ok(Node::new(tag, op.coord(), op.name()).with_left(left).with_right(right))
}
