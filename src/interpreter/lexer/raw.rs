use logos::Logos;

/// Context-free lexemes recognized directly by `logos`.
///
/// Everything that needs look-ahead into the rest of the region (attributes,
/// subscripts, loop bounds, comments) is handled by
/// [`Lexer`](crate::interpreter::lexer::core::Lexer) on top of these.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    #[regex(r"[ \t\f\r]+")]
    Blank,
    #[regex(r"\r?\n")]
    Newline,
    #[token("%")]
    Percent,
    #[token("\\\\")]
    LineBreak,
    #[regex(r"\\[a-zA-Z]+")]
    Command,
    #[token("\\")]
    Backslash,
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Word,
    #[regex(r"0(\.[0-9]*)?|[1-9][0-9]*(\.[0-9]*)?")]
    Number,
    #[token(":=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("_")]
    Underscore,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equals,
    #[token("&")]
    Ampersand,
}
