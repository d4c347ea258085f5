use std::ops::Range;

use crate::interpreter::lexer::{
    tag::Tag,
    token::{Coordinate, Token},
};

/// A node of the syntax tree.
///
/// Every construct shares this shape and is told apart by its [`Tag`]:
/// - operators use `left` and `right` (prefix operators only `right`),
/// - `\ifexpr` and loops put their condition in `cond` and their body in
///   `right`, with the else branch of `\ifexpr` in `left`,
/// - blocks, matrix rows (each a `LIST` of cells), argument lists, case
///   alternatives and index components live in `fields`.
///
/// Children are owned exclusively, so cloning copies the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag:        Tag,
    pub coord:      Coordinate,
    /// Source text for leaves, accumulator name for desugared loops, tag
    /// name otherwise.
    pub label:      String,
    pub precedence: u8,
    pub left:       Option<Box<Node>>,
    pub right:      Option<Box<Node>>,
    pub cond:       Option<Box<Node>>,
    pub fields:     Vec<Node>,
    /// Byte range replaced by the value of a placeholder or graphic.
    pub extent:     Option<Range<usize>>,
}

impl Node {
    /// Creates a childless node.
    #[must_use]
    pub fn new(tag: Tag, coord: Coordinate, label: impl Into<String>) -> Self {
        Self { tag,
               coord,
               label: label.into(),
               precedence: tag.precedence(),
               left: None,
               right: None,
               cond: None,
               fields: Vec::new(),
               extent: None }
    }

    /// Creates a leaf node from a token.
    ///
    /// Placeholders remember the span of their slot so the evaluator can
    /// replace it.
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        let mut node = Self::new(token.tag, token.coord(), token.name());
        if token.tag == Tag::Placeholder {
            node.extent = Some(token.span());
        }
        node
    }

    #[must_use]
    pub fn with_left(mut self, node: Self) -> Self {
        self.left = Some(Box::new(node));
        self
    }

    #[must_use]
    pub fn with_right(mut self, node: Self) -> Self {
        self.right = Some(Box::new(node));
        self
    }

    #[must_use]
    pub fn with_cond(mut self, node: Self) -> Self {
        self.cond = Some(Box::new(node));
        self
    }

    #[must_use]
    pub fn lhs(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    #[must_use]
    pub fn rhs(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    #[must_use]
    pub fn condition(&self) -> Option<&Self> {
        self.cond.as_deref()
    }

    /// `true` for an identifier without index components.
    #[must_use]
    pub fn is_bare_identifier(&self) -> bool {
        self.tag == Tag::Ident && self.fields.is_empty()
    }

    /// For `lhs = \placeholder{..}` or `lhs = \placeholder{..} / d`, returns
    /// the placeholder node and the divisor `d`, if any.
    #[must_use]
    pub fn placeholder_capture(&self) -> Option<(&Self, Option<&Self>)> {
        if self.tag != Tag::Eq {
            return None;
        }
        let rhs = self.rhs()?;
        match rhs.tag {
            Tag::Placeholder => Some((rhs, None)),
            Tag::Div => {
                let slot = rhs.lhs().filter(|n| n.tag == Tag::Placeholder)?;
                Some((slot, rhs.rhs()))
            },
            _ => None,
        }
    }

    /// Name of the tag, used in diagnostics.
    #[must_use]
    pub fn operation(&self) -> String {
        self.tag.to_string()
    }

    /// Renders the tree in prefix form, for example `ADD(3, MUL(4, 2))`.
    ///
    /// ```
    /// use texcalc::{ast::Node, interpreter::lexer::{tag::Tag, token::Coordinate}};
    ///
    /// let at = Coordinate::default();
    /// let sum = Node::new(Tag::Add, at, "+").with_left(Node::new(Tag::Number, at, "3"))
    ///                                       .with_right(Node::new(Tag::Number, at, "4"));
    /// assert_eq!(sum.to_sexpr(), "ADD(3, 4)");
    /// ```
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        let is_leaf = self.left.is_none() && self.right.is_none() && self.cond.is_none() && self.fields.is_empty();
        if is_leaf && matches!(self.tag, Tag::Number | Tag::Ident | Tag::Keyword | Tag::Dimension) {
            return self.label.clone();
        }

        let children: Vec<String> = [&self.cond, &self.left, &self.right].into_iter()
                                                                          .flatten()
                                                                          .map(|n| n.to_sexpr())
                                                                          .chain(self.fields.iter().map(Self::to_sexpr))
                                                                          .collect();
        let head = match self.tag {
            Tag::Ident | Tag::Func | Tag::Keyword | Tag::Graphic => format!("{}:{}", self.tag, self.label),
            _ => self.tag.to_string(),
        };
        format!("{head}({})", children.join(", "))
    }
}
