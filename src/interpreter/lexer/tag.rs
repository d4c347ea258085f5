use std::fmt;

/// Syntactic role of a token and of the AST node built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// End of the token stream.
    None,
    UAdd,
    USub,
    Add,
    Sub,
    Mul,
    Div,
    Frac,
    Pow,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// `:=`
    Set,
    Comma,
    /// `\\`, the statement and matrix-row separator.
    Break,
    /// `_`
    Index,
    /// `&`, the matrix column separator.
    Amp,
    While,
    If,
    When,
    Otherwise,
    /// One alternative of a case block.
    Alt,
    Begin,
    End,
    BeginB,
    EndB,
    BeginC,
    EndC,
    BeginM,
    EndM,
    Lt,
    Gt,
    Leq,
    Geq,
    Eq,
    Neq,
    Or,
    And,
    Not,
    Abs,
    Number,
    Ident,
    /// Backslash name that is not part of the syntax, such as `\sin` or `\pi`.
    Keyword,
    /// Call of a user-defined function.
    Func,
    Error,
    Space,
    Skip,
    Placeholder,
    Text,
    List,
    Root,
    Graphic,
    Range,
    Transp,
    Sum,
    Product,
    Dimension,
    Floor,
    Ceil,
}

/// Static metadata attached to every [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    /// Upper-case display name used in diagnostics.
    pub name:        &'static str,
    /// Binding power, 0 for everything that is not an operator.
    pub precedence:  u8,
    /// Tag that must close a bracket-like construct.
    pub close:       Option<Tag>,
    /// Unary or binary counterpart of an operator.
    pub alternate:   Option<Tag>,
    pub is_operator: bool,
    pub is_binary:   bool,
    /// Right-associative operators recurse with a lowered threshold.
    pub is_inverted: bool,
}

const fn plain(name: &'static str) -> TagInfo {
    TagInfo { name,
              precedence: 0,
              close: None,
              alternate: None,
              is_operator: false,
              is_binary: false,
              is_inverted: false }
}

const fn bracket(name: &'static str, close: Tag) -> TagInfo {
    TagInfo { close: Some(close),
              ..plain(name) }
}

const fn binary(name: &'static str, precedence: u8) -> TagInfo {
    TagInfo { precedence,
              is_operator: true,
              is_binary: true,
              ..plain(name) }
}

const fn prefix(name: &'static str, precedence: u8) -> TagInfo {
    TagInfo { precedence,
              is_operator: true,
              ..plain(name) }
}

impl Tag {
    /// Returns the static metadata of this tag.
    ///
    /// ```
    /// use texcalc::interpreter::lexer::tag::Tag;
    ///
    /// assert!(Tag::Mul.precedence() > Tag::Add.precedence());
    /// assert_eq!(Tag::Sub.to_unary(), Tag::USub);
    /// assert_eq!(Tag::BeginM.info().close, Some(Tag::EndM));
    /// ```
    #[must_use]
    pub const fn info(self) -> TagInfo {
        match self {
            Self::None => plain("NONE"),
            Self::UAdd => TagInfo { alternate: Some(Self::Add),
                                    ..prefix("UADD", 130) },
            Self::USub => TagInfo { alternate: Some(Self::Sub),
                                    ..prefix("USUB", 130) },
            Self::Add => TagInfo { alternate: Some(Self::UAdd),
                                   ..binary("ADD", 110) },
            Self::Sub => TagInfo { alternate: Some(Self::USub),
                                   ..binary("SUB", 110) },
            Self::Mul => binary("MUL", 120),
            Self::Div => binary("DIV", 120),
            Self::Frac => prefix("FRAC", 140),
            Self::Pow => TagInfo { is_inverted: true,
                                   ..binary("POW", 150) },
            Self::LParen => bracket("LPAREN", Self::RParen),
            Self::RParen => plain("RPAREN"),
            Self::LBrace => bracket("LBRACE", Self::RBrace),
            Self::RBrace => plain("RBRACE"),
            Self::LBracket => bracket("LBRACKET", Self::RBracket),
            Self::RBracket => plain("RBRACKET"),
            Self::Set => TagInfo { is_inverted: true,
                                   ..binary("SET", 60) },
            Self::Comma => plain("COMMA"),
            Self::Break => plain("BREAK"),
            Self::Index => TagInfo { precedence: 228,
                                     ..plain("INDEX") },
            Self::Amp => plain("AMP"),
            Self::While => plain("WHILE"),
            Self::If => plain("IF"),
            Self::When => plain("WHEN"),
            Self::Otherwise => plain("OTHERWISE"),
            Self::Alt => plain("ALT"),
            Self::Begin => bracket("BEGIN", Self::End),
            Self::End => plain("END"),
            Self::BeginB => bracket("BEGINB", Self::EndB),
            Self::EndB => plain("ENDB"),
            Self::BeginC => bracket("BEGINC", Self::EndC),
            Self::EndC => plain("ENDC"),
            Self::BeginM => bracket("BEGINM", Self::EndM),
            Self::EndM => plain("ENDM"),
            Self::Lt => binary("LT", 100),
            Self::Gt => binary("GT", 100),
            Self::Leq => binary("LEQ", 100),
            Self::Geq => binary("GEQ", 100),
            Self::Eq => binary("EQ", 90),
            Self::Neq => binary("NEQ", 90),
            Self::Or => binary("OR", 70),
            Self::And => binary("AND", 80),
            Self::Not => prefix("NOT", 130),
            Self::Abs => prefix("ABS", 100),
            Self::Number => plain("NUMBER"),
            Self::Ident => plain("IDENT"),
            Self::Keyword => plain("KEYWORD"),
            Self::Func => plain("FUNC"),
            Self::Error => plain("ERROR"),
            Self::Space => plain("SPACE"),
            Self::Skip => plain("SKIP"),
            Self::Placeholder => plain("PLACEHOLDER"),
            Self::Text => plain("TEXT"),
            Self::List => plain("LIST"),
            Self::Root => plain("ROOT"),
            Self::Graphic => plain("GRAPHIC"),
            Self::Range => plain("RANGE"),
            Self::Transp => plain("TRANSP"),
            Self::Sum => plain("SUM"),
            Self::Product => plain("PRODUCT"),
            Self::Dimension => plain("DIMENSION"),
            Self::Floor => plain("FLOOR"),
            Self::Ceil => plain("CEIL"),
        }
    }

    #[must_use]
    pub const fn precedence(self) -> u8 {
        self.info().precedence
    }

    #[must_use]
    pub const fn close_tag(self) -> Option<Self> {
        self.info().close
    }

    /// Converts a binary operator to its prefix form if it has one.
    #[must_use]
    pub const fn to_unary(self) -> Self {
        let info = self.info();
        match info.alternate {
            Some(alternate) if info.is_binary => alternate,
            _ => self,
        }
    }

    /// Converts a prefix operator to its infix form if it has one.
    #[must_use]
    pub const fn to_binary(self) -> Self {
        let info = self.info();
        match info.alternate {
            Some(alternate) if !info.is_binary => alternate,
            _ => self,
        }
    }

    /// Returns `true` for the relational operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::Leq | Self::Geq | Self::Eq | Self::Neq)
    }

    /// Maps a backslash command such as `\cdot` to its tag.
    ///
    /// Names outside the table are ordinary keywords and resolve to
    /// [`Tag::Keyword`].
    #[must_use]
    pub fn from_command(name: &str) -> Self {
        match name {
            "\\begin" => Self::Begin,
            "\\end" => Self::End,
            "\\placeholder" => Self::Placeholder,
            "\\text" => Self::Text,
            "\\cdot" | "\\times" => Self::Mul,
            "\\frac" => Self::Frac,
            "\\eq" => Self::Eq,
            "\\neq" => Self::Neq,
            "\\leq" => Self::Leq,
            "\\geq" => Self::Geq,
            "\\neg" => Self::Not,
            "\\lor" | "\\vee" => Self::Or,
            "\\land" | "\\wedge" => Self::And,
            "\\ifexpr" => Self::If,
            "\\while" => Self::While,
            "\\when" => Self::When,
            "\\otherwise" => Self::Otherwise,
            "\\graphic" => Self::Graphic,
            "\\range" => Self::Range,
            "\\transpose" => Self::Transp,
            "\\sum" => Self::Sum,
            "\\prod" => Self::Product,
            "\\abs" => Self::Abs,
            "\\floor" => Self::Floor,
            "\\ceil" => Self::Ceil,
            _ => Self::Keyword,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().name)
    }
}
