use texcalc::{
    error::{LexError, ParseError},
    interpreter::{
        lexer::{core::Lexer, tag::Tag, token::Coordinate},
        parser::core::parse_program,
    },
};

fn tags(src: &str) -> Vec<Tag> {
    match Lexer::new(src, Coordinate::default()).tokenize() {
        Ok(tokens) => tokens.iter().map(|t| t.tag).collect(),
        Err(e) => panic!("Lexing failed: {e}"),
    }
}

fn sexpr(src: &str) -> String {
    let tokens = Lexer::new(src, Coordinate::default()).tokenize()
                                                       .unwrap_or_else(|e| panic!("Lexing failed: {e}"));
    let root = parse_program(&tokens).unwrap_or_else(|e| panic!("Parsing failed: {e}"));
    root.fields.iter().map(|n| n.to_sexpr()).collect::<Vec<_>>().join("; ")
}

fn parse_error(src: &str) -> ParseError {
    let tokens = Lexer::new(src, Coordinate::default()).tokenize()
                                                       .unwrap_or_else(|e| panic!("Lexing failed: {e}"));
    match parse_program(&tokens) {
        Ok(root) => panic!("Parsing succeeded: {}", root.to_sexpr()),
        Err(e) => e,
    }
}

#[test]
fn lexes_units_and_identifiers() {
    assert_eq!(tags("x := 2 \\cdot m"),
               [Tag::Ident, Tag::Set, Tag::Number, Tag::Mul, Tag::Dimension, Tag::None]);
    assert_eq!(tags("v_\\text{max} \\times kg"), [Tag::Ident, Tag::Mul, Tag::Dimension, Tag::None]);
    assert_eq!(tags("1.5 \\leq x"), [Tag::Number, Tag::Leq, Tag::Ident, Tag::None]);
}

#[test]
fn comments_and_line_breaks() {
    assert_eq!(tags("1 + 2 % trailing remark"), [Tag::Number, Tag::Add, Tag::Number, Tag::None]);
    assert_eq!(tags("a \\\\ b"), [Tag::Ident, Tag::Break, Tag::Ident, Tag::None]);
    assert_eq!(tags("a\nb"), [Tag::Ident, Tag::Ident, Tag::None]);
}

#[test]
fn floor_braces_become_a_call() {
    assert_eq!(tags("\\floor{x}"), [Tag::Keyword, Tag::LParen, Tag::Ident, Tag::RParen, Tag::None]);
    assert_eq!(tags("\\ceil{\\frac{a}{b}}"),
               [Tag::Keyword,
                Tag::LParen,
                Tag::Frac,
                Tag::LBrace,
                Tag::Ident,
                Tag::RBrace,
                Tag::LBrace,
                Tag::Ident,
                Tag::RBrace,
                Tag::RParen,
                Tag::None]);
}

#[test]
fn placeholder_divisor_becomes_a_division() {
    assert_eq!(tags("x = \\placeholder{}"), [Tag::Ident, Tag::Eq, Tag::Placeholder, Tag::None]);
    assert_eq!(tags("x = \\placeholder[m]{3}"),
               [Tag::Ident,
                Tag::Eq,
                Tag::Placeholder,
                Tag::Div,
                Tag::LParen,
                Tag::Dimension,
                Tag::RParen,
                Tag::None]);
}

#[test]
fn placeholder_span_covers_its_slot() {
    let src = "x = \\placeholder{42}";
    let tokens = Lexer::new(src, Coordinate::default()).tokenize().unwrap();
    let slot = tokens.iter().find(|t| t.tag == Tag::Placeholder).unwrap();
    assert_eq!(&src[slot.span()], "{42}");
}

#[test]
fn sums_expand_into_accumulator_loops() {
    assert_eq!(tags("\\sum_{i=1}^{3} i"),
               [Tag::BeginB,
                Tag::Ident,
                Tag::Set,
                Tag::Number,
                Tag::Ident,
                Tag::Set,
                Tag::Number,
                Tag::Sum,
                Tag::LBrace,
                Tag::Ident,
                Tag::Leq,
                Tag::Number,
                Tag::RBrace,
                Tag::BeginB,
                Tag::Ident,
                Tag::Set,
                Tag::Ident,
                Tag::Add,
                Tag::LParen,
                Tag::Ident,
                Tag::RParen,
                Tag::Ident,
                Tag::Set,
                Tag::Ident,
                Tag::Add,
                Tag::Number,
                Tag::EndB,
                Tag::Ident,
                Tag::EndB,
                Tag::None]);
}

#[test]
fn loops_close_before_a_line_break() {
    let tags = tags("\\prod_{k=1}^{2} k \\\\ y");
    let brk = tags.iter().position(|t| *t == Tag::Break).unwrap();
    assert_eq!(tags[brk - 1], Tag::EndB);
    assert_eq!(&tags[brk + 1..], [Tag::Ident, Tag::None]);
}

#[test]
fn malformed_loops_fail() {
    let result = Lexer::new("\\sum_{1}^{3} i", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::MalformedBounds { .. })), "{result:?}");

    let result = Lexer::new("\\sum{i=1}^{3} i", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::MalformedBounds { .. })), "{result:?}");

    let result = Lexer::new("\\prod_{i=1}^{2} \\sum_{j=1}^{2} j", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::MixedLoopNesting { .. })), "{result:?}");
}

#[test]
fn lexer_errors() {
    let result = Lexer::new("x := ?", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::UnexpectedCharacter { .. })), "{result:?}");

    let result = Lexer::new("\\begin{tabular}", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::UnknownEnvironment { .. })), "{result:?}");

    let result = Lexer::new("x_\\mathrm{a}", Coordinate::default()).tokenize();
    assert!(matches!(result, Err(LexError::ExpectedText { .. })), "{result:?}");
}

#[test]
fn tokens_carry_document_coordinates() {
    let tokens = Lexer::new("a\n  b", Coordinate::new(3, 10)).tokenize().unwrap();
    assert_eq!(tokens[0].coord(), Coordinate::new(3, 10));
    assert_eq!(tokens[1].coord(), Coordinate::new(4, 3));
}

#[test]
fn operator_precedence_and_associativity() {
    assert_eq!(sexpr("3+4*2"), "ADD(3, MUL(4, 2))");
    assert_eq!(sexpr("10-4-3"), "SUB(SUB(10, 4), 3)");
    assert_eq!(sexpr("2^3^2"), "POW(2, POW(3, 2))");
    assert_eq!(sexpr("-x^2"), "USUB(POW(x, 2))");
    assert_eq!(sexpr("x := 1 + 2"), "SET(x, ADD(1, 2))");
    assert_eq!(sexpr("a < b \\land c"), "AND(LT(a, b), c)");
    assert_eq!(sexpr("a = b + 1"), "EQ(a, ADD(b, 1))");
}

#[test]
fn statements_need_no_separator() {
    assert_eq!(sexpr("x := 1 y := 2"), "SET(x, 1); SET(y, 2)");
    assert_eq!(sexpr("x := 1 \\\\ x"), "SET(x, 1); x");
}

#[test]
fn identifiers_calls_and_commands() {
    assert_eq!(sexpr("f(a, b)"), "FUNC:f(a, b)");
    assert_eq!(sexpr("x_{1, 2}"), "IDENT:x(1, 2)");
    assert_eq!(sexpr("x_0"), "IDENT:x(0)");
    assert_eq!(sexpr("\\frac{a}{b}"), "FRAC(a, b)");
    assert_eq!(sexpr("\\transpose{A}"), "TRANSP(A)");
    assert_eq!(sexpr("\\range[2]{0}{10}"), "RANGE(2, 0, 10)");
    assert_eq!(sexpr("\\max(a, 3 \\cdot m)"), "KEYWORD:\\max(a, MUL(3, m))");
}

#[test]
fn conditionals_and_cases() {
    assert_eq!(sexpr("\\ifexpr{a} b \\otherwise c"), "IF(a, c, b)");
    assert_eq!(sexpr("\\ifexpr{a} \\\\ b \\\\ \\otherwise c"), "IF(a, c, b)");
    assert_eq!(sexpr("\\begin{caseblock} 1 \\when a \\\\ 2 \\otherwise \\end{caseblock}"),
               "BEGINC(ALT(a, 1), ALT(2))");
}

#[test]
fn matrices_and_graphics() {
    assert_eq!(sexpr("\\begin{pmatrix} 1 & 2 \\\\ 3 & 4 \\end{pmatrix}"), "BEGINM(LIST(1, 2), LIST(3, 4))");
    assert_eq!(sexpr("\\graphic{f}{\\range{0}{1}}"), "GRAPHIC:f(RANGE(0, 1))");
}

#[test]
fn graphic_payload_becomes_the_replacement_extent() {
    let src = "\\graphic{f}{\\range{0}{1}}{(0,0)}";
    let tokens = Lexer::new(src, Coordinate::default()).tokenize().unwrap();
    let root = parse_program(&tokens).unwrap();
    let extent = root.fields[0].extent.clone().unwrap();
    assert_eq!(&src[extent], "{(0,0)}");

    let src = "\\graphic{f}{\\range{0}{1}}";
    let tokens = Lexer::new(src, Coordinate::default()).tokenize().unwrap();
    let root = parse_program(&tokens).unwrap();
    assert_eq!(root.fields[0].extent, Some(src.len()..src.len()));
}

#[test]
fn parser_errors() {
    assert!(matches!(parse_error("\\begin{pmatrix} 1 & 2 \\\\ 3 \\end{pmatrix}"),
                     ParseError::MatrixNotRectangular { .. }));
    assert!(matches!(parse_error("x_{1, 2, 3}"), ParseError::BadIndex { count: 3, .. }));
    assert!(matches!(parse_error("\\begin{caseblock} 1 \\\\ 2 \\end{caseblock}"),
                     ParseError::MalformedCase { .. }));
    assert!(matches!(parse_error("\\graphic{2}{x}"), ParseError::ExpectedIdentifier { .. }));
    assert!(matches!(parse_error("f(a b)"), ParseError::ListNotClosed { .. }));
    assert!(matches!(parse_error("3 +"), ParseError::UnexpectedEndOfInput { .. }));
}
