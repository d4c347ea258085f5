use std::fs::{self};

use texcalc::{
    Config,
    error::{DocumentError, Error, ParseError, RuntimeError, SemanticError},
    evaluate,
    interpreter::{
        evaluator::core::Context,
        lexer::{tag::Tag, token::Coordinate},
        value::{core::Value, dimension::Dimension},
    },
    process_document,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_tex_blocks(&content).into_iter().enumerate() {
            count += 1;
            let once = process_document("book", &code, &Config::default()).unwrap_or_else(|e| {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e)
            });
            let twice = process_document("book", &once, &Config::default()).unwrap_or_else(|e| {
                panic!("Example {} in {:?} failed on its own output:\n{}\nError: {}",
                       i + 1,
                       path,
                       once,
                       e)
            });
            assert_eq!(once, twice, "Example {} in {:?} is not idempotent", i + 1, path);
        }
    }

    assert!(count > 0, "No tex examples found in book/src");
}

fn extract_tex_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```tex") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = evaluate(src) {
        panic!("Source failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("Source succeeded but was expected to fail")
    }
}

fn assert_value(src: &str, expected: f64) {
    match evaluate(src) {
        Ok(value) => assert_eq!(value, Value::scalar(expected), "source: {src}"),
        Err(e) => panic!("Source failed: {e}"),
    }
}

/// Wraps `body` in a single region and processes it.
fn region(body: &str) -> String {
    let text = format!("\\begin{{preproc}}{body}\\end{{preproc}}");
    match process_document("test.tex", &text, &Config::default()) {
        Ok(output) => output,
        Err(e) => panic!("Document failed: {e}"),
    }
}

fn metre() -> Dimension {
    Dimension::from_unit("m").unwrap()
}

#[test]
fn arithmetic_and_precedence() {
    assert_value("3+4 \\cdot 2", 11.0);
    assert_value("3+4*2", 11.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("2^3^2", 512.0);
    assert_value("(3+4) \\cdot 2", 14.0);
    assert_value("\\frac{6}{4}", 1.5);
    assert_value("-2^2", -4.0);
}

#[test]
fn statements_and_breaks() {
    assert_value("x := 3 \\\\ y := x \\cdot 2 \\\\ y + 1", 7.0);
    assert_value("x := 3\ny := 4\nx \\cdot y", 12.0);
    assert_value("x := 1 \\\\ x := x + 1 \\\\ x", 2.0);
}

#[test]
fn comparisons_and_logic() {
    assert_value("2 < 3", 1.0);
    assert_value("3 \\leq 2", 0.0);
    assert_value("2 \\neq 3", 1.0);
    assert_value("1 < 2 \\land 2 < 3", 1.0);
    assert_value("1 > 2 \\lor 2 > 3", 0.0);
    assert_value("\\neg \\false", 1.0);
}

#[test]
fn placeholder_receives_value() {
    let output = region("x := 3+4*2 \\\\ x = \\placeholder{}");
    assert_eq!(output, "\\begin{preproc}x := 3+4*2 \\\\ x = \\placeholder{11}\\end{preproc}");
}

#[test]
fn placeholder_divisor_scales_value() {
    let output = region("d := 3 \\\\ d = \\placeholder[2]{}");
    assert!(output.contains("\\placeholder[2]{6}"), "{output}");
}

#[test]
fn stale_placeholder_is_replaced() {
    let output = region("x := 2 \\\\ x = \\placeholder{41}");
    assert!(output.contains("\\placeholder{2}"), "{output}");
    assert!(!output.contains("41"), "{output}");
}

#[test]
fn processing_is_idempotent() {
    let once = region("a := 2 \\cdot m \\\\ a \\cdot a = \\placeholder{}");
    let twice = process_document("test.tex", &once, &Config::default()).unwrap();
    assert_eq!(once, twice);
    assert!(once.contains("\\placeholder{4 \\cdot m^2}"), "{once}");
}

#[test]
fn globals_persist_across_regions() {
    let text = "\\begin{preproc}x := 4\\end{preproc} and \
                \\begin{preproc}x \\cdot 2 = \\placeholder{}\\end{preproc}";
    let output = process_document("test.tex", text, &Config::default()).unwrap();
    assert!(output.ends_with("x \\cdot 2 = \\placeholder{8}\\end{preproc}"), "{output}");
}

#[test]
fn custom_environment_and_comments() {
    let text = "% \\begin{calc}1/0\\end{calc}\n\\begin{calc}1+1 = \\placeholder{}\\end{calc}";
    let output = process_document("test.tex", text, &Config::new("calc")).unwrap();
    assert!(output.ends_with("\\placeholder{2}\\end{calc}"), "{output}");
    assert!(output.starts_with("% \\begin{calc}1/0"), "{output}");
}

#[test]
fn units_multiply_and_divide() {
    let result = evaluate("2 \\cdot m \\cdot 3 \\cdot m").unwrap();
    assert_eq!(result, Value::Number(6.0, metre().checked_scale(2).unwrap()));

    let result = evaluate("\\frac{6 \\cdot m}{2 \\cdot s}").unwrap();
    assert_eq!(result, Value::Number(3.0, metre().checked_sub(Dimension::from_unit("s").unwrap()).unwrap()));

    let result = evaluate("(2 \\cdot m)^2").unwrap();
    assert_eq!(result, Value::Number(4.0, metre().checked_scale(2).unwrap()));

    let output = region("v := 3 \\cdot \\frac{m}{s} \\\\ v = \\placeholder{}");
    assert!(output.contains("\\placeholder{3 \\cdot \\frac{m}{s}}"), "{output}");
}

#[test]
fn dimension_mismatch_is_a_semantic_error() {
    let result = evaluate("x := 2 \\cdot m + 3 \\cdot s");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::DimensionMismatch { .. }))),
            "{result:?}");

    let result = evaluate("2 \\cdot m < 3");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::DimensionMismatch { .. }))),
            "{result:?}");
}

#[test]
fn mismatch_names_both_operands_and_writes_nothing() {
    let text = "\\begin{preproc}x := 3 \\cdot m \\\\ y := x + 2 \\cdot kg \\\\ y = \\placeholder{}\\end{preproc}";
    let result = process_document("doc.tex", text, &Config::default());
    let Err(DocumentError::Region { source: Error::Semantic(SemanticError::DimensionMismatch { left, right, .. }), .. }) =
        result
    else {
        panic!("expected a dimension mismatch, got {result:?}");
    };
    assert_eq!(left, "3 \\cdot m");
    assert_eq!(right, "2 \\cdot kg");
}

#[test]
fn exponent_overflow_is_an_error() {
    let result = evaluate("(m^{65536})^{65536}");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::InvalidExponent { .. }))),
            "{result:?}");

    let result = evaluate("m^{2147483647} \\cdot m");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::ExponentOverflow { .. }))),
            "{result:?}");

    let huge = Value::Number(1.0, metre().checked_scale(i32::MAX).unwrap());
    let result = Context::eval_pow(&huge, &Value::scalar(2.0), Coordinate::default());
    assert!(matches!(result, Err(RuntimeError::InvalidExponent { .. })), "{result:?}");

    let result = Context::eval_binary(Tag::Mul, &huge, &Value::Number(1.0, metre()), Coordinate::default());
    assert!(matches!(result, Err(RuntimeError::ExponentOverflow { .. })), "{result:?}");
}

#[test]
fn inferred_dimensions_propagate() {
    // 'x' is inferred as a length from the addition
    let result = evaluate("g(x) := x + 1 \\cdot m \\\\ g(2)");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::ArgumentMismatch { .. }))),
            "{result:?}");

    assert_success("g(x) := x + 1 \\cdot m \\\\ g(2 \\cdot m)");
}

#[test]
fn invalid_exponents() {
    let result = evaluate("m^{0.5}");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::InvalidExponent { .. }))),
            "{result:?}");

    let result = evaluate("2^{1 \\cdot m}");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::InvalidExponent { .. }))),
            "{result:?}");

    assert_value("4^{0.5}", 2.0);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let result = evaluate("1/0");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::DivisionByZero { .. }))),
            "{result:?}");
}

#[test]
fn undefined_identifier_reports_document_coordinates() {
    let text = "line1\n\\begin{preproc}\ny := q\n\\end{preproc}";
    let error = process_document("doc.tex", text, &Config::default()).unwrap_err();
    assert_eq!(error.to_string(), "doc.tex:3:6:undefined identifier 'q'");
}

#[test]
fn unterminated_region_fails() {
    let result = process_document("doc.tex", "\\begin{preproc}1+1", &Config::default());
    assert!(matches!(result, Err(DocumentError::UnterminatedRegion { .. })), "{result:?}");
}

#[test]
fn sums_and_products() {
    assert_value("\\sum_{i=1}^{3} i", 6.0);
    assert_value("\\sum_{i:=1}^{4} i^2", 30.0);
    assert_value("\\prod_{k=1}^{4} k", 24.0);
    assert_value("\\sum_{i=1}^{2} \\sum_{j=1}^{3} j", 12.0);
    assert_value("t := \\sum_{i=1}^{3} 2 \\cdot i \\\\ t + 1", 13.0);
}

#[test]
fn sum_without_superscript() {
    assert_value("\\sum_{i=1}{3}{i}", 6.0);
}

#[test]
fn loops_bounded_by_parameters() {
    assert_value("f(n) := \\sum_{i=1}^{n} i \\\\ f(3)", 6.0);
    assert_value("g(n) := \\prod_{k=1}^{n} k \\\\ g(4)", 24.0);
    assert_value("n := 4 \\\\ \\sum_{i=1}^{n} i", 10.0);

    let result = evaluate("h(n) := \\prod_{k=1}^{n} 2 \\cdot m \\\\ h(2)").unwrap();
    assert_eq!(result, Value::Number(4.0, metre().checked_scale(2).unwrap()));
}

#[test]
fn loop_bounds_must_be_dimensionless() {
    let result = evaluate("\\sum_{i=1}^{3 \\cdot m} i");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::DimensionalBound { .. }))),
            "{result:?}");

    let result = evaluate("f(n) := \\sum_{i=1}^{n} i \\\\ f(3 \\cdot m)");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::ArgumentMismatch { .. }))),
            "{result:?}");
}

#[test]
fn product_of_quantities() {
    let output = region("v := \\prod_{k=1}^{3} 2 \\cdot m \\\\ v = \\placeholder{}");
    assert!(output.contains("\\placeholder{8 \\cdot m^3}"), "{output}");
}

#[test]
fn mixed_loop_nesting_fails() {
    let result = evaluate("\\sum_{i=1}^{2} \\prod_{j=1}^{2} j");
    assert!(matches!(result, Err(Error::Lex(_))), "{result:?}");
}

#[test]
fn while_loops() {
    assert_value("i := 0 \\\\ \\while{i < 5} i := i + 1 \\\\ i", 5.0);
    assert_value("n := 1 \\\\ \\while{n < 100} n := n \\cdot 2 \\\\ n", 128.0);
}

#[test]
fn conditionals() {
    assert_value("\\ifexpr{1 < 2} 5 \\otherwise 7", 5.0);
    assert_value("\\ifexpr{1 > 2} 5 \\otherwise 7", 7.0);
    assert_value("\\ifexpr{1 > 2} 5", 0.0);
    assert_value("x := 3 \\\\ \\ifexpr{x > 2} \\\\ x \\cdot 2 \\\\ \\otherwise x", 6.0);
}

#[test]
fn case_blocks() {
    let src = "x := 2 \\\\
               y := \\begin{caseblock} 1/0 \\when x < 1 \\\\ 5 \\otherwise \\end{caseblock} \\\\
               y";
    assert_value(src, 5.0);

    let src = "\\begin{caseblock} 1 \\when 1 < 2 \\\\ 2 \\when 2 < 3 \\end{caseblock}";
    assert_value(src, 1.0);

    let result = evaluate("\\begin{caseblock} 1 \\when 1 > 2 \\end{caseblock}");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::NoMatchingCase { .. }))),
            "{result:?}");
}

#[test]
fn blocks_return_their_last_statement() {
    assert_value("y := \\begin{block} a := 1 \\\\ b := 2 \\\\ a + b \\end{block} \\\\ y", 3.0);
}

#[test]
fn matrices_and_indexing() {
    let a = "M := \\begin{pmatrix} 1 & 2 \\\\ 3 & 4 \\end{pmatrix} \\\\ ";
    assert_value(&format!("{a}M_{{1, 0}}"), 3.0);
    assert_value(&format!("{a}M_{{0, 1}} := 7 \\\\ M_{{0, 1}}"), 7.0);

    let v = "v := \\begin{pmatrix} 1 & 2 & 3 \\end{pmatrix} \\\\ ";
    assert_value(&format!("{v}v_2"), 3.0);
    assert_value(&format!("{v}v \\cdot v"), 14.0);
    assert_value(&format!("{v}w := \\transpose{{v}} \\\\ w_1"), 2.0);

    let output = region(&format!("{a}M = \\placeholder{{}}"));
    assert!(output.contains("\\placeholder{\\begin{pmatrix}\n1 & 2\\\\\n3 & 4\\end{pmatrix}}"),
            "{output}");
}

#[test]
fn matrix_arithmetic() {
    let a = "M := \\begin{pmatrix} 1 & 2 \\\\ 3 & 4 \\end{pmatrix} \\\\ ";
    assert_value(&format!("{a}B := M + M \\\\ B_{{1, 1}}"), 8.0);
    assert_value(&format!("{a}B := 2 \\cdot M \\\\ B_{{0, 1}}"), 4.0);
    assert_value(&format!("{a}B := M \\cdot M \\\\ B_{{0, 0}}"), 7.0);

    let result = evaluate(&format!("{a}M + \\begin{{pmatrix}} 1 & 2 \\end{{pmatrix}}"));
    assert!(result.is_err(), "{result:?}");
}

#[test]
fn non_rectangular_matrix_fails() {
    let result = evaluate("\\begin{pmatrix} 1 & 2 \\\\ 3 \\end{pmatrix}");
    assert!(matches!(result,
                     Err(Error::Parse(ParseError::MatrixNotRectangular { row: 1,
                                                                         expected: 2,
                                                                         found: 1,
                                                                         .. }))),
            "{result:?}");
}

#[test]
fn index_errors() {
    let a = "M := \\begin{pmatrix} 1 & 2 \\\\ 3 & 4 \\end{pmatrix} \\\\ ";
    let v = "v := \\begin{pmatrix} 1 & 2 & 3 \\end{pmatrix} \\\\ ";

    let result = evaluate(&format!("{v}v_{{3}}"));
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::IndexOutOfRange { .. }))),
            "{result:?}");

    let result = evaluate(&format!("{v}v_{{-1}}"));
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::NegativeIndex { .. }))),
            "{result:?}");

    let result = evaluate(&format!("{a}M_{{1}}"));
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::VectorIndexOnMatrix { .. }))),
            "{result:?}");

    let result = evaluate(&format!("{a}M_{{0, 0, 1}}"));
    assert!(matches!(result, Err(Error::Parse(ParseError::BadIndex { count: 3, .. }))),
            "{result:?}");
}

#[test]
fn functions_and_recursion() {
    assert_value("f(x, y) := x \\cdot y + 1 \\\\ f(2, 3)", 7.0);
    assert_value("sq(x) := x^2 \\\\ sq(sq(2))", 16.0);
    assert_value("fact(n) := \\ifexpr{n < 1} 1 \\otherwise n \\cdot fact(n - 1) \\\\ fact(5)", 120.0);

    let result = evaluate("f(x) := x + 1 \\\\ f(1, 2)");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::ArityMismatch { .. }))),
            "{result:?}");

    assert_failure("g(1)");
}

#[test]
fn functions_keep_the_globals_of_their_definition() {
    assert_value("k := 10 \\\\ add(x) := x + k \\\\ k := 20 \\\\ add(1)", 11.0);
    assert_value("a := 1 \\\\ f(x) := x + a \\\\ a := 5 \\\\ f(0)", 1.0);
    // 'i' is global after the first sum; the call counts with its own copy
    assert_value("\\sum_{i=1}^{5} i \\\\ f(n) := \\sum_{i=1}^{n} i \\\\ f(3)", 6.0);
}

#[test]
fn builtins_and_constants() {
    assert_value("\\sin(0)", 0.0);
    assert_value("\\max(2, 5)", 5.0);
    assert_value("\\floor{\\frac{7}{2}}", 3.0);
    assert_value("\\ceil{\\frac{7}{2}}", 4.0);
    assert_value("\\abs{-3}", 3.0);
    assert_value("\\pi", std::f64::consts::PI);

    let result = evaluate("\\max(2 \\cdot m, 3 \\cdot m)").unwrap();
    assert_eq!(result, Value::Number(3.0, metre()));

    let result = evaluate("\\sin(2 \\cdot m)");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::InvalidOperands { .. }))),
            "{result:?}");

    let result = evaluate("\\nosuchkeyword");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::UnknownKeyword { .. }))),
            "{result:?}");
}

#[test]
fn ranges() {
    let r = evaluate("\\range[0.5]{0}{2}").unwrap();
    assert_eq!(r.shape(), Some((1, 5)));

    assert_value("r := \\range{0}{1} \\\\ r_{10}", 1.0);

    let result = evaluate("\\range{2}{1}");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::EmptyRange { .. }))),
            "{result:?}");

    let result = evaluate("\\range[-1]{0}{1}");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::InvalidStep { .. }))),
            "{result:?}");
}

#[test]
fn graphics_are_sampled() {
    let output = region("f(x) := x^2 \\\\ \\graphic{f}{\\range{0}{1}}");
    let expected = "\\graphic{f}{\\range{0}{1}}{(0,0)\n(0.1,0.01)\n(0.2,0.04)\n(0.3,0.09)\n(0.4,0.16)\n\
                    (0.5,0.25)\n(0.6,0.36)\n(0.7,0.49)\n(0.8,0.64)\n(0.9,0.81)\n(1,1)}";
    assert!(output.contains(expected), "{output}");

    let twice = process_document("test.tex", &output, &Config::default()).unwrap();
    assert_eq!(output, twice);
}

#[test]
fn graphic_field_errors() {
    let result = evaluate("f(x) := x \\\\ \\graphic{f}{2}");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::RangeFieldCount { found: 0, .. }))),
            "{result:?}");

    let result = evaluate("f(x) := x \\\\ \\graphic{f}{\\range{0}{1}, 2}");
    assert!(matches!(result, Err(Error::Semantic(SemanticError::ArityMismatch { .. }))),
            "{result:?}");
}

#[test]
fn unexpected_input_fails() {
    assert_failure("3 +");
    assert_failure("(1 + 2");
    assert_failure("\\begin{nosuchenv} 1 \\end{nosuchenv}");
    assert_failure("x := ?");
}
