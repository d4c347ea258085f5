use tracing::debug;

use crate::{
    document::splice::splice,
    error::Error,
    interpreter::{
        analyzer::core::Analyzer,
        evaluator::core::Context,
        lexer::{core::Lexer, token::Coordinate},
        parser::core::parse_program,
        value::core::{Scope, Value},
    },
};

/// The result of running one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOutput {
    /// The region text with every captured replacement spliced in.
    pub text:  String,
    /// The value of the region's last statement.
    pub value: Value,
}

/// Runs regions through every phase while keeping global state between
/// them.
///
/// The analyzer's declared identifiers and signatures and the evaluator's
/// global scope live as long as the interpreter, so a later region can use
/// what an earlier one defined.
#[derive(Debug, Default)]
pub struct Interpreter {
    analyzer: Analyzer,
    context:  Context,
}

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexes, parses, analyzes and evaluates one region, then splices the
    /// captured replacements into its text.
    ///
    /// # Parameters
    /// - `text`: The region text between the environment markers.
    /// - `origin`: Document coordinate of the first byte of `text`.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{lexer::token::Coordinate, pipeline::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new();
    /// let output = interpreter.run_region("x := 3 \\\\ x = \\placeholder{}", Coordinate::default())
    ///                         .unwrap();
    /// assert_eq!(output.text, "x := 3 \\\\ x = \\placeholder{3}");
    /// assert_eq!(interpreter.globals().get("x"), Some(&Value::scalar(3.0)));
    /// ```
    pub fn run_region(&mut self, text: &str, origin: Coordinate) -> Result<RegionOutput, Error> {
        let tokens = Lexer::new(text, origin).tokenize()?;
        let root = parse_program(&tokens)?;
        debug!(%origin, tokens = tokens.len(), statements = root.fields.len(), "parsed region");

        self.analyzer.analyze_program(&root)?;

        let value = self.context.eval(&root, None);
        let replacements = self.context.take_replacements();
        let value = value?;
        debug!(%origin, replacements = replacements.len(), "evaluated region");

        Ok(RegionOutput { text: splice(text, &replacements),
                          value })
    }

    /// The global scope built up so far.
    #[must_use]
    pub const fn globals(&self) -> &Scope {
        &self.context.global
    }
}
