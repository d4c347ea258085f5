use std::time::Instant;

use tracing::info;

use crate::{error::DocumentError, interpreter::pipeline::Interpreter};

/// Locating the delimited regions of a document.
pub mod region;
/// Writing captured values back into region text.
///
/// Each replacement covers a byte range of its region: the `{slot}` of a
/// `\placeholder`, or the payload of a `\graphic`. Rendered values are
/// wrapped in braces, so a processed document can be processed again.
pub mod splice;

/// Name of the LaTeX environment that delimits regions unless configured
/// otherwise.
pub const DEFAULT_ENVIRONMENT: &str = "preproc";

/// Settings for processing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The environment whose body is treated as source code.
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { environment: DEFAULT_ENVIRONMENT.to_string() }
    }
}

impl Config {
    #[must_use]
    pub fn new(environment: impl Into<String>) -> Self {
        Self { environment: environment.into() }
    }

    /// `\begin{<environment>}`
    #[must_use]
    pub fn begin_marker(&self) -> String {
        format!("\\begin{{{}}}", self.environment)
    }

    /// `\end{<environment>}`
    #[must_use]
    pub fn end_marker(&self) -> String {
        format!("\\end{{{}}}", self.environment)
    }
}

/// Processes every region of a document and returns the updated text.
///
/// Regions run in order through one [`Interpreter`], so definitions carry
/// over from one region to the next. Text outside the regions, the markers
/// included, is copied unchanged.
///
/// # Parameters
/// - `document`: Name used to prefix error messages.
/// - `text`: The document.
/// - `config`: Which environment delimits regions.
///
/// # Errors
/// The first failing region aborts processing. Its error carries the
/// document name and the document coordinate of the failure.
///
/// # Example
/// ```
/// use texcalc::document::{Config, process_document};
///
/// let text = "Result: \\begin{preproc}3+4 \\cdot 2 = \\placeholder{}\\end{preproc}";
/// let output = process_document("doc.tex", text, &Config::default()).unwrap();
///
/// assert_eq!(output, "Result: \\begin{preproc}3+4 \\cdot 2 = \\placeholder{11}\\end{preproc}");
/// ```
pub fn process_document(document: &str, text: &str, config: &Config) -> Result<String, DocumentError> {
    let started = Instant::now();
    let regions = region::find_regions(document, text, config)?;
    let mut interpreter = Interpreter::new();

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for region in &regions {
        let body = text.get(region.body.clone()).unwrap_or_default();
        let result = interpreter.run_region(body, region.origin)
                                .map_err(|source| DocumentError::Region { document: document.to_string(),
                                                                          source })?;

        output.push_str(text.get(cursor..region.body.start).unwrap_or_default());
        output.push_str(&result.text);
        cursor = region.body.end;
    }
    output.push_str(text.get(cursor..).unwrap_or_default());

    info!(document,
          regions = regions.len(),
          elapsed = ?started.elapsed(),
          "processed document");
    Ok(output)
}
