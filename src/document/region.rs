use std::ops::Range;

use crate::{
    document::Config,
    error::DocumentError,
    interpreter::lexer::token::{Coordinate, LineIndex},
};

/// A delimited stretch of a document holding source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Bytes between the markers.
    pub body:   Range<usize>,
    /// Document coordinate of the first byte of the body.
    pub origin: Coordinate,
}

/// Finds every region of `text`.
///
/// A marker is ignored when an unescaped `%` precedes it on its line.
///
/// # Errors
/// `UnterminatedRegion` if a begin marker has no end marker after it.
///
/// # Example
/// ```
/// use texcalc::document::{Config, region::find_regions};
///
/// let text = "a\n% \\begin{preproc}\n\\begin{preproc}x := 1\\end{preproc}\n";
/// let regions = find_regions("doc.tex", text, &Config::default()).unwrap();
///
/// assert_eq!(regions.len(), 1);
/// assert_eq!(&text[regions[0].body.clone()], "x := 1");
/// assert_eq!(regions[0].origin.line, 3);
/// assert_eq!(regions[0].origin.column, 16);
/// ```
pub fn find_regions(document: &str, text: &str, config: &Config) -> Result<Vec<Region>, DocumentError> {
    let begin = config.begin_marker();
    let end = config.end_marker();
    let lines = LineIndex::new(text, Coordinate::default());

    let mut regions = Vec::new();
    let mut cursor = 0;
    while let Some(start) = find_marker(text, &begin, cursor) {
        let body_start = start + begin.len();
        let Some(body_end) = find_marker(text, &end, body_start) else {
            return Err(DocumentError::UnterminatedRegion { document: document.to_string(),
                                                           marker:   end,
                                                           coord:    lines.position(text, start).coord, });
        };

        regions.push(Region { body:   body_start..body_end,
                              origin: lines.position(text, body_start).coord, });
        cursor = body_end + end.len();
    }

    Ok(regions)
}

/// Byte offset of the next uncommented `marker` at or after `from`.
fn find_marker(text: &str, marker: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    loop {
        let found = cursor + text.get(cursor..)?.find(marker)?;
        if !is_commented(text, found) {
            return Some(found);
        }
        cursor = found + marker.len();
    }
}

/// Whether an unescaped `%` precedes `offset` on its line.
fn is_commented(text: &str, offset: usize) -> bool {
    let line_start = text.get(..offset).and_then(|s| s.rfind('\n')).map_or(0, |i| i + 1);
    let line = text.get(line_start..offset).unwrap_or_default();
    line.match_indices('%').any(|(i, _)| !line[..i].ends_with('\\'))
}
