use thiserror::Error;
use tracing::warn;

use crate::parse_util;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// A decoded pattern: one row of cells per `$`-separated segment.
///
/// Rows may have different lengths. Cells past a short row's end read as dead, so a pattern
/// behaves like a rectangle of its tallest and widest extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: Vec<Vec<bool>>,
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (`row`, `column`), where `column` may point past the end of a short row.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.rows[row].get(column).copied().unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Pattern is empty")]
    Empty,

    #[error("Illegal character in pattern: '{got}'")]
    IllegalChar { got: char },
}

/// Decode the run-length-encoded cell notation into a [`Pattern`].
///
/// The alphabet is `A`/`o` (live), `.`/`b` (dead), decimal run counts, `$` as the row separator
/// and `!` as a tolerated end marker. Anything else rejects the whole input before a single row
/// is decoded.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn decode(text: &str) -> Result<Pattern, DecodeError> {
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    if let Some(b) = text.bytes().find(|&b| !is_pattern_byte(b)) {
        return Err(DecodeError::IllegalChar { got: b as char });
    }

    let mut rows = Vec::new();

    // An empty segment (e.g. from a trailing separator) contributes no row.
    for segment in text.split('$') {
        if segment.is_empty() {
            continue;
        }

        rows.push(decode_row(segment.as_bytes()));
    }

    Ok(Pattern { rows })
}

fn is_pattern_byte(b: u8) -> bool {
    matches!(b, b'A' | b'o' | b'.' | b'b' | b'0'..=b'9' | b'$' | b'!')
}

fn decode_row(bytes: &[u8]) -> Vec<bool> {
    let mut row = Vec::new();

    // Pending run count. Multi-digit counts accumulate as long as the digits are contiguous.
    let mut run: usize = 1;
    let mut in_run = false;

    for &b in bytes {
        match b {
            n if n.is_ascii_digit() => {
                let n = (n - b'0') as usize;

                run = if in_run { run * 10 + n } else { n };
                in_run = true;
            }

            b'.' | b'b' => {
                for _ in 0..run {
                    row.push(false);
                }

                run = 1;
                in_run = false;
            }

            b'A' | b'o' => {
                for _ in 0..run {
                    row.push(true);
                }

                run = 1;
                in_run = false;
            }

            // `!` conventionally marks the end of a pattern but has no decoding effect beyond
            // discarding a pending run count.
            _ => {
                run = 1;
                in_run = false;
            }
        }
    }

    row
}

/// A parsed RLE file: optional metadata plus the decoded pattern.
pub struct RleFile<'a> {
    pub name: Option<&'a str>,
    pub author: Option<&'a str>,
    pub set: Option<RuleSet>,
    pub pattern: Pattern,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleError {
    #[error("Comment line is missing its type")]
    MissingCommentType,

    #[error("Unrecognized comment type '{got}'")]
    UnknownCommentType { got: char },

    #[error("Empty '#N' name line")]
    EmptyName,

    #[error("Empty '#O' author line")]
    EmptyAuthor,

    #[error("Invalid header line: expected {exp}")]
    Header { exp: &'static str },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Parse the RLE file format: `#` metadata lines, an optional `x = <w>, y = <h>` header, then
/// the cell data, possibly split across several lines.
///
/// The cell data goes through [`decode`] after the line joining, so its alphabet and error
/// behavior are exactly those of [`decode`].
pub fn read_rle(text: &str) -> Result<RleFile<'_>, RleError> {
    let mut name = None;
    let mut author = None;
    let mut set = None;

    let mut bytes = text.as_bytes();

    // Parse as many comment lines as possible
    loop {
        bytes = parse_util::take_ws_lines(bytes);

        let res = read_line_comment(bytes)?;
        let (Some(line), rest) = res else { break };

        match line {
            CommentLine::Comment => {}
            CommentLine::Name { name: n } => {
                if name.is_some() {
                    warn!("pattern name already defined, using the latest");
                }

                name = Some(n);
            }
            CommentLine::Author { author: a } => {
                if author.is_some() {
                    warn!("pattern author already defined, using the latest");
                }

                author = Some(a);
            }
            CommentLine::Rule { set: s } => {
                set = Some(s);
            }
        }

        bytes = rest;
    }

    // Parse the header line, if it's present
    let (header, rest) = read_line_header(bytes)?;
    bytes = rest;

    // Everything left is cell data; the notation ignores line boundaries.
    let body: String = to_str(bytes)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let pattern = decode(&body)?;

    if let Some(header) = header {
        if let Some(s) = header.set {
            set = Some(s);
        }

        if header.width != pattern.width() || header.height != pattern.height() {
            warn!(
                "header says {}x{} but the pattern decodes to {}x{}",
                header.width,
                header.height,
                pattern.width(),
                pattern.height(),
            );
        }
    }

    Ok(RleFile {
        name,
        author,
        set,
        pattern,
    })
}

enum CommentLine<'a> {
    Comment,
    Name { name: &'a str },
    Author { author: &'a str },
    Rule { set: RuleSet },
}

/// Attempt to parse a comment line, otherwise leaves `bytes` as-is.
fn read_line_comment(bytes: &[u8]) -> Result<(Option<CommentLine<'_>>, &[u8]), RleError> {
    let Ok(bytes) = parse_util::expect(b'#', bytes) else {
        return Ok((None, bytes));
    };

    let (Some(b), bytes) = parse_util::take_1(bytes) else {
        return Err(RleError::MissingCommentType);
    };

    match b {
        // Freeform comment
        b'C' | b'c' => {
            let (_, bytes) = parse_util::take_line(bytes);

            Ok((Some(CommentLine::Comment), bytes))
        }

        // Pattern name
        b'N' => {
            let (line, bytes) = parse_util::take_line(bytes);

            let name = to_str(line).trim();
            if name.is_empty() {
                return Err(RleError::EmptyName);
            }

            Ok((Some(CommentLine::Name { name }), bytes))
        }

        // Pattern author
        b'O' => {
            let (line, bytes) = parse_util::take_line(bytes);

            let author = to_str(line).trim();
            if author.is_empty() {
                return Err(RleError::EmptyAuthor);
            }

            Ok((Some(CommentLine::Author { author }), bytes))
        }

        // Pattern offset. Placement always centers, so offsets carry no information here.
        b'R' | b'P' => {
            let (_, bytes) = parse_util::take_line(bytes);

            warn!("pattern offsets are not supported, ignoring");

            Ok((Some(CommentLine::Comment), bytes))
        }

        // Pattern rules
        b'r' => {
            let (line, bytes) = parse_util::take_line(bytes);

            let set = to_str(line).trim().parse()?;

            Ok((Some(CommentLine::Rule { set }), bytes))
        }

        b => Err(RleError::UnknownCommentType { got: b as char }),
    }
}

struct HeaderLine {
    width: usize,
    height: usize,
    set: Option<RuleSet>,
}

/// Attempt to parse an `x = <w>, y = <h>[, rule = <rule>]` line, otherwise leaves `bytes` as-is.
fn read_line_header(bytes: &[u8]) -> Result<(Option<HeaderLine>, &[u8]), RleError> {
    if parse_util::peek_1(bytes) != Some(b'x') {
        return Ok((None, bytes));
    }

    let (line, rest) = parse_util::take_line(bytes);
    let mut fields = line.split(|&b| b == b',');

    let Some(field) = fields.next() else {
        unreachable!("split always yields at least one element")
    };
    let width = read_field(b"x", "an 'x' field", field)?
        .parse()
        .map_err(|_| RleError::Header { exp: "a numeric width" })?;

    let Some(field) = fields.next() else {
        return Err(RleError::Header { exp: "a 'y' field" });
    };
    let height = read_field(b"y", "a 'y' field", field)?
        .parse()
        .map_err(|_| RleError::Header { exp: "a numeric height" })?;

    let set = match fields.next() {
        Some(field) => Some(read_field(b"rule", "a 'rule' field", field)?.parse()?),
        None => None,
    };

    Ok((Some(HeaderLine { width, height, set }), rest))
}

/// Parse one `<key> = <value>` header field, returning the trimmed value.
fn read_field<'a>(key: &[u8], exp: &'static str, field: &'a [u8]) -> Result<&'a str, RleError> {
    let field = parse_util::take_ws(field);

    let Ok(field) = parse_util::expect_slice(key, field) else {
        return Err(RleError::Header { exp });
    };

    let field = parse_util::take_ws(field);

    let Ok(field) = parse_util::expect(b'=', field) else {
        return Err(RleError::Header { exp });
    };

    Ok(to_str(field).trim())
}

fn to_str(bytes: &[u8]) -> &str {
    let Ok(s) = std::str::from_utf8(bytes) else {
        unreachable!("the input is a str split at ASCII bytes")
    };

    s
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::DecodeError;
    use super::Pattern;
    use super::RleError;
    use super::decode;
    use super::read_rle;
    use crate::rule_set::B3S23;

    fn widths(pattern: &Pattern) -> Vec<usize> {
        pattern.rows().iter().map(Vec::len).collect()
    }

    #[test]
    fn decode_single_row() {
        let pattern = decode("A.A").unwrap();

        assert_eq!(pattern.rows(), [vec![true, false, true]]);
    }

    #[test]
    fn decode_accepts_both_alphabets() {
        assert_eq!(decode("bo.A").unwrap(), decode("..AA").unwrap());
    }

    #[test]
    fn decode_expands_runs() {
        let pattern = decode("2b2o$3o").unwrap();

        assert_eq!(pattern.rows()[0], [false, false, true, true]);
        assert_eq!(pattern.rows()[1], [true, true, true]);
    }

    #[test]
    fn decode_multi_digit_run() {
        let pattern = decode("12.A").unwrap();

        let row = &pattern.rows()[0];
        assert_eq!(row.len(), 13);
        assert!(row[..12].iter().all(|&cell| !cell));
        assert!(row[12]);
    }

    #[test]
    fn decode_ragged_rows() {
        let pattern = decode("A.A$3.A$3.A$A2.A$.3A!").unwrap();

        assert_eq!(pattern.height(), 5);
        assert_eq!(widths(&pattern), [3, 4, 4, 4, 4]);
        assert_eq!(pattern.width(), 4);
    }

    #[test]
    fn decode_skips_empty_segments() {
        let pattern = decode("A$$A$").unwrap();

        assert_eq!(pattern.height(), 2);
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert_eq!(decode(""), Err(DecodeError::Empty));
    }

    #[test]
    fn decode_rejects_illegal_characters() {
        assert_eq!(decode("A.X$"), Err(DecodeError::IllegalChar { got: 'X' }));
    }

    #[test]
    fn decode_bang_discards_pending_run() {
        let pattern = decode("2!A").unwrap();

        assert_eq!(pattern.rows(), [vec![true]]);
    }

    #[test]
    fn pattern_pads_short_rows() {
        let pattern = decode("A$3A").unwrap();

        assert!(!pattern.get(0, 2));
        assert!(pattern.get(1, 2));
    }

    #[test]
    fn read_full_file() {
        let text = "#N Glider\n\
                    #O Richard K. Guy\n\
                    #C The smallest spaceship.\n\
                    x = 3, y = 3, rule = B3/S23\n\
                    bob$2bo$\n\
                    3o!\n";

        let file = read_rle(text).unwrap();

        assert_eq!(file.name, Some("Glider"));
        assert_eq!(file.author, Some("Richard K. Guy"));
        assert_eq!(file.set, Some(B3S23));
        assert_eq!(file.pattern.height(), 3);
        assert_eq!(file.pattern.width(), 3);
    }

    #[test]
    fn read_bare_cell_data() {
        let file = read_rle("bo$2bo$3o!").unwrap();

        assert_eq!(file.name, None);
        assert_eq!(file.set, None);
        assert_eq!(file.pattern.height(), 3);
    }

    #[test]
    fn read_header_without_rule() {
        let file = read_rle("x = 2, y = 1\n2o!").unwrap();

        assert_eq!(file.set, None);
        assert_eq!(file.pattern.width(), 2);
    }

    #[test]
    fn read_rejects_header_without_height() {
        let res = read_rle("x = 2\n2o!");

        assert_eq!(res.err(), Some(RleError::Header { exp: "a 'y' field" }));
    }

    #[test]
    fn read_rejects_unknown_comment_type() {
        let res = read_rle("#Z what\n2o!");

        assert_eq!(res.err(), Some(RleError::UnknownCommentType { got: 'Z' }));
    }

    proptest! {
        #[test]
        fn decode_never_panics(text in "[Ao.b0-9$!]{1,40}") {
            if let Ok(pattern) = decode(&text) {
                let max = pattern.rows().iter().map(Vec::len).max().unwrap_or(0);

                prop_assert_eq!(pattern.width(), max);
            }
        }

        #[test]
        fn decode_run_counts(n in 1usize..200) {
            let pattern = decode(&format!("{n}o")).unwrap();

            prop_assert_eq!(widths(&pattern), vec![n]);
        }
    }
}
