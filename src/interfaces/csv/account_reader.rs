use crate::error::{LineRef, PayablesError, Result};
use std::io::{BufRead, BufReader, Read};

/// One non-blank line of an import stream, split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: u64,
    /// The line exactly as read, without its line terminator.
    pub content: String,
    pub fields: Vec<String>,
}

impl RawLine {
    pub fn line_ref(&self) -> LineRef {
        LineRef {
            number: self.number,
            content: self.content.clone(),
        }
    }
}

/// Splits a single line into fields. Quotes never reach past the line, so an
/// unterminated quote only affects the line it appears on.
fn split_fields(text: &str) -> std::result::Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Reads headerless, comma-separated account lines.
///
/// The stream is cut into physical lines first and each line is parsed on
/// its own with `csv`. Records of any length are accepted here; the import
/// pipeline decides what a valid field count is. Blank lines are skipped.
///
/// Errors that belong to one line (bad UTF-8, unreadable record) come back as
/// `PayablesError::Parse` carrying that line; I/O failures carry no line.
pub struct AccountReader<R: Read> {
    source: BufReader<R>,
}

impl<R: Read> AccountReader<R> {
    /// Creates a new `AccountReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            source: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads lines in input order.
    pub fn lines(self) -> impl Iterator<Item = Result<RawLine>> {
        self.source
            .split(b'\n')
            .enumerate()
            .filter_map(|(index, bytes)| {
                let number = index as u64 + 1;
                let mut bytes = match bytes {
                    Ok(bytes) => bytes,
                    Err(e) => return Some(Err(PayablesError::from(e))),
                };
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }

                let content = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => {
                        let reason = format!("invalid UTF-8: {}", e.utf8_error());
                        let line = LineRef {
                            number,
                            content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                        };
                        return Some(Err(PayablesError::Parse { line, reason }));
                    }
                };
                if content.trim().is_empty() {
                    return None;
                }

                Some(match split_fields(&content) {
                    Ok(fields) => Ok(RawLine {
                        number,
                        content,
                        fields,
                    }),
                    Err(e) => Err(PayablesError::Parse {
                        line: LineRef { number, content },
                        reason: e.to_string(),
                    }),
                })
            })
    }
}
