//! Line reader for SWF traces.
//!
//! Reads the decoded text one line at a time, drops blank and comment lines,
//! and splits what is left on whitespace. The stream is single-pass; reopen
//! the source to read it again.

use super::codec::{decode, malformed, unavailable, Codec};
use super::source::validate_name;
use crate::utils::config::COMMENT_MARKER;
use crate::utils::error::{RecordError, WorkloadError};
use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

/// Fields of one retained trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    line: usize,
    fields: Vec<String>,
}

impl TraceRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// 1-based physical line number in the decoded trace
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split a line on runs of whitespace
///
/// **Public** - empty fields never appear in the result
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Whether a line carries no data (blank, or starts with the comment marker)
pub fn is_skippable(line: &str, comment_marker: char) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(comment_marker)
}

// Comment headers may carry non-UTF-8 text (e.g. Latin-1 site names), so
// skipping is decided before the line is decoded.
fn is_skippable_bytes(line: &[u8], comment_marker: char) -> bool {
    let mut marker = [0u8; 4];
    let marker = comment_marker.encode_utf8(&mut marker).as_bytes();

    match line.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => line[start..].starts_with(marker),
        None => true,
    }
}

/// Lazy, forward-only reader of tokenized trace lines
///
/// Iterating yields `Ok(TraceRecord)` for data lines, a non-fatal
/// `MalformedRecord` for undecodable lines, and at most one fatal error,
/// after which the iterator is exhausted.
pub struct TraceStreamReader {
    name: String,
    codec: Codec,
    lines: Box<dyn BufRead>,
    comment_marker: char,
    lines_read: usize,
    buf: Vec<u8>,
    finished: bool,
}

impl TraceStreamReader {
    /// Open a trace from any byte stream
    ///
    /// **Public** - main entry point for reading
    ///
    /// # Arguments
    /// * `reader` - Raw bytes of the trace (possibly compressed)
    /// * `name_hint` - File name whose suffix selects the decompression strategy
    ///
    /// # Errors
    /// * `WorkloadError::SourceUnavailable` - The stream cannot be read
    /// * `WorkloadError::MalformedArchive` - The hinted container cannot be decoded
    pub fn open<R: Read + 'static>(reader: R, name_hint: &str) -> Result<Self, WorkloadError> {
        let (codec, lines) = decode(Box::new(reader), name_hint)?;

        Ok(Self {
            name: name_hint.to_string(),
            codec,
            lines,
            comment_marker: COMMENT_MARKER,
            lines_read: 0,
            buf: Vec::new(),
            finished: false,
        })
    }

    /// Open a trace file from the local filesystem
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        validate_name(&name)?;

        let file = File::open(path).map_err(|e| unavailable(&name, e))?;
        Self::open(file, &name)
    }

    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Physical lines consumed so far, skipped lines included
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next data line, skipping blank and comment lines
    ///
    /// **Public** - returns the line number with the line text (no terminator)
    pub fn next_line(&mut self) -> Option<Result<(usize, String), WorkloadError>> {
        loop {
            if self.finished {
                return None;
            }

            self.buf.clear();
            match self.lines.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    self.lines_read += 1;
                    let line = self.lines_read;

                    if is_skippable_bytes(&self.buf, self.comment_marker) {
                        continue;
                    }

                    let text = match std::str::from_utf8(&self.buf) {
                        Ok(text) => text,
                        Err(_) => {
                            return Some(Err(WorkloadError::MalformedRecord {
                                line,
                                reason: RecordError::NotUtf8,
                            }))
                        }
                    };

                    if is_skippable(text, self.comment_marker) {
                        continue;
                    }

                    let text = text.trim_end_matches(['\n', '\r']);
                    return Some(Ok((line, text.to_string())));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(self.read_error(e)));
                }
            }
        }
    }

    /// Classify a mid-stream I/O failure
    ///
    /// **Private** - decoder failures mean a corrupt container body
    fn read_error(&self, e: io::Error) -> WorkloadError {
        if self.codec.is_compressed() {
            malformed(&self.name, e.to_string())
        } else {
            unavailable(&self.name, e)
        }
    }
}

impl Iterator for TraceStreamReader {
    type Item = Result<TraceRecord, WorkloadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
            .map(|result| result.map(|(line, text)| TraceRecord::new(line, tokenize(&text))))
    }
}
