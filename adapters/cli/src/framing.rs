//! Splits the input stream into brace-balanced records.
//!
//! A record ends on the line where its brace depth returns to zero. Braces
//! inside JSON string literals are ignored, and blank lines between records
//! are skipped. Records always end at a line boundary.
//!
//! Input is scanned as raw bytes one buffer at a time, so neither a long line
//! nor invalid UTF-8 is ever held beyond the record limit.

use std::{
    io::{self, BufRead},
    string::FromUtf8Error,
};

use thiserror::Error;

/// Upper bound on the bytes buffered for a single record.
pub(crate) const MAX_RECORD_BYTES: usize = 4 * 1024 * 1024;

/// Failure raised while pulling the next record off the stream.
#[derive(Debug, Error)]
pub(crate) enum FramingError {
    /// The underlying reader failed.
    #[error("failed to read from input stream")]
    Io(#[from] io::Error),
    /// The stream ended before the open record was closed.
    #[error("input ended inside a record after {bytes} bytes")]
    Truncated {
        /// Bytes consumed by the unfinished record.
        bytes: usize,
    },
    /// The record grew past the configured limit and was discarded.
    #[error("record of {bytes} bytes exceeds the {limit} byte limit")]
    Oversized {
        /// Bytes consumed by the discarded record.
        bytes: usize,
        /// Limit that was exceeded.
        limit: usize,
    },
    /// The record was framed but is not valid UTF-8.
    #[error("record of {bytes} bytes is not valid UTF-8")]
    Encoding {
        /// Bytes consumed by the rejected record.
        bytes: usize,
        /// Decoding failure.
        #[source]
        source: FromUtf8Error,
    },
}

impl FramingError {
    /// Reports whether the stream can no longer be read.
    #[must_use]
    pub(crate) const fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Tracks brace depth across chunks, skipping string contents.
///
/// Only ASCII bytes are significant, so multi-byte or invalid sequences pass
/// through untouched.
#[derive(Debug, Default)]
struct BraceScanner {
    depth: i64,
    in_string: bool,
    escaped: bool,
}

impl BraceScanner {
    fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => self.in_string = true,
                b'{' => self.depth += 1,
                b'}' => self.depth -= 1,
                _ => {}
            }
        }
    }

    const fn is_balanced(&self) -> bool {
        self.depth <= 0
    }
}

/// Pulls one record at a time from a buffered reader.
#[derive(Debug)]
pub(crate) struct RecordReader<R> {
    reader: R,
    limit: usize,
}

impl<R: BufRead> RecordReader<R> {
    /// Wraps `reader`, discarding any record longer than `limit` bytes.
    pub(crate) fn new(reader: R, limit: usize) -> Self {
        Self { reader, limit }
    }

    /// Returns the next complete record, or `None` once the stream is exhausted.
    pub(crate) fn next_record(&mut self) -> Result<Option<String>, FramingError> {
        let mut record = Vec::new();
        let mut scanner = BraceScanner::default();
        let mut consumed = 0;
        let mut oversized = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(FramingError::Io(error)),
            };

            if available.is_empty() {
                if consumed == 0 {
                    return Ok(None);
                }
                if !scanner.is_balanced() {
                    return Err(FramingError::Truncated { bytes: consumed });
                }
                return self.finish(record, consumed, oversized);
            }

            if consumed == 0 {
                let blank = available
                    .iter()
                    .take_while(|byte| byte.is_ascii_whitespace())
                    .count();
                if blank > 0 {
                    self.reader.consume(blank);
                    continue;
                }
            }

            let (length, line_end) = match available.iter().position(|&byte| byte == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (available.len(), false),
            };
            let chunk = &available[..length];

            scanner.feed(chunk);
            consumed += length;

            if !oversized {
                if record.len() + length > self.limit {
                    oversized = true;
                    record = Vec::new();
                } else {
                    record.extend_from_slice(chunk);
                }
            }

            self.reader.consume(length);

            if line_end && scanner.is_balanced() {
                return self.finish(record, consumed, oversized);
            }
        }
    }

    fn finish(
        &self,
        record: Vec<u8>,
        consumed: usize,
        oversized: bool,
    ) -> Result<Option<String>, FramingError> {
        if oversized {
            return Err(FramingError::Oversized {
                bytes: consumed,
                limit: self.limit,
            });
        }

        String::from_utf8(record)
            .map(Some)
            .map_err(|source| FramingError::Encoding {
                bytes: consumed,
                source,
            })
    }
}
