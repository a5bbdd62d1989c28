use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{Error, Result};

/// Longest accepted line, excluding its terminator.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024; // 1MB

/// How a line ended in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Last line of an input without a trailing newline.
    None,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }
}

/// One input record, with the terminator split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub ending: LineEnding,
}

/// Reads lines one at a time, enforcing [`MAX_LINE_LENGTH`] without buffering more than
/// one line.
pub struct LineReader<R> {
    inner: R,
    line_number: usize,
    limit: usize,
}

impl<R: BufRead> LineReader<R> {
    pub const fn new(inner: R) -> Self {
        Self::with_limit(inner, MAX_LINE_LENGTH)
    }

    pub const fn with_limit(inner: R, limit: usize) -> Self {
        Self {
            inner,
            line_number: 0,
            limit,
        }
    }

    /// Number of the line most recently returned (1-based).
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        let line = self.line_number + 1;
        let mut buf = Vec::new();
        let mut terminated = false;

        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => return Err(Error::StreamRead { line, source }),
            };

            if available.is_empty() {
                break;
            }

            let (taken, found) = available
                .iter()
                .position(|&b| b == b'\n')
                .map_or((available.len(), false), |pos| (pos + 1, true));

            buf.extend_from_slice(&available[..taken]);
            self.inner.consume(taken);

            // One extra byte may be the '\r' of a CRLF ending.
            let content_len = buf.len() - usize::from(found);
            if content_len > self.limit.saturating_add(1) {
                return Err(Error::LineTooLong {
                    line,
                    limit: self.limit,
                });
            }

            if found {
                terminated = true;
                break;
            }
        }

        if buf.is_empty() {
            return Ok(None);
        }

        let ending = if !terminated {
            LineEnding::None
        } else if buf.ends_with(b"\r\n") {
            buf.truncate(buf.len() - 2);
            LineEnding::CrLf
        } else {
            buf.truncate(buf.len() - 1);
            LineEnding::Lf
        };

        if buf.len() > self.limit {
            return Err(Error::LineTooLong {
                line,
                limit: self.limit,
            });
        }

        let text = String::from_utf8(buf).map_err(|_| Error::InvalidUtf8 { line })?;
        self.line_number = line;

        Ok(Some(Line { text, ending }))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Where the lines come from.
pub enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    pub fn from_arg(file: Option<&str>) -> Self {
        match file {
            None | Some("-") => Self::Stdin,
            Some(path) => Self::File(path.to_string()),
        }
    }

    /// Opens the source for buffered reading.
    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(path) => Ok(Box::new(BufReader::new(File::open(Path::new(path))?))),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Stdin => "<stdin>",
            Self::File(path) => path,
        }
    }
}
