//! Line-at-a-time substitution of quoted values.
//!
//! Every input line produces exactly one output line, in order, with its original
//! terminator. A line is only changed when it holds a complete quoted value; the text
//! between the first two `"` is replaced by its translation and everything else is copied.

mod segment;

use std::io::{BufRead, Write};

pub use segment::QuotedSegment;

use crate::error::{Error, Result};
use crate::input::LineReader;
use crate::translation::TranslationService;

/// Counters for a finished (or failed) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines written to the output.
    pub lines: usize,
    /// Lines whose quoted value went through the backend.
    pub translated: usize,
}

/// Translates the quoted value of a single line.
///
/// Lines without a complete quoted value come back unchanged and never reach the backend.
/// Empty values are submitted like any other value.
pub async fn translate_line(service: &TranslationService, line: &str) -> Result<Option<String>> {
    let Some(segment) = QuotedSegment::find(line) else {
        return Ok(None);
    };

    let translated = service.translate(segment.value).await?;
    Ok(Some(segment.replace_value(&translated)))
}

type ProgressFn<'a> = dyn FnMut(&RunSummary) + 'a;

/// Drives a [`TranslationService`] over an input stream.
pub struct LineProcessor<'a> {
    service: &'a TranslationService,
    on_line: Option<Box<ProgressFn<'a>>>,
}

impl<'a> LineProcessor<'a> {
    pub fn new(service: &'a TranslationService) -> Self {
        Self {
            service,
            on_line: None,
        }
    }

    /// Calls `f` after every written line.
    #[must_use]
    pub fn on_line(mut self, f: impl FnMut(&RunSummary) + 'a) -> Self {
        self.on_line = Some(Box::new(f));
        self
    }

    /// Reads `reader` to the end, writing each processed line to `writer` and flushing it
    /// before the next line is read.
    ///
    /// The first error stops the run. Lines written before it stay written; the failing line
    /// and everything after it are not written at all.
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<RunSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut lines = LineReader::new(reader);
        let mut summary = RunSummary::default();

        while let Some(line) = lines.next_line()? {
            let number = lines.line_number();
            let translated = translate_line(self.service, &line.text).await?;
            let text = match &translated {
                Some(text) => {
                    summary.translated += 1;
                    text
                }
                None => &line.text,
            };

            write_line(&mut writer, text, line.ending.as_str())
                .map_err(|source| Error::StreamWrite { line: number, source })?;
            summary.lines += 1;

            if let Some(on_line) = self.on_line.as_mut() {
                on_line(&summary);
            }
        }

        Ok(summary)
    }
}

fn write_line<W: Write>(writer: &mut W, text: &str, ending: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.write_all(ending.as_bytes())?;
    writer.flush()
}
