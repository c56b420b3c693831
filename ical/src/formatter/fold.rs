// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line folding writer.

use std::io::{self, BufWriter, Write};

use crate::error::{Error, Result};
use crate::formatter::{FormatOptions, StringWriter};

/// Length of the continuation prefix, a single space.
const CONTINUATION_LEN: usize = 1;

/// Smallest usable folding width; one byte of content after the prefix.
const MIN_LINE_LENGTH: usize = CONTINUATION_LEN + 1;

/// A byte sink that inserts folds so no physical line exceeds the
/// configured width.
///
/// Widths count octets, not characters. A multi-byte UTF-8 sequence that
/// would cross the limit is moved whole onto the next line, so such a line
/// may end a few octets short of the width instead of splitting the
/// character as a plain byte count would.
///
/// The first write failure is captured and every later operation returns
/// it without touching the sink again.
#[derive(Debug)]
pub struct FoldWriter<W: Write> {
    writer: BufWriter<W>,
    folding: Option<usize>,
    line_ending: &'static [u8],
    line_length: usize,
    state: WriterState,
}

#[derive(Debug, Clone, Default)]
enum WriterState {
    #[default]
    Ok,
    Failed(Error),
}

impl<W: Write> FoldWriter<W> {
    /// Create a new fold writer wrapping the given sink.
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            folding: options.folding.map(|n| n.max(MIN_LINE_LENGTH)),
            line_ending: options.line_ending.as_bytes(),
            line_length: 0,
            state: WriterState::Ok,
        }
    }

    /// Number of bytes written on the current physical line.
    #[must_use]
    pub const fn line_length(&self) -> usize {
        self.line_length
    }

    /// The captured error, if any write has failed.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        match &self.state {
            WriterState::Ok => None,
            WriterState::Failed(err) => Some(err),
        }
    }

    /// Returns the captured error, or `Ok` while the writer is healthy.
    ///
    /// # Errors
    /// Returns the first failure this writer observed.
    pub fn status(&self) -> Result<()> {
        match &self.state {
            WriterState::Ok => Ok(()),
            WriterState::Failed(err) => Err(err.clone()),
        }
    }

    /// Terminate the current logical line.
    ///
    /// # Errors
    /// Returns an error if the writer has failed.
    pub fn newline(&mut self) -> Result<()> {
        self.status()?;
        self.raw(self.line_ending)?;
        self.line_length = 0;
        Ok(())
    }

    /// Flush buffered output to the sink.
    ///
    /// A sink failure is reported (and captured) first; otherwise any
    /// previously captured error is returned.
    ///
    /// # Errors
    /// Returns an error if flushing fails or a prior write failed.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_sink()
    }

    /// Flush and return the underlying sink.
    ///
    /// # Errors
    /// Returns an error if flushing fails or a prior write failed.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.writer
            .into_inner()
            .map_err(|err| Error::from(err.into_error()))
    }

    fn flush_sink(&mut self) -> Result<()> {
        if let Err(err) = self.writer.flush() {
            return Err(self.fail(err));
        }
        self.status()
    }

    fn put(&mut self, c: u8) -> Result<()> {
        self.status()?;
        if self.needs_fold(c) {
            self.raw(self.line_ending)?;
            self.raw(b" ")?;
            self.line_length = CONTINUATION_LEN;
        }
        self.raw(&[c])?;
        self.line_length += 1;
        Ok(())
    }

    fn needs_fold(&self, c: u8) -> bool {
        let Some(max) = self.folding else {
            return false;
        };
        if self.line_length >= max {
            return true;
        }

        // Keep a multi-byte UTF-8 sequence on one physical line
        self.line_length > CONTINUATION_LEN && self.line_length + utf8_sequence_len(c) > max
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        match self.writer.write_all(bytes) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Record the failure unless one is already captured; returns the
    /// error to report.
    fn fail(&mut self, err: io::Error) -> Error {
        let err = Error::from(err);
        if matches!(self.state, WriterState::Ok) {
            tracing::debug!(%err, "writer failed, further output is discarded");
            self.state = WriterState::Failed(err.clone());
        }
        err
    }
}

impl<W: Write> StringWriter for FoldWriter<W> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        for &c in buf {
            self.put(c)?;
        }
        Ok(buf.len())
    }

    fn write_byte(&mut self, c: u8) -> Result<()> {
        self.put(c)
    }
}

impl<W: Write> Write for FoldWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_sink().map_err(io::Error::from)
    }
}

/// Length of the UTF-8 sequence introduced by `c`; 1 for ASCII and
/// continuation bytes.
const fn utf8_sequence_len(c: u8) -> usize {
    match c {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
