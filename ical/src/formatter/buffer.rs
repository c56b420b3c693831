// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use crate::error::Result;
use crate::formatter::{FoldWriter, FormatOptions, StringWriter};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::value::Valuer;

/// A property-line writer on top of [`FoldWriter`].
///
/// Every method returns the writer's captured error, so callers may chain
/// writes and check once.
#[derive(Debug)]
pub struct Buffer<W: Write> {
    fw: FoldWriter<W>,
}

impl<W: Write> Buffer<W> {
    /// Create a new buffer over the given sink.
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            fw: FoldWriter::new(writer, options),
        }
    }

    /// Write a string without terminating the line.
    ///
    /// # Errors
    /// Returns the captured write error, if any.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.fw.write_str(s).map(drop)
    }

    /// Write a string followed by a line terminator.
    ///
    /// # Errors
    /// Returns the captured write error, if any.
    pub fn write_line(&mut self, s: &str) -> Result<()> {
        self.fw.write_str(s)?;
        self.fw.newline()
    }

    /// Write `label`, the rendered value, and a line terminator, but only
    /// when `predicate` holds.
    ///
    /// The value is validated before anything is written, so a rejected
    /// value leaves no partial line behind.
    ///
    /// # Errors
    /// Returns the validation error, or the captured write error.
    pub fn write_valuer_line<V>(&mut self, predicate: bool, label: &str, value: &V) -> Result<()>
    where
        V: Valuer + ?Sized,
    {
        if !predicate {
            return self.fw.status();
        }

        value.validate()?;
        self.fw.write_str(label)?;
        value.write_to(&mut self.fw)?;
        self.fw.newline()
    }

    /// Write `BEGIN:name`, the body produced by `f`, then `END:name`.
    ///
    /// # Errors
    /// Returns the first error from the body or the writer.
    pub fn with_block<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.write_line(&format!("{KW_BEGIN}:{name}"))?;
        f(self)?;
        self.write_line(&format!("{KW_END}:{name}"))
    }

    /// Flush buffered output to the sink.
    ///
    /// # Errors
    /// Returns the sink's flush error, else the captured write error.
    pub fn flush(&mut self) -> Result<()> {
        self.fw.flush()
    }

    /// Flush and return the underlying sink.
    ///
    /// # Errors
    /// Returns an error if flushing fails or a prior write failed.
    pub fn into_inner(self) -> Result<W> {
        self.fw.into_inner()
    }
}
