// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) writer module.
//!
//! This module provides the line-folding writer and the property buffer that
//! every value and component is serialized through, writing to any
//! `std::io::Write` implementer.
//!
//! # Example
//!
//! ```
//! use ical_emit::formatter::{Buffer, FormatOptions};
//! use ical_emit::value::Text;
//!
//! let mut out = Vec::new();
//! let mut b = Buffer::new(&mut out, FormatOptions::default());
//! b.write_valuer_line(true, "SUMMARY", &Text::new("Lunch, then coffee"))?;
//! b.flush()?;
//! drop(b);
//!
//! assert_eq!(out, b"SUMMARY:Lunch\\, then coffee\r\n");
//! # Ok::<(), ical_emit::Error>(())
//! ```

mod buffer;
mod fold;

use std::fmt;
use std::io;

pub use crate::formatter::buffer::Buffer;
pub use crate::formatter::fold::FoldWriter;

use crate::error::{Error, Result};
use crate::semantic::VCalendar;

/// The RFC 5545 limit on the length of a physical line, in octets.
pub const MAX_LINE_LENGTH: usize = 75;

/// Convenience function to format a `VCalendar` to a `String` (uses default options).
///
/// # Errors
///
/// Returns an error if a component is missing a required property, if a
/// value fails validation, or if the output is not valid UTF-8.
pub fn format(calendar: &VCalendar) -> Result<String> {
    FormatOptions::default().write_to_string(calendar)
}

/// Formatting options for the iCalendar writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Terminator written at the end of each line and before each fold.
    ///
    /// Default: `LineEnding::Crlf`.
    pub line_ending: LineEnding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(MAX_LINE_LENGTH),
            line_ending: LineEnding::default(),
        }
    }
}

impl FormatOptions {
    /// Options for human consumption: bare LF line endings, default folding.
    #[must_use]
    pub fn plain() -> Self {
        Self::default().line_ending(LineEnding::Lf)
    }

    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line ending.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Convenience method to write a `VCalendar` to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if encoding or writing fails.
    pub fn write(&self, calendar: &VCalendar, w: impl io::Write) -> Result<()> {
        calendar.encode_with(w, *self)
    }

    /// Convenience method to write a `VCalendar` to a `String`.
    ///
    /// # Errors
    /// Returns an error if encoding fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, calendar: &VCalendar) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(calendar, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Line terminator used by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// CRLF, as required for transmission (RFC 5545 default)
    #[default]
    Crlf,
    /// Bare LF, for display and other non-transmission uses
    Lf,
}

impl LineEnding {
    /// Get the byte sequence for this line ending.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Crlf => b"\r\n",
            Self::Lf => b"\n",
        }
    }
}

/// The minimal sink a value renders itself into.
///
/// Implemented by [`FoldWriter`], which folds and tracks errors, and by
/// `Vec<u8>`, which collects the raw bytes.
pub trait StringWriter {
    /// Write a byte slice, returning how many bytes were accepted.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize>;

    /// Write a single byte.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    fn write_byte(&mut self, c: u8) -> Result<()>;

    /// Write a string as a sequence of bytes.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    fn write_str(&mut self, s: &str) -> Result<usize> {
        self.write_bytes(s.as_bytes())
    }

    /// Support for the `write!` macro.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        match args.as_str() {
            Some(s) => self.write_str(s).map(drop),
            None => self.write_str(&args.to_string()).map(drop),
        }
    }
}

impl StringWriter for Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_byte(&mut self, c: u8) -> Result<()> {
        self.push(c);
        Ok(())
    }
}
