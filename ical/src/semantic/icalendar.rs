// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::formatter::{Buffer, FormatOptions};
use crate::keyword::{
    KW_CALSCALE, KW_CALSCALE_GREGORIAN, KW_CATEGORIES, KW_COLOR, KW_DESCRIPTION, KW_IMAGE,
    KW_LAST_MODIFIED, KW_METHOD, KW_NAME, KW_PRODID, KW_RECURRENCE_ID, KW_REFRESH_INTERVAL,
    KW_SOURCE, KW_URL, KW_VCALENDAR, KW_VERSION, KW_VERSION_2_0,
};
use crate::semantic::vevent::write_all;
use crate::semantic::{CalendarComponent, require};
use crate::value::{Attachable, DateTime, Duration, Text, Uri, Value, Valuer};

/// Top-level calendar object (VCALENDAR).
///
/// # Example
///
/// ```
/// use ical_emit::semantic::{VCalendar, VEvent};
/// use ical_emit::value::{DateTime, Text};
///
/// let event = VEvent {
///     dt_stamp: DateTime::tstamp(jiff::Timestamp::UNIX_EPOCH),
///     uid: Text::new("42@example.com"),
///     summary: Text::new("Launch"),
///     ..VEvent::default()
/// };
/// let mut calendar = VCalendar::new("-//Example//EN").with(event);
/// calendar.method = Text::publish();
///
/// let ics = calendar.to_string();
/// assert!(ics.starts_with("BEGIN:VCALENDAR\nPRODID:-//Example//EN\nVERSION:2.0\n"));
/// assert!(ics.contains("SUMMARY:Launch\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VCalendar {
    /// Product that created the calendar (required)
    pub prod_id: Text,
    /// iCalendar version, `2.0`
    pub version: Text,
    /// Calendar scale, `GREGORIAN`
    pub cal_scale: Text,
    /// iTIP method such as `PUBLISH` or `REQUEST`
    pub method: Text,

    /// Display name (RFC 7986)
    pub name: Text,
    /// Description (RFC 7986)
    pub description: Text,
    /// Where the calendar can be retrieved (RFC 7986)
    pub url: Uri,
    /// Where updated versions can be fetched (RFC 7986)
    pub source: Uri,
    /// Last revision time (RFC 7986)
    pub last_modified: DateTime,
    /// Recurrence identifier
    pub recurrence_id: DateTime,
    /// Display color (RFC 7986)
    pub color: Text,
    /// Suggested polling interval (RFC 7986)
    pub refresh_interval: Duration,
    /// Categories, one property line each (RFC 7986)
    pub categories: Vec<Text>,
    /// Images (RFC 7986)
    pub image: Vec<Attachable>,

    /// Non-standard or otherwise unsupported properties
    pub extensions: Vec<Extension>,
    /// Nested components
    pub components: Vec<CalendarComponent>,
}

/// A non-standard property, written after the standard ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// Property name, e.g. `X-WR-CALNAME`
    pub key: String,
    /// Property value
    pub value: Value,
}

impl VCalendar {
    /// A calendar with version 2.0 and the Gregorian scale.
    #[must_use]
    pub fn new(prod_id: impl Into<String>) -> Self {
        Self {
            prod_id: Text::new(prod_id),
            version: Text::new(KW_VERSION_2_0),
            cal_scale: Text::new(KW_CALSCALE_GREGORIAN),
            ..Self::default()
        }
    }

    /// Add an extension property.
    #[must_use]
    pub fn extend(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.push(Extension {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Add a component.
    #[must_use]
    pub fn with(mut self, component: impl Into<CalendarComponent>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Check required properties of the calendar and all of its components.
    ///
    /// # Errors
    /// Returns the first missing property or violated constraint.
    pub fn check(&self) -> Result<()> {
        require(self.prod_id.is_defined(), KW_VCALENDAR, KW_PRODID)?;
        require(self.version.is_defined(), KW_VCALENDAR, KW_VERSION)?;
        self.components
            .iter()
            .try_for_each(|c| c.check(&self.method))
    }

    /// Write the calendar with CRLF line endings, for transmission.
    ///
    /// # Errors
    /// Returns an error if checking, validation or writing fails.
    pub fn encode(&self, w: impl Write) -> Result<()> {
        self.encode_with(w, FormatOptions::default())
    }

    /// Write the calendar with LF line endings, for viewing.
    ///
    /// # Errors
    /// Returns an error if checking, validation or writing fails.
    pub fn encode_plain(&self, w: impl Write) -> Result<()> {
        self.encode_with(w, FormatOptions::plain())
    }

    /// Write the calendar with the given options.
    ///
    /// Whatever was written before a failure is still flushed to `w`.
    ///
    /// # Errors
    /// Returns an error if checking, validation or writing fails.
    pub fn encode_with(&self, w: impl Write, options: FormatOptions) -> Result<()> {
        tracing::debug!(
            components = self.components.len(),
            extensions = self.extensions.len(),
            "encoding calendar"
        );

        self.check()?;
        let mut b = Buffer::new(w, options);
        let result = self.encode_body(&mut b);
        let flushed = b.flush();
        result.and(flushed)
    }

    fn encode_body<W: Write>(&self, b: &mut Buffer<W>) -> Result<()> {
        b.with_block(KW_VCALENDAR, |b| {
            b.write_valuer_line(true, KW_PRODID, &self.prod_id)?;
            b.write_valuer_line(true, KW_VERSION, &self.version)?;
            b.write_valuer_line(self.cal_scale.is_defined(), KW_CALSCALE, &self.cal_scale)?;
            b.write_valuer_line(self.method.is_defined(), KW_METHOD, &self.method)?;
            b.write_valuer_line(self.name.is_defined(), KW_NAME, &self.name)?;
            b.write_valuer_line(self.description.is_defined(), KW_DESCRIPTION, &self.description)?;
            b.write_valuer_line(self.url.is_defined(), KW_URL, &self.url)?;
            b.write_valuer_line(self.source.is_defined(), KW_SOURCE, &self.source)?;
            b.write_valuer_line(
                self.last_modified.is_defined(),
                KW_LAST_MODIFIED,
                &self.last_modified,
            )?;
            b.write_valuer_line(
                self.recurrence_id.is_defined(),
                KW_RECURRENCE_ID,
                &self.recurrence_id,
            )?;
            b.write_valuer_line(self.color.is_defined(), KW_COLOR, &self.color)?;
            b.write_valuer_line(
                self.refresh_interval.is_defined(),
                KW_REFRESH_INTERVAL,
                &self.refresh_interval,
            )?;
            write_all(b, KW_CATEGORIES, &self.categories)?;
            write_all(b, KW_IMAGE, &self.image)?;

            for ext in &self.extensions {
                b.write_valuer_line(true, &ext.key, &ext.value)?;
            }
            for component in &self.components {
                component.encode(b, &self.method)?;
            }
            Ok(())
        })
    }
}

impl fmt::Display for VCalendar {
    /// Renders with LF line endings. The calendar is not checked up front:
    /// output stops at the first component that fails its own check, the
    /// error is logged, and whatever was written before it is shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = Buffer::new(Vec::new(), FormatOptions::plain());
        if let Err(err) = self.encode_body(&mut b) {
            tracing::warn!(%err, "calendar rendered partially");
        }
        let buf = match b.into_inner() {
            Ok(buf) => buf,
            Err(err) => {
                tracing::warn!(%err, "calendar could not be rendered");
                return Err(fmt::Error);
            }
        };
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}
