// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::keyword::KW_TZID;
use crate::parameter::{Parameter, Parameters, ValueType};
use crate::value::{Valuer, write_head};

const UTC: &str = "UTC";

/// A date or date-time value (RFC 5545 Sections 3.3.4 and 3.3.5), possibly
/// with further instants written comma-separated.
///
/// A date-time whose zone is `UTC` is always written in the Zulu form, and
/// any `TZID` parameter is dropped. Other zones are written as local time;
/// attach a `TZID` parameter to name the zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTime {
    params: Parameters,
    value: Option<Zoned>,
    others: Vec<Zoned>,
    include_time: bool,
    zulu: bool,
}

impl_with_params!(DateTime);

impl DateTime {
    /// A date-time value, tagged `VALUE=DATE-TIME`.
    #[must_use]
    pub fn new(value: Zoned) -> Self {
        Self {
            params: Parameters::new(),
            value: Some(value),
            others: Vec::new(),
            include_time: true,
            zulu: false,
        }
        .with(ValueType::DateTime)
    }

    /// A date value without time, tagged `VALUE=DATE`.
    #[must_use]
    pub fn date(value: Zoned) -> Self {
        Self {
            params: Parameters::new(),
            value: Some(value),
            others: Vec::new(),
            include_time: false,
            zulu: false,
        }
        .with(ValueType::Date)
    }

    /// A UTC timestamp, as used by `DTSTAMP`, `CREATED` and friends.
    ///
    /// No `VALUE` parameter is attached; the Zulu form is unambiguous.
    #[must_use]
    pub fn tstamp(value: Timestamp) -> Self {
        Self {
            params: Parameters::new(),
            value: Some(value.to_zoned(TimeZone::UTC)),
            others: Vec::new(),
            include_time: true,
            zulu: true,
        }
    }

    /// Further instants, written after the first and sharing its format.
    #[must_use]
    pub fn with_others(mut self, others: impl IntoIterator<Item = Zoned>) -> Self {
        self.others.extend(others);
        self
    }

    /// Convert to a date-only value; `VALUE=DATE` replaces the current tag.
    #[must_use]
    pub fn as_date(mut self) -> Self {
        self.include_time = false;
        self.with(ValueType::Date)
    }

    /// Write date-times in the Zulu form, converting each instant to UTC.
    #[must_use]
    pub fn utc(mut self) -> Self {
        if self.include_time {
            self.zulu = true;
        }
        self
    }

    /// Put a `TZID` parameter naming the value's zone in front of the other
    /// parameters. Zones without an IANA name, and UTC, are left untagged.
    #[must_use]
    pub fn with_zone_tzid(mut self) -> Self {
        let name = self
            .value
            .as_ref()
            .and_then(|v| v.time_zone().iana_name())
            .filter(|name| *name != UTC)
            .map(ToOwned::to_owned);
        if let Some(name) = name {
            self.params.prepend(Parameter::single(KW_TZID, name));
        }
        self
    }

    /// The first instant.
    #[must_use]
    pub const fn value(&self) -> Option<&Zoned> {
        self.value.as_ref()
    }

    /// Instants after the first.
    #[must_use]
    pub fn others(&self) -> &[Zoned] {
        &self.others
    }

    /// Whether the time of day is written.
    #[must_use]
    pub const fn includes_time(&self) -> bool {
        self.include_time
    }

    fn write_instant(&self, w: &mut dyn StringWriter, value: &Zoned, zulu: bool) -> Result<()> {
        match (self.include_time, zulu) {
            (false, _) => write_date(w, value),
            (true, false) => write_local_date_time(w, value),
            (true, true) => write_zulu(w, value.timestamp()),
        }
    }
}

impl Valuer for DateTime {
    fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        let Some(first) = &self.value else {
            return write_head(&self.params, w);
        };

        let mut params = Cow::Borrowed(&self.params);
        let mut zulu = self.zulu;
        if self.include_time && first.time_zone().iana_name() == Some(UTC) {
            params.to_mut().remove_by_key(&[KW_TZID]);
            zulu = true;
        }

        write_head(&params, w)?;
        self.write_instant(w, first, zulu)?;
        for other in &self.others {
            w.write_byte(b',')?;
            self.write_instant(w, other, zulu)?;
        }
        Ok(())
    }
}

/// Format a date as `YYYYMMDD`.
fn write_date(w: &mut dyn StringWriter, value: &Zoned) -> Result<()> {
    write!(w, "{:04}{:02}{:02}", value.year(), value.month(), value.day())
}

/// Format a local date-time as `YYYYMMDDTHHMMSS`.
fn write_local_date_time(w: &mut dyn StringWriter, value: &Zoned) -> Result<()> {
    write_date(w, value)?;
    write!(
        w,
        "T{:02}{:02}{:02}",
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Format an instant in UTC as `YYYYMMDDTHHMMSSZ`.
pub(crate) fn write_zulu(w: &mut dyn StringWriter, value: Timestamp) -> Result<()> {
    write_local_date_time(w, &value.to_zoned(TimeZone::UTC))?;
    w.write_byte(b'Z')
}
