// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::{SignedDuration, Timestamp, Zoned};

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::parameter::{Parameters, ValueType};
use crate::value::datetime::write_zulu;
use crate::value::{Valuer, format_signed_duration, write_head};

/// A period of time given by its start and duration (RFC 5545 Section
/// 3.3.9), written as `start/duration` with the start in UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Period {
    params: Parameters,
    start: Option<Timestamp>,
    duration: SignedDuration,
}

impl_with_params!(Period);

impl Period {
    /// A period starting at `start`, tagged `VALUE=PERIOD`.
    #[must_use]
    pub fn new(start: &Zoned, duration: SignedDuration) -> Self {
        Self::of(start.timestamp(), duration)
    }

    /// A period starting at an instant, tagged `VALUE=PERIOD`.
    #[must_use]
    pub fn of(start: Timestamp, duration: SignedDuration) -> Self {
        Self {
            params: Parameters::new(),
            start: Some(start),
            duration,
        }
        .with(ValueType::Period)
    }

    /// The start instant.
    #[must_use]
    pub const fn start(&self) -> Option<Timestamp> {
        self.start
    }

    /// The length of the period.
    #[must_use]
    pub const fn duration(&self) -> SignedDuration {
        self.duration
    }
}

impl Valuer for Period {
    fn is_defined(&self) -> bool {
        self.start.is_some()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        if let Some(start) = self.start {
            write_zulu(w, start)?;
            w.write_byte(b'/')?;
            w.write_str(&format_signed_duration(self.duration))?;
        }
        Ok(())
    }
}
