// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::SignedDuration;

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::parameter::{Parameters, ValueType};
use crate::value::{Valuer, write_head};

/// A duration (RFC 5545 Section 3.3.6), kept as its ISO 8601 text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    params: Parameters,
    value: String,
}

impl_with_params!(Duration);

impl Duration {
    /// A duration such as `PT1H` or `-P1DT12H`, tagged `VALUE=DURATION`.
    ///
    /// The text is written as given.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            params: Parameters::new(),
            value: value.into(),
        }
        .with(ValueType::Duration)
    }

    /// A duration rendered from a signed span; see [`format_signed_duration`].
    #[must_use]
    pub fn from_signed(duration: SignedDuration) -> Self {
        Self::new(format_signed_duration(duration))
    }

    /// The duration text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Valuer for Duration {
    fn is_defined(&self) -> bool {
        !self.value.is_empty()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        w.write_str(&self.value).map(drop)
    }
}

/// Format a signed span as `[-]P[nD][T[nH][nM][nS]]`, e.g. `PT1H30M` or
/// `-P2D`. A zero span is `PT0S`; fractional seconds are truncated.
#[must_use]
pub fn format_signed_duration(duration: SignedDuration) -> String {
    RfcDuration(duration).to_string()
}

struct RfcDuration(SignedDuration);

impl fmt::Display for RfcDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        let total = self.0.as_secs().unsigned_abs();
        if self.0.is_negative() && total > 0 {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        let day = total / DAY;
        let hour = total % DAY / HOUR;
        let minute = total % HOUR / MINUTE;
        let second = total % MINUTE;

        if day > 0 {
            write!(f, "{day}D")?;
        }
        if hour > 0 || minute > 0 || second > 0 {
            write!(f, "T")?;
            if hour > 0 {
                write!(f, "{hour}H")?;
            }
            if minute > 0 {
                write!(f, "{minute}M")?;
            }
            if second > 0 {
                write!(f, "{second}S")?;
            }
        } else if day == 0 {
            write!(f, "T0S")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_signed_durations() {
        let cases = [
            (SignedDuration::from_hours(1), "PT1H"),
            (SignedDuration::from_mins(-10), "-PT10M"),
            (SignedDuration::from_secs(90), "PT1M30S"),
            (SignedDuration::from_hours(36), "P1DT12H"),
            (SignedDuration::from_hours(-48), "-P2D"),
            (SignedDuration::ZERO, "PT0S"),
            (SignedDuration::from_millis(-500), "PT0S"),
        ];
        for (duration, expected) in cases {
            assert_eq!(format_signed_duration(duration), expected, "{duration:?}");
        }
    }

    #[test]
    fn writes_literal_text() {
        let mut out = Vec::new();
        Duration::new("PT15M").write_to(&mut out).unwrap();
        assert_eq!(out, b";VALUE=DURATION:PT15M");
        assert!(!Duration::default().is_defined());
        assert_eq!(Duration::from_signed(SignedDuration::from_mins(15)).value(), "PT15M");
    }
}
