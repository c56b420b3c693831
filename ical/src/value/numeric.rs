// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::parameter::{Parameters, ValueType};
use crate::value::{Valuer, write_head};

/// An integer (RFC 5545 Section 3.3.8).
///
/// Zero is a legitimate value, so definedness is tracked explicitly; only
/// [`Integer::new`] produces a defined value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Integer {
    params: Parameters,
    value: i64,
    defined: bool,
}

impl_with_params!(Integer);

impl Integer {
    /// An integer value, tagged `VALUE=INTEGER`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            params: Parameters::new(),
            value,
            defined: true,
        }
        .with(ValueType::Integer)
    }

    /// The number.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl Valuer for Integer {
    fn is_defined(&self) -> bool {
        self.defined
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        write!(w, "{}", self.value)
    }
}

/// A geographic position as latitude and longitude in decimal degrees
/// (RFC 5545 Section 3.8.1.6).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geo {
    params: Parameters,
    lat: f64,
    lon: f64,
    defined: bool,
}

impl_with_params!(Geo);

impl Geo {
    /// A position, tagged `VALUE=FLOAT`.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            params: Parameters::new(),
            lat,
            lon,
            defined: true,
        }
        .with(ValueType::Float)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

impl Valuer for Geo {
    fn is_defined(&self) -> bool {
        self.defined
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        write_head(&self.params, w)?;
        write!(w, "{};{}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &dyn Valuer) -> String {
        let mut out = Vec::new();
        value.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn integer() {
        assert_eq!(render(&Integer::new(0)), ";VALUE=INTEGER:0");
        assert_eq!(render(&Integer::new(-42)), ";VALUE=INTEGER:-42");
        assert!(Integer::new(0).is_defined());
        assert!(!Integer::default().is_defined());
    }

    #[test]
    fn geo() {
        assert_eq!(
            render(&Geo::new(37.386_013, -122.082_932)),
            ";VALUE=FLOAT:37.386013;-122.082932"
        );
        assert_eq!(render(&Geo::new(0.0, 1.5)), ";VALUE=FLOAT:0;1.5");
        assert!(!Geo::default().is_defined());
    }
}
