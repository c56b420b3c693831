// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters for iCalendar properties.
//!
//! A [`Parameter`] is an upper-cased key with one or more values, and
//! [`Parameters`] is the ordered collection attached to a value. Keys are
//! unique within a collection: inserting a parameter whose key already
//! exists replaces the old entry.

mod definition;

pub use definition::{
    AlarmTriggerRelationship, CalendarUserType, DisplayType, FeatureType, FreeBusyType,
    ParticipationRole, ParticipationStatus, RelationshipType, ValueType, alt_rep, common_name,
    cu_type, delegatee, delegator, dir, display, email, encoding, fb_type, feature, fmt_type,
    fmt_type_of, label, language, member, part_stat, range_this_and_future, rel_type, related,
    role, rsvp, sent_by, tz_id, value_type,
};

use crate::error::Result;
use crate::formatter::StringWriter;

/// A single property parameter, such as `TZID=Europe/Paris`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    key: String,
    values: Vec<String>,
}

impl Parameter {
    /// Create a parameter with one value.
    pub fn single(key: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            key: key.as_ref().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Create a parameter with several values, written comma-separated.
    pub fn multiple<I, S>(key: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.as_ref().to_ascii_uppercase(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The canonical (upper-case) key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The first value, or an empty string for a parameter without values.
    #[must_use]
    pub fn value(&self) -> &str {
        self.values.first().map_or("", String::as_str)
    }

    /// All values in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether this parameter has the given key, ignoring ASCII case.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    /// Write `KEY=value[,value...]`, quoting every value when any of them
    /// contains `:`, `;` or `,`.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    pub fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        w.write_str(&self.key)?;
        w.write_byte(b'=')?;

        let quote = self.values.iter().any(|v| needs_quotes(v));
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                w.write_byte(b',')?;
            }
            if quote {
                w.write_byte(b'"')?;
                w.write_str(value)?;
                w.write_byte(b'"')?;
            } else {
                w.write_str(value)?;
            }
        }
        Ok(())
    }
}

fn needs_quotes(s: &str) -> bool {
    s.contains([':', ';', ','])
}

/// Ordered collection of parameters with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert at the end, replacing any parameter with the same key.
    pub fn append(&mut self, param: Parameter) {
        self.remove_by_key(&[param.key()]);
        self.0.push(param);
    }

    /// Insert at the start, replacing any parameter with the same key.
    pub fn prepend(&mut self, param: Parameter) {
        self.remove_by_key(&[param.key()]);
        self.0.insert(0, param);
    }

    /// Remove every parameter whose key matches one of `keys`.
    pub fn remove_by_key(&mut self, keys: &[&str]) {
        self.0.retain(|p| !keys.iter().any(|k| p.has_key(k)));
    }

    /// Find a parameter by key, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.has_key(key))
    }

    /// Iterate in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write each parameter as `;KEY=value`.
    ///
    /// # Errors
    /// Returns an error if the sink failed.
    pub fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        for param in &self.0 {
            w.write_byte(b';')?;
            param.write_to(w)?;
        }
        Ok(())
    }
}

impl Extend<Parameter> for Parameters {
    fn extend<T: IntoIterator<Item = Parameter>>(&mut self, iter: T) {
        for param in iter {
            self.append(param);
        }
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
