// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property values (RFC 5545 Section 3.3) and how they render themselves.
//!
//! Every value type carries its own [`Parameters`], knows whether it holds
//! anything worth writing ([`Valuer::is_defined`]), and writes
//! `;PARAM=...:payload` through a [`StringWriter`].

/// Generates the parameter builders shared by every value type.
macro_rules! impl_with_params {
    ($ty:ident) => {
        impl $ty {
            /// Append a parameter, replacing any existing one with the same key.
            #[must_use]
            pub fn with(mut self, param: impl Into<crate::parameter::Parameter>) -> Self {
                self.params.append(param.into());
                self
            }

            /// Append several parameters in order.
            #[must_use]
            pub fn with_params<I>(mut self, params: I) -> Self
            where
                I: IntoIterator<Item = crate::parameter::Parameter>,
            {
                self.params.extend(params);
                self
            }

            /// The parameters written before the payload.
            #[must_use]
            pub const fn params(&self) -> &crate::parameter::Parameters {
                &self.params
            }
        }
    };
}

mod datetime;
mod duration;
mod miscellaneous;
mod numeric;
mod period;
mod rrule;
mod text;

pub use crate::value::datetime::DateTime;
pub use crate::value::duration::{Duration, format_signed_duration};
pub use crate::value::miscellaneous::Binary;
pub use crate::value::numeric::{Geo, Integer};
pub use crate::value::period::Period;
pub use crate::value::rrule::{Frequency, Recurrence, ValidationError, WeekDay, WeekDayNum};
pub use crate::value::text::{Text, Uri, escape};

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::parameter::Parameters;

/// A serializable property value.
pub trait Valuer {
    /// Whether the value holds content; undefined values are not written.
    fn is_defined(&self) -> bool;

    /// Write the parameters, a colon, then the payload.
    ///
    /// # Errors
    /// Returns an error if the sink failed or the value is invalid.
    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()>;

    /// Check the value before anything is written.
    ///
    /// # Errors
    /// Returns a validation error describing the offending field.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Null-safe definedness test: `false` for `None`, else the value's own answer.
pub fn is_defined<V: Valuer + ?Sized>(value: Option<&V>) -> bool {
    value.is_some_and(Valuer::is_defined)
}

impl<V: Valuer + ?Sized> Valuer for &V {
    fn is_defined(&self) -> bool {
        (**self).is_defined()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        (**self).write_to(w)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

impl<V: Valuer> Valuer for Option<V> {
    fn is_defined(&self) -> bool {
        is_defined(self.as_ref())
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        match self {
            Some(v) => v.write_to(w),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Some(v) => v.validate(),
            None => Ok(()),
        }
    }
}

/// Writes the parameter prefix and the separating colon.
fn write_head(params: &Parameters, w: &mut dyn StringWriter) -> Result<()> {
    params.write_to(w)?;
    w.write_byte(b':')
}

macro_rules! define_value_enum {
    (
        $(#[$meta:meta])*
        enum $Name:ident {
            $(
                $(#[$vmeta:meta])*
                $Variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $Name {
            $(
                $(#[$vmeta])*
                $Variant($ty),
            )+
        }

        impl Valuer for $Name {
            fn is_defined(&self) -> bool {
                match self {
                    $(Self::$Variant(v) => v.is_defined(),)+
                }
            }

            fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
                match self {
                    $(Self::$Variant(v) => v.write_to(w),)+
                }
            }

            fn validate(&self) -> Result<()> {
                match self {
                    $(Self::$Variant(v) => v.validate(),)+
                }
            }
        }

        $(
            impl From<$ty> for $Name {
                fn from(value: $ty) -> Self {
                    Self::$Variant(value)
                }
            }
        )+
    };
}

define_value_enum! {
    /// Any property value, used where the property type is not fixed, such
    /// as calendar extensions.
    enum Value {
        /// Text or a list of texts
        Text(Text),
        /// Date or date-time
        DateTime(DateTime),
        /// Duration
        Duration(Duration),
        /// Integer
        Integer(Integer),
        /// Geographic position
        Geo(Geo),
        /// Inline binary data
        Binary(Binary),
        /// URI or calendar address
        Uri(Uri),
        /// Period of time
        Period(Period),
        /// Recurrence rule
        Recurrence(Recurrence),
    }
}

define_value_enum! {
    /// Values usable as an attachment or image.
    enum Attachable {
        /// Referenced by URI
        Uri(Uri),
        /// Inline data
        Binary(Binary),
    }
}

define_value_enum! {
    /// Values usable as an alarm trigger.
    enum Trigger {
        /// Absolute trigger time
        DateTime(DateTime),
        /// Offset relative to the start or end of the parent component
        Duration(Duration),
    }
}

define_value_enum! {
    /// Values usable where either a date-time or a period is accepted.
    enum Temporal {
        /// Date or date-time
        DateTime(DateTime),
        /// Period of time
        Period(Period),
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
    fn null_safe_is_defined() {
        assert!(!is_defined::<Text>(None));
        assert!(!is_defined(Some(&Text::new(""))));
        assert!(is_defined(Some(&Text::new("x"))));
        assert!(!Option::<Integer>::None.is_defined());
    }

    #[test]
    fn enums_delegate() {
        let value = Value::from(Integer::new(3));
        assert!(value.is_defined());
        assert_eq!(render(&value), ";VALUE=INTEGER:3");

        let attach = Attachable::from(Uri::new("http://example.com/a.png"));
        assert_eq!(render(&attach), ";VALUE=URI:http://example.com/a.png");

        let trigger = Trigger::from(Duration::new("-PT10M"));
        assert_eq!(render(&trigger), ";VALUE=DURATION:-PT10M");

        assert!(!Temporal::from(Period::default()).is_defined());
    }
}
