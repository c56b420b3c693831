// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Build iCalendar (RFC 5545) data and write it as ics text.
//!
//! Values know how to render themselves with their parameters, components
//! check the properties they require, and everything is written through a
//! line-folding writer that keeps physical lines within 75 octets.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod error;
pub mod formatter;
pub mod keyword;
pub mod parameter;
pub mod semantic;
pub mod value;

pub use crate::error::{Error, Result};
pub use crate::formatter::{Buffer, FormatOptions, LineEnding, format};
pub use crate::parameter::{Parameter, Parameters};
pub use crate::semantic::{
    AudioAlarm, CalendarComponent, DisplayAlarm, EmailAlarm, Extension, VAlarm, VCalendar, VEvent,
    VFreeBusy,
};
pub use crate::value::{Attachable, Temporal, Trigger, ValidationError, Value, Valuer};
