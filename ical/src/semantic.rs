// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar components and how they are written.
//!
//! Each component lists its properties as typed values, checks the ones
//! RFC 5545 requires, and hands them to a [`Buffer`] one line at a time.

mod icalendar;
mod valarm;
mod vevent;
mod vfreebusy;

use std::io::Write;

pub use icalendar::{Extension, VCalendar};
pub use valarm::{AudioAlarm, DisplayAlarm, EmailAlarm, VAlarm};
pub use vevent::VEvent;
pub use vfreebusy::VFreeBusy;

use crate::error::{Error, Result};
use crate::formatter::Buffer;
use crate::value::Text;

/// A component nested directly in a calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarComponent {
    /// Event (VEVENT)
    Event(VEvent),
    /// Free/busy time (VFREEBUSY)
    FreeBusy(VFreeBusy),
}

impl CalendarComponent {
    /// Check required properties, given the calendar's `METHOD`.
    ///
    /// # Errors
    /// Returns the first missing property or violated constraint.
    pub fn check(&self, method: &Text) -> Result<()> {
        match self {
            Self::Event(event) => event.check(method),
            Self::FreeBusy(free_busy) => free_busy.check(method),
        }
    }

    /// Write the component block.
    ///
    /// # Errors
    /// Returns an error if checking or writing fails.
    pub fn encode<W: Write>(&self, b: &mut Buffer<W>, method: &Text) -> Result<()> {
        match self {
            Self::Event(event) => event.encode(b, method),
            Self::FreeBusy(free_busy) => free_busy.encode(b, method),
        }
    }
}

impl From<VEvent> for CalendarComponent {
    fn from(event: VEvent) -> Self {
        Self::Event(event)
    }
}

impl From<VFreeBusy> for CalendarComponent {
    fn from(free_busy: VFreeBusy) -> Self {
        Self::FreeBusy(free_busy)
    }
}

/// Fails with [`Error::MissingProperty`] unless `defined`.
fn require(defined: bool, component: &'static str, property: &'static str) -> Result<()> {
    if defined {
        Ok(())
    } else {
        Err(Error::MissingProperty {
            component,
            property,
        })
    }
}
