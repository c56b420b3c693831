// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use crate::error::Result;
use crate::formatter::Buffer;
use crate::keyword::{
    KW_ATTENDEE, KW_COMMENT, KW_CONTACT, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_FREEBUSY,
    KW_ORGANIZER, KW_UID, KW_URL, KW_VFREEBUSY,
};
use crate::semantic::require;
use crate::semantic::vevent::write_all;
use crate::value::{DateTime, Period, Text, Uri, Valuer};

/// Free/busy component (VFREEBUSY), used both to request and to publish
/// busy time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VFreeBusy {
    /// Start of the range; required when the calendar has no METHOD
    pub dt_start: DateTime,
    /// End of the range
    pub dt_end: DateTime,
    /// Creation time of this iCalendar object (required)
    pub dt_stamp: DateTime,
    /// Unique identifier (required)
    pub uid: Text,
    /// Organizer
    pub organizer: Uri,
    /// Attendees
    pub attendee: Vec<Uri>,
    /// Contact information
    pub contact: Text,
    /// Where the busy time is published
    pub url: Uri,
    /// Comments
    pub comment: Vec<Text>,
    /// Busy periods, each tagged with its `FBTYPE`
    pub free_busy: Vec<Period>,
}

impl VFreeBusy {
    /// Check required properties.
    ///
    /// # Errors
    /// Returns the first missing property.
    pub fn check(&self, method: &Text) -> Result<()> {
        require(self.dt_stamp.is_defined(), KW_VFREEBUSY, KW_DTSTAMP)?;
        require(self.uid.is_defined(), KW_VFREEBUSY, KW_UID)?;
        if !method.is_defined() {
            require(self.dt_start.is_defined(), KW_VFREEBUSY, KW_DTSTART)?;
        }
        Ok(())
    }

    /// Write the free/busy block.
    ///
    /// # Errors
    /// Returns an error if checking or writing fails.
    pub fn encode<W: Write>(&self, b: &mut Buffer<W>, method: &Text) -> Result<()> {
        if let Err(err) = self.check(method) {
            tracing::warn!(uid = self.uid.value(), %err, "refusing to write incomplete free/busy");
            return Err(err);
        }
        tracing::debug!(
            uid = self.uid.value(),
            periods = self.free_busy.len(),
            "encoding free/busy"
        );

        b.with_block(KW_VFREEBUSY, |b| {
            b.write_valuer_line(self.dt_start.is_defined(), KW_DTSTART, &self.dt_start)?;
            b.write_valuer_line(self.dt_end.is_defined(), KW_DTEND, &self.dt_end)?;
            b.write_valuer_line(true, KW_DTSTAMP, &self.dt_stamp)?;
            b.write_valuer_line(true, KW_UID, &self.uid)?;
            b.write_valuer_line(self.organizer.is_defined(), KW_ORGANIZER, &self.organizer)?;
            write_all(b, KW_ATTENDEE, &self.attendee)?;
            b.write_valuer_line(self.contact.is_defined(), KW_CONTACT, &self.contact)?;
            b.write_valuer_line(self.url.is_defined(), KW_URL, &self.url)?;
            write_all(b, KW_COMMENT, &self.comment)?;
            write_all(b, KW_FREEBUSY, &self.free_busy)
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::error::Error;
    use crate::formatter::FormatOptions;

    fn free_busy() -> VFreeBusy {
        VFreeBusy {
            dt_stamp: DateTime::tstamp(Timestamp::from_second(0).unwrap()),
            uid: Text::new("fb-1"),
            ..VFreeBusy::default()
        }
    }

    #[test]
    fn dtstart_required_without_method() {
        let err = free_busy().check(&Text::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingProperty {
                component: "VFREEBUSY",
                property: "DTSTART"
            }
        ));
        assert!(free_busy().check(&Text::request()).is_ok());
    }

    #[test]
    fn minimal_free_busy() {
        let mut b = Buffer::new(Vec::new(), FormatOptions::plain());
        free_busy().encode(&mut b, &Text::request()).unwrap();
        let out = String::from_utf8(b.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "BEGIN:VFREEBUSY\nDTSTAMP:19700101T000000Z\nUID:fb-1\nEND:VFREEBUSY\n"
        );
    }
}
