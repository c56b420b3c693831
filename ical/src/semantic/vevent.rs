// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::mem;

use crate::error::{Error, Result};
use crate::formatter::Buffer;
use crate::keyword::{
    KW_ATTACH, KW_ATTENDEE, KW_CATEGORIES, KW_CLASS, KW_COLOR, KW_COMMENT, KW_CONFERENCE,
    KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DURATION,
    KW_EXDATE, KW_GEO, KW_IMAGE, KW_LAST_MODIFIED, KW_LOCATION, KW_ORGANIZER, KW_PRIORITY,
    KW_RDATE, KW_RECURRENCE_ID, KW_RELATED_TO, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_UID, KW_URL, KW_VEVENT,
};
use crate::semantic::{VAlarm, require};
use crate::value::{
    Attachable, DateTime, Duration, Geo, Integer, Recurrence, Temporal, Text, Uri, Valuer,
    is_defined,
};

/// Event component (VEVENT).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VEvent {
    /// Start of the event; required when the calendar has no METHOD
    pub dt_start: DateTime,
    /// End of the event, exclusive with `duration`
    pub dt_end: DateTime,
    /// Length of the event, exclusive with `dt_end`
    pub duration: Duration,
    /// Creation time of this iCalendar object (required)
    pub dt_stamp: DateTime,
    /// Unique identifier (required)
    pub uid: Text,
    /// Revision sequence number
    pub sequence: Integer,
    /// Creation time in the calendar store
    pub created: DateTime,
    /// Last revision time
    pub last_modified: DateTime,
    /// Which instance of a recurring event this overrides
    pub recurrence_id: DateTime,
    /// Recurrence rule
    pub rrule: Option<Recurrence>,
    /// Extra recurrence dates
    pub rdate: Vec<Temporal>,
    /// Excluded recurrence dates
    pub exdate: Vec<DateTime>,
    /// Organizer
    pub organizer: Uri,
    /// Attendees
    pub attendee: Vec<Uri>,
    /// Contact information
    pub contact: Text,
    /// Short summary
    pub summary: Text,
    /// Full description
    pub description: Text,
    /// Categories, one property line each
    pub categories: Vec<Text>,
    /// Access classification
    pub class: Text,
    /// Venue
    pub location: Text,
    /// Geographic position
    pub geo: Geo,
    /// Priority, 0 (undefined) to 9
    pub priority: Integer,
    /// Resources, one property line each
    pub resources: Vec<Text>,
    /// Related component
    pub related_to: Text,
    /// Link to a representation of this event
    pub url: Uri,
    /// Attachments
    pub attach: Vec<Attachable>,
    /// Comments
    pub comment: Vec<Text>,
    /// Overall status
    pub status: Text,
    /// Time transparency for free/busy lookups
    pub transp: Text,
    /// Display color (RFC 7986)
    pub color: Text,
    /// Images (RFC 7986)
    pub image: Vec<Attachable>,
    /// Conference endpoints (RFC 7986)
    pub conference: Vec<Uri>,
    /// Nested alarms
    pub alarms: Vec<VAlarm>,
}

impl VEvent {
    /// Convert the start and end to DATE values.
    #[must_use]
    pub fn all_day(mut self) -> Self {
        if self.dt_start.is_defined() {
            self.dt_start = mem::take(&mut self.dt_start).as_date();
        }
        if self.dt_end.is_defined() {
            self.dt_end = mem::take(&mut self.dt_end).as_date();
        }
        self
    }

    /// Add an alarm.
    #[must_use]
    pub fn with_alarm(mut self, alarm: impl Into<VAlarm>) -> Self {
        self.alarms.push(alarm.into());
        self
    }

    /// Check required properties, including those of nested alarms.
    ///
    /// # Errors
    /// Returns the first missing property or violated constraint.
    pub fn check(&self, method: &Text) -> Result<()> {
        require(self.dt_stamp.is_defined(), KW_VEVENT, KW_DTSTAMP)?;
        require(self.uid.is_defined(), KW_VEVENT, KW_UID)?;
        if !method.is_defined() {
            require(self.dt_start.is_defined(), KW_VEVENT, KW_DTSTART)?;
        }
        if self.dt_end.is_defined() && self.duration.is_defined() {
            return Err(Error::Constraint {
                component: KW_VEVENT,
                message: "DTEND and DURATION must not both be present",
            });
        }
        if let Some(rrule) = &self.rrule {
            rrule.validate()?;
        }
        self.alarms.iter().try_for_each(VAlarm::check)
    }

    /// Write the event block.
    ///
    /// # Errors
    /// Returns an error if checking or writing fails.
    pub fn encode<W: Write>(&self, b: &mut Buffer<W>, method: &Text) -> Result<()> {
        if let Err(err) = self.check(method) {
            tracing::warn!(uid = self.uid.value(), %err, "refusing to write incomplete event");
            return Err(err);
        }
        tracing::debug!(uid = self.uid.value(), "encoding event");

        b.with_block(KW_VEVENT, |b| {
            b.write_valuer_line(self.dt_start.is_defined(), KW_DTSTART, &self.dt_start)?;
            b.write_valuer_line(self.dt_end.is_defined(), KW_DTEND, &self.dt_end)?;
            b.write_valuer_line(self.duration.is_defined(), KW_DURATION, &self.duration)?;
            b.write_valuer_line(true, KW_DTSTAMP, &self.dt_stamp)?;
            b.write_valuer_line(true, KW_UID, &self.uid)?;
            b.write_valuer_line(self.sequence.is_defined(), KW_SEQUENCE, &self.sequence)?;
            b.write_valuer_line(self.created.is_defined(), KW_CREATED, &self.created)?;
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
            b.write_valuer_line(is_defined(self.rrule.as_ref()), KW_RRULE, &self.rrule)?;
            write_all(b, KW_RDATE, &self.rdate)?;
            write_all(b, KW_EXDATE, &self.exdate)?;
            b.write_valuer_line(self.organizer.is_defined(), KW_ORGANIZER, &self.organizer)?;
            write_all(b, KW_ATTENDEE, &self.attendee)?;
            b.write_valuer_line(self.contact.is_defined(), KW_CONTACT, &self.contact)?;
            b.write_valuer_line(self.summary.is_defined(), KW_SUMMARY, &self.summary)?;
            b.write_valuer_line(self.description.is_defined(), KW_DESCRIPTION, &self.description)?;
            write_all(b, KW_CATEGORIES, &self.categories)?;
            b.write_valuer_line(self.class.is_defined(), KW_CLASS, &self.class)?;
            b.write_valuer_line(self.location.is_defined(), KW_LOCATION, &self.location)?;
            b.write_valuer_line(self.geo.is_defined(), KW_GEO, &self.geo)?;
            b.write_valuer_line(self.priority.is_defined(), KW_PRIORITY, &self.priority)?;
            write_all(b, KW_RESOURCES, &self.resources)?;
            b.write_valuer_line(self.related_to.is_defined(), KW_RELATED_TO, &self.related_to)?;
            b.write_valuer_line(self.url.is_defined(), KW_URL, &self.url)?;
            write_all(b, KW_ATTACH, &self.attach)?;
            write_all(b, KW_COMMENT, &self.comment)?;
            b.write_valuer_line(self.status.is_defined(), KW_STATUS, &self.status)?;
            b.write_valuer_line(self.transp.is_defined(), KW_TRANSP, &self.transp)?;
            b.write_valuer_line(self.color.is_defined(), KW_COLOR, &self.color)?;
            write_all(b, KW_IMAGE, &self.image)?;
            write_all(b, KW_CONFERENCE, &self.conference)?;
            self.alarms.iter().try_for_each(|alarm| alarm.encode(b))
        })
    }
}

/// Writes one line per defined value.
pub(super) fn write_all<W, V>(b: &mut Buffer<W>, label: &str, values: &[V]) -> Result<()>
where
    W: Write,
    V: Valuer,
{
    values
        .iter()
        .try_for_each(|v| b.write_valuer_line(v.is_defined(), label, v))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;
    use crate::formatter::FormatOptions;
    use crate::semantic::DisplayAlarm;
    use crate::value::Frequency;

    fn event() -> VEvent {
        let start = date(2025, 3, 14)
            .at(9, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        VEvent {
            dt_start: DateTime::new(start),
            dt_stamp: DateTime::tstamp(Timestamp::from_second(0).unwrap()),
            uid: Text::new("uid-1"),
            summary: Text::new("Standup"),
            ..VEvent::default()
        }
    }

    fn render(event: &VEvent, method: &Text) -> Result<String> {
        let mut b = Buffer::new(Vec::new(), FormatOptions::plain());
        event.encode(&mut b, method)?;
        Ok(String::from_utf8(b.into_inner()?).unwrap())
    }

    #[test]
    fn minimal_event() {
        let out = render(&event(), &Text::default()).unwrap();
        assert_eq!(
            out,
            "BEGIN:VEVENT\n\
             DTSTART;VALUE=DATE-TIME:20250314T090000Z\n\
             DTSTAMP:19700101T000000Z\n\
             UID:uid-1\n\
             SUMMARY:Standup\n\
             END:VEVENT\n"
        );
    }

    #[test]
    fn missing_uid_writes_nothing() {
        let mut ev = event();
        ev.uid = Text::default();
        let mut b = Buffer::new(Vec::new(), FormatOptions::plain());
        let err = ev.encode(&mut b, &Text::default()).unwrap_err();
        assert!(matches!(err, Error::MissingProperty { property: "UID", .. }));
        assert!(b.into_inner().unwrap().is_empty());
    }

    #[test]
    fn dtstart_optional_with_method() {
        let mut ev = event();
        ev.dt_start = DateTime::default();
        assert!(ev.check(&Text::default()).is_err());
        assert!(ev.check(&Text::publish()).is_ok());
    }

    #[test]
    fn dtend_excludes_duration() {
        let mut ev = event();
        ev.dt_end = ev.dt_start.clone();
        ev.duration = Duration::new("PT1H");
        let err = ev.check(&Text::default()).unwrap_err();
        assert!(matches!(err, Error::Constraint { component: "VEVENT", .. }));
    }

    #[test]
    fn all_day_writes_dates() {
        let out = render(&event().all_day(), &Text::default()).unwrap();
        assert!(out.contains("DTSTART;VALUE=DATE:20250314\n"));
    }

    #[test]
    fn invalid_rrule_is_rejected_up_front() {
        let mut rule = Recurrence::new(Frequency::Daily);
        rule.by_minute = vec![60];
        let mut ev = event();
        ev.rrule = Some(rule);
        assert!(matches!(
            ev.check(&Text::default()).unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn nested_alarm() {
        let ev = event().with_alarm(DisplayAlarm {
            description: Text::new("Standup"),
            trigger: Some(Duration::new("-PT5M").into()),
            ..DisplayAlarm::default()
        });
        let out = render(&ev, &Text::default()).unwrap();
        assert!(out.ends_with(
            "SUMMARY:Standup\nBEGIN:VALARM\nACTION:DISPLAY\nDESCRIPTION:Standup\n\
             TRIGGER;VALUE=DURATION:-PT5M\nEND:VALARM\nEND:VEVENT\n"
        ));
    }
}
