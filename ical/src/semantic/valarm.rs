// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Alarm component (VALARM).

use std::io::Write;

use crate::error::{Error, Result};
use crate::formatter::Buffer;
use crate::keyword::{
    KW_ACTION, KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_ATTACH, KW_ATTENDEE,
    KW_DESCRIPTION, KW_DURATION, KW_REPEAT, KW_SUMMARY, KW_TRIGGER, KW_VALARM,
};
use crate::semantic::require;
use crate::value::{Attachable, Duration, Integer, Text, Trigger, Uri, Valuer, is_defined};

/// Alarm component (VALARM), one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum VAlarm {
    /// Play a sound
    Audio(AudioAlarm),
    /// Show a message
    Display(DisplayAlarm),
    /// Send an email
    Email(EmailAlarm),
}

/// `ACTION:AUDIO` alarm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioAlarm {
    /// When the alarm fires (required)
    pub trigger: Option<Trigger>,
    /// Delay between repetitions; set together with `repeat`
    pub duration: Duration,
    /// Number of additional repetitions; set together with `duration`
    pub repeat: Integer,
    /// Sound to play
    pub attach: Option<Attachable>,
}

/// `ACTION:DISPLAY` alarm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayAlarm {
    /// Text to display (required)
    pub description: Text,
    /// When the alarm fires (required)
    pub trigger: Option<Trigger>,
    /// Delay between repetitions; set together with `repeat`
    pub duration: Duration,
    /// Number of additional repetitions; set together with `duration`
    pub repeat: Integer,
}

/// `ACTION:EMAIL` alarm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailAlarm {
    /// Message body (required)
    pub description: Text,
    /// When the alarm fires (required)
    pub trigger: Option<Trigger>,
    /// Message subject (required)
    pub summary: Text,
    /// Recipients (at least one)
    pub attendee: Vec<Uri>,
    /// Delay between repetitions; set together with `repeat`
    pub duration: Duration,
    /// Number of additional repetitions; set together with `duration`
    pub repeat: Integer,
    /// Message attachments
    pub attach: Vec<Attachable>,
}

impl VAlarm {
    /// Check required properties.
    ///
    /// # Errors
    /// Returns the first missing property or violated constraint.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::Audio(alarm) => {
                require(is_defined(alarm.trigger.as_ref()), KW_VALARM, KW_TRIGGER)?;
                check_repetition(&alarm.duration, &alarm.repeat)
            }
            Self::Display(alarm) => {
                require(alarm.description.is_defined(), KW_VALARM, KW_DESCRIPTION)?;
                require(is_defined(alarm.trigger.as_ref()), KW_VALARM, KW_TRIGGER)?;
                check_repetition(&alarm.duration, &alarm.repeat)
            }
            Self::Email(alarm) => {
                require(alarm.description.is_defined(), KW_VALARM, KW_DESCRIPTION)?;
                require(is_defined(alarm.trigger.as_ref()), KW_VALARM, KW_TRIGGER)?;
                require(alarm.summary.is_defined(), KW_VALARM, KW_SUMMARY)?;
                require(
                    alarm.attendee.iter().any(Valuer::is_defined),
                    KW_VALARM,
                    KW_ATTENDEE,
                )?;
                check_repetition(&alarm.duration, &alarm.repeat)
            }
        }
    }

    /// Write the alarm block.
    ///
    /// # Errors
    /// Returns an error if checking or writing fails.
    pub fn encode<W: Write>(&self, b: &mut Buffer<W>) -> Result<()> {
        self.check()?;
        b.with_block(KW_VALARM, |b| match self {
            Self::Audio(alarm) => {
                b.write_line(&format!("{KW_ACTION}:{KW_ACTION_AUDIO}"))?;
                b.write_valuer_line(true, KW_TRIGGER, &alarm.trigger)?;
                write_repetition(b, &alarm.duration, &alarm.repeat)?;
                b.write_valuer_line(is_defined(alarm.attach.as_ref()), KW_ATTACH, &alarm.attach)
            }
            Self::Display(alarm) => {
                b.write_line(&format!("{KW_ACTION}:{KW_ACTION_DISPLAY}"))?;
                b.write_valuer_line(true, KW_DESCRIPTION, &alarm.description)?;
                b.write_valuer_line(true, KW_TRIGGER, &alarm.trigger)?;
                write_repetition(b, &alarm.duration, &alarm.repeat)
            }
            Self::Email(alarm) => {
                b.write_line(&format!("{KW_ACTION}:{KW_ACTION_EMAIL}"))?;
                b.write_valuer_line(true, KW_DESCRIPTION, &alarm.description)?;
                b.write_valuer_line(true, KW_TRIGGER, &alarm.trigger)?;
                b.write_valuer_line(true, KW_SUMMARY, &alarm.summary)?;
                for attendee in &alarm.attendee {
                    b.write_valuer_line(attendee.is_defined(), KW_ATTENDEE, attendee)?;
                }
                write_repetition(b, &alarm.duration, &alarm.repeat)?;
                for attach in &alarm.attach {
                    b.write_valuer_line(attach.is_defined(), KW_ATTACH, attach)?;
                }
                Ok(())
            }
        })
    }
}

fn check_repetition(duration: &Duration, repeat: &Integer) -> Result<()> {
    if duration.is_defined() == repeat.is_defined() {
        Ok(())
    } else {
        Err(Error::Constraint {
            component: KW_VALARM,
            message: "DURATION and REPEAT must both be present or both be absent",
        })
    }
}

fn write_repetition<W>(b: &mut Buffer<W>, duration: &Duration, repeat: &Integer) -> Result<()>
where
    W: Write,
{
    b.write_valuer_line(duration.is_defined(), KW_DURATION, duration)?;
    b.write_valuer_line(repeat.is_defined(), KW_REPEAT, repeat)
}

impl From<AudioAlarm> for VAlarm {
    fn from(alarm: AudioAlarm) -> Self {
        Self::Audio(alarm)
    }
}

impl From<DisplayAlarm> for VAlarm {
    fn from(alarm: DisplayAlarm) -> Self {
        Self::Display(alarm)
    }
}

impl From<EmailAlarm> for VAlarm {
    fn from(alarm: EmailAlarm) -> Self {
        Self::Email(alarm)
    }
}
