// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rules (RFC 5545 Section 3.3.10).

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::Timestamp;

use crate::error::Result;
use crate::formatter::StringWriter;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::parameter::{Parameters, ValueType};
use crate::value::datetime::write_zulu;
use crate::value::{Valuer, write_head};

/// Largest ordinal accepted in a `BYDAY` entry.
const MAX_WEEK_ORDINAL: i32 = 53;

/// Recurrence rule
///
/// Rule parts are public; zero `interval`/`count`, `None` and empty lists
/// are omitted when written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Recurrence {
    params: Parameters,
    /// Frequency of recurrence; a rule without one is undefined
    pub freq: Option<Frequency>,
    /// Interval between recurrences
    pub interval: u32,
    /// Number of occurrences
    pub count: u32,
    /// Last instant of the recurrence, written in UTC
    pub until: Option<Timestamp>,
    /// Week number specifier
    pub by_week_no: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<u8>,
    /// Hour specifier
    pub by_hour: Vec<u8>,
    /// Minute specifier
    pub by_minute: Vec<u8>,
    /// Second specifier
    pub by_second: Vec<u8>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Position in the set of occurrences
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
}

impl_with_params!(Recurrence);

impl Recurrence {
    /// A rule with the given frequency, tagged `VALUE=RECUR`.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            ..Self::default()
        }
        .with(ValueType::Recur)
    }
}

impl Valuer for Recurrence {
    fn is_defined(&self) -> bool {
        self.freq.is_some()
    }

    fn write_to(&self, w: &mut dyn StringWriter) -> Result<()> {
        self.validate()?;

        write_head(&self.params, w)?;
        if let Some(freq) = self.freq {
            write!(w, "{KW_RRULE_FREQ}={freq}")?;
        }
        if self.interval > 0 {
            write!(w, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        if self.count > 0 {
            write!(w, ";{KW_RRULE_COUNT}={}", self.count)?;
        }
        if let Some(until) = self.until {
            write!(w, ";{KW_RRULE_UNTIL}=")?;
            write_zulu(w, until)?;
        }
        write_list(w, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        write_list(w, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(w, KW_RRULE_BYHOUR, &self.by_hour)?;
        write_list(w, KW_RRULE_BYMINUTE, &self.by_minute)?;
        write_list(w, KW_RRULE_BYSECOND, &self.by_second)?;
        write_list(w, KW_RRULE_BYDAY, &self.by_day)?;
        write_list(w, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(w, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        write_list(w, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.wkst {
            write!(w, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        check_unsigned("BySecond", 0, 60, &self.by_second)?;
        check_unsigned("ByMinute", 0, 59, &self.by_minute)?;
        check_unsigned("ByHour", 0, 23, &self.by_hour)?;
        check_unsigned("ByMonth", 1, 12, &self.by_month)?;
        check_plus_minus("ByMonthDay", 1, 31, &self.by_month_day)?;
        check_plus_minus("ByYearDay", 1, 366, &self.by_year_day)?;
        check_plus_minus("ByWeekNo", 0, 53, &self.by_week_no)?;
        check_plus_minus("BySetPos", 1, 366, &self.by_set_pos)?;
        if self.by_day.iter().any(|d| !d.in_range()) {
            return Err(ValidationError::new(
                "ByDay",
                -MAX_WEEK_ORDINAL,
                MAX_WEEK_ORDINAL,
                &self.by_day,
            )
            .into());
        }
        Ok(())
    }
}

fn write_list<T: Display>(w: &mut dyn StringWriter, key: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    write!(w, ";{key}=")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            w.write_byte(b',')?;
        }
        write!(w, "{value}")?;
    }
    Ok(())
}

fn check_unsigned(field: &'static str, min: u8, max: u8, values: &[u8]) -> Result<(), ValidationError> {
    if values.iter().any(|v| !(min..=max).contains(v)) {
        return Err(ValidationError::new(field, min.into(), max.into(), values));
    }
    Ok(())
}

/// Values must lie in `min..=max` or `-max..=-min`.
fn check_plus_minus<T>(field: &'static str, min: i32, max: i32, values: &[T]) -> Result<(), ValidationError>
where
    T: Copy + Into<i32> + Display,
{
    let invalid = |v: i32| v < -max || (v > -min && v < min) || v > max;
    if values.iter().any(|&v| invalid(v.into())) {
        return Err(ValidationError::new(field, min, max, values));
    }
    Ok(())
}

/// A recurrence rule part is out of its permitted range.
///
/// The message lists the offending values comma-separated, as they would
/// appear in the rule, e.g. `ByHour value is out of the range 0 to 23 [1,24]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} value is out of the range {min} to {max} [{}]", .values.join(","))]
pub struct ValidationError {
    /// Name of the offending rule part
    pub field: &'static str,
    /// Lower bound of the permitted magnitude
    pub min: i32,
    /// Upper bound of the permitted magnitude
    pub max: i32,
    /// The whole offending list, as written
    pub values: Vec<String>,
}

impl ValidationError {
    fn new<T: Display>(field: &'static str, min: i32, max: i32, values: &[T]) -> Self {
        Self {
            field,
            min,
            max,
            values: values.iter().map(ToString::to_string).collect(),
        }
    }
}

macro_rules! define_keyword_enum {
    (
        $(#[$meta:meta])*
        enum $Name:ident {
            $(
                $Variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum $Name {
            $(
                $Variant,
            )+
        }

        impl $Name {
            /// Returns the keyword
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$Variant => $kw,
                    )+
                }
            }
        }

        impl FromStr for $Name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($kw) {
                        return Ok(Self::$Variant);
                    }
                )+
                Err(())
            }
        }

        impl Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.name().fmt(f)
            }
        }
    };
}

define_keyword_enum! {
    /// Recurrence frequency
    enum Frequency {
        Secondly    => KW_RRULE_FREQ_SECONDLY,
        Minutely    => KW_RRULE_FREQ_MINUTELY,
        Hourly      => KW_RRULE_FREQ_HOURLY,
        Daily       => KW_RRULE_FREQ_DAILY,
        Weekly      => KW_RRULE_FREQ_WEEKLY,
        Monthly     => KW_RRULE_FREQ_MONTHLY,
        Yearly      => KW_RRULE_FREQ_YEARLY,
    }
}

define_keyword_enum! {
    /// Day of the week
    enum WeekDay {
        Sunday      => KW_DAY_SU,
        Monday      => KW_DAY_MO,
        Tuesday     => KW_DAY_TU,
        Wednesday   => KW_DAY_WE,
        Thursday    => KW_DAY_TH,
        Friday      => KW_DAY_FR,
        Saturday    => KW_DAY_SA,
    }
}

/// A `BYDAY` entry: a weekday, optionally the n-th one within the period
/// (`1FR`, `-1SU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Occurrence within the month or year; zero means every such day
    pub ordinal: i8,
    /// Day of the week
    pub day: WeekDay,
}

impl WeekDayNum {
    /// The `ordinal`-th `day`; negative ordinals count from the end.
    #[must_use]
    pub const fn new(ordinal: i8, day: WeekDay) -> Self {
        Self { ordinal, day }
    }

    /// Whether the ordinal is within `-53..=53`.
    #[must_use]
    pub fn in_range(self) -> bool {
        i32::from(self.ordinal).abs() <= MAX_WEEK_ORDINAL
    }
}

impl From<WeekDay> for WeekDayNum {
    fn from(day: WeekDay) -> Self {
        Self { ordinal: 0, day }
    }
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ordinal != 0 {
            write!(f, "{}", self.ordinal)?;
        }
        self.day.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn render(rule: &Recurrence) -> Result<String> {
        let mut out = Vec::new();
        rule.write_to(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn validation(rule: &Recurrence) -> Option<ValidationError> {
        match rule.validate() {
            Ok(()) => None,
            Err(Error::Validation(err)) => Some(err),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn weekly_by_day() {
        let mut rule = Recurrence::new(Frequency::Weekly);
        rule.by_day = vec![WeekDay::Monday.into(), WeekDay::Wednesday.into(), WeekDay::Friday.into()];
        assert_eq!(render(&rule).unwrap(), ";VALUE=RECUR:FREQ=WEEKLY;BYDAY=MO,WE,FR");
    }

    #[test]
    fn writes_parts_in_fixed_order() {
        let mut rule = Recurrence::new(Frequency::Yearly);
        rule.wkst = Some(WeekDay::Monday);
        rule.by_set_pos = vec![-1];
        rule.by_year_day = vec![100];
        rule.by_month_day = vec![-3];
        rule.by_day = vec![WeekDayNum::new(2, WeekDay::Friday), WeekDayNum::new(-1, WeekDay::Sunday)];
        rule.by_second = vec![30];
        rule.by_minute = vec![15];
        rule.by_hour = vec![9];
        rule.by_month = vec![3];
        rule.by_week_no = vec![20];
        rule.until = Some("1997-12-24T00:00:00Z".parse().unwrap());
        rule.count = 0;
        rule.interval = 2;
        assert_eq!(
            render(&rule).unwrap(),
            ";VALUE=RECUR:FREQ=YEARLY;INTERVAL=2;UNTIL=19971224T000000Z;BYWEEKNO=20;BYMONTH=3;\
             BYHOUR=9;BYMINUTE=15;BYSECOND=30;BYDAY=2FR,-1SU;BYMONTHDAY=-3;BYYEARDAY=100;\
             BYSETPOS=-1;WKST=MO"
        );
    }

    #[test]
    fn month_boundaries() {
        let mut rule = Recurrence::new(Frequency::Monthly);
        for (month, ok) in [(0, false), (1, true), (12, true), (13, false)] {
            rule.by_month = vec![month];
            assert_eq!(validation(&rule).is_none(), ok, "BYMONTH={month}");
        }
    }

    #[test]
    fn unsigned_boundaries() {
        let cases: [(fn(&mut Recurrence, u8), u8); 3] = [
            (|r, v| r.by_second = vec![v], 60),
            (|r, v| r.by_minute = vec![v], 59),
            (|r, v| r.by_hour = vec![v], 23),
        ];
        for (set, max) in cases {
            let mut rule = Recurrence::new(Frequency::Daily);
            set(&mut rule, 0);
            assert!(validation(&rule).is_none());
            set(&mut rule, max);
            assert!(validation(&rule).is_none());
            set(&mut rule, max + 1);
            assert!(validation(&rule).is_some());
        }
    }

    #[test]
    fn plus_minus_boundaries() {
        let mut rule = Recurrence::new(Frequency::Yearly);
        for (day, ok) in [(-32, false), (-31, true), (-1, true), (0, false), (1, true), (31, true), (32, false)] {
            rule.by_month_day = vec![day];
            assert_eq!(validation(&rule).is_none(), ok, "BYMONTHDAY={day}");
        }
        rule.by_month_day.clear();

        for (day, ok) in [(-367, false), (-366, true), (0, false), (366, true), (367, false)] {
            rule.by_year_day = vec![day];
            assert_eq!(validation(&rule).is_none(), ok, "BYYEARDAY={day}");
            rule.by_year_day.clear();
            rule.by_set_pos = vec![day];
            assert_eq!(validation(&rule).is_none(), ok, "BYSETPOS={day}");
            rule.by_set_pos.clear();
        }

        for (week, ok) in [(-54, false), (-53, true), (0, true), (53, true), (54, false)] {
            rule.by_week_no = vec![week];
            assert_eq!(validation(&rule).is_none(), ok, "BYWEEKNO={week}");
        }
    }

    #[test]
    fn by_day_ordinal_boundaries() {
        let mut rule = Recurrence::new(Frequency::Yearly);
        for (ordinal, ok) in [(-54, false), (-53, true), (0, true), (53, true), (54, false)] {
            rule.by_day = vec![WeekDayNum::new(ordinal, WeekDay::Monday)];
            assert_eq!(validation(&rule).is_none(), ok, "BYDAY ordinal {ordinal}");
        }
    }

    #[test]
    fn error_names_field_range_and_values() {
        let mut rule = Recurrence::new(Frequency::Daily);
        rule.by_hour = vec![1, 24];
        let err = validation(&rule).unwrap();
        assert_eq!(err.field, "ByHour");
        assert_eq!(err.to_string(), "ByHour value is out of the range 0 to 23 [1,24]");

        rule.by_hour.clear();
        rule.by_day = vec![WeekDayNum::new(60, WeekDay::Friday)];
        let err = validation(&rule).unwrap();
        assert_eq!(err.to_string(), "ByDay value is out of the range -53 to 53 [60FR]");
    }

    #[test]
    fn invalid_rule_writes_nothing() {
        let mut rule = Recurrence::new(Frequency::Daily);
        rule.by_month = vec![13];
        let mut out = Vec::new();
        assert!(rule.write_to(&mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn definedness() {
        assert!(!Recurrence::default().is_defined());
        assert!(Recurrence::new(Frequency::Hourly).is_defined());
        assert_eq!("weekly".parse(), Ok(Frequency::Weekly));
        assert_eq!(WeekDayNum::from(WeekDay::Friday).to_string(), "FR");
    }
}
