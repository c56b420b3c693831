// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for property values.

use ical_emit::Valuer;
use ical_emit::parameter::{FreeBusyType, Parameters, common_name, language, tz_id};
use ical_emit::value::{
    Binary, DateTime, Frequency, Integer, Recurrence, Text, WeekDay, WeekDayNum,
};
use jiff::Timestamp;
use jiff::civil::date;
use jiff::tz::{TimeZone, offset};

use WeekDay::{Friday, Monday, Saturday, Sunday, Thursday, Tuesday, Wednesday};

fn render(value: &dyn Valuer) -> String {
    let mut out = Vec::new();
    value.write_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn utc(y: i16, m: i8, d: i8, h: i8) -> Timestamp {
    date(y, m, d).at(h, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap().timestamp()
}

fn rule(freq: Frequency, f: impl FnOnce(&mut Recurrence)) -> String {
    let mut rule = Recurrence::new(freq);
    f(&mut rule);
    let out = render(&rule);
    out.strip_prefix(";VALUE=RECUR:").unwrap().to_owned()
}

fn days(days: &[WeekDay]) -> Vec<WeekDayNum> {
    days.iter().copied().map(WeekDayNum::from).collect()
}

#[test]
fn test_recurrence_rfc_daily() {
    let dec24 = utc(1997, 12, 24, 0);
    assert_eq!(rule(Frequency::Daily, |r| r.count = 10), "FREQ=DAILY;COUNT=10");
    assert_eq!(
        rule(Frequency::Daily, |r| r.until = Some(dec24)),
        "FREQ=DAILY;UNTIL=19971224T000000Z"
    );
    assert_eq!(rule(Frequency::Daily, |r| r.interval = 2), "FREQ=DAILY;INTERVAL=2");
    assert_eq!(
        rule(Frequency::Daily, |r| {
            r.interval = 10;
            r.count = 5;
        }),
        "FREQ=DAILY;INTERVAL=10;COUNT=5"
    );
}

#[test]
fn test_recurrence_rfc_every_day_in_january() {
    let jan31 = utc(2000, 1, 31, 14);
    assert_eq!(
        rule(Frequency::Yearly, |r| {
            r.until = Some(jan31);
            r.by_month = vec![1];
            r.by_day = days(&[Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday]);
        }),
        "FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA"
    );
}

#[test]
fn test_recurrence_rfc_weekly() {
    let dec24 = utc(1997, 12, 24, 0);
    assert_eq!(
        rule(Frequency::Weekly, |r| {
            r.interval = 2;
            r.wkst = Some(Sunday);
        }),
        "FREQ=WEEKLY;INTERVAL=2;WKST=SU"
    );
    assert_eq!(
        rule(Frequency::Weekly, |r| {
            r.interval = 2;
            r.until = Some(dec24);
            r.by_day = days(&[Monday, Wednesday, Friday]);
            r.wkst = Some(Sunday);
        }),
        "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;BYDAY=MO,WE,FR;WKST=SU"
    );
    assert_eq!(
        rule(Frequency::Weekly, |r| {
            r.interval = 2;
            r.count = 4;
            r.by_day = days(&[Tuesday, Sunday]);
            r.wkst = Some(Monday);
        }),
        "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO"
    );
}

#[test]
fn test_recurrence_rfc_monthly_and_yearly() {
    assert_eq!(
        rule(Frequency::Monthly, |r| {
            r.count = 10;
            r.by_day = vec![WeekDayNum::new(1, Friday)];
        }),
        "FREQ=MONTHLY;COUNT=10;BYDAY=1FR"
    );
    assert_eq!(
        rule(Frequency::Monthly, |r| {
            r.interval = 2;
            r.count = 10;
            r.by_day = vec![WeekDayNum::new(1, Sunday), WeekDayNum::new(-1, Sunday)];
        }),
        "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU"
    );
    assert_eq!(
        rule(Frequency::Monthly, |r| r.by_month_day = vec![-3]),
        "FREQ=MONTHLY;BYMONTHDAY=-3"
    );
    assert_eq!(
        rule(Frequency::Yearly, |r| r.by_day = vec![WeekDayNum::new(20, Monday)]),
        "FREQ=YEARLY;BYDAY=20MO"
    );
    assert_eq!(
        rule(Frequency::Yearly, |r| {
            r.by_week_no = vec![20];
            r.by_day = days(&[Monday]);
        }),
        "FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO"
    );
    assert_eq!(
        rule(Frequency::Monthly, |r| {
            r.by_day = days(&[Monday, Tuesday, Wednesday, Thursday, Friday]);
            r.by_set_pos = vec![-2];
        }),
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2"
    );
}

#[test]
fn test_recurrence_rfc_sub_daily() {
    assert_eq!(
        rule(Frequency::Minutely, |r| {
            r.interval = 20;
            r.by_hour = (9..=16).collect();
        }),
        "FREQ=MINUTELY;INTERVAL=20;BYHOUR=9,10,11,12,13,14,15,16"
    );
    assert_eq!(
        rule(Frequency::Hourly, |r| {
            r.interval = 3;
            r.until = Some(utc(1997, 9, 2, 17));
        }),
        "FREQ=HOURLY;INTERVAL=3;UNTIL=19970902T170000Z"
    );
}

#[test]
fn test_recurrence_validation_message() {
    let mut rule = Recurrence::new(Frequency::Yearly);
    rule.by_month = vec![0, 13];
    let err = rule.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "ByMonth value is out of the range 1 to 12 [0,13]"
    );
    assert_eq!(render(&Recurrence::default()), ":");
}

#[test]
fn test_binary_is_base64() {
    assert_eq!(render(&Binary::new(*b"ABC")), ";VALUE=BINARY;ENCODING=BASE64:QUJD");
}

#[test]
fn test_text_escaping() {
    assert_eq!(render(&Text::new("a;b,c\\d\ne")), ":a\\;b\\,c\\\\d\\ne");
    assert_eq!(
        render(&Text::new("fr").with(language("fr-CA"))),
        ";LANGUAGE=fr-CA:fr"
    );
    assert_eq!(render(&Text::list(["a,b", "c"])), ":a\\,b,c");
}

#[test]
fn test_date_time_utc_normalization() {
    let paris = date(2014, 1, 1)
        .at(9, 0, 0, 0)
        .to_zoned(TimeZone::fixed(offset(1)))
        .unwrap();
    let local = DateTime::new(paris.clone()).with(tz_id("Europe/Paris"));
    assert_eq!(
        render(&local),
        ";VALUE=DATE-TIME;TZID=Europe/Paris:20140101T090000"
    );
    assert_eq!(
        render(&DateTime::new(paris).utc()),
        ";VALUE=DATE-TIME:20140101T080000Z"
    );

    let utc = date(2014, 1, 1).at(8, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
    assert_eq!(
        render(&DateTime::new(utc).with(tz_id("Europe/London"))),
        ";VALUE=DATE-TIME:20140101T080000Z"
    );
}

#[test]
fn test_zero_values_are_undefined() {
    assert!(!Text::default().is_defined());
    assert!(!DateTime::default().is_defined());
    assert!(!Binary::default().is_defined());
    assert!(!Integer::default().is_defined());
    assert!(Integer::new(0).is_defined());
    assert!(Binary::new(vec![0]).is_defined());
}

#[test]
fn test_parameter_keys_are_unique() {
    let mut params = Parameters::new();
    params.append(common_name("first"));
    params.append(FreeBusyType::Busy.into());
    params.append(common_name("second"));
    params.prepend(FreeBusyType::Free.into());
    assert_eq!(params.len(), 2);

    let mut out = Vec::new();
    params.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), ";FBTYPE=FREE;CN=second");
}
