//! Calendar window calculations.
//!
//! Window boundaries are computed on local civil dates in the requested time
//! zone and each boundary is converted back to an instant on its own, so a
//! Daylight-Saving change inside a window never moves the clock time of its
//! edges. Nothing here adds fixed durations to instants.

use crate::error::{Error, Result};
use crate::types::{Direction, PresentationStyle, TimeWindow};
use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;

/// Amount a single navigation step moves the point of reference
#[derive(Debug, Clone, Copy)]
enum Step {
    Days(u64),
    Months(u32),
}

fn step_of(style: PresentationStyle) -> Step {
    match style {
        PresentationStyle::HalfHourlyDay => Step::Days(1),
        PresentationStyle::SevenDayWeek => Step::Days(7),
        PresentationStyle::WeeksInMonth => Step::Months(1),
        PresentationStyle::ThirtyDayMonth => Step::Months(1),
        PresentationStyle::TwelveMonthYear => Step::Months(12),
    }
}

/// Compute the inclusive display window that `reference` falls in for the
/// given presentation style.
///
/// Weeks run Sunday to Saturday. Every window starts at local midnight of its
/// first day and ends one nanosecond before local midnight following its last
/// day, which reads as 23:59:59.999999999 on ordinary days.
pub fn compute_window<Z: TimeZone>(
    reference: DateTime<Utc>,
    style: PresentationStyle,
    zone: &Z,
) -> Result<TimeWindow> {
    let date = reference.with_timezone(zone).date_naive();

    let (first_day, last_day) = match style {
        PresentationStyle::HalfHourlyDay => (date, date),
        PresentationStyle::SevenDayWeek => {
            let sunday = week_start(date)?;
            (sunday, week_end(sunday)?)
        }
        PresentationStyle::WeeksInMonth => {
            let first = first_of_month(date);
            let last = last_of_month(date)?;
            (week_start(first)?, week_end(last)?)
        }
        PresentationStyle::ThirtyDayMonth => (first_of_month(date), last_of_month(date)?),
        PresentationStyle::TwelveMonthYear => (
            NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or(Error::OutOfRange)?,
            NaiveDate::from_ymd_opt(date.year(), 12, 31).ok_or(Error::OutOfRange)?,
        ),
    };

    let window = TimeWindow {
        start: start_of_day(first_day, zone)?,
        end: end_of_day(last_day, zone)?,
    };

    tracing::trace!(
        %reference,
        %style,
        start = %window.start,
        end = %window.end,
        "computed display window"
    );

    Ok(window)
}

/// Move `reference` one calendar unit of the style's granularity forwards or
/// backwards: a day, a week, a month or a year.
///
/// The step is applied to the local date and clock time, so "one month back"
/// from March 31 lands on the last day of February and a day step across a
/// Daylight-Saving change keeps the wall-clock time. Returns `None` when the
/// result falls outside the supported calendar.
pub fn shift_reference<Z: TimeZone>(
    reference: DateTime<Utc>,
    style: PresentationStyle,
    direction: Direction,
    zone: &Z,
) -> Option<DateTime<Utc>> {
    let local = reference.with_timezone(zone).naive_local();

    let shifted = match (step_of(style), direction) {
        (Step::Days(n), Direction::Forward) => local.checked_add_days(Days::new(n)),
        (Step::Days(n), Direction::Backward) => local.checked_sub_days(Days::new(n)),
        (Step::Months(n), Direction::Forward) => local.checked_add_months(Months::new(n)),
        (Step::Months(n), Direction::Backward) => local.checked_sub_months(Months::new(n)),
    }?;

    resolve_local(zone, shifted).ok()
}

/// Convert a local date and time to an instant.
///
/// A time repeated by a fall-back transition resolves to its first
/// occurrence. A time skipped by a spring-forward transition is read with the
/// offset in force before the gap, which moves it forward by the gap length.
pub fn resolve_local<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    if let Some(resolved) = zone.from_local_datetime(&local).earliest() {
        return Ok(resolved.with_timezone(&Utc));
    }

    // Skipped local time: use the offset from a day earlier
    let before = local
        .checked_sub_signed(TimeDelta::days(1))
        .ok_or(Error::OutOfRange)?;
    let offset = zone
        .offset_from_local_datetime(&before)
        .earliest()
        .ok_or(Error::UnresolvableLocalTime(local))?
        .fix();
    let utc = local
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .ok_or(Error::OutOfRange)?;

    tracing::debug!(%local, %offset, "local time falls in a gap, shifted past it");

    Ok(utc.and_utc())
}

/// Parse an IANA time zone name such as `Europe/London`.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::UnknownTimeZone(name.to_string()))
}

fn start_of_day<Z: TimeZone>(date: NaiveDate, zone: &Z) -> Result<DateTime<Utc>> {
    resolve_local(zone, date.and_time(NaiveTime::MIN))
}

/// Last nanosecond before the following day starts. When midnight repeats,
/// the day ends before its first occurrence so it never reaches into the
/// next date.
fn end_of_day<Z: TimeZone>(date: NaiveDate, zone: &Z) -> Result<DateTime<Utc>> {
    let next_day = date.succ_opt().ok_or(Error::OutOfRange)?;
    let next_midnight = start_of_day(next_day, zone)?;
    Ok(next_midnight - TimeDelta::nanoseconds(1))
}

/// The Sunday on or before `date`
fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    // ISO numbering, Monday = 1 .. Sunday = 7
    let days_since_sunday = u64::from(date.weekday().number_from_monday() % 7);
    date.checked_sub_days(Days::new(days_since_sunday))
        .ok_or(Error::OutOfRange)
}

/// The Saturday on or after `date`
fn week_end(date: NaiveDate) -> Result<NaiveDate> {
    let days_since_sunday = u64::from(date.weekday().number_from_monday() % 7);
    date.checked_add_days(Days::new(6 - days_since_sunday))
        .ok_or(Error::OutOfRange)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(date: NaiveDate) -> Result<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(Error::OutOfRange)
}
