// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::timestamp::Clock;
use crate::types::{Activity, Track};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Parses an IANA timezone name such as `Europe/Lisbon`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// What a calendar entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEntryKind {
    Activity,
    Track,
}

/// An activity or track placed on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub kind: CalendarEntryKind,
    pub id: String,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    /// Wall-clock start in the calendar's timezone, as `HH:MM`.
    pub local_time: String,
}

/// One local date and everything starting on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: Vec<CalendarEntry>,
}

/// A month of calendar days in one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub timezone: String,
    pub days: Vec<CalendarDay>,
}

/// Buckets activities and tracks into the days of one month.
///
/// Dates are local to `tz`. Activities are placed by their scheduled
/// instant; tracks without a start time are left out. Entries within a day
/// are ordered by start instant, then by name.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if `year`/`month` is not a real month.
pub fn build_month_calendar(
    activities: &[Activity],
    tracks: &[Track],
    tz: Tz,
    year: i32,
    month: u32,
    clock: &dyn Clock,
) -> Result<MonthCalendar, DomainError> {
    let first: NaiveDate =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(DomainError::InvalidMonth { year, month })?;

    let mut days: Vec<CalendarDay> = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| CalendarDay {
            date,
            entries: Vec::new(),
        })
        .collect();

    let activity_entries = activities.iter().map(|activity| {
        (
            CalendarEntryKind::Activity,
            &activity.id,
            &activity.name,
            activity.scheduled_at(clock),
        )
    });
    let track_entries = tracks.iter().filter_map(|track| {
        track
            .start_time
            .map(|start| (CalendarEntryKind::Track, &track.id, &track.name, start))
    });

    for (kind, id, name, starts_at) in activity_entries.chain(track_entries) {
        let local = starts_at.with_timezone(&tz);
        if local.year() != year || local.month() != month {
            continue;
        }
        let Some(day) = usize::try_from(local.day0())
            .ok()
            .and_then(|index| days.get_mut(index))
        else {
            continue;
        };
        day.entries.push(CalendarEntry {
            kind,
            id: id.clone(),
            name: name.clone(),
            starts_at,
            local_time: local.format("%H:%M").to_string(),
        });
    }

    for day in &mut days {
        day.entries
            .sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.name.cmp(&b.name)));
    }

    Ok(MonthCalendar {
        year,
        month,
        timezone: tz.name().to_string(),
        days,
    })
}
