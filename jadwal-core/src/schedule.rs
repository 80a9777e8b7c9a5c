use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;
use tracing::{info, warn};

use crate::slots::{parse_weekday, slots_for, TimeSlot};
use crate::time_math::{parse_time_range, TimeRange};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub title: String,
  /// `"HH:MM - HH:MM"`; may be absent or malformed, in which case the session is never placed.
  #[serde(default)]
  pub time_range: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub material: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub speaker: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_json::Value>,
}

impl Session {
  pub fn new(title: impl Into<String>, time_range: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      time_range: time_range.into(),
      material: None,
      speaker: None,
      location: None,
      extra: BTreeMap::new(),
    }
  }

  pub fn range(&self) -> TimeRange {
    parse_time_range(&self.time_range)
  }

  /// `Some` only for a well-formed, non-empty range.
  pub fn valid_range(&self) -> Option<TimeRange> {
    Some(self.range()).filter(TimeRange::is_valid)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DaySchedule {
  pub date: Date,
  pub day: String,
  pub sessions: Vec<Session>,
}

impl DaySchedule {
  pub fn slots(&self) -> &'static [TimeSlot] {
    slots_for(&self.day)
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
  pub days: Vec<DaySchedule>,
}

#[derive(Deserialize)]
struct RawDay {
  date: String,
  day: String,
  #[serde(default)]
  sessions: Vec<Session>,
}

impl Schedule {
  pub fn new(days: Vec<DaySchedule>) -> Self {
    Self { days }
  }

  /// Decodes and validates a schedule document, either `{"schedule": [...]}` or a bare array.
  pub fn from_json(json: &str) -> anyhow::Result<Self> {
    let raw = match serde_json::from_str::<serde_json::Value>(json)
      .context("invalid schedule document")?
    {
      serde_json::Value::Object(mut document) => match document.remove("schedule") {
        Some(serde_json::Value::Array(days)) => days,
        Some(_) => return Err(anyhow!("\"schedule\" must be an array of days")),
        None => return Err(anyhow!("missing \"schedule\" key")),
      },
      serde_json::Value::Array(days) => days,
      _ => return Err(anyhow!("schedule document must be an object or an array")),
    };

    let mut days = Vec::with_capacity(raw.len());
    for (index, day) in raw.into_iter().enumerate() {
      let day = serde_json::from_value::<RawDay>(day).with_context(|| format!("day #{index}"))?;
      days.push(validate_day(index, day)?);
    }

    info!(
      "Loaded schedule with {} days and {} sessions",
      days.len(),
      days.iter().map(|day| day.sessions.len()).sum::<usize>()
    );

    Ok(Self { days })
  }

  pub fn day(&self, date: Date) -> Option<&DaySchedule> {
    self.days.iter().find(|day| day.date == date)
  }
}

fn validate_day(index: usize, raw: RawDay) -> anyhow::Result<DaySchedule> {
  let date = parse_iso_date(&raw.date).with_context(|| format!("day #{index}"))?;

  match parse_weekday(&raw.day) {
    Some(weekday) if weekday != date.weekday() => warn!(
      "Day #{} is named {} but {} is a {}",
      index,
      raw.day,
      raw.date,
      date.weekday()
    ),
    None => warn!("Day #{} has unknown day name {:?}", index, raw.day),
    _ => {}
  }

  for session in &raw.sessions {
    if session.valid_range().is_none() {
      warn!(
        "Session {:?} on {} has unusable time range {:?}, it will not be placed",
        session.title, raw.date, session.time_range
      );
    }
  }

  Ok(DaySchedule {
    date,
    day: raw.day,
    sessions: raw.sessions,
  })
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> anyhow::Result<Date> {
  Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
    .map_err(|err| anyhow!("invalid date {:?}: {}", value, err))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
  date
    .format(format_description!("[year]-[month]-[day]"))
    .unwrap_or_else(|_| date.to_string())
}
