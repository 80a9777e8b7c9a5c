use std::fmt::{Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Minutes since midnight, in `[0, 1440)`.
pub type Minutes = u16;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^(\\d{1,2})[:.](\\d{1,2})$").unwrap());
static RANGE_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new("^\\s*([^\\s-]+)\\s*-\\s*([^\\s-]+)\\s*$").unwrap());

/// Half-open interval `[start, end)` of a day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeRange {
  pub start: Minutes,
  pub end: Minutes,
}

impl TimeRange {
  pub const fn new(start: Minutes, end: Minutes) -> Self {
    Self { start, end }
  }

  /// A range is usable for placement and classification only if it is non-empty.
  pub fn is_valid(&self) -> bool {
    self.start < self.end
  }

  pub fn contains(&self, minute: Minutes) -> bool {
    self.start <= minute && minute < self.end
  }

  pub fn overlaps(&self, other: &TimeRange) -> bool {
    self.start < other.end && self.end > other.start
  }
}

impl Display for TimeRange {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} - {}",
      format_minutes_to_time(self.start),
      format_minutes_to_time(self.end)
    )
  }
}

/// Strict variant of [`parse_time_to_minutes`]: `None` for anything that is not
/// a valid `HH:MM` or `HH.MM` time of day.
pub fn try_parse_time_to_minutes(value: &str) -> Option<Minutes> {
  let captures = TIME_REGEX.captures(value.trim())?;
  let hours = Minutes::from_str(captures.get(1)?.as_str()).ok()?;
  let minutes = Minutes::from_str(captures.get(2)?.as_str()).ok()?;

  if hours >= 24 || minutes >= 60 {
    return None;
  }

  Some(hours * 60 + minutes)
}

/// Parses `HH:MM` or `HH.MM`. Empty or malformed input maps to `0`, the start of day.
pub fn parse_time_to_minutes(value: &str) -> Minutes {
  try_parse_time_to_minutes(value).unwrap_or(0)
}

/// Parses `"HH:MM - HH:MM"`. Input without a `-` separator yields `{ start: 0, end: 0 }`.
pub fn parse_time_range(value: &str) -> TimeRange {
  match RANGE_REGEX.captures(value) {
    Some(captures) => TimeRange {
      start: captures
        .get(1)
        .map_or(0, |start| parse_time_to_minutes(start.as_str())),
      end: captures
        .get(2)
        .map_or(0, |end| parse_time_to_minutes(end.as_str())),
    },
    None => TimeRange::default(),
  }
}

/// Formats minutes since midnight for display, e.g. `450` -> `"07.30"`.
pub fn format_minutes_to_time(minutes: Minutes) -> String {
  format!("{:0>2}.{:0>2}", minutes / 60, minutes % 60)
}
