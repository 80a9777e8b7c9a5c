use std::sync::Arc;

use anyhow::anyhow;
use time::macros::offset;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use tracing::info;

use crate::schedule::parse_iso_date;
use crate::time_math::try_parse_time_to_minutes;

/// Asia/Jakarta, GMT+7 without daylight saving.
pub const JAKARTA_OFFSET: UtcOffset = offset!(+7);

/// Source of the current instant. All times are returned at [`JAKARTA_OFFSET`].
pub trait Clock: Send + Sync {
  fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(JAKARTA_OFFSET)
  }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
  fn now(&self) -> OffsetDateTime {
    self.0.to_offset(JAKARTA_OFFSET)
  }
}

/// Real time shifted by a constant amount.
#[derive(Clone, Copy, Debug)]
pub struct OffsetClock(pub Duration);

impl Clock for OffsetClock {
  fn now(&self) -> OffsetDateTime {
    (OffsetDateTime::now_utc() + self.0).to_offset(JAKARTA_OFFSET)
  }
}

/// A pinned date and time of day, as entered by a tester.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockOverride {
  pub date: Date,
  pub time: Time,
}

impl ClockOverride {
  /// `date` is `YYYY-MM-DD`, `time` is `HH:MM` and defaults to midnight.
  pub fn parse(date: &str, time: Option<&str>) -> anyhow::Result<Self> {
    let date = parse_iso_date(date)?;
    let time = match time.map(str::trim).filter(|time| !time.is_empty()) {
      None => Time::MIDNIGHT,
      Some(value) => {
        let minutes = try_parse_time_to_minutes(value)
          .ok_or_else(|| anyhow!("invalid mock time {:?}, expected HH:MM", value))?;
        Time::from_hms((minutes / 60) as u8, (minutes % 60) as u8, 0)?
      }
    };

    Ok(Self { date, time })
  }

  pub fn instant(&self) -> OffsetDateTime {
    PrimitiveDateTime::new(self.date, self.time).assume_offset(JAKARTA_OFFSET)
  }
}

/// Picks the clock: explicit override, then persisted override, then the system clock.
pub fn resolve_clock(
  explicit: Option<ClockOverride>,
  persisted: Option<ClockOverride>,
) -> Arc<dyn Clock> {
  match explicit.or(persisted) {
    Some(pinned) => {
      info!("Mock date enabled: {} {}", pinned.date, pinned.time);
      Arc::new(FixedClock(pinned.instant()))
    }
    None => Arc::new(SystemClock),
  }
}

#[cfg(test)]
mod tests {
  use time::macros::{date, datetime, time};

  use super::*;

  #[test]
  fn override_defaults_to_midnight() -> anyhow::Result<()> {
    let pinned = ClockOverride::parse("2026-01-30", None)?;
    assert_eq!(pinned.date, date!(2026-01-30));
    assert_eq!(pinned.time, Time::MIDNIGHT);

    let pinned = ClockOverride::parse("2026-01-30", Some("14.30"))?;
    assert_eq!(pinned.time, time!(14:30));
    assert_eq!(pinned.instant(), datetime!(2026-01-30 14:30 +7));
    Ok(())
  }

  #[test]
  fn rejects_bad_override() {
    assert!(ClockOverride::parse("30-01-2026", None).is_err());
    assert!(ClockOverride::parse("2026-01-30", Some("25:00")).is_err());
  }

  #[test]
  fn explicit_override_wins() -> anyhow::Result<()> {
    let explicit = ClockOverride::parse("2026-01-26", Some("08:00"))?;
    let persisted = ClockOverride::parse("2026-01-27", Some("09:00"))?;

    let clock = resolve_clock(Some(explicit), Some(persisted));
    assert_eq!(clock.now(), datetime!(2026-01-26 08:00 +7));

    let clock = resolve_clock(None, Some(persisted));
    assert_eq!(clock.now(), datetime!(2026-01-27 09:00 +7));
    Ok(())
  }

  #[test]
  fn system_clock_uses_jakarta_offset() {
    assert_eq!(SystemClock.now().offset(), JAKARTA_OFFSET);
    assert_eq!(resolve_clock(None, None).now().offset(), JAKARTA_OFFSET);
  }

  #[test]
  fn offset_clock_shifts_real_time() {
    let shifted = OffsetClock(Duration::days(1)).now();
    let real = SystemClock.now();
    assert!(shifted - real > Duration::hours(23));
  }
}
