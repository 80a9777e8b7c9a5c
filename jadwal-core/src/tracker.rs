use std::sync::Arc;

use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::schedule::{format_iso_date, DaySchedule, Schedule, Session};
use crate::status::{active_session, is_session_active, next_session, Now};

/// Today's view of a schedule, re-evaluated whenever [`CurrentSession::refresh`] runs.
pub struct CurrentSession {
  schedule: Arc<Schedule>,
  clock: Arc<dyn Clock>,
  current_time: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Observed {
  today: Date,
  active: Option<usize>,
  next: Option<usize>,
}

impl CurrentSession {
  pub fn new(schedule: Arc<Schedule>, clock: Arc<dyn Clock>) -> Self {
    let current_time = clock.now();
    Self {
      schedule,
      clock,
      current_time,
    }
  }

  pub fn schedule(&self) -> &Schedule {
    &self.schedule
  }

  pub fn current_time(&self) -> OffsetDateTime {
    self.current_time
  }

  pub fn now(&self) -> Now {
    Now::from_datetime(self.current_time)
  }

  pub fn today_date(&self) -> Date {
    self.now().date
  }

  /// `YYYY-MM-DD`.
  pub fn today_date_string(&self) -> String {
    format_iso_date(self.today_date())
  }

  /// `HH:MM`.
  pub fn current_time_string(&self) -> String {
    self.now().time_string()
  }

  pub fn today_schedule(&self) -> Option<&DaySchedule> {
    self.schedule.day(self.today_date())
  }

  pub fn active_session(&self) -> Option<&Session> {
    let today = self.today_schedule()?;
    active_session(&today.sessions, self.now().minutes)
  }

  pub fn next_session(&self) -> Option<&Session> {
    let today = self.today_schedule()?;
    next_session(&today.sessions, self.now().minutes)
  }

  /// Whether `session`, held on `date`, is running right now.
  pub fn is_active(&self, session: &Session, date: Date) -> bool {
    date == self.today_date() && is_session_active(session, self.now().minutes)
  }

  /// Re-reads the clock. Returns `true` if today, the active or the next session changed.
  pub fn refresh(&mut self) -> bool {
    let before = self.observe();
    self.current_time = self.clock.now();
    let after = self.observe();

    debug!("Refreshed current time to {}", self.current_time);

    if before == after {
      return false;
    }

    info!(
      "Now {} {}: active {:?}, next {:?}",
      self.today_date_string(),
      self.current_time_string(),
      self.active_session().map(|session| &session.title),
      self.next_session().map(|session| &session.title),
    );

    true
  }

  fn observe(&self) -> Observed {
    let position = |found: Option<&Session>| {
      let today = self.today_schedule()?;
      let found = found?;
      today
        .sessions
        .iter()
        .position(|session| std::ptr::eq(session, found))
    };

    Observed {
      today: self.today_date(),
      active: position(self.active_session()),
      next: position(self.next_session()),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use time::macros::{date, datetime};
  use time::Duration;

  use crate::clock::FixedClock;

  use super::*;

  struct SteppingClock(Mutex<OffsetDateTime>);

  impl SteppingClock {
    fn advance(&self, by: Duration) {
      let mut now = self.0.lock().unwrap();
      *now += by;
    }
  }

  impl Clock for SteppingClock {
    fn now(&self) -> OffsetDateTime {
      *self.0.lock().unwrap()
    }
  }

  fn schedule() -> Arc<Schedule> {
    Arc::new(Schedule::new(vec![DaySchedule {
      date: date!(2026-01-26),
      day: "Monday".to_string(),
      sessions: vec![
        Session::new("Opening", "07:30 - 08:25"),
        Session::new("Keynote", "08:25 - 09:20"),
        Session::new("Panel", "09:35 - 11:25"),
      ],
    }]))
  }

  #[test]
  fn exposes_today() {
    let clock = Arc::new(FixedClock(datetime!(2026-01-26 08:00 +7)));
    let current = CurrentSession::new(schedule(), clock);

    assert_eq!(current.today_date_string(), "2026-01-26");
    assert_eq!(current.current_time_string(), "08:00");
    assert_eq!(current.active_session().map(|s| s.title.as_str()), Some("Opening"));
    assert_eq!(current.next_session().map(|s| s.title.as_str()), Some("Keynote"));

    let opening = &current.schedule().days[0].sessions[0];
    assert!(current.is_active(opening, date!(2026-01-26)));
    assert!(!current.is_active(opening, date!(2026-01-27)));
  }

  #[test]
  fn missing_day_has_no_sessions() {
    let clock = Arc::new(FixedClock(datetime!(2026-01-27 08:00 +7)));
    let current = CurrentSession::new(schedule(), clock);

    assert!(current.today_schedule().is_none());
    assert!(current.active_session().is_none());
    assert!(current.next_session().is_none());
  }

  #[test]
  fn refresh_reports_changes() {
    let clock = Arc::new(SteppingClock(Mutex::new(datetime!(2026-01-26 08:00 +7))));
    let mut current = CurrentSession::new(schedule(), clock.clone());

    assert!(!current.refresh());

    clock.advance(Duration::minutes(10));
    assert!(!current.refresh());

    clock.advance(Duration::minutes(20));
    assert!(current.refresh());
    assert_eq!(current.active_session().map(|s| s.title.as_str()), Some("Keynote"));
    assert_eq!(current.next_session().map(|s| s.title.as_str()), Some("Panel"));
  }
}
