use std::fmt::{Display, Formatter};

use time::{Date, OffsetDateTime};

use crate::clock::JAKARTA_OFFSET;
use crate::schedule::Session;
use crate::time_math::{format_minutes_to_time, Minutes};

/// Evaluation instant in the institution's timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Now {
  pub date: Date,
  pub minutes: Minutes,
}

impl Now {
  pub fn new(date: Date, minutes: Minutes) -> Self {
    Self { date, minutes }
  }

  pub fn from_datetime(datetime: OffsetDateTime) -> Self {
    let local = datetime.to_offset(JAKARTA_OFFSET);
    Self {
      date: local.date(),
      minutes: Minutes::from(local.hour()) * 60 + Minutes::from(local.minute()),
    }
  }

  /// `HH:MM`.
  pub fn time_string(&self) -> String {
    format_minutes_to_time(self.minutes).replace('.', ":")
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
  Active,
  Upcoming,
  Past,
}

impl Display for SessionStatus {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      SessionStatus::Active => "active",
      SessionStatus::Upcoming => "upcoming",
      SessionStatus::Past => "past",
    })
  }
}

/// Classifies a session held on `session_date`. `None` when its time range is unusable,
/// such a session is never active.
pub fn session_status(session: &Session, session_date: Date, now: Now) -> Option<SessionStatus> {
  let range = session.valid_range()?;

  let status = if session_date < now.date {
    SessionStatus::Past
  } else if session_date > now.date {
    SessionStatus::Upcoming
  } else if now.minutes >= range.end {
    SessionStatus::Past
  } else if now.minutes < range.start {
    SessionStatus::Upcoming
  } else {
    SessionStatus::Active
  };

  Some(status)
}

/// Time-of-day checks, assuming the session is held today.
pub fn is_session_active(session: &Session, minutes: Minutes) -> bool {
  session
    .valid_range()
    .is_some_and(|range| range.contains(minutes))
}

pub fn is_session_past(session: &Session, minutes: Minutes) -> bool {
  session
    .valid_range()
    .is_some_and(|range| minutes >= range.end)
}

pub fn is_session_upcoming(session: &Session, minutes: Minutes) -> bool {
  session
    .valid_range()
    .is_some_and(|range| minutes < range.start)
}

/// First session in list order that is running at `minutes`.
pub fn active_session(sessions: &[Session], minutes: Minutes) -> Option<&Session> {
  sessions
    .iter()
    .find(|session| is_session_active(session, minutes))
}

/// Upcoming session with the earliest start; ties go to the earlier list entry.
pub fn next_session(sessions: &[Session], minutes: Minutes) -> Option<&Session> {
  sessions
    .iter()
    .filter(|session| is_session_upcoming(session, minutes))
    .min_by_key(|session| session.range().start)
}

#[cfg(test)]
mod tests {
  use time::macros::{date, datetime};

  use super::*;

  const DAY: Date = date!(2026-01-26);

  #[test]
  fn classifies_same_day_sessions() {
    let now = Now::new(DAY, 8 * 60);
    let first = Session::new("Opening", "07:30 - 08:25");
    let second = Session::new("Keynote", "08:25-09:20");
    let earlier = Session::new("Breakfast", "07:00 - 07:30");

    assert_eq!(session_status(&first, DAY, now), Some(SessionStatus::Active));
    assert_eq!(session_status(&second, DAY, now), Some(SessionStatus::Upcoming));
    assert_eq!(session_status(&earlier, DAY, now), Some(SessionStatus::Past));
  }

  #[test]
  fn boundaries_are_half_open() {
    let session = Session::new("Opening", "07:30 - 08:25");
    assert_eq!(
      session_status(&session, DAY, Now::new(DAY, 450)),
      Some(SessionStatus::Active)
    );
    assert_eq!(
      session_status(&session, DAY, Now::new(DAY, 505)),
      Some(SessionStatus::Past)
    );
    assert_eq!(
      session_status(&session, DAY, Now::new(DAY, 449)),
      Some(SessionStatus::Upcoming)
    );
  }

  #[test]
  fn other_days_are_past_or_upcoming() {
    let session = Session::new("Opening", "07:30 - 08:25");
    let now = Now::new(DAY, 480);
    assert_eq!(
      session_status(&session, date!(2026-01-25), now),
      Some(SessionStatus::Past)
    );
    assert_eq!(
      session_status(&session, date!(2026-01-27), now),
      Some(SessionStatus::Upcoming)
    );
  }

  #[test]
  fn states_are_mutually_exclusive() {
    let session = Session::new("Lecture", "09:35 - 11:25");
    for minutes in (0..24 * 60).step_by(5) {
      let now = Now::new(DAY, minutes);
      let states = [
        is_session_active(&session, minutes),
        is_session_past(&session, minutes),
        is_session_upcoming(&session, minutes),
      ];
      assert_eq!(states.iter().filter(|state| **state).count(), 1);
      assert!(session_status(&session, DAY, now).is_some());
    }
  }

  #[test]
  fn malformed_range_is_never_active() {
    let session = Session::new("Mystery", "");
    for minutes in [0, 450, 1439] {
      assert_eq!(session_status(&session, DAY, Now::new(DAY, minutes)), None);
      assert!(!is_session_active(&session, minutes));
    }
  }

  #[test]
  fn next_session_prefers_earliest_then_list_order() {
    let sessions = [
      Session::new("Late", "13:30 - 14:25"),
      Session::new("Early A", "09:35 - 10:30"),
      Session::new("Early B", "09:35 - 11:25"),
      Session::new("Running", "07:30 - 10:00"),
      Session::new("Broken", "soon"),
    ];

    assert_eq!(next_session(&sessions, 480).map(|s| s.title.as_str()), Some("Early A"));
    assert_eq!(active_session(&sessions, 480).map(|s| s.title.as_str()), Some("Running"));
    assert_eq!(next_session(&sessions, 600).map(|s| s.title.as_str()), Some("Late"));
    assert_eq!(next_session(&sessions, 900), None);
  }

  #[test]
  fn converts_to_jakarta_time() {
    let now = Now::from_datetime(datetime!(2026-01-25 23:30 UTC));
    assert_eq!(now.date, DAY);
    assert_eq!(now.minutes, 6 * 60 + 30);
    assert_eq!(now.time_string(), "06:30");
  }
}
