//! Slot mapping and session status for a weekly class schedule held in GMT+7.

pub use clock::{resolve_clock, Clock, ClockOverride, FixedClock, OffsetClock, SystemClock, JAKARTA_OFFSET};
pub use grid::{build_calendar_grid, build_day_grid, format_date_display, DayGrid, GridCell};
pub use schedule::{DaySchedule, Schedule, Session};
pub use slots::{slots_for, slots_for_weekday, TimeSlot};
pub use status::{session_status, Now, SessionStatus};
pub use ticker::{Ticker, TICK_PERIOD};
pub use tracker::CurrentSession;

pub mod clock;
pub mod grid;
pub mod mapper;
pub mod schedule;
pub mod slots;
pub mod status;
pub mod ticker;
pub mod time_math;
pub mod tracker;
