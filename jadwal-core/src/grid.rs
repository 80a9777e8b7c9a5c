use time::Date;

use crate::mapper::{calculate_session_span, session_overlaps_slot, session_starts_in_slot};
use crate::schedule::{DaySchedule, Session};
use crate::slots::{indonesian_day_name, parse_weekday, TimeSlot};
use crate::time_math::TimeRange;

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell<'a> {
  pub slot_index: usize,
  pub slot: &'a TimeSlot,
  pub session: Option<&'a Session>,
  pub span: usize,
  pub is_empty: bool,
  pub is_break: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DayGrid<'a> {
  pub date: Date,
  pub day: &'a str,
  pub display_date: String,
  pub slots: &'static [TimeSlot],
  pub cells: Vec<GridCell<'a>>,
}

impl DayGrid<'_> {
  /// Time covered by a cell, from its first slot's start to its last spanned slot's end.
  pub fn cell_range(&self, cell: &GridCell<'_>) -> TimeRange {
    let last = (cell.slot_index + cell.span - 1).min(self.slots.len() - 1);
    TimeRange::new(cell.slot.start, self.slots[last].end.max(cell.slot.end))
  }
}

pub fn build_calendar_grid(days: &[DaySchedule]) -> Vec<DayGrid<'_>> {
  days.iter().map(build_day_grid).collect()
}

/// Lays one day's sessions over its slot catalog. A spanning session yields a single cell
/// and the slots it covers are left out.
pub fn build_day_grid(day: &DaySchedule) -> DayGrid<'_> {
  let slots = day.slots();
  let mut cells = Vec::with_capacity(slots.len());
  let mut skip_until = 0;

  for (slot_index, slot) in slots.iter().enumerate() {
    if slot_index < skip_until {
      continue;
    }

    match day
      .sessions
      .iter()
      .find(|session| session_starts_in_slot(session, slot))
    {
      Some(session) => {
        let span = calculate_session_span(session, slot_index, slots);
        cells.push(GridCell {
          slot_index,
          slot,
          session: Some(session),
          span,
          is_empty: false,
          is_break: slot.is_break,
        });
        skip_until = slot_index + span;
      }
      None => {
        let ongoing = day.sessions.iter().any(|session| {
          session_overlaps_slot(session, slot) && !session_starts_in_slot(session, slot)
        });

        if !ongoing {
          cells.push(GridCell {
            slot_index,
            slot,
            session: None,
            span: 1,
            is_empty: true,
            is_break: slot.is_break,
          });
        }
      }
    }
  }

  DayGrid {
    date: day.date,
    day: &day.day,
    display_date: format_date_display(day.date, &day.day),
    slots,
    cells,
  }
}

/// `"Senin, 26/01/26"`. Names that are not weekdays are kept as given.
pub fn format_date_display(date: Date, day_name: &str) -> String {
  let day_name = match parse_weekday(day_name) {
    Some(weekday) => indonesian_day_name(weekday).to_string(),
    None => day_name.to_string(),
  };

  format!(
    "{}, {:0>2}/{:0>2}/{:0>2}",
    day_name,
    date.day(),
    u8::from(date.month()),
    date.year().rem_euclid(100)
  )
}
