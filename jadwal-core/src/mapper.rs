//! Placement of sessions onto the slot catalog.

use crate::schedule::Session;
use crate::slots::TimeSlot;

/// Half-open overlap between the session and the slot. Unusable ranges overlap nothing.
pub fn session_overlaps_slot(session: &Session, slot: &TimeSlot) -> bool {
  session
    .valid_range()
    .is_some_and(|range| range.overlaps(&slot.range()))
}

/// Whether the session begins inside `slot`; this is the slot its title is rendered in.
pub fn session_starts_in_slot(session: &Session, slot: &TimeSlot) -> bool {
  session
    .valid_range()
    .is_some_and(|range| slot.range().contains(range.start))
}

/// Number of consecutive slots from `start_slot_index` that begin before the session ends.
/// Never less than one.
pub fn calculate_session_span(
  session: &Session,
  start_slot_index: usize,
  catalog: &[TimeSlot],
) -> usize {
  let end = session.range().end;

  catalog
    .iter()
    .skip(start_slot_index)
    .take_while(|slot| slot.start < end)
    .count()
    .max(1)
}

/// Index of the first teaching slot containing the session start.
pub fn session_start_slot_index(session: &Session, catalog: &[TimeSlot]) -> Option<usize> {
  catalog
    .iter()
    .position(|slot| !slot.is_break && session_starts_in_slot(session, slot))
}
