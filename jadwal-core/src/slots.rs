use std::collections::HashMap;

use once_cell::sync::Lazy;
use time::Weekday;
use time::Weekday::{Friday, Monday, Saturday, Sunday, Thursday, Tuesday, Wednesday};

use crate::time_math::{Minutes, TimeRange};

/// One column of the daily bell schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSlot {
  pub id: u8,
  pub start: Minutes,
  pub end: Minutes,
  pub is_break: bool,
  pub label: Option<&'static str>,
}

impl TimeSlot {
  const fn session(id: u8, start: Minutes, end: Minutes, label: &'static str) -> Self {
    Self {
      id,
      start,
      end,
      is_break: false,
      label: Some(label),
    }
  }

  const fn pause(id: u8, start: Minutes, end: Minutes, label: &'static str) -> Self {
    Self {
      id,
      start,
      end,
      is_break: true,
      label: Some(label),
    }
  }

  pub fn range(&self) -> TimeRange {
    TimeRange::new(self.start, self.end)
  }
}

const fn hm(hours: Minutes, minutes: Minutes) -> Minutes {
  hours * 60 + minutes
}

pub const COFFEE_BREAK: &str = "Coffee break";
pub const RECESS: &str = "Istirahat";
pub const FRIDAY_PRAYER: &str = "Sholat Jum'at";

/// Index of the main recess, relabeled as the prayer break on Fridays.
pub const RECESS_INDEX: usize = 5;
/// Index of the teaching slot after the recess, which becomes the recess on Fridays.
pub const AFTER_RECESS_INDEX: usize = 6;

/// Monday to Thursday bell schedule (JADWAL PENDIDIKAN).
static REGULAR: [TimeSlot; 13] = [
  TimeSlot::session(1, hm(7, 30), hm(8, 25), "Sesi 1"),
  TimeSlot::session(2, hm(8, 25), hm(9, 20), "Sesi 2"),
  TimeSlot::pause(3, hm(9, 20), hm(9, 35), COFFEE_BREAK),
  TimeSlot::session(4, hm(9, 35), hm(10, 30), "Sesi 3"),
  TimeSlot::session(5, hm(10, 30), hm(11, 25), "Sesi 4"),
  TimeSlot::pause(6, hm(11, 25), hm(12, 35), RECESS),
  TimeSlot::session(7, hm(12, 35), hm(13, 30), "Sesi 5"),
  TimeSlot::session(8, hm(13, 30), hm(14, 25), "Sesi 6"),
  TimeSlot::session(9, hm(14, 25), hm(15, 20), "Sesi 7"),
  TimeSlot::pause(10, hm(15, 20), hm(15, 35), COFFEE_BREAK),
  TimeSlot::session(11, hm(15, 35), hm(16, 30), "Sesi 8"),
  TimeSlot::session(12, hm(16, 30), hm(17, 25), "Sesi 9"),
  TimeSlot::session(13, hm(17, 25), hm(18, 20), "Sesi 10"),
];

static CATALOG: Lazy<HashMap<Weekday, Vec<TimeSlot>>> = Lazy::new(|| {
  let mut friday = REGULAR.to_vec();
  friday[RECESS_INDEX].label = Some(FRIDAY_PRAYER);
  friday[AFTER_RECESS_INDEX] = TimeSlot::pause(
    friday[AFTER_RECESS_INDEX].id,
    friday[AFTER_RECESS_INDEX].start,
    friday[AFTER_RECESS_INDEX].end,
    RECESS,
  );

  HashMap::from([
    (Monday, REGULAR.to_vec()),
    (Tuesday, REGULAR.to_vec()),
    (Wednesday, REGULAR.to_vec()),
    (Thursday, REGULAR.to_vec()),
    (Friday, friday),
    (Saturday, REGULAR.to_vec()),
    (Sunday, REGULAR.to_vec()),
  ])
});

/// Slots of the given weekday, ordered by start time and contiguous.
pub fn slots_for_weekday(weekday: Weekday) -> &'static [TimeSlot] {
  CATALOG.get(&weekday).map_or(&REGULAR[..], Vec::as_slice)
}

/// Slots for a day name as found in schedule data. Unknown names get the regular catalog.
pub fn slots_for(day_name: &str) -> &'static [TimeSlot] {
  match parse_weekday(day_name) {
    Some(weekday) => slots_for_weekday(weekday),
    None => &REGULAR,
  }
}

/// Accepts English and Indonesian day names, case-insensitive.
pub fn parse_weekday(day_name: &str) -> Option<Weekday> {
  let weekday = match day_name.trim().to_lowercase().as_str() {
    "monday" | "senin" => Monday,
    "tuesday" | "selasa" => Tuesday,
    "wednesday" | "rabu" => Wednesday,
    "thursday" | "kamis" => Thursday,
    "friday" | "jumat" | "jum'at" => Friday,
    "saturday" | "sabtu" => Saturday,
    "sunday" | "minggu" => Sunday,
    _ => return None,
  };

  Some(weekday)
}

pub fn indonesian_day_name(weekday: Weekday) -> &'static str {
  match weekday {
    Monday => "Senin",
    Tuesday => "Selasa",
    Wednesday => "Rabu",
    Thursday => "Kamis",
    Friday => "Jumat",
    Saturday => "Sabtu",
    Sunday => "Minggu",
  }
}

pub fn session_slots(catalog: &[TimeSlot]) -> impl Iterator<Item = &TimeSlot> {
  catalog.iter().filter(|slot| !slot.is_break)
}

pub fn break_slots(catalog: &[TimeSlot]) -> impl Iterator<Item = &TimeSlot> {
  catalog.iter().filter(|slot| slot.is_break)
}
