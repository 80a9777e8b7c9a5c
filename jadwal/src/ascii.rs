use std::fmt::Write;

use jadwal_core::{DayGrid, Session};

const HEADER: [&str; 3] = ["Time", "Slot", "Session"];

/// Renders a day grid as a fixed-width table. Active sessions are marked with `*`.
pub fn table(grid: &DayGrid<'_>, is_active: impl Fn(&Session) -> bool) -> String {
  let rows = grid
    .cells
    .iter()
    .map(|cell| {
      let slot = match (cell.span, cell.slot.label) {
        (1, Some(label)) => label.to_string(),
        (1, None) => format!("#{}", cell.slot.id),
        (span, _) => format!("{} slots", span),
      };

      let content = match cell.session {
        Some(session) if is_active(session) => format!("* {}", session.title),
        Some(session) => session.title.clone(),
        None if cell.is_break => "-".to_string(),
        None => String::new(),
      };

      [grid.cell_range(cell).to_string(), slot, content]
    })
    .collect::<Vec<[String; 3]>>();

  let mut widths = HEADER.map(str::len);
  for row in &rows {
    for (width, column) in widths.iter_mut().zip(row) {
      *width = (*width).max(column.chars().count());
    }
  }

  let mut buf = String::new();
  write_row(&mut buf, &widths, &HEADER);
  write_separator(&mut buf, &widths);
  for row in &rows {
    write_row(&mut buf, &widths, row);
  }

  buf
}

fn write_row<S: AsRef<str>>(buf: &mut String, widths: &[usize; 3], columns: &[S; 3]) {
  for (width, column) in widths.iter().zip(columns) {
    write!(buf, "| {:<width$} ", column.as_ref(), width = *width).unwrap();
  }
  buf.push_str("|\n");
}

fn write_separator(buf: &mut String, widths: &[usize; 3]) {
  for width in widths {
    buf.push('|');
    buf.push_str(&"-".repeat(width + 2));
  }
  buf.push_str("|\n");
}

#[cfg(test)]
mod test {
  use jadwal_core::{build_day_grid, DaySchedule, Session};
  use time::macros::date;

  use crate::ascii::table;

  #[test]
  fn renders_spanning_session_once() {
    let day = DaySchedule {
      date: date!(2026-01-26),
      day: "Monday".to_string(),
      sessions: vec![Session::new("Opening", "07:30 - 09:20")],
    };
    let grid = build_day_grid(&day);

    let rendered = table(&grid, |session| session.title == "Opening");
    let lines = rendered.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2 + grid.cells.len());
    assert!(lines[0].starts_with("| Time"));
    assert!(lines[2].contains("07.30 - 09.20"));
    assert!(lines[2].contains("2 slots"));
    assert!(lines[2].contains("* Opening"));
    assert!(lines[3].contains("Coffee break"));
    assert_eq!(rendered.matches("Opening").count(), 1);
  }
}
