use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use jadwal_core::schedule::format_iso_date;
use jadwal_core::time_math::format_minutes_to_time;
use jadwal_core::ClockOverride;
use serde::{Deserialize, Serialize};

/// Mock date kept between runs, the counterpart of a `--mock-date` flag.
pub struct MockFile {
  path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stored {
  mock_date: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  mock_time: Option<String>,
}

impl MockFile {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }

  pub fn load(&self) -> anyhow::Result<Option<ClockOverride>> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
      Err(err) => return Err(err).with_context(|| format!("reading {}", self.path.display())),
    };

    let stored: Stored = serde_json::from_str(&content)
      .with_context(|| format!("parsing {}", self.path.display()))?;

    Ok(Some(ClockOverride::parse(
      &stored.mock_date,
      stored.mock_time.as_deref(),
    )?))
  }

  pub fn save(&self, pinned: &ClockOverride) -> anyhow::Result<()> {
    let minutes = u16::from(pinned.time.hour()) * 60 + u16::from(pinned.time.minute());
    let stored = Stored {
      mock_date: format_iso_date(pinned.date),
      mock_time: Some(format_minutes_to_time(minutes).replace('.', ":")),
    };

    std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)
      .with_context(|| format!("writing {}", self.path.display()))
  }

  /// Persists an explicit override so later runs without flags keep it, like `mock set`.
  pub fn remember(&self, explicit: Option<ClockOverride>) -> anyhow::Result<Option<ClockOverride>> {
    if let Some(pinned) = &explicit {
      self.save(pinned)?;
    }
    Ok(explicit)
  }

  pub fn clear(&self) -> anyhow::Result<()> {
    match std::fs::remove_file(&self.path) {
      Err(err) if err.kind() != ErrorKind::NotFound => {
        Err(err).with_context(|| format!("removing {}", self.path.display()))
      }
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod test {
  use time::macros::{date, time};

  use crate::mock::MockFile;
  use jadwal_core::ClockOverride;

  #[test]
  fn save_load_clear() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("jadwal-mock-{}.json", std::process::id()));
    let file = MockFile::new(path.clone());

    assert_eq!(file.load()?, None);

    file.save(&ClockOverride::parse("2026-01-30", Some("11:40"))?)?;
    let loaded = file.load()?.expect("persisted override");
    assert_eq!(loaded.date, date!(2026-01-30));
    assert_eq!(loaded.time, time!(11:40));

    file.clear()?;
    assert!(!path.exists());
    file.clear()?;

    Ok(())
  }

  #[test]
  fn explicit_override_is_kept_for_later_runs() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("jadwal-mock-flag-{}.json", std::process::id()));
    let file = MockFile::new(path.clone());

    assert_eq!(file.remember(None)?, None);
    assert_eq!(file.load()?, None);

    let pinned = ClockOverride::parse("2026-01-27", Some("09:15"))?;
    assert_eq!(file.remember(Some(pinned))?, Some(pinned));
    assert_eq!(file.load()?, Some(pinned));

    file.clear()?;
    Ok(())
  }

  #[test]
  fn missing_time_means_midnight() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("jadwal-mock-date-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "mockDate": "2026-01-26" }"#)?;

    let loaded = MockFile::new(path.clone()).load()?.expect("persisted override");
    assert_eq!(loaded.time, time::Time::MIDNIGHT);

    std::fs::remove_file(path)?;
    Ok(())
  }
}
