use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use jadwal_core::schedule::parse_iso_date;
use jadwal_core::{
  build_day_grid, format_date_display, resolve_clock, ClockOverride, CurrentSession, Schedule,
  Session, Ticker,
};

use crate::ascii::table;
use crate::material::material_url;
use crate::mock::MockFile;

mod ascii;
mod material;
mod mock;

#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Args {
  #[arg(long, short, env = "JADWAL_SCHEDULE", default_value = "schedule.json")]
  schedule: PathBuf,
  #[arg(long, env = "JADWAL_MOCK_DATE")]
  mock_date: Option<String>,
  #[arg(long, env = "JADWAL_MOCK_TIME", requires = "mock_date")]
  mock_time: Option<String>,
  #[arg(long, env = "JADWAL_MOCK_FILE", default_value = ".jadwal-mock.json")]
  mock_file: PathBuf,
  #[arg(long, short, env = "JADWAL_INTERVAL", default_value_t = 60)]
  interval: u64,
  #[arg(long, env = "JADWAL_SENTRY_DSN")]
  sentry_dsn: Option<String>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the slot grid of one day, or of every day in the schedule.
  Grid {
    #[arg(long, short)]
    date: Option<String>,
  },
  /// Print today's active and next session.
  Now,
  /// Keep printing the active and next session as time passes.
  Watch,
  /// Manage the persisted mock date.
  Mock {
    #[command(subcommand)]
    action: MockAction,
  },
}

#[derive(Subcommand)]
enum MockAction {
  Set { date: String, time: Option<String> },
  Clear,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let _sentry = args.sentry_dsn.as_deref().map(|dsn| {
    sentry::init((
      dsn,
      sentry::ClientOptions {
        release: sentry::release_name!(),
        ..Default::default()
      },
    ))
  });

  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer())
    .with(sentry_tracing::layer())
    .with(LevelFilter::INFO)
    .init();

  tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?
    .block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
  let mock_file = MockFile::new(args.mock_file.clone());

  if let Command::Mock { action } = &args.command {
    return match action {
      MockAction::Set { date, time } => {
        let pinned = ClockOverride::parse(date, time.as_deref())?;
        mock_file.save(&pinned)?;
        info!("Mock date set to {} {}", pinned.date, pinned.time);
        Ok(())
      }
      MockAction::Clear => {
        mock_file.clear()?;
        info!("Mock date cleared, using real time");
        Ok(())
      }
    };
  }

  let json = std::fs::read_to_string(&args.schedule)
    .with_context(|| format!("unable to read schedule {}", args.schedule.display()))?;
  let schedule = Arc::new(Schedule::from_json(&json)?);

  let explicit = match &args.mock_date {
    Some(date) => Some(ClockOverride::parse(date, args.mock_time.as_deref())?),
    None => None,
  };
  let explicit = match mock_file.remember(explicit) {
    Ok(explicit) => explicit,
    Err(err) => {
      error!("Unable to persist mock date: {:#}", err);
      explicit
    }
  };
  let persisted = match mock_file.load() {
    Ok(persisted) => persisted,
    Err(err) => {
      error!("Ignoring persisted mock date: {:#}", err);
      None
    }
  };
  let current = CurrentSession::new(schedule.clone(), resolve_clock(explicit, persisted));

  match &args.command {
    Command::Grid { date } => print_grid(&schedule, date.as_deref(), &current),
    Command::Now => {
      print!("{}", summary(&current));
      Ok(())
    }
    Command::Watch => watch(current, Duration::from_secs(args.interval.max(1))).await,
    Command::Mock { .. } => Ok(()),
  }
}

fn print_grid(schedule: &Schedule, date: Option<&str>, current: &CurrentSession) -> anyhow::Result<()> {
  let days = match date {
    Some(date) => {
      let date = parse_iso_date(date)?;
      vec![schedule
        .day(date)
        .with_context(|| format!("no schedule for {}", date))?]
    }
    None => schedule.days.iter().collect(),
  };

  for day in days {
    let grid = build_day_grid(day);
    println!("{}", grid.display_date);
    println!("```\n{}```", table(&grid, |session| current.is_active(session, day.date)));
  }

  Ok(())
}

fn summary(current: &CurrentSession) -> String {
  let today = current.today_date();
  let mut text = format!(
    "{} {}\n",
    format_date_display(today, &today.weekday().to_string()),
    current.current_time_string()
  );

  if current.today_schedule().is_none() {
    writeln!(text, "No sessions scheduled today.").unwrap();
    return text;
  }

  match current.active_session() {
    Some(session) => writeln!(text, "Now:  {}", describe(session)).unwrap(),
    None => writeln!(text, "Now:  -").unwrap(),
  }
  match current.next_session() {
    Some(session) => writeln!(text, "Next: {}", describe(session)).unwrap(),
    None => writeln!(text, "Next: -").unwrap(),
  }

  text
}

fn describe(session: &Session) -> String {
  let mut text = format!("{} ({})", session.title, session.range());

  if let Some(location) = &session.location {
    write!(text, " @ {}", location).unwrap();
  }
  if let Some(url) = session.material.as_deref().and_then(material_url) {
    write!(text, "\n      {}", url).unwrap();
  }

  text
}

async fn watch(current: CurrentSession, interval: Duration) -> anyhow::Result<()> {
  print!("{}", summary(&current));

  let current = Arc::new(RwLock::new(current));
  let ticker = Ticker::spawn(current.clone(), interval);
  let mut changes = ticker.subscribe();

  loop {
    tokio::select! {
      changed = changes.changed() => {
        if changed.is_err() {
          break;
        }
        print!("{}", summary(&*current.read().await));
      }
      signal = tokio::signal::ctrl_c() => {
        signal?;
        info!("Received Ctrl-C, stopping");
        break;
      }
    }
  }

  ticker.stop().await;
  Ok(())
}
