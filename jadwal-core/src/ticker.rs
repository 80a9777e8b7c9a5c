use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::tracker::CurrentSession;

/// Default refresh period of the current time reference.
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Periodic refresh of a [`CurrentSession`]. Dropping or stopping it ends the task.
pub struct Ticker {
  shutdown: watch::Sender<bool>,
  changes: watch::Receiver<u64>,
  handle: JoinHandle<()>,
}

impl Ticker {
  /// Refreshes `current` every `period`, starting one period from now.
  pub fn spawn(current: Arc<RwLock<CurrentSession>>, period: Duration) -> Self {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let (changes_tx, changes) = watch::channel(0u64);

    let handle = tokio::spawn(async move {
      let mut interval = interval_at(Instant::now() + period, period);
      interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

      loop {
        tokio::select! {
          _ = interval.tick() => {
            if current.write().await.refresh() {
              changes_tx.send_modify(|generation| *generation += 1);
            }
          }
          _ = shutdown_rx.changed() => break,
        }
      }

      debug!("Ticker stopped");
    });

    info!("Refreshing current session every {}s", period.as_secs());

    Self {
      shutdown,
      changes,
      handle,
    }
  }

  /// Receiver bumped every time a tick changed today, the active or the next session.
  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.changes.clone()
  }

  pub async fn stop(self) {
    let _ = self.shutdown.send(true);
    let _ = self.handle.await;
  }
}
