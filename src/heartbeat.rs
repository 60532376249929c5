use log::info;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodic liveness log line. Purely observational.
pub struct Heartbeat {
    period: Duration,
}

impl Heartbeat {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Start the heartbeat loop
    /// This should be spawned as a tokio task
    pub async fn run(&self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        let mut beats: u64 = 0;
        loop {
            ticker.tick().await;
            beats += 1;
            info!("🔄 Heartbeat - Bot is alive (#{})", beats);
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(HEARTBEAT_INTERVAL)
    }
}
