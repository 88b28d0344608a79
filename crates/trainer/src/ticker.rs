//! Elapsed-time sampling while a puzzle is being played.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Periodic tick source. Dropping it stops the background task at once.
pub struct Ticker {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<()>,
}

impl Ticker {
    pub fn start(period: Duration) -> Self {
        // Capacity 1: a tick nobody has read yet absorbs later ones.
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if let Err(mpsc::error::TrySendError::Closed(())) = tx.try_send(()) {
                    break;
                }
            }
        });
        Self { handle, rx }
    }

    pub async fn tick(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Next tick, or never if no ticker is running.
pub async fn next_tick(ticker: &mut Option<Ticker>) -> Option<()> {
    match ticker {
        Some(t) => t.tick().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_arrive_while_running() {
        let mut ticker = Ticker::start(Duration::from_millis(5));
        assert_eq!(ticker.tick().await, Some(()));
        assert_eq!(ticker.tick().await, Some(()));
    }

    #[tokio::test]
    async fn test_no_ticker_never_ticks() {
        let mut none: Option<Ticker> = None;
        let waited = time::timeout(Duration::from_millis(50), next_tick(&mut none)).await;
        assert!(waited.is_err());
    }
}
