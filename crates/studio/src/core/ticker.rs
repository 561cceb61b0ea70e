//! One-second clock for the play-test screen.
//!
//! While running it sends `Action::PlayTick` every period. Stopping cancels
//! the token, so no tick is delivered after `stop` returns to the loop.

use std::time::Duration;

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;

#[derive(Default)]
pub struct PlayTicker {
    running: Option<(CancellationToken, JoinHandle<()>)>,
}

impl PlayTicker {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// No-op when already running.
    pub fn start(&mut self, period: Duration, action_tx: UnboundedSender<Action>) {
        if self.is_running() {
            return;
        }
        let token = CancellationToken::new();
        let child = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticks.tick() => {
                        if action_tx.send(Action::PlayTick).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("play ticker stopped");
        });
        self.running = Some((token, handle));
    }

    pub fn stop(&mut self) {
        if let Some((token, handle)) = self.running.take() {
            token.cancel();
            handle.abort();
        }
    }
}

impl Drop for PlayTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> usize {
        let mut n = 0;
        while let Ok(action) = rx.try_recv() {
            assert_eq!(action, Action::PlayTick);
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = PlayTicker::default();
        ticker.start(Duration::from_secs(1), tx);
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(drain(&mut rx), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_silences_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = PlayTicker::default();
        ticker.start(Duration::from_secs(1), tx);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        ticker.stop();
        assert!(!ticker.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(drain(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = PlayTicker::default();
        ticker.start(Duration::from_secs(1), tx.clone());
        ticker.start(Duration::from_secs(1), tx);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(drain(&mut rx), 2);
    }
}
