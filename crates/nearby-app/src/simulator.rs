//! Simulated walk along the fixed coordinate loop.

use std::time::Duration;

use nearby_core::constants::{CHANGE_STREAM_CAPACITY, COORDINATE_PATH, REFRESH_INTERVAL_SECS};
use nearby_core::Position;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Steps through [`COORDINATE_PATH`] on a repeating timer.
///
/// The timer task only posts ticks; the position itself is advanced by
/// whoever awaits [`LocationSimulator::tick`], so all state changes stay on
/// the owner's execution context. The change stream carries every position
/// reached by advancing, never the initial one.
pub struct LocationSimulator {
    path: &'static [Position],
    index: usize,
    interval: Duration,
    changes: broadcast::Sender<Position>,
    ticks_tx: mpsc::Sender<()>,
    ticks_rx: mpsc::Receiver<()>,
    timer: Option<JoinHandle<()>>,
}

impl LocationSimulator {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_STREAM_CAPACITY);
        let (ticks_tx, ticks_rx) = mpsc::channel(1);
        Self {
            path: &COORDINATE_PATH,
            index: 0,
            interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            changes,
            ticks_tx,
            ticks_rx,
            timer: None,
        }
    }

    #[must_use]
    pub fn current_position(&self) -> Position {
        self.path[self.index]
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Subscribes to position changes. Drop the receiver to unsubscribe.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Position> {
        self.changes.subscribe()
    }

    /// Starts the repeating timer. The first tick fires one interval from now.
    /// Calling this while running does nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let period = self.interval;
        let ticks = self.ticks_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(()).await.is_err() {
                    break;
                }
            }
        }));
        tracing::info!(interval_secs = period.as_secs(), "location simulator started");
    }

    /// Cancels the timer and discards any tick not yet applied. Safe to call
    /// when not running.
    pub fn stop(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        timer.abort();
        while self.ticks_rx.try_recv().is_ok() {}
        tracing::info!("location simulator stopped");
    }

    /// Advances one step along the path, wrapping after the last entry, and
    /// emits the new position.
    pub fn advance_once(&mut self) -> Position {
        self.index = (self.index + 1) % self.path.len();
        let position = self.current_position();
        tracing::debug!(step = self.index, position = %position, "simulated position advanced");
        // No subscribers is not an error.
        let _ = self.changes.send(position);
        position
    }

    /// Waits for the next timer tick, then applies it via [`Self::advance_once`].
    ///
    /// Pends forever while the timer is stopped.
    pub async fn tick(&mut self) -> Position {
        match self.ticks_rx.recv().await {
            Some(()) => self.advance_once(),
            // Unreachable while `self.ticks_tx` is alive.
            None => std::future::pending().await,
        }
    }
}

impl Default for LocationSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocationSimulator {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl std::fmt::Debug for LocationSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationSimulator")
            .field("index", &self.index)
            .field("position", &self.current_position())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(rx: &mut broadcast::Receiver<Position>) -> usize {
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    #[test]
    fn starts_at_first_path_entry_without_emitting() {
        let sim = LocationSimulator::new();
        let mut rx = sim.subscribe();
        assert_eq!(sim.current_position(), COORDINATE_PATH[0]);
        assert_eq!(count(&mut rx), 0);
    }

    #[test]
    fn advance_once_wraps_and_emits_each_step() {
        let mut sim = LocationSimulator::new();
        let mut rx = sim.subscribe();
        let n = COORDINATE_PATH.len() * 2 + 3;

        for _ in 0..n {
            sim.advance_once();
        }

        assert_eq!(sim.current_position(), COORDINATE_PATH[n % COORDINATE_PATH.len()]);
        assert_eq!(count(&mut rx), n);
    }

    #[test]
    fn emitted_positions_follow_path_order() {
        let mut sim = LocationSimulator::new();
        let mut rx = sim.subscribe();

        for _ in 0..COORDINATE_PATH.len() {
            sim.advance_once();
        }

        let mut emitted = Vec::new();
        while let Ok(p) = rx.try_recv() {
            emitted.push(p);
        }
        let mut expected: Vec<Position> = COORDINATE_PATH[1..].to_vec();
        expected.push(COORDINATE_PATH[0]);
        assert_eq!(emitted, expected);
    }

    #[test]
    fn stop_when_not_running_is_noop() {
        let mut sim = LocationSimulator::new();
        sim.stop();
        sim.stop();
        assert!(!sim.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_advances_every_interval() {
        let mut sim = LocationSimulator::new();
        let mut rx = sim.subscribe();
        sim.start();
        assert!(sim.is_running());

        let first = sim.tick().await;
        let second = sim.tick().await;

        assert_eq!(first, COORDINATE_PATH[1]);
        assert_eq!(second, COORDINATE_PATH[2]);
        assert_eq!(count(&mut rx), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_interval() {
        let mut sim = LocationSimulator::new();
        sim.start();
        let started = Instant::now();

        sim.tick().await;

        assert!(started.elapsed() >= Duration::from_secs(REFRESH_INTERVAL_SECS));
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_single_timer() {
        let mut sim = LocationSimulator::new();
        sim.start();
        sim.start();

        sim.tick().await;

        // A second timer would have queued another tick at the same instant.
        let extra = tokio::time::timeout(
            Duration::from_secs(REFRESH_INTERVAL_SECS - 1),
            sim.tick(),
        )
        .await;
        assert!(extra.is_err(), "only one tick per interval expected");
        assert_eq!(sim.current_position(), COORDINATE_PATH[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_discards_pending_tick() {
        let mut sim = LocationSimulator::new();
        let mut rx = sim.subscribe();
        sim.start();

        tokio::time::sleep(Duration::from_secs(REFRESH_INTERVAL_SECS + 1)).await;
        sim.stop();

        let result =
            tokio::time::timeout(Duration::from_secs(REFRESH_INTERVAL_SECS * 5), sim.tick()).await;
        assert!(result.is_err(), "no tick expected after stop");
        assert_eq!(sim.current_position(), COORDINATE_PATH[0]);
        assert_eq!(count(&mut rx), 0);
    }
}
