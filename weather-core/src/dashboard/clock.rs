use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::{task::JoinHandle, time::MissedTickBehavior};

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Recurring wall-clock timer. The task is aborted when the timer is dropped.
#[derive(Debug)]
pub struct ClockTimer {
    handle: JoinHandle<()>,
}

impl ClockTimer {
    /// Spawn the timer on the current tokio runtime.
    ///
    /// `on_tick` fires immediately and then once per `period`; returning
    /// `false` stops the timer.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(DateTime<Local>) -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if !on_tick(Local::now()) {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ClockTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
