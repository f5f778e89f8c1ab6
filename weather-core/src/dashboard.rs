//! Dashboard controller: ties search input, the clock and remote fetches
//! into one piece of view state.
//!
//! The controller runs side effects (spawning fetches, the clock task) and
//! reports their results as [`DashboardEvent`]s on a channel. The owner
//! feeds those events back through [`DashboardController::apply`] on the UI
//! task, so every state mutation happens in one place.

use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{WeatherProvider, WeatherSnapshot, provider::ProviderError};

mod clock;
mod state;

pub use clock::{CLOCK_PERIOD, ClockTimer};
pub use state::{DashboardState, Dispatch, Phase, RequestId, Settlement};

#[derive(Debug)]
pub enum DashboardEvent {
    Tick(DateTime<Local>),
    Settled { id: RequestId, outcome: Result<WeatherSnapshot, ProviderError> },
}

pub type DashboardEvents = mpsc::UnboundedReceiver<DashboardEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    TornDown,
}

#[derive(Debug)]
pub struct DashboardController {
    state: DashboardState,
    provider: Arc<dyn WeatherProvider>,
    events_tx: mpsc::UnboundedSender<DashboardEvent>,
    clock: Option<ClockTimer>,
    lifecycle: Lifecycle,
}

impl DashboardController {
    /// Build a controller and the receiver its events arrive on.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        default_location: impl Into<String>,
    ) -> (Self, DashboardEvents) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let controller = Self {
            state: DashboardState::new(default_location, Local::now()),
            provider,
            events_tx,
            clock: None,
            lifecycle: Lifecycle::Created,
        };

        (controller, events_rx)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    /// Fetch the default location and start the clock. Must run inside a tokio runtime.
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;

        info!(location = %self.state.active_location(), "mounting dashboard");
        let dispatch = self.state.dispatch();
        self.spawn_fetch(dispatch);

        let tx = self.events_tx.clone();
        self.clock = Some(ClockTimer::start(CLOCK_PERIOD, move |now| {
            tx.send(DashboardEvent::Tick(now)).is_ok()
        }));
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.state.set_query(query);
    }

    /// Commit the pending query. Returns `true` if a fetch was dispatched.
    pub fn submit(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }

        match self.state.submit() {
            Some(dispatch) => {
                self.spawn_fetch(dispatch);
                true
            }
            None => false,
        }
    }

    /// Fold an event into the state. Returns `true` if the view should redraw.
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        if self.lifecycle == Lifecycle::TornDown {
            return false;
        }

        match event {
            DashboardEvent::Tick(now) => {
                self.state.tick(now);
                true
            }
            DashboardEvent::Settled { id, outcome } => {
                self.state.settle(id, outcome) == Settlement::Applied
            }
        }
    }

    /// Stop the clock. Later events are ignored.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.lifecycle = Lifecycle::TornDown;

        if self.clock.take().is_some() {
            debug!("clock timer cancelled");
        }
    }

    fn spawn_fetch(&self, dispatch: Dispatch) {
        let Dispatch { id, request } = dispatch;
        debug!(id, location = %request.location, days = request.days, "dispatching forecast fetch");

        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = provider.forecast(&request).await;
            // The receiver is gone once the UI has shut down.
            let _ = tx.send(DashboardEvent::Settled { id, outcome });
        });
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.teardown();
    }
}
