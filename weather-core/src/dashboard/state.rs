use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::{
    config::DEFAULT_LOCATION,
    model::{ForecastRequest, WeatherSnapshot},
    provider::{FailureKind, ProviderError},
};

/// Identifier of a dispatched fetch. Strictly increasing per dashboard.
pub type RequestId = u64;

/// What the weather section of the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Empty,
}

/// A fetch the caller must run and later report back through [`DashboardState::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub id: RequestId,
    pub request: ForecastRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer request was issued after this one; the outcome was dropped.
    Stale,
}

/// All mutable view state of the dashboard, with no I/O attached.
#[derive(Debug, Clone)]
pub struct DashboardState {
    query: String,
    active_location: String,
    snapshot: Option<WeatherSnapshot>,
    loading: bool,
    clock: DateTime<Local>,
    latest_request: RequestId,
    last_failure: Option<FailureKind>,
}

impl DashboardState {
    /// A blank `default_location` falls back to [`DEFAULT_LOCATION`].
    pub fn new(default_location: impl Into<String>, now: DateTime<Local>) -> Self {
        let mut active_location = default_location.into();
        if active_location.trim().is_empty() {
            active_location = DEFAULT_LOCATION.to_string();
        }

        Self {
            query: String::new(),
            active_location,
            snapshot: None,
            loading: false,
            clock: now,
            latest_request: 0,
            last_failure: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_location(&self) -> &str {
        &self.active_location
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn clock(&self) -> DateTime<Local> {
        self.clock
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// Class of the last failed fetch, cleared by the next success.
    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    pub fn phase(&self) -> Phase {
        match (self.loading, &self.snapshot) {
            (true, _) => Phase::Loading,
            (false, Some(_)) => Phase::Loaded,
            (false, None) => Phase::Empty,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Promote the pending query to the active location.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit(&mut self) -> Option<Dispatch> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.active_location = std::mem::take(&mut self.query);
        Some(self.dispatch())
    }

    /// Start a fetch for the active location.
    pub fn dispatch(&mut self) -> Dispatch {
        self.latest_request += 1;
        self.loading = true;

        Dispatch {
            id: self.latest_request,
            request: ForecastRequest::for_location(self.active_location.clone()),
        }
    }

    /// Apply the outcome of request `id`.
    pub fn settle(
        &mut self,
        id: RequestId,
        outcome: Result<WeatherSnapshot, ProviderError>,
    ) -> Settlement {
        if id != self.latest_request {
            info!(id, latest = self.latest_request, "dropping superseded forecast response");
            return Settlement::Stale;
        }

        match outcome {
            Ok(snapshot) => {
                info!(
                    id,
                    location = %snapshot.location_name,
                    days = snapshot.forecast.len(),
                    "forecast loaded"
                );
                self.snapshot = Some(snapshot);
                self.last_failure = None;
            }
            Err(err) => {
                warn!(id, location = %self.active_location, error = %err, "forecast unavailable");
                self.snapshot = None;
                self.last_failure = Some(err.kind());
            }
        }

        self.loading = false;
        Settlement::Applied
    }

    pub fn tick(&mut self, now: DateTime<Local>) {
        self.clock = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, ForecastDay};
    use chrono::{NaiveDate, TimeDelta, TimeZone};

    fn at(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 30, secs).unwrap()
    }

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: name.into(),
            country: "Somewhere".into(),
            current: CurrentConditions {
                temperature_c: 10.0,
                feels_like_c: 8.0,
                condition: "Sunny".into(),
                condition_icon: String::new(),
                wind_kph: 5.0,
                humidity_pct: 50,
                visibility_km: 10.0,
                pressure_mb: 1015.0,
            },
            forecast: vec![ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                max_temp_c: 12.0,
                condition: "Sunny".into(),
            }],
            last_updated: None,
        }
    }

    fn domain_error() -> ProviderError {
        ProviderError::Domain { code: 1006, message: "No matching location found.".into() }
    }

    #[test]
    fn starts_idle_on_default_location() {
        let state = DashboardState::new("London", at(0));
        assert_eq!(state.active_location(), "London");
        assert_eq!(state.phase(), Phase::Empty);
        assert_eq!(state.latest_request(), 0);
    }

    #[test]
    fn blank_default_location_falls_back_to_seed() {
        for blank in ["", "   "] {
            let mut state = DashboardState::new(blank, at(0));
            assert_eq!(state.active_location(), "London");
            assert_eq!(state.dispatch().request.location, "London");
        }
    }

    #[test]
    fn blank_submit_is_a_noop() {
        let mut state = DashboardState::new("London", at(0));
        let first = state.dispatch();
        state.settle(first.id, Ok(snapshot("London")));

        for blank in ["", "   ", "\t\n"] {
            state.set_query(blank);
            assert!(state.submit().is_none());
            assert_eq!(state.active_location(), "London");
            assert_eq!(state.snapshot().map(|s| s.location_name.as_str()), Some("London"));
            assert_eq!(state.latest_request(), first.id);
            assert!(!state.is_loading());
        }
    }

    #[test]
    fn submit_promotes_query_and_clears_input() {
        let mut state = DashboardState::new("London", at(0));
        state.set_query("Paris");

        let dispatch = state.submit().expect("non-blank query dispatches");
        assert_eq!(state.active_location(), "Paris");
        assert_eq!(state.query(), "");
        assert!(state.is_loading());
        assert_eq!(dispatch.request, ForecastRequest::for_location("Paris"));

        assert_eq!(state.settle(dispatch.id, Ok(snapshot("Paris"))), Settlement::Applied);
        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Loaded);
    }

    #[test]
    fn domain_error_clears_snapshot() {
        let mut state = DashboardState::new("London", at(0));
        let first = state.dispatch();
        state.settle(first.id, Ok(snapshot("London")));

        state.set_query("Atlantis");
        let second = state.submit().unwrap();
        state.settle(second.id, Err(domain_error()));

        assert!(state.snapshot().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Empty);
        assert_eq!(state.last_failure(), Some(FailureKind::Domain));
    }

    #[test]
    fn transport_failure_clears_previous_snapshot() {
        let mut state = DashboardState::new("London", at(0));
        let first = state.dispatch();
        state.settle(first.id, Ok(snapshot("London")));
        assert_eq!(state.phase(), Phase::Loaded);

        state.set_query("Paris");
        let second = state.submit().unwrap();
        let failure = ProviderError::Status { status: 503, body: "unavailable".into() };
        assert_eq!(state.settle(second.id, Err(failure)), Settlement::Applied);

        assert!(state.snapshot().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.phase(), Phase::Empty);
        assert_eq!(state.last_failure(), Some(FailureKind::Transport));

        let third = state.dispatch();
        let decode = ProviderError::from(serde_json::from_str::<u8>("{").unwrap_err());
        state.settle(third.id, Err(decode));
        assert_eq!(state.last_failure(), Some(FailureKind::Transport));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = DashboardState::new("London", at(0));
        let first = state.dispatch();
        state.set_query("Paris");
        let second = state.submit().unwrap();

        assert_eq!(state.settle(first.id, Ok(snapshot("London"))), Settlement::Stale);
        assert!(state.is_loading());
        assert!(state.snapshot().is_none());

        assert_eq!(state.settle(second.id, Ok(snapshot("Paris"))), Settlement::Applied);
        assert_eq!(state.snapshot().map(|s| s.location_name.as_str()), Some("Paris"));
        assert!(!state.is_loading());
    }

    #[test]
    fn clock_moves_independently_of_fetches() {
        let mut state = DashboardState::new("London", at(0));

        state.tick(at(1));
        let dispatch = state.dispatch();
        assert_eq!(state.clock(), at(1));

        state.tick(at(2));
        state.settle(dispatch.id, Err(domain_error()));
        assert_eq!(state.clock(), at(2));
        assert_eq!(state.clock() - at(1), TimeDelta::seconds(1));
    }
}
