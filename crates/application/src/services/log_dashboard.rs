use crate::ports::QueryClient;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;
use votewatch_domain::{
    DomainError, FetchStatus, FilterAction, FilterState, LogPage, LogQuery, QueryData, QueryKey,
    RenderState,
};

/// What caused a fetch to be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Mount,
    ParamsChanged,
    Interval,
    Focus,
    Manual,
    Invalidated,
}

impl fmt::Display for FetchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchTrigger::Mount => "mount",
            FetchTrigger::ParamsChanged => "params_changed",
            FetchTrigger::Interval => "interval",
            FetchTrigger::Focus => "focus",
            FetchTrigger::Manual => "manual",
            FetchTrigger::Invalidated => "invalidated",
        };
        f.write_str(name)
    }
}

/// Snapshot handed to the view layer.
///
/// `data` is the query client's own cache entry for `query`; the dashboard
/// never keeps a separate copy of results.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub query: Arc<LogQuery>,
    pub status: FetchStatus,
    pub data: Option<Arc<QueryData>>,
}

impl DashboardView {
    pub fn page(&self) -> Option<&LogPage> {
        self.data.as_deref().and_then(QueryData::as_log_page)
    }

    pub fn render_state(&self) -> RenderState {
        RenderState::derive(&self.status, self.page(), &self.query)
    }
}

struct DashboardState {
    next_generation: u64,
    applied_generation: u64,
    in_flight: FxHashMap<LogQuery, u32>,
    is_error: bool,
    error_message: Option<String>,
    mounted: bool,
}

/// Holds one in-flight count for an issuance. Dropping it before
/// [`Self::complete`] releases the count and republishes the view, so a
/// caller that abandons `issue` never leaves the key marked as fetching.
struct IssuanceGuard<'a> {
    dashboard: &'a SecurityLogDashboard,
    query: Arc<LogQuery>,
    completed: bool,
}

impl IssuanceGuard<'_> {
    fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for IssuanceGuard<'_> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let mut state = self.dashboard.lock_state();
        release_in_flight(&mut state, &self.query);
        self.dashboard.publish(&state);
        debug!(query = %self.query, "Security log fetch abandoned by caller");
    }
}

fn release_in_flight(state: &mut DashboardState, query: &LogQuery) {
    let remaining = state.in_flight.get_mut(query).map(|count| {
        *count = count.saturating_sub(1);
        *count
    });
    if remaining == Some(0) {
        state.in_flight.remove(query);
    }
}

/// Filter state, fetch issuance and response ordering for one security-log
/// dashboard instance.
///
/// Every issuance is stamped with a generation. A response is applied only
/// while its query is still the active one and no newer issuance for that
/// query has been applied; anything else is dropped silently.
pub struct SecurityLogDashboard {
    client: Arc<dyn QueryClient>,
    filters: FilterState,
    state: Mutex<DashboardState>,
    view_tx: watch::Sender<DashboardView>,
    params_tx: watch::Sender<Arc<LogQuery>>,
}

impl SecurityLogDashboard {
    pub fn new(client: Arc<dyn QueryClient>, initial: LogQuery) -> Self {
        let filters = FilterState::new(initial);
        let query = filters.current();
        let view = DashboardView {
            data: client.peek(&QueryKey::SecurityLogs((*query).clone())),
            query: Arc::clone(&query),
            status: FetchStatus::default(),
        };
        let (view_tx, _) = watch::channel(view);
        let (params_tx, _) = watch::channel(query);

        Self {
            client,
            filters,
            state: Mutex::new(DashboardState {
                next_generation: 0,
                applied_generation: 0,
                in_flight: FxHashMap::default(),
                is_error: false,
                error_message: None,
                mounted: true,
            }),
            view_tx,
            params_tx,
        }
    }

    pub fn params(&self) -> Arc<LogQuery> {
        self.filters.current()
    }

    /// Applies a filter action and publishes the resulting parameter set.
    /// Fetching is left to whoever watches [`Self::subscribe_params`].
    pub fn dispatch(&self, action: FilterAction) -> Arc<LogQuery> {
        let mut state = self.lock_state();
        let previous = self.filters.current();
        let next = self.filters.apply(&action);

        if *next != *previous {
            state.is_error = false;
            state.error_message = None;
            self.params_tx.send_replace(Arc::clone(&next));
            debug!(action = ?action, query = %next, "Dashboard parameters replaced");
        }

        self.publish(&state);
        next
    }

    /// Restores a previously persisted parameter set, e.g. a saved draft.
    /// Out-of-range paging values are clamped to the first page and a
    /// single row.
    pub fn restore(&self, query: LogQuery) -> Arc<LogQuery> {
        let query = query.normalized();
        let mut state = self.lock_state();
        let previous = self.filters.current();
        let next = if *previous == query {
            previous
        } else {
            let next = self.filters.replace(query);
            state.is_error = false;
            state.error_message = None;
            self.params_tx.send_replace(Arc::clone(&next));
            next
        };
        self.publish(&state);
        next
    }

    pub fn reset(&self) -> Arc<LogQuery> {
        self.dispatch(FilterAction::Reset)
    }

    /// Advances to the next page when the displayed page reports more.
    pub fn load_more(&self) -> Result<Arc<LogQuery>, DomainError> {
        let has_next = self
            .view()
            .page()
            .map(|page| page.pagination.has_next)
            .unwrap_or(false);
        if !has_next {
            return Err(DomainError::InvalidQuery(
                "no further pages for the current filters".to_string(),
            ));
        }
        Ok(self.dispatch(FilterAction::NextPage))
    }

    /// Manual refresh. Safe to call while a fetch for the same parameters is
    /// already running; the query client shares that fetch.
    pub async fn refetch(&self) -> Result<Arc<QueryData>, DomainError> {
        self.issue(FetchTrigger::Manual).await
    }

    /// Fetches the active parameter set and applies the outcome if it is
    /// still relevant. The raw outcome is returned either way.
    pub async fn issue(&self, trigger: FetchTrigger) -> Result<Arc<QueryData>, DomainError> {
        let (query, generation) = {
            let mut state = self.lock_state();
            if !state.mounted {
                return Err(DomainError::StaleResponseDiscarded);
            }
            let query = self.filters.current();
            state.next_generation += 1;
            *state.in_flight.entry((*query).clone()).or_insert(0) += 1;
            self.publish(&state);
            (query, state.next_generation)
        };

        debug!(%trigger, generation, query = %query, "Issuing security log fetch");

        let guard = IssuanceGuard {
            dashboard: self,
            query: Arc::clone(&query),
            completed: false,
        };
        let key = QueryKey::SecurityLogs((*query).clone());
        let outcome = self.client.fetch(&key).await;

        let applied = {
            let mut state = self.lock_state();
            release_in_flight(&mut state, &query);
            guard.complete();

            let is_active = state.mounted && *self.filters.current() == *query;
            let applied = is_active && generation >= state.applied_generation;
            if applied {
                state.applied_generation = generation;
                match &outcome {
                    Ok(_) => {
                        state.is_error = false;
                        state.error_message = None;
                    }
                    Err(e) => {
                        state.is_error = true;
                        state.error_message = Some(e.user_message());
                    }
                }
            }
            self.publish(&state);
            applied
        };

        if !applied {
            debug!(
                %trigger,
                generation,
                query = %query,
                reason = %DomainError::StaleResponseDiscarded,
                "Dropping superseded response"
            );
        } else if let Err(e) = &outcome {
            debug!(%trigger, generation, error = %e, "Security log fetch failed");
        }

        outcome
    }

    /// Detaches the dashboard: pending responses are no longer applied and
    /// new issuances are refused.
    pub fn unmount(&self) {
        let mut state = self.lock_state();
        state.mounted = false;
        self.publish(&state);
    }

    pub fn is_mounted(&self) -> bool {
        self.lock_state().mounted
    }

    pub fn view(&self) -> DashboardView {
        let state = self.lock_state();
        self.build_view(&state)
    }

    pub fn render_state(&self) -> RenderState {
        self.view().render_state()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view_tx.subscribe()
    }

    pub fn subscribe_params(&self) -> watch::Receiver<Arc<LogQuery>> {
        self.params_tx.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn build_view(&self, state: &DashboardState) -> DashboardView {
        let query = self.filters.current();
        let data = self.client.peek(&QueryKey::SecurityLogs((*query).clone()));
        let is_fetching = state.in_flight.get(&*query).copied().unwrap_or(0) > 0;

        DashboardView {
            status: FetchStatus {
                is_loading: is_fetching && data.is_none(),
                is_fetching,
                is_error: state.is_error,
                error_message: state.error_message.clone(),
            },
            query,
            data,
        }
    }

    fn publish(&self, state: &DashboardState) {
        self.view_tx.send_replace(self.build_view(state));
    }
}
