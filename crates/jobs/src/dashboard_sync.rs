use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Notify};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use votewatch_application::ports::QueryClient;
use votewatch_application::services::{FetchTrigger, SecurityLogDashboard};
use votewatch_domain::{DomainError, QueryKind};

const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Raised by the host whenever the dashboard regains focus.
#[derive(Default)]
pub struct FocusSignal {
    notify: Notify,
}

impl FocusSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A focus event raised while no one is listening is kept until the job
    /// next waits, so it is never lost.
    pub fn focus(&self) {
        self.notify.notify_one();
    }

    async fn focused(&self) {
        self.notify.notified().await
    }
}

/// Raised by the host when the user asks for a refresh.
#[derive(Default)]
pub struct RefreshSignal {
    notify: Notify,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&self) {
        self.notify.notify_one();
    }

    async fn requested(&self) {
        self.notify.notified().await
    }
}

/// Drives a [`SecurityLogDashboard`]: fetches on mount, on every parameter
/// change, on focus, on manual refresh, on log invalidation and on a fixed
/// interval.
///
/// Each trigger spawns its own issuance; ordering between overlapping
/// responses is left to the dashboard. Any non-interval trigger restarts
/// the interval countdown.
pub struct DashboardSyncJob {
    dashboard: Arc<SecurityLogDashboard>,
    client: Arc<dyn QueryClient>,
    focus: Arc<FocusSignal>,
    refresh: Arc<RefreshSignal>,
    poll_interval: Duration,
    refetch_on_focus: bool,
    shutdown: CancellationToken,
}

impl DashboardSyncJob {
    pub fn new(dashboard: Arc<SecurityLogDashboard>, client: Arc<dyn QueryClient>) -> Self {
        Self {
            dashboard,
            client,
            focus: Arc::new(FocusSignal::new()),
            refresh: Arc::new(RefreshSignal::new()),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            refetch_on_focus: true,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_refetch_on_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_focus = enabled;
        self
    }

    pub fn with_focus_signal(mut self, focus: Arc<FocusSignal>) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_refresh_signal(mut self, refresh: Arc<RefreshSignal>) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn focus_signal(&self) -> Arc<FocusSignal> {
        Arc::clone(&self.focus)
    }

    pub fn refresh_signal(&self) -> Arc<RefreshSignal> {
        Arc::clone(&self.refresh)
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            refetch_on_focus = self.refetch_on_focus,
            "Starting dashboard sync job"
        );

        let mut params = self.dashboard.subscribe_params();
        params.borrow_and_update();
        let mut invalidations = self.client.subscribe_invalidations();
        let mut invalidations_open = true;

        let first_tick = Instant::now() + self.poll_interval;
        let mut ticker = tokio::time::interval_at(first_tick, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.spawn_issue(FetchTrigger::Mount);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.dashboard.unmount();
                    info!("DashboardSyncJob: shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.spawn_issue(FetchTrigger::Interval);
                }
                changed = params.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    params.borrow_and_update();
                    self.spawn_issue(FetchTrigger::ParamsChanged);
                    ticker.reset();
                }
                _ = self.focus.focused(), if self.refetch_on_focus => {
                    self.spawn_issue(FetchTrigger::Focus);
                    ticker.reset();
                }
                _ = self.refresh.requested() => {
                    self.spawn_issue(FetchTrigger::Manual);
                    ticker.reset();
                }
                kind = invalidations.recv(), if invalidations_open => {
                    match kind {
                        Ok(QueryKind::SecurityLogs)
                        | Err(broadcast::error::RecvError::Lagged(_)) => {
                            self.spawn_issue(FetchTrigger::Invalidated);
                            ticker.reset();
                        }
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Closed) => {
                            invalidations_open = false;
                        }
                    }
                }
            }
        }
    }

    fn spawn_issue(&self, trigger: FetchTrigger) {
        let dashboard = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            match dashboard.issue(trigger).await {
                Ok(_) => {}
                Err(DomainError::StaleResponseDiscarded) => {
                    debug!(%trigger, "Issuance refused after unmount");
                }
                Err(e) => {
                    warn!(%trigger, error = %e, "Security log fetch failed");
                }
            }
        });
    }
}
