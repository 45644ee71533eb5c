use crate::di::{Services, UseCases};
use crate::render;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use votewatch_application::services::{DashboardView, SecurityLogDashboard};
use votewatch_domain::{
    logout_destination, Config, FilterAction, GuardDecision, LogQuery, LogStatus, Role,
    RouteGuard, Session, Severity,
};
use votewatch_jobs::{DashboardSyncJob, FocusSignal, JobRunner, QueryCacheGcJob, RefreshSignal};

pub const FILTERS_DRAFT_KEY: &str = "security-logs-filters";

const SECURITY_LOGS_ROLES: &[Role] = &[Role::Admin];

const HELP: &str = "commands: r refresh · f focus · n next page · s <severity> · t <status> · x reset · q quit";

#[derive(Debug, PartialEq)]
enum Input {
    Refresh,
    Focus,
    NextPage,
    Severity(Severity),
    Status(LogStatus),
    Reset,
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((line, ""));

    let input = match command {
        "r" => Input::Refresh,
        "f" => Input::Focus,
        "n" => Input::NextPage,
        "x" => Input::Reset,
        "q" => Input::Quit,
        "s" => Input::Severity(argument.parse()?),
        "t" => Input::Status(argument.parse()?),
        other => return Err(format!("unknown command '{}'; {}", other, HELP)),
    };
    Ok(Some(input))
}

pub async fn run(
    config: &Config,
    role: Role,
    services: &Services,
    use_cases: &UseCases,
) -> anyhow::Result<()> {
    let session = config
        .api
        .auth_token
        .clone()
        .map(|token| Session { token, role });

    match RouteGuard::decide(session.as_ref(), SECURITY_LOGS_ROLES) {
        GuardDecision::Allow => {}
        denied => {
            let redirect = denied.redirect_path().unwrap_or_default();
            warn!(role = %role, redirect, "Security logs access denied");
            anyhow::bail!("access denied, redirecting to {}", redirect);
        }
    }

    let client = services.client();
    let dashboard = Arc::new(SecurityLogDashboard::new(
        client.clone(),
        LogQuery::with_limit(config.polling.page_size),
    ));

    match use_cases.load_draft.execute::<LogQuery>(FILTERS_DRAFT_KEY).await {
        Ok(Some(saved)) => {
            info!(query = %saved, "Restoring saved filters");
            dashboard.restore(saved);
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Could not read saved filters"),
    }

    let shutdown = CancellationToken::new();
    let focus = Arc::new(FocusSignal::new());
    let refresh = Arc::new(RefreshSignal::new());

    let sync_job = DashboardSyncJob::new(Arc::clone(&dashboard), client)
        .with_poll_interval(Duration::from_millis(config.polling.interval_ms))
        .with_refetch_on_focus(config.polling.refetch_on_focus)
        .with_focus_signal(Arc::clone(&focus))
        .with_refresh_signal(Arc::clone(&refresh));
    let gc_job = QueryCacheGcJob::new(services.query_client.clone()).with_timing(
        Duration::from_secs(config.cache.gc_interval_secs),
        Duration::from_secs(config.cache.gc_time_secs),
    );

    let handles = JobRunner::new()
        .with_dashboard_sync(sync_job)
        .with_query_cache_gc(gc_job)
        .with_shutdown_token(shutdown.clone())
        .start();

    let printer = tokio::spawn(print_views(dashboard.subscribe(), shutdown.clone()));
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
        };

        match parse_input(&line) {
            Ok(None) => {}
            Ok(Some(Input::Quit)) => break,
            Ok(Some(input)) => {
                handle_input(input, &dashboard, &focus, &refresh, use_cases).await
            }
            Err(message) => println!("{}", message),
        }
    }

    shutdown.cancel();
    for handle in handles {
        let _ = handle.await;
    }
    let _ = printer.await;

    info!(logout = logout_destination(role), "Dashboard closed");
    Ok(())
}

async fn handle_input(
    input: Input,
    dashboard: &Arc<SecurityLogDashboard>,
    focus: &FocusSignal,
    refresh: &RefreshSignal,
    use_cases: &UseCases,
) {
    match input {
        Input::Refresh => refresh.refresh(),
        Input::Focus => focus.focus(),
        Input::NextPage => match dashboard.load_more() {
            Ok(_) => save_filters(dashboard, use_cases).await,
            Err(_) => println!("No more pages for the current filters"),
        },
        Input::Severity(severity) => {
            dashboard.dispatch(FilterAction::ToggleSeverity(severity));
            save_filters(dashboard, use_cases).await;
        }
        Input::Status(status) => {
            dashboard.dispatch(FilterAction::ToggleStatus(status));
            save_filters(dashboard, use_cases).await;
        }
        Input::Reset => {
            dashboard.reset();
            if let Err(e) = use_cases.clear_draft.execute(FILTERS_DRAFT_KEY).await {
                warn!(error = %e, "Could not clear saved filters");
            }
        }
        Input::Quit => {}
    }
}

async fn save_filters(dashboard: &SecurityLogDashboard, use_cases: &UseCases) {
    let params = dashboard.params();
    if let Err(e) = use_cases
        .save_draft
        .execute(FILTERS_DRAFT_KEY, &*params)
        .await
    {
        warn!(error = %e, "Could not save filters");
    }
}

async fn print_views(mut views: watch::Receiver<DashboardView>, shutdown: CancellationToken) {
    let mut last = String::new();
    loop {
        let view = views.borrow_and_update().clone();
        let text = render::dashboard(&view.render_state(), &view.query, view.status.is_fetching);
        if text != last {
            print!("{}", text);
            last = text;
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}
