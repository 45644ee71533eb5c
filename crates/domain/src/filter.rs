use crate::log_query::{LogQuery, LogStatus, Severity};
use arc_swap::ArcSwap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    ToggleSeverity(Severity),
    ToggleStatus(LogStatus),
    /// Caller must check `pagination.has_next` first; the page is not clamped.
    NextPage,
    Reset,
    /// Several toggles from one user gesture, applied as a single transition.
    Gesture(Vec<FilterAction>),
}

pub fn reduce(current: &LogQuery, action: &FilterAction) -> LogQuery {
    match action {
        FilterAction::ToggleSeverity(_) | FilterAction::ToggleStatus(_) => {
            let mut next = apply_toggle(current.clone(), action);
            next.page = 1;
            next
        }
        FilterAction::NextPage => LogQuery {
            page: current.page.saturating_add(1),
            ..current.clone()
        },
        FilterAction::Reset => LogQuery::with_limit(current.limit),
        FilterAction::Gesture(actions) => {
            let mut next = current.clone();
            let mut touched_filters = false;
            for action in actions {
                match action {
                    FilterAction::ToggleSeverity(_) | FilterAction::ToggleStatus(_) => {
                        next = apply_toggle(next, action);
                        touched_filters = true;
                    }
                    other => next = reduce(&next, other),
                }
            }
            if touched_filters {
                next.page = 1;
            }
            next
        }
    }
}

fn apply_toggle(mut query: LogQuery, action: &FilterAction) -> LogQuery {
    match action {
        FilterAction::ToggleSeverity(severity) => {
            query.severity = toggle(query.severity, *severity);
        }
        FilterAction::ToggleStatus(status) => {
            query.status = toggle(query.status, *status);
        }
        _ => {}
    }
    query
}

fn toggle<T: PartialEq + Copy>(current: Option<T>, requested: T) -> Option<T> {
    if current == Some(requested) {
        None
    } else {
        Some(requested)
    }
}

/// Holds the active [`LogQuery`] for one dashboard instance.
///
/// Every mutation swaps in a new `Arc`, so a fetch that captured the previous
/// value keeps seeing exactly the parameters it was issued with.
pub struct FilterState {
    active: ArcSwap<LogQuery>,
}

impl FilterState {
    pub fn new(initial: LogQuery) -> Self {
        Self {
            active: ArcSwap::from_pointee(initial),
        }
    }

    pub fn current(&self) -> Arc<LogQuery> {
        self.active.load_full()
    }

    pub fn apply(&self, action: &FilterAction) -> Arc<LogQuery> {
        let next = Arc::new(reduce(&self.active.load(), action));
        self.active.store(Arc::clone(&next));
        next
    }

    pub fn replace(&self, query: LogQuery) -> Arc<LogQuery> {
        let next = Arc::new(query);
        self.active.store(Arc::clone(&next));
        next
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(LogQuery::default())
    }
}
