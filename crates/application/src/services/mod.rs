pub mod log_dashboard;

pub use log_dashboard::{DashboardView, FetchTrigger, SecurityLogDashboard};
