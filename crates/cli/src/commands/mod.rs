pub mod drafts;
pub mod threats;
pub mod transfer;
pub mod watch;
