mod sqlite_draft_store;

pub use sqlite_draft_store::SqliteDraftStore;
