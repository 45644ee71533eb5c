use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DraftsConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "votewatch-drafts.db".to_string()
}
