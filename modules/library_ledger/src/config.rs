use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the library_ledger module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Optional upper bound on user and book names, in characters.
    /// Unset means names of any length are accepted.
    #[serde(default)]
    pub max_name_length: Option<usize>,
}

impl From<&LibraryConfig> for ServiceConfig {
    fn from(cfg: &LibraryConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
        }
    }
}
