use serde::{Deserialize, Serialize};

/// `modules.orders` section of the server config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrdersConfig {
    /// Rows per page for the paginated listing. Callers pick the page
    /// number only.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}
