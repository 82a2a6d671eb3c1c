use crate::error::{Result, SearchError};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings shared by web and news searches.
#[derive(Debug, Clone)]
pub struct WebSearchConfig {
    /// Results kept per search.
    pub max_results: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self { max_results: 8, timeout_secs: 15, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl WebSearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(SearchError::Config("max_results must be greater than 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::Config("timeout_secs must be greater than 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}
