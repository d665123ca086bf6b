//! Service configuration.

use serde::{Deserialize, Serialize};

/// Tunables for task services.
///
/// Every field has a default, so an empty document is a valid
/// configuration.
///
/// # Examples
///
/// ```
/// use taskwarden::config::TaskServiceConfig;
///
/// let config: TaskServiceConfig =
///     serde_json::from_str(r#"{"max_page_size": 50}"#).expect("valid config");
/// assert_eq!(config.default_page_size, 10);
/// assert_eq!(config.max_page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskServiceConfig {
    /// Page size used when a listing request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Largest page size a caller may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for TaskServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl TaskServiceConfig {
    /// Returns the default page size, never above the maximum nor below one.
    #[must_use]
    pub fn effective_default_page_size(&self) -> u32 {
        self.default_page_size.clamp(1, self.max_page_size.max(1))
    }
}

const fn default_page_size() -> u32 {
    10
}

const fn default_max_page_size() -> u32 {
    100
}
