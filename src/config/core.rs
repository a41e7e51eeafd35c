use serde::{Deserialize, Serialize};

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Root configuration structure for postmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PostmapConfig {
    /// Where people and posts are loaded from
    #[serde(default)]
    pub sources: SourcesConfig,

    /// HTTP retrieval settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl PostmapConfig {
    /// Reject values that would make retrieval or rendering meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch.timeout_secs == 0 {
            return Err("fetch.timeout_secs must be greater than 0".to_string());
        }
        if !self.output.count_template.contains("{count}") {
            return Err("output.count_template must contain {count}".to_string());
        }
        if self.sources.users.trim().is_empty() || self.sources.posts.trim().is_empty() {
            return Err("sources.users and sources.posts must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// URL or file path of the people JSON array
    #[serde(default = "default_users")]
    pub users: String,

    /// URL or file path of the posts JSON array
    #[serde(default = "default_posts")]
    pub posts: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            posts: default_posts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay; attempt `n` waits `n * retry_delay_ms`
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Download both collections at the same time
    #[serde(default = "default_concurrent")]
    pub concurrent: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            concurrent: default_concurrent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// terminal, json or markdown
    #[serde(default = "default_format")]
    pub default_format: String,

    #[serde(default = "default_count_template")]
    pub count_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            count_template: default_count_template(),
        }
    }
}

fn default_users() -> String {
    DEFAULT_USERS_URL.to_string()
}
fn default_posts() -> String {
    DEFAULT_POSTS_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_delay_ms() -> u64 {
    500
}
fn default_concurrent() -> bool {
    true
}
fn default_format() -> String {
    "terminal".to_string()
}
fn default_count_template() -> String {
    crate::analysis::aggregation::DEFAULT_COUNT_TEMPLATE.to_string()
}
