//! Retrieval of the people and posts collections.
//!
//! Sources are either HTTP(S) URLs or local JSON files. URL downloads retry
//! transient failures (connect errors, timeouts, 5xx) with linear backoff.

use crate::config::{FetchConfig, SourcesConfig};
use crate::core::{Dataset, Error, Message, Person, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;

/// Where a collection is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(Url),
    File(PathBuf),
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Url::parse(raw)
                .map(DataSource::Url)
                .map_err(|e| Error::Configuration(format!("Invalid source URL {raw}: {e}")))
        } else if raw.is_empty() {
            Err(Error::Configuration("Empty data source".to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The pair of sources a dataset is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub users: DataSource,
    pub posts: DataSource,
}

impl Sources {
    pub fn from_config(config: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            users: config.users.parse()?,
            posts: config.posts.parse()?,
        })
    }
}

struct AttemptFailure {
    message: String,
    retryable: bool,
}

/// HTTP client with retry settings
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("postmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Raw body of a source.
    pub async fn fetch_text(&self, source: &DataSource) -> Result<String> {
        match source {
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::fetch(source, e)),
            DataSource::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(failure) if failure.retryable && attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Fetching {} failed ({}); retry {}/{}",
                        url,
                        failure.message,
                        attempt,
                        self.max_retries
                    );
                    sleep(self.retry_delay * attempt).await;
                }
                Err(failure) => return Err(Error::fetch(url, failure.message)),
            }
        }
    }

    async fn get_once(&self, url: &Url) -> std::result::Result<String, AttemptFailure> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AttemptFailure {
                retryable: e.is_timeout() || e.is_connect(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure {
                message: format!("HTTP status {status}"),
                retryable: status.is_server_error(),
            });
        }

        response.text().await.map_err(|e| AttemptFailure {
            retryable: e.is_timeout(),
            message: e.to_string(),
        })
    }

    pub async fn fetch_people(&self, source: &DataSource) -> Result<Vec<Person>> {
        let body = self.fetch_text(source).await?;
        let people = parse_people(&body, source)?;
        log::info!("Loaded {} people from {}", people.len(), source);
        Ok(people)
    }

    pub async fn fetch_messages(&self, source: &DataSource) -> Result<Vec<Message>> {
        let body = self.fetch_text(source).await?;
        let messages = parse_messages(&body, source)?;
        log::info!("Loaded {} posts from {}", messages.len(), source);
        Ok(messages)
    }

    /// Load both collections; concurrently, or posts first then people.
    pub async fn fetch_dataset(&self, sources: &Sources, concurrent: bool) -> Result<Dataset> {
        let (people, messages) = if concurrent {
            tokio::try_join!(
                self.fetch_people(&sources.users),
                self.fetch_messages(&sources.posts)
            )?
        } else {
            let messages = self.fetch_messages(&sources.posts).await?;
            let people = self.fetch_people(&sources.users).await?;
            (people, messages)
        };

        Ok(Dataset::new(people, messages))
    }
}

pub fn parse_people(body: &str, source: impl fmt::Display) -> Result<Vec<Person>> {
    parse_array(body, source)
}

pub fn parse_messages(body: &str, source: impl fmt::Display) -> Result<Vec<Message>> {
    parse_array(body, source)
}

fn parse_array<T: DeserializeOwned>(body: &str, source: impl fmt::Display) -> Result<Vec<T>> {
    serde_json::from_str(body).map_err(|e| Error::parse(source, e))
}
