use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::AnimalLookup;
use crate::record::Animal;
use crate::runner::RunnerError;

pub const DEFAULT_API_URL: &str = "https://api.api-ninjas.com/v1/animals";
pub const API_KEY_VAR: &str = "API_KEY";
pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const API_KEY_LEN: usize = 40;
pub const MIN_QUERY_LEN: usize = 3;

pub fn validate_query(query: &str) -> Result<(), RunnerError> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Err(RunnerError::InvalidQuery {
            query: query.to_string(),
        });
    }
    Ok(())
}

/// Loads the nearest `.env` file (working directory first, then its parents).
/// Variables already set win. Having no `.env` at all is fine.
pub fn load_env_file() -> Result<(), dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: Option<&str>) -> Result<Self, RunnerError> {
        let key = match raw {
            Some(key) if !key.is_empty() => key,
            _ => return Err(RunnerError::MissingApiKey),
        };
        let length = key.chars().count();
        if length != API_KEY_LEN {
            return Err(RunnerError::InvalidApiKey { length });
        }
        Ok(Self(key.to_string()))
    }

    /// Reads the key from `API_KEY`. Call [`load_env_file`] first to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::parse(std::env::var(API_KEY_VAR).ok().as_deref())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    url: String,
    key: ApiKey,
}

impl ApiClient {
    pub fn new(url: &str, key: ApiKey, timeout: Option<Duration>) -> Result<Self, RunnerError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "zoocards/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|source| RunnerError::HttpClientBuild { source })?;
        Ok(Self {
            client,
            url: url.to_string(),
            key,
        })
    }
}

impl AnimalLookup for ApiClient {
    fn lookup(&self, name: &str) -> Result<Vec<Animal>, RunnerError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("name", name)])
            .header(API_KEY_HEADER, self.key.as_str())
            .send()
            .map_err(|source| RunnerError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| RunnerError::Request {
            url: self.url.clone(),
            source,
        })?;
        if status != StatusCode::OK {
            return Err(RunnerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        super::parse_records("API response", &self.url, &body)
    }
}
