//! HTTP client for the spend backend's REST interface.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, SpendQuery},
    types::SpendRecord,
    Error,
};

/// Static authentication header values sent with every request.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    bearer_token: String,
}

impl Credentials {
    pub fn new(api_key: &str, bearer_token: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }

    /// Uses one key for both the `apikey` header and the bearer token.
    pub fn from_key(key: &str) -> Self {
        Self::new(key, key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// HTTP client for the spend backend.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout,
/// so no connection outlives the call that opened it.
pub struct Client {
    /// Project base URL, e.g. `https://<project>.supabase.co`.
    base_api_url: String,
    credentials: Credentials,
}

impl Client {
    /// Creates a new client for the given project URL. Also used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("apikey", &self.credentials.api_key)
            .header(
                "authorization",
                format!("Bearer {}", self.credentials.bearer_token),
            )
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches every spend record matching the query from the query's resource.
    pub async fn get_spend_records(&self, query: &SpendQuery) -> Result<Vec<SpendRecord>, Error> {
        self.get::<Vec<SpendRecord>, SpendQuery>(query.resource.path().as_str(), Some(query))
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
