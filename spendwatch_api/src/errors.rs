//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL and resource path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a JSON array of spend records.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
