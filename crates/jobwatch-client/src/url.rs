//! Status service URL construction.

use jobwatch_types::JobId;

/// Builds the job creation URL: `{base}/`.
///
/// # Example
///
/// ```
/// use jobwatch_client::url::create_url;
///
/// assert_eq!(create_url("http://localhost:8080"), "http://localhost:8080/");
/// assert_eq!(create_url("http://localhost:8080/"), "http://localhost:8080/");
/// ```
#[must_use]
pub fn create_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Builds the status lookup URL: `{base}/status/{job_id}`.
///
/// # Example
///
/// ```
/// use jobwatch_client::url::status_url;
/// use jobwatch_types::JobId;
///
/// let url = status_url("http://localhost:8080", &JobId::new("abc-123"));
/// assert_eq!(url, "http://localhost:8080/status/abc-123");
/// ```
#[must_use]
pub fn status_url(base_url: &str, job_id: &JobId) -> String {
    format!("{}/status/{}", base_url.trim_end_matches('/'), job_id)
}
