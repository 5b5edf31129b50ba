use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::Client;
use tracing::info;

use crate::error::{ExtractError, Result};

// The stats endpoints reject requests without a browser UA and referer.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
const STATS_REFERER: &str = "https://www.nba.com/";

/// Upstream fetch collaborator. Holds one reqwest client; every non-success
/// status becomes a fatal `Fetch` error with the upstream status surfaced.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(REFERER, HeaderValue::from_static(STATS_REFERER));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/html, text/plain, */*"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ExtractError::Fetch { status: 0, message: e.to_string() })?;
        Ok(Fetcher { client })
    }

    /// Fetch a URL and return the response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        info!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("upstream request failed")
                    .to_string(),
            });
        }

        response.text().await.map_err(|e| ExtractError::Fetch {
            status: status.as_u16(),
            message: e.to_string(),
        })
    }
}
