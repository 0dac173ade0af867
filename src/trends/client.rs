//! Google Trends client with rate limiting
//!
//! Reproduces the widget protocol the Trends frontend uses:
//! 1. prime session cookies on the Trends host
//! 2. `explore` -- register the keyword set and obtain the widget token
//!    for the TIMESERIES widget
//! 3. `widgetdata/multiline` -- fetch the actual interest-over-time table
//!
//! Every API response is prefixed with an XSSI guard (`)]}'`) that must be
//! stripped before JSON parsing. Each outbound request passes through a
//! governor rate limiter shared by all concurrent report runs. There is no
//! retry: a failed sector fetch is reported to the pipeline, which skips
//! the sector.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::FetchError;

use super::table::InterestTable;

const DEFAULT_BASE_URL: &str = "https://trends.google.com";
const DEFAULT_LOCALE: &str = "fr-FR";
const DEFAULT_TZ_OFFSET: i32 = 360;

/// Source of per-keyword observation series.
///
/// The pipeline only depends on this trait; production wires in
/// [`TrendsClient`], tests wire in stubs.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// Fetch one observation series per keyword over `window` in `region`.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`] is transient from the pipeline's point of view:
    /// the sector contributes no data and the run continues.
    async fn fetch(
        &self,
        keywords: &[String],
        window: &str,
        region: &str,
    ) -> Result<InterestTable, FetchError>;
}

/// Google Trends HTTP client
pub struct TrendsClient {
    /// HTTP client with cookie store (the widget API requires session cookies)
    client: reqwest::Client,

    /// Rate limiter applied to every outbound request
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Base URL, overridable for tests against a mock server
    base_url: String,

    /// Interface language sent as `hl`
    locale: String,

    /// Timezone offset in minutes, sent as `tz`
    tz_offset: i32,
}

impl TrendsClient {
    /// Create a client with default timeout and locale
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(requests_per_second: u32) -> Result<Self, FetchError> {
        Self::with_config(requests_per_second, Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(requests_per_second: u32, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            tz_offset: DEFAULT_TZ_OFFSET,
        })
    }

    /// Create a client pointed at a custom base URL, for mock-server tests
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, requests_per_second: u32) -> Result<Self, FetchError> {
        let mut client = Self::new(requests_per_second)?;
        client.base_url = base_url.trim_end_matches('/').to_string();
        Ok(client)
    }

    /// Override the interface locale and timezone offset
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, tz_offset: i32) -> Self {
        self.locale = locale.into();
        self.tz_offset = tz_offset;
        self
    }

    /// Issue a rate-limited GET and return the body, mapping status codes
    /// and timeouts to [`FetchError`] variants
    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, FetchError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Prime the session cookies the widget API expects
    async fn prime_cookies(&self) -> Result<(), FetchError> {
        // The landing page sets the NID cookie; the body is irrelevant.
        self.get_text("/", &[]).await.map(|_| ())
    }

    /// Run the explore step and return the TIMESERIES widget token and
    /// request payload
    async fn explore(
        &self,
        keywords: &[String],
        window: &str,
        region: &str,
    ) -> Result<(String, Value), FetchError> {
        let comparison: Vec<Value> = keywords
            .iter()
            .map(|kw| json!({ "keyword": kw, "geo": region, "time": window }))
            .collect();
        let req = json!({
            "comparisonItem": comparison,
            "category": 0,
            "property": "",
        });

        let body = self
            .get_text(
                "/trends/api/explore",
                &[
                    ("hl", self.locale.clone()),
                    ("tz", self.tz_offset.to_string()),
                    ("req", req.to_string()),
                ],
            )
            .await?;

        let payload = strip_xssi_prefix(&body)?;
        let widgets = payload
            .get("widgets")
            .and_then(Value::as_array)
            .ok_or_else(|| FetchError::MalformedPayload("no widgets array".to_string()))?;

        let widget = widgets
            .iter()
            .find(|w| w.get("id").and_then(Value::as_str) == Some("TIMESERIES"))
            .ok_or(FetchError::MissingTimeseriesWidget)?;

        let token = widget
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| FetchError::MalformedPayload("widget without token".to_string()))?
            .to_string();
        let request = widget
            .get("request")
            .cloned()
            .ok_or_else(|| FetchError::MalformedPayload("widget without request".to_string()))?;

        Ok((token, request))
    }

    /// Fetch and decode the interest-over-time table for a prepared widget
    async fn widget_data(
        &self,
        keywords: &[String],
        token: &str,
        request: &Value,
    ) -> Result<InterestTable, FetchError> {
        let body = self
            .get_text(
                "/trends/api/widgetdata/multiline",
                &[
                    ("hl", self.locale.clone()),
                    ("tz", self.tz_offset.to_string()),
                    ("req", request.to_string()),
                    ("token", token.to_string()),
                ],
            )
            .await?;

        let payload = strip_xssi_prefix(&body)?;
        Ok(decode_timeline(keywords, &payload))
    }
}

#[async_trait]
impl SeriesFetcher for TrendsClient {
    async fn fetch(
        &self,
        keywords: &[String],
        window: &str,
        region: &str,
    ) -> Result<InterestTable, FetchError> {
        self.prime_cookies().await?;
        let (token, request) = self.explore(keywords, window, region).await?;
        self.widget_data(keywords, &token, &request).await
    }
}

/// Strip the XSSI guard prefix (`)]}'` plus optional comma/newline) and
/// parse the remainder as JSON
fn strip_xssi_prefix(body: &str) -> Result<Value, FetchError> {
    let start = body
        .find('{')
        .ok_or_else(|| FetchError::MalformedPayload("no JSON object in body".to_string()))?;

    serde_json::from_str(&body[start..])
        .map_err(|e| FetchError::MalformedPayload(e.to_string()))
}

/// Build the per-keyword table from a multiline widget payload.
///
/// Each timeline point carries one value per requested keyword, in request
/// order. Per-point `isPartial` flags are ignored: partial points stay in
/// the series, only the flag column is dropped.
fn decode_timeline(keywords: &[String], payload: &Value) -> InterestTable {
    let mut table = InterestTable::new();

    let points = match payload
        .pointer("/default/timelineData")
        .and_then(Value::as_array)
    {
        Some(points) => points,
        None => return table,
    };

    for (idx, keyword) in keywords.iter().enumerate() {
        let series: Vec<f64> = points
            .iter()
            .filter_map(|p| {
                p.get("value")
                    .and_then(Value::as_array)
                    .and_then(|values| values.get(idx))
                    .and_then(Value::as_f64)
            })
            .collect();

        table.insert(keyword.clone(), series);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_xssi_prefix() {
        let body = ")]}',\n{\"widgets\":[]}";
        let value = strip_xssi_prefix(body).unwrap();
        assert!(value.get("widgets").is_some());
    }

    #[test]
    fn test_strip_xssi_prefix_rejects_garbage() {
        assert!(strip_xssi_prefix(")]}'").is_err());
        assert!(strip_xssi_prefix(")]}',\n{not json").is_err());
    }

    #[test]
    fn test_decode_timeline_aligns_columns_to_keywords() {
        let keywords = vec!["a".to_string(), "b".to_string()];
        let payload = json!({
            "default": {
                "timelineData": [
                    { "time": "1", "value": [10, 40], "isPartial": false },
                    { "time": "2", "value": [20, 50] },
                    { "time": "3", "value": [30, 60], "isPartial": true },
                ]
            }
        });

        let table = decode_timeline(&keywords, &payload);
        assert_eq!(table.series("a"), Some([10.0, 20.0, 30.0].as_slice()));
        assert_eq!(table.series("b"), Some([40.0, 50.0, 60.0].as_slice()));
    }

    #[test]
    fn test_decode_timeline_empty_payload() {
        let keywords = vec!["a".to_string()];
        let table = decode_timeline(&keywords, &json!({}));
        assert!(table.is_empty());
    }

    #[test]
    fn test_client_creation() {
        assert!(TrendsClient::new(1).is_ok());
        assert!(TrendsClient::with_config(2, Duration::from_secs(10)).is_ok());
        assert!(TrendsClient::with_base_url("http://localhost:9000/", 1).is_ok());
    }
}
