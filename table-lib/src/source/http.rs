//! HTTP row source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::RowSource;
use crate::error::FetchError;
use crate::model::Row;
use crate::query::RowQuery;

const SORT_PARAM: &str = "_sort";
const ORDER_PARAM: &str = "_order";
const START_PARAM: &str = "_start";
const END_PARAM: &str = "_end";
const RANGE_PARAMS: [&str; 4] = [SORT_PARAM, ORDER_PARAM, START_PARAM, END_PARAM];

/// Fetches rows from a JSON REST endpoint.
///
/// Each page is a `GET` with the sort and range encoded as query parameters:
///
/// ```text
/// GET /api/rest/products?_sort=title&_order=asc&_start=0&_end=40
/// ```
///
/// The response body must be a JSON array of objects. Query parameters
/// already present on the endpoint (filters, embeds) are preserved.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use table_lib::source::HttpRowSource;
///
/// let source = HttpRowSource::new("https://course-js.javascript.ru", "api/rest/products")?
///     .with_timeout(Duration::from_secs(15));
/// ```
#[derive(Debug, Clone)]
pub struct HttpRowSource {
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpRowSource {
    /// Creates a source for `path` resolved against `base_url`.
    pub fn new(base_url: &str, path: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(base_url)?.join(path)?;
        Ok(Self::from_url(endpoint))
    }

    /// Creates a source for a fully resolved endpoint URL.
    pub fn from_url(endpoint: Url) -> Self {
        Self {
            endpoint,
            http_client: Client::new(),
            timeout: None,
        }
    }

    /// Uses a preconfigured HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the request URL for a query.
    pub fn query_url(&self, query: &RowQuery) -> Url {
        let mut url = self.endpoint.clone();

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| {
                let key: &str = k;
                !RANGE_PARAMS.contains(&key)
            })
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(kept);
            if let Some(column) = query.sort.column() {
                pairs.append_pair(SORT_PARAM, column);
                pairs.append_pair(ORDER_PARAM, query.sort.direction.as_str());
            }
            pairs.append_pair(START_PARAM, &query.offset.to_string());
            pairs.append_pair(END_PARAM, &query.end().to_string());
        }

        url
    }

    fn map_send_error(&self, e: reqwest::Error) -> FetchError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Network(e),
        }
    }
}

#[async_trait]
impl RowSource for HttpRowSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        let url = self.query_url(query);
        log::trace!("GET {}", url);

        let mut request = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), body));
        }

        serde_json::from_str::<Vec<Row>>(&body)
            .map_err(|e| FetchError::parse_with_body(e.to_string(), body))
    }
}
