use std::time::Duration;

use anyhow::Context as _;
use axum::http::StatusCode;
use url::Url;

use crate::error::LookupError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("personbio/", env!("CARGO_PKG_VERSION"));

const ARTICLE_QUERY: [(&str, &str); 6] = [
    ("action", "query"),
    ("prop", "revisions"),
    ("rvlimit", "1"),
    ("formatversion", "2"),
    ("format", "json"),
    ("rvprop", "content"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamDocument {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamDocument {
    pub fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn failed(err: &LookupError) -> Self {
        Self {
            status: err.status(),
            body: err.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

#[derive(Debug, Clone)]
pub struct WikiClient {
    endpoint: String,
    http: reqwest::Client,
}

impl WikiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("build upstream http client")?;
        Ok(Self::with_http(endpoint, http))
    }

    pub fn with_http(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Any query already present on the endpoint is replaced.
    pub fn query_url(&self, title: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(ARTICLE_QUERY)
            .append_pair("titles", title);
        Ok(url)
    }

    pub async fn try_fetch_article(&self, title: &str) -> Result<String, LookupError> {
        let url = self
            .query_url(title)
            .map_err(|source| LookupError::InvalidEndpoint {
                title: title.to_owned(),
                endpoint: self.endpoint.clone(),
                source,
            })?;
        let transport = |source| LookupError::Transport {
            title: title.to_owned(),
            endpoint: self.endpoint.clone(),
            source,
        };

        tracing::debug!(%url, "query upstream");
        let response = self.http.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, title, "upstream answered with non-success status");
        }
        response.text().await.map_err(transport)
    }

    pub async fn fetch_article(&self, title: &str) -> UpstreamDocument {
        match self.try_fetch_article(title).await {
            Ok(body) => UpstreamDocument::ok(body),
            Err(err) => {
                tracing::warn!(
                    title,
                    endpoint = %self.endpoint,
                    ?err,
                    "upstream query failed"
                );
                UpstreamDocument::failed(&err)
            }
        }
    }
}
