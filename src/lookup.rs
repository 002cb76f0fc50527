//! One `/person` lookup: normalize, query, classify, extract.

use axum::http::StatusCode;
use serde_json::{Map, Value};

use crate::classify::classify;
use crate::client::WikiClient;
use crate::error::LookupError;
use crate::extract::extract;
use crate::normalize::{NAME_DELIMITERS, normalize_all};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    raw_name: String,
    normalize: bool,
}

impl LookupRequest {
    pub fn new(raw_name: impl Into<String>, normalize: bool) -> Self {
        Self {
            raw_name: raw_name.into(),
            normalize,
        }
    }

    /// `normalized` defaults to on; only a case-insensitive `"true"` keeps it on.
    pub fn from_query(name: impl Into<String>, normalized: Option<&str>) -> Self {
        let normalize = normalized.is_none_or(|flag| flag.eq_ignore_ascii_case("true"));
        Self::new(name, normalize)
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// The title sent upstream.
    pub fn title(&self) -> String {
        if self.normalize {
            normalize_all(&self.raw_name, &NAME_DELIMITERS)
        } else {
            self.raw_name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupBody {
    Description { name: String, description: String },
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: StatusCode,
    pub body: LookupBody,
}

impl LookupResponse {
    fn found(name: String, description: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: LookupBody::Description { name, description },
        }
    }

    fn message(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: LookupBody::Message(message),
        }
    }

    /// `{"<name>": "<description>"}` on success.
    pub fn json(&self) -> Option<Value> {
        match &self.body {
            LookupBody::Description { name, description } => {
                let mut object = Map::new();
                object.insert(name.clone(), Value::String(description.clone()));
                Some(Value::Object(object))
            }
            LookupBody::Message(_) => None,
        }
    }

    pub fn body_text(&self) -> String {
        match (&self.body, self.json()) {
            (LookupBody::Message(message), _) => message.clone(),
            (_, json) => json.map(|json| json.to_string()).unwrap_or_default(),
        }
    }
}

#[tracing::instrument(skip_all, fields(name = %request.raw_name(), normalize = request.normalize()))]
pub async fn resolve(client: &WikiClient, request: &LookupRequest) -> LookupResponse {
    let title = request.title();

    let upstream = client.fetch_article(&title).await;
    if !upstream.is_ok() {
        return LookupResponse::message(upstream.status, upstream.body);
    }

    let status = classify(&upstream.body);
    if status != StatusCode::OK {
        let err = LookupError::NotFound { name: title };
        tracing::info!(%err, "upstream has no page");
        return LookupResponse::message(status, err.to_string());
    }

    let description = extract(&title, &upstream.body);
    tracing::info!(%title, "resolved description");

    LookupResponse::found(request.raw_name().to_owned(), description)
}
