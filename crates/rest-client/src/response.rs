//! Decoded responses and the reporting envelope.

use crate::error::RestError;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A response body: JSON when it parses, the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Decode `text` with a single JSON attempt, keeping the text on failure.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The body as a JSON value; text bodies become JSON strings.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }
}

/// One HTTP exchange as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body text, read exactly once.
    pub text: String,
    pub body: ResponseBody,
}

impl RestResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, text: String) -> Self {
        let body = ResponseBody::parse(text.clone());
        Self {
            status,
            headers,
            text,
            body,
        }
    }
}

/// Which response metadata to attach to a [`Reply`].
#[derive(Debug, Clone, Default)]
pub struct Reporting {
    /// Collect headers matching `limit_header_prefixes`.
    pub show_limit_usage: bool,
    /// Attach every response header.
    pub show_header: bool,
    /// Lowercase header-name prefixes that carry rate-limit counters.
    pub limit_header_prefixes: Vec<String>,
}

impl Reporting {
    pub fn is_enabled(&self) -> bool {
        self.show_limit_usage || self.show_header
    }

    /// Headers whose lowercase name starts with one of the configured prefixes.
    pub fn limit_usage(&self, headers: &HeaderMap) -> BTreeMap<String, String> {
        headers
            .iter()
            .filter(|(name, _)| {
                let name = name.as_str();
                self.limit_header_prefixes
                    .iter()
                    .any(|prefix| name.starts_with(prefix.as_str()))
            })
            .map(|(name, value)| (name.as_str().to_string(), header_text(value)))
            .collect()
    }

    /// Build the caller-facing reply for a successful response.
    pub fn reply(&self, response: RestResponse) -> Reply {
        let limit_usage = self
            .show_limit_usage
            .then(|| self.limit_usage(&response.headers));
        let header = self.show_header.then_some(response.headers);

        Reply {
            limit_usage,
            header,
            data: response.body,
        }
    }
}

/// What a caller gets back: the decoded body, optionally with header metadata.
#[derive(Debug, Clone)]
pub struct Reply {
    pub limit_usage: Option<BTreeMap<String, String>>,
    pub header: Option<HeaderMap>,
    pub data: ResponseBody,
}

impl Reply {
    /// True when header metadata was requested, so `into_value` yields an envelope.
    pub fn is_envelope(&self) -> bool {
        self.limit_usage.is_some() || self.header.is_some()
    }

    /// Deserialize the data part into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RestError> {
        match &self.data {
            ResponseBody::Json(value) => {
                T::deserialize(value).map_err(|e| RestError::Parse(e.to_string()))
            }
            ResponseBody::Text(text) => Err(RestError::Parse(format!(
                "response body is not JSON: {text}"
            ))),
        }
    }

    /// The bare body, or `{limit_usage?, header?, data}` when reporting is on.
    pub fn into_value(self) -> Value {
        if !self.is_envelope() {
            return self.data.into_value();
        }

        let mut envelope = Map::new();
        if let Some(limit_usage) = self.limit_usage {
            let usage = limit_usage
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            envelope.insert("limit_usage".into(), Value::Object(usage));
        }
        if let Some(header) = self.header {
            envelope.insert("header".into(), Value::Object(headers_to_json(&header)));
        }
        envelope.insert("data".into(), self.data.into_value());
        Value::Object(envelope)
    }
}

fn headers_to_json(headers: &HeaderMap) -> Map<String, Value> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str().to_string(), Value::String(header_text(value))))
        .collect()
}

/// Header value as text; bytes that are not valid UTF-8 are replaced.
fn header_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}
