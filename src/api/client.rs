//! REST client for the game backend.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::endpoints::Endpoint;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// `base_url` is the common prefix of every endpoint, e.g. `http://host/monopoly`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidInput(format!("bad API url `{base_url}`: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidInput(format!("bad API url `{base_url}`")));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("monopoly-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    /// Issue the request and return the (envelope-unwrapped) JSON payload.
    ///
    /// Non-success statuses become [`ClientError::Rejected`], carrying the
    /// backend's `message` field when it sent one.
    pub async fn send(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = self.url_for(endpoint);
        debug!(endpoint = endpoint.name(), method = %endpoint.method(), %url, "request");

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(body) = endpoint.body() {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = rejection_message(&bytes);
            warn!(endpoint = endpoint.name(), %status, message = ?message, "request rejected");
            return Err(ClientError::Rejected { status, message });
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(unwrap_data(value))
    }
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Responses may come wrapped as `{"data": ...}`; take the inner value when present.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

fn rejection_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = value
        .get("message")
        .or_else(|| value.get("data").and_then(|d| d.get("message")))?;
    message.as_str().map(str::to_owned)
}
