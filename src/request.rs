//! Request dispatcher: turns a definition plus JSON parameters into one GET

use crate::error::{DoctorError, Result};
use crate::types::{ApiDefinition, ApiResponse};
use serde_json::Value;
use std::time::Instant;
use url::Url;

/// Parse the user's parameter string into ordered query pairs.
///
/// An empty (or blank) string means no parameters. Otherwise the text must be
/// a JSON object whose values are strings, numbers, booleans, or arrays of
/// those; arrays produce one pair per element.
pub fn parse_params(params: &str) -> Result<Vec<(String, String)>> {
    if params.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(params)
        .map_err(|e| DoctorError::InvalidParameters(format!("not valid JSON: {e}")))?;

    let Value::Object(map) = value else {
        return Err(DoctorError::InvalidParameters(
            "expected a JSON object, e.g. {\"q\": \"hello world\"}".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    let text = scalar_to_query_value(&key, &item)?;
                    pairs.push((key.clone(), text));
                }
            }
            other => {
                let text = scalar_to_query_value(&key, &other)?;
                pairs.push((key, text));
            }
        }
    }

    Ok(pairs)
}

fn scalar_to_query_value(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(DoctorError::InvalidParameters(format!(
            "'{key}' is null; remove it or give it a value"
        ))),
        Value::Array(_) | Value::Object(_) => Err(DoctorError::InvalidParameters(format!(
            "'{key}' is nested; only strings, numbers, booleans and flat arrays are supported"
        ))),
    }
}

/// Build the full request URL from the definition's base URL and query pairs
pub fn build_request_url(base_url: &str, pairs: &[(String, String)]) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| DoctorError::Validation(format!("Invalid URL '{base_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DoctorError::Validation(format!(
            "Invalid URL '{base_url}': URL must start with http:// or https://"
        )));
    }

    // Only touch the query when there is something to add, otherwise a bare `?` appears
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}

/// Issue exactly one GET for `definition` with `params` as the query string.
///
/// Parameter and URL problems are reported before anything touches the
/// network. Any HTTP status counts as a response; only transport failures
/// are errors.
pub async fn send(
    client: &reqwest::Client,
    definition: &ApiDefinition,
    params: &str,
) -> Result<ApiResponse> {
    let pairs = parse_params(params)?;
    let url = build_request_url(&definition.url, &pairs)?;

    tracing::info!("GET {url} ({})", definition.name);
    let start = Instant::now();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DoctorError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DoctorError::Network(format!("Failed to read response body: {e}")))?;
    let duration = start.elapsed();

    tracing::info!(
        "{} responded {} in {}ms",
        definition.name,
        status.as_u16(),
        duration.as_millis()
    );

    Ok(ApiResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        body,
        duration,
    })
}
