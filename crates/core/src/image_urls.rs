//! Image URL extraction from image provider responses.
//!
//! Providers do not agree on where generated URLs live. Each strategy below
//! looks at one response shape and returns zero or more URLs; the results of
//! all strategies are concatenated in [`URL_STRATEGIES`] order. Strategies
//! never fail: anything unexpected is skipped.

use serde_json::Value;

/// Marker preceding the JSON payload embedded in diagnostic entries.
pub const RESPONSE_DATA_MARKER: &str = "Response data:";

/// A single extraction strategy over a raw provider response.
pub type UrlStrategy = fn(&Value) -> Vec<String>;

/// Extraction strategies in priority order. Direct results come first.
pub const URL_STRATEGIES: &[(&str, UrlStrategy)] = &[
    ("direct", direct_image_urls),
    ("diagnostic_payload", diagnostic_payload_urls),
    ("task_data", task_data_urls),
];

/// Run every strategy and merge the URLs into one ordered list.
///
/// Duplicates across strategies are kept.
pub fn extract_image_urls(response: &Value) -> Vec<String> {
    URL_STRATEGIES
        .iter()
        .flat_map(|(_, strategy)| strategy(response))
        .collect()
}

/// Collect `field` from each object in `items`, skipping non-strings.
fn collect_field(items: &[Value], field: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get(field))
        .filter_map(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// `{"images": [{"url": ...}, ...]}`
pub fn direct_image_urls(response: &Value) -> Vec<String> {
    response
        .get("images")
        .and_then(Value::as_array)
        .map(|images| collect_field(images, "url"))
        .unwrap_or_default()
}

/// `{"warnings": [{"message": "Response data: [{\"imageURL\": ...}]"}]}`
///
/// Some SDK layers surface the provider's raw task results only as a
/// diagnostic message with the JSON array inlined after a marker.
pub fn diagnostic_payload_urls(response: &Value) -> Vec<String> {
    let Some(warnings) = response.get("warnings").and_then(Value::as_array) else {
        return Vec::new();
    };

    warnings
        .iter()
        .filter_map(|warning| warning.get("message").and_then(Value::as_str))
        .filter_map(|message| {
            let (_, payload) = message.split_once(RESPONSE_DATA_MARKER)?;
            serde_json::from_str::<Value>(payload.trim()).ok()
        })
        .filter_map(|payload| payload.as_array().map(|items| collect_field(items, "imageURL")))
        .flatten()
        .collect()
}

/// `{"data": [{"taskType": "imageInference", "imageURL": ...}]}`
pub fn task_data_urls(response: &Value) -> Vec<String> {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(|items| collect_field(items, "imageURL"))
        .unwrap_or_default()
}
