use serde_json::Value;

/// Pull a human-readable message out of a backend error body.
///
/// Looks at `error.message` first, then FastAPI's `detail` (string or the
/// validation-error list), then a top-level `message`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(message) = body
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    match body.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    body.get("message")
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

/// Parse an error response body, which may not be JSON at all.
pub fn error_message_from_text(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| extract_error_message(&body))
        .filter(|message| !message.is_empty())
}
