//! Failure-to-text translation for the sign-in form.
//!
//! DESIGN
//! ======
//! Backend validation errors arrive as `{"detail": [{loc, type, msg, ctx}]}`
//! where `loc[0]` is the request part (`body`, `query`) and `loc[1]` is the
//! field. Only `loc[1]` is consulted, through a fixed label table. Every
//! lookup degrades to an empty string instead of failing, so the form always
//! has something to display.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::Value;

use super::AuthFailure;

/// Shown when a failure carries nothing displayable.
pub const FALLBACK_MESSAGE: &str = "操作失败，请稍后重试";

const EMAIL_ADDRESS_MARKER: &str = "email address";

/// Normalize a service failure into one display string.
#[must_use]
pub fn normalize_failure(failure: &AuthFailure) -> String {
    match failure {
        AuthFailure::Rejected(value) => normalize_value(value),
        AuthFailure::Message(message) => message.clone(),
        AuthFailure::Transport(_) => FALLBACK_MESSAGE.to_owned(),
    }
}

/// Normalize an arbitrary JSON failure value.
///
/// - `{"detail": [...]}`: one line per record, in order.
/// - a string: returned unchanged.
/// - anything else: [`FALLBACK_MESSAGE`].
#[must_use]
pub fn normalize_value(value: &Value) -> String {
    if let Some(records) = value.get("detail").and_then(Value::as_array) {
        return records.iter().map(describe_record).collect::<Vec<_>>().join("\n");
    }
    if let Some(text) = value.as_str() {
        return text.to_owned();
    }
    FALLBACK_MESSAGE.to_owned()
}

fn describe_record(record: &Value) -> String {
    let label = field_label(record.get("loc").and_then(Value::as_array).and_then(|loc| loc.get(1)));
    let message = record.get("msg").and_then(Value::as_str).unwrap_or_default();
    let kind = record.get("type").and_then(Value::as_str).unwrap_or_default();

    if kind == "value_error" && message.contains(EMAIL_ADDRESS_MARKER) {
        let reason = record
            .get("ctx")
            .and_then(|ctx| ctx.get("reason"))
            .map(truthy_text)
            .unwrap_or_default();
        return format!("{label}格式不正确: {reason}");
    }
    format!("{label}: {message}")
}

/// Display label for the field element of a `loc` path.
pub(crate) fn field_label(element: Option<&Value>) -> String {
    match element {
        Some(Value::String(field)) => match field.as_str() {
            "email" => "邮箱".to_owned(),
            "password" => "密码".to_owned(),
            "username" => "用户名".to_owned(),
            other => other.to_owned(),
        },
        Some(Value::Number(index)) => index.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Text of a value, or empty when the value is falsy.
fn truthy_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "true".to_owned(),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        _ => String::new(),
    }
}
