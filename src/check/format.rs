use crate::queries::Value;
use std::borrow::Cow;

/// Render a single value the way it shows up in the status line
#[must_use]
pub fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes),
        Value::Text(text) | Value::Other(text) => Cow::Borrowed(text.as_str()),
        Value::Int(n) => Cow::Owned(n.to_string()),
        Value::Float(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
    }
}

/// Join the rendered values with `;`
#[must_use]
pub fn format_row(values: &[Value]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(";")
}
