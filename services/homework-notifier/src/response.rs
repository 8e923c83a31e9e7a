//! Validation of the review API response envelope

use serde_json::Value;

use crate::{HomeworkError, Result};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Check the envelope shape and return its `homeworks` records in order
pub fn validate(response: &Value) -> Result<&[Value]> {
    let Some(envelope) = response.as_object() else {
        return Err(HomeworkError::MalformedResponse(format!(
            "ожидался JSON-объект, получен {}",
            type_name(response)
        )));
    };

    // An explicit null counts as absent
    let homeworks = envelope
        .get(HOMEWORKS_KEY)
        .filter(|value| !value.is_null())
        .ok_or_else(|| HomeworkError::MissingKey(HOMEWORKS_KEY.to_string()))?;

    match homeworks {
        Value::Array(records) => {
            tracing::debug!("Response contains {} homework record(s)", records.len());
            Ok(records.as_slice())
        }
        other => {
            let kind = type_name(other);
            tracing::error!("'{}' is a JSON {} instead of an array", HOMEWORKS_KEY, kind);
            Err(HomeworkError::UnexpectedType(kind.to_string()))
        }
    }
}

/// The server timestamp to use as the next `from_date`
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
