//! Rendering of a homework record into a notification message

use serde_json::{Map, Value};

use crate::catalog::ReviewStatus;
use crate::{HomeworkError, Result};

/// Build the status-change message for one homework record
pub fn render(record: &Value) -> Result<String> {
    let record = record.as_object().ok_or_else(|| {
        HomeworkError::MalformedRecord("запись не является JSON-объектом".to_string())
    })?;

    let name = string_field(record, "homework_name")?;
    let status: ReviewStatus = string_field(record, "status")?.parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\".{}",
        name,
        status.verdict()
    ))
}

fn string_field<'a>(record: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    match record.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(HomeworkError::MalformedRecord(format!(
            "поле '{}' не является строкой",
            key
        ))),
        None => Err(HomeworkError::MalformedRecord(format!(
            "нет поля '{}'",
            key
        ))),
    }
}
