//! Validating decoder for model responses.
//!
//! Parses raw model text into [`LessonProgressionPlanRow`]s and rejects:
//! - text that is not JSON, or JSON that is not an array;
//! - any element that is not an object;
//! - any row missing one of the five fields, or holding a non-string or
//!   blank value in one of them.
//!
//! A single bad row fails the whole response. No partial plan is returned.

use serde_json::{Map, Value};

use crate::domain::LessonProgressionPlanRow;
use crate::error::SchemaError;

/// Parse and validate a model response.
pub fn decode_plan_rows(raw: &str) -> Result<Vec<LessonProgressionPlanRow>, SchemaError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(SchemaError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SchemaError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_row(index, item))
        .collect()
}

fn decode_row(index: usize, item: &Value) -> Result<LessonProgressionPlanRow, SchemaError> {
    let obj = item
        .as_object()
        .ok_or(SchemaError::RowNotAnObject { index })?;

    Ok(LessonProgressionPlanRow {
        stage: required_string(obj, index, "stage")?,
        duration: required_string(obj, index, "duration")?,
        teacher_role: required_string(obj, index, "teacherRole")?,
        learner_activity: required_string(obj, index, "learnerActivity")?,
        assessment_criteria: required_string(obj, index, "assessmentCriteria")?,
    })
}

fn required_string(
    obj: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, SchemaError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(SchemaError::MissingField { index, field }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(SchemaError::EmptyField { index, field })
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::NonStringField { index, field }),
    }
}

/// Models often wrap JSON in a Markdown fence (```json ... ```).
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line, unless the JSON
    // starts right after the fence.
    let starts_with_json = rest.trim_start().starts_with(['[', '{']);
    let rest = match rest.find('\n') {
        Some(pos) if !starts_with_json => &rest[pos + 1..],
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
