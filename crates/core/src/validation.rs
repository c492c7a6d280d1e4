//! Schema validation for inbound JSON.
//!
//! Write endpoints accept raw JSON and run it through [`parse`], which reports
//! every problem it can find as an [`Issue`] instead of stopping at the first:
//!
//! 1. required fields that are missing or `null`
//! 2. schema-specific checks on the raw JSON (enum members, date formats)
//! 3. deserialization into the typed schema
//! 4. `validator` rules on the typed value (lengths, ranges, custom checks)

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidEnumValue,
    InvalidDate,
    InvalidString,
    Custom,
}

impl IssueCode {
    fn from_code(code: &str) -> Self {
        match code {
            "invalid_type" => Self::InvalidType,
            "too_small" | "length" | "range" => Self::TooSmall,
            "too_big" => Self::TooBig,
            "invalid_enum_value" => Self::InvalidEnumValue,
            "invalid_date" => Self::InvalidDate,
            "invalid_string" | "email" => Self::InvalidString,
            _ => Self::Custom,
        }
    }
}

/// One problem found in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    /// Wire names leading to the offending value; empty for the whole body.
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    #[must_use]
    pub fn new(code: IssueCode, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: field.map(|f| vec![f.to_owned()]).unwrap_or_default(),
            message: message.into(),
        }
    }

    /// A required field was missing or `null`.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::new(IssueCode::InvalidType, Some(field), "Required")
    }
}

/// A JSON request body schema.
pub trait Schema: DeserializeOwned + Validate {
    /// Human-readable name used in error messages, e.g. `"cart item"`.
    const NAME: &'static str;

    /// Wire names of fields that must be present and non-null.
    const REQUIRED: &'static [&'static str];

    /// Checks that need the raw JSON, run before deserialization.
    #[must_use]
    fn precheck(_fields: &Map<String, Value>) -> Vec<Issue> {
        Vec::new()
    }
}

/// Parse and validate a JSON value against schema `T`.
///
/// # Errors
///
/// Returns every [`Issue`] found. Never returns an empty list on error.
pub fn parse<T: Schema>(value: Value) -> Result<T, Vec<Issue>> {
    let Value::Object(fields) = &value else {
        return Err(vec![Issue::new(
            IssueCode::InvalidType,
            None,
            "Expected object",
        )]);
    };

    let mut issues: Vec<Issue> = T::REQUIRED
        .iter()
        .filter(|name| fields.get(**name).is_none_or(Value::is_null))
        .map(|name| Issue::required(name))
        .collect();
    // A missing field already has an issue; don't report it twice.
    let extra: Vec<Issue> = T::precheck(fields)
        .into_iter()
        .filter(|issue| !issues.iter().any(|i| i.path == issue.path))
        .collect();
    issues.extend(extra);
    if !issues.is_empty() {
        return Err(issues);
    }

    let parsed: T = serde_json::from_value(value)
        .map_err(|e| vec![Issue::new(IssueCode::InvalidType, None, e.to_string())])?;

    parsed.validate().map_err(|e| issues_from(&e))?;
    Ok(parsed)
}

/// Flatten `validator` errors into issues, sorted by path.
#[must_use]
pub fn issues_from(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues: Vec<Issue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let wire = camel_case(&field);
            errs.iter().map(move |err| Issue {
                code: IssueCode::from_code(&err.code),
                path: vec![wire.clone()],
                message: err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string),
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    if issues.is_empty() {
        issues.push(Issue::new(IssueCode::Custom, None, "Invalid input"));
    }
    issues
}

/// Build a `ValidationError` with a code and message.
#[must_use]
pub fn rule(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Check that `field` (if present) is a string accepted by `allowed`.
///
/// Used by [`Schema::precheck`] implementations for enum-valued fields.
#[must_use]
pub fn check_enum(
    fields: &Map<String, Value>,
    field: &str,
    allowed: &[&str],
) -> Option<Issue> {
    let value = fields.get(field).filter(|v| !v.is_null())?;
    match value.as_str() {
        Some(s) if allowed.contains(&s) => None,
        Some(s) => Some(Issue::new(
            IssueCode::InvalidEnumValue,
            Some(field),
            format!(
                "Invalid enum value. Expected {}, received '{s}'",
                allowed
                    .iter()
                    .map(|a| format!("'{a}'"))
                    .collect::<Vec<_>>()
                    .join(" | ")
            ),
        )),
        None => Some(Issue::new(
            IssueCode::InvalidType,
            Some(field),
            "Expected string",
        )),
    }
}

/// Check that `field` (if present) is a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn check_date(fields: &Map<String, Value>, field: &str) -> Option<Issue> {
    let value = fields.get(field).filter(|v| !v.is_null())?;
    let valid = value
        .as_str()
        .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
    (!valid).then(|| {
        Issue::new(
            IssueCode::InvalidDate,
            Some(field),
            "Expected a calendar date (YYYY-MM-DD)",
        )
    })
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
