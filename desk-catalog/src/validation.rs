//! `validator` bridge: field errors become an `Unprocessable` [`DeskError`]
//! with a `{ "field": ["message", ...] }` map in `errors`.
//!
//! Keys use the camelCase document names (`readTime`, not `read_time`);
//! `validator` reports Rust field names and ignores `#[serde(rename)]`.

use desk_core::DeskError;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Default)]
pub struct FieldErrors {
    map: Map<String, Value>,
}

impl FieldErrors {
    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        let msg = Value::String(msg.into());
        match self.map.get_mut(field) {
            Some(Value::Array(arr)) => arr.push(msg),
            _ => {
                self.map.insert(field.to_string(), Value::Array(vec![msg]));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_unprocessable_anyhow(self, message: &str) -> anyhow::Error {
        DeskError::unprocessable(message)
            .with_errors(Value::Object(self.map))
            .into_anyhow()
    }
}

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "length" => Some("has invalid length"),
        "range" => Some("is out of range"),
        "not_blank" => Some("must not be empty"),
        "finite" => Some("must be a finite number"),
        _ => None,
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' && !out.is_empty() {
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

fn join_path(prefix: &str, field: &str) -> String {
    let field = camel_case(field);
    if prefix.is_empty() {
        field
    } else {
        format!("{prefix}.{field}")
    }
}

fn push_validation_errors(out: &mut FieldErrors, prefix: &str, errs: &ValidationErrors) {
    for (field, kind) in errs.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(|m| format!("{key} {m}")))
                        .unwrap_or_else(|| e.code.to_string());
                    out.push_field(&key, msg);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                push_validation_errors(out, &join_path(prefix, field), nested.as_ref());
            }
            ValidationErrorsKind::List(items) => {
                let base = join_path(prefix, field);
                for (idx, nested) in items {
                    push_validation_errors(out, &format!("{base}[{idx}]"), nested.as_ref());
                }
            }
        }
    }
}

/// Run `validate()` on an already-typed input.
pub fn check<T: Validate>(input: &T, error_message: &str) -> anyhow::Result<()> {
    input.validate().map_err(|e| {
        let mut out = FieldErrors::default();
        push_validation_errors(&mut out, "", &e);
        out.into_unprocessable_anyhow(error_message)
    })
}

/// Deserialize a JSON payload into `T`, then validate it.
pub fn parse<T>(data: &Value, error_message: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(data.clone()).map_err(|e| {
        DeskError::unprocessable(error_message)
            .with_errors(json!({ "_schema": [e.to_string()] }))
            .into_anyhow()
    })?;
    check(&parsed, error_message)?;
    Ok(parsed)
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Rejects NaN and infinities, which slip through `range`.
pub fn finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use desk_core::{DeskError, ErrorKind};
    use serde::Deserialize;
    use serde_json::json;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Item {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(
            custom(function = "finite"),
            range(min = 0.0, message = "price must not be negative")
        )]
        price: f64,
        #[serde(default)]
        #[validate(range(min = 1, message = "readTime must be at least 1 minute"))]
        read_time: u32,
    }

    #[test]
    fn field_errors_are_keyed_by_field() {
        let err = parse::<Item>(&json!({"name": "  ", "price": -1.0, "read_time": 0}), "Item validation failed")
            .unwrap_err();
        let desk = DeskError::from_anyhow(&err).expect("must be DeskError");
        assert_eq!(desk.kind, ErrorKind::Unprocessable);

        let errors = desk.errors.as_ref().unwrap();
        assert_eq!(errors["name"][0], "name must not be empty");
        assert_eq!(errors["price"][0], "price must not be negative");
        assert_eq!(errors["readTime"][0], "readTime must be at least 1 minute");
        assert!(errors.get("read_time").is_none());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let item = Item {
            name: "soap".into(),
            price: f64::NAN,
            read_time: 1,
        };
        let err = check(&item, "Item validation failed").unwrap_err();
        let desk = DeskError::from_anyhow(&err).unwrap();
        assert_eq!(desk.errors.as_ref().unwrap()["price"][0], "price must be a finite number");

        let item = Item { price: f64::INFINITY, ..item };
        assert!(check(&item, "x").is_err());
    }

    #[test]
    fn snake_case_fields_map_to_camel_case_keys() {
        assert_eq!(camel_case("read_time"), "readTime");
        assert_eq!(camel_case("cover_image"), "coverImage");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn malformed_payloads_report_schema_error() {
        let err = parse::<Item>(&json!({"name": "soap"}), "Item validation failed").unwrap_err();
        let desk = DeskError::from_anyhow(&err).unwrap();
        assert!(desk.errors.as_ref().unwrap()["_schema"][0].is_string());
    }

    #[test]
    fn valid_input_passes() {
        let item = parse::<Item>(&json!({"name": "soap", "price": 0.0, "read_time": 3}), "x").unwrap();
        assert_eq!(item.name, "soap");
    }
}
