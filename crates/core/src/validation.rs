//! Field-level validation for JSON payloads.
//!
//! Request bodies are read field by field through [`Fields`], which records
//! every problem it finds instead of stopping at the first one. The collected
//! [`FieldErrors`] serialize as a map from field name to an ordered list of
//! messages:
//!
//! ```json
//! {"first_name": ["Invalid name format"], "password": ["Password must be at least 8 characters."]}
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Standard validation messages.
pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const NULL: &str = "This field may not be null.";
    pub const NOT_A_STRING: &str = "Not a valid string.";
    pub const INVALID_NUMBER: &str = "A valid number is required.";
    pub const INVALID_DATE: &str =
        "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
    pub const INVALID_NAME: &str = "Invalid name format";
    pub const INVALID_EMAIL: &str = "Enter a valid email address.";
    pub const EMAIL_DOMAIN: &str = "Email must end with @gmail.com.";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
    pub const EMAIL_TAKEN: &str = "User with this email already exists.";
    pub const NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";

    /// Foreign key points at a row that does not exist.
    #[must_use]
    pub fn does_not_exist(pk: impl std::fmt::Display) -> String {
        format!("Invalid pk \"{pk}\" - object does not exist.")
    }

    /// Foreign key value of the wrong JSON type.
    #[must_use]
    pub fn incorrect_pk_type(received: &str) -> String {
        format!("Incorrect type. Expected pk value, received {received}.")
    }

    #[must_use]
    pub fn max_length(max: usize) -> String {
        format!("Ensure this field has no more than {max} characters.")
    }

    #[must_use]
    pub fn max_digits(max: u32) -> String {
        format!("Ensure that there are no more than {max} digits in total.")
    }

    #[must_use]
    pub fn max_decimal_places(max: u32) -> String {
        format!("Ensure that there are no more than {max} decimal places.")
    }

    #[must_use]
    pub fn max_whole_digits(max: u32) -> String {
        format!("Ensure that there are no more than {max} digits before the decimal point.")
    }
}

/// Validation errors keyed by field name.
///
/// Messages for a field keep the order in which they were added; fields are
/// ordered by name so responses are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error map holding a single message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append a message to a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether the field has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field has a message.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Reads typed values out of a JSON object while collecting [`FieldErrors`].
///
/// In full mode every field read is required. In partial mode (used for
/// `PATCH`) absent fields are skipped silently and read as `None`.
pub struct Fields<'a> {
    data: &'a Map<String, Value>,
    partial: bool,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    /// Reader for a full write: every field read is required.
    #[must_use]
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self {
            data,
            partial: false,
            errors: FieldErrors::new(),
        }
    }

    /// Reader for a partial write: absent fields are skipped.
    #[must_use]
    pub fn partial(data: &'a Map<String, Value>) -> Self {
        Self {
            data,
            partial: true,
            errors: FieldErrors::new(),
        }
    }

    /// Fetch a present, non-null value or record why it is missing.
    fn value(&mut self, name: &str) -> Option<&'a Value> {
        match self.data.get(name) {
            None => {
                if !self.partial {
                    self.errors.add(name, messages::REQUIRED);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, messages::NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Read a required, non-blank string, trimming surrounding whitespace.
    pub fn string(&mut self, name: &str, max_length: usize) -> Option<String> {
        let raw = self.text(name)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.errors.add(name, messages::BLANK);
            return None;
        }
        if trimmed.chars().count() > max_length {
            self.errors.add(name, messages::max_length(max_length));
            return None;
        }
        Some(trimmed.to_owned())
    }

    /// Read a required string exactly as sent (no trimming), rejecting empty input.
    pub fn untrimmed_string(&mut self, name: &str) -> Option<String> {
        let raw = self.text(name)?;
        if raw.is_empty() {
            self.errors.add(name, messages::BLANK);
            return None;
        }
        Some(raw.to_owned())
    }

    fn text(&mut self, name: &str) -> Option<&'a str> {
        match self.value(name)? {
            Value::String(s) => Some(s.as_str()),
            _ => {
                self.errors.add(name, messages::NOT_A_STRING);
                None
            }
        }
    }

    /// Read a decimal number given either as a JSON number or a numeric string.
    pub fn decimal(&mut self, name: &str, max_digits: u32, decimal_places: u32) -> Option<Decimal> {
        let parsed = match self.value(name)? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };

        let Some(value) = parsed else {
            self.errors.add(name, messages::INVALID_NUMBER);
            return None;
        };

        let normalized = value.normalize();
        let scale = normalized.scale();
        #[allow(clippy::cast_possible_truncation)] // an i128 has at most 39 digits
        let mantissa_digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
        let digits = mantissa_digits.max(scale);
        let whole_digits = digits - scale;
        let max_whole_digits = max_digits.saturating_sub(decimal_places);

        if digits > max_digits {
            self.errors.add(name, messages::max_digits(max_digits));
            None
        } else if scale > decimal_places {
            self.errors.add(name, messages::max_decimal_places(decimal_places));
            None
        } else if whole_digits > max_whole_digits {
            self.errors.add(name, messages::max_whole_digits(max_whole_digits));
            None
        } else {
            Some(value)
        }
    }

    /// Read a primary key reference given as an integer or integer string.
    ///
    /// Only the shape is checked here; whether the row exists is up to the caller.
    pub fn primary_key(&mut self, name: &str) -> Option<i32> {
        let value = self.value(name)?;
        let result = match value {
            Value::Number(n) if !n.is_f64() => n
                .as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .filter(|id| *id > 0)
                .ok_or_else(|| messages::does_not_exist(n)),
            Value::String(s) => s
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| {
                    if s.trim().parse::<i64>().is_ok() {
                        messages::does_not_exist(s)
                    } else {
                        messages::incorrect_pk_type("str")
                    }
                }),
            other => Err(messages::incorrect_pk_type(json_type_name(other))),
        };

        match result {
            Ok(id) => Some(id),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }

    /// Read an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub fn date(&mut self, name: &str) -> Option<NaiveDate> {
        let parsed = match self.value(name)? {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(name, messages::INVALID_DATE);
        }
        parsed
    }

    /// Read a string and parse it with `FromStr`, reporting the parse error's message.
    pub fn choice<T>(&mut self, name: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = match self.value(name)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.add(name, err.to_string());
                None
            }
        }
    }

    /// Whether the payload carries the field at all.
    #[must_use]
    pub fn is_present(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Record an error that was detected outside the reader.
    pub fn add_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    /// Whether an error was recorded for the field.
    #[must_use]
    pub fn has_error(&self, name: &str) -> bool {
        self.errors.contains(name)
    }

    /// Consume the reader, failing if any error was recorded.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] if any field failed.
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }

    /// Consume the reader, returning whatever errors were recorded.
    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_required_blank_and_null() {
        let data = object(json!({"name": "  ", "address": null}));
        let mut fields = Fields::new(&data);

        assert_eq!(fields.string("name", 255), None);
        assert_eq!(fields.string("address", 255), None);
        assert_eq!(fields.string("city", 255), None);

        let errors = fields.finish().unwrap_err();
        assert_eq!(errors.get("name").unwrap(), [messages::BLANK]);
        assert_eq!(errors.get("address").unwrap(), [messages::NULL]);
        assert_eq!(errors.get("city").unwrap(), [messages::REQUIRED]);
    }

    #[test]
    fn test_partial_skips_absent_fields() {
        let data = object(json!({"status": "confirmed"}));
        let mut fields = Fields::partial(&data);

        assert_eq!(fields.date("check_in"), None);
        assert_eq!(fields.choice::<crate::ReservationStatus>("status"), Some(crate::ReservationStatus::Confirmed));
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn test_decimal_accepts_numbers_and_numeric_strings() {
        let data = object(json!({"a": 100.0, "b": "99.5", "c": 42}));
        let mut fields = Fields::new(&data);

        assert_eq!(fields.decimal("a", 10, 2), Some(Decimal::new(100, 0)));
        assert_eq!(fields.decimal("b", 10, 2), Some(Decimal::new(995, 1)));
        assert_eq!(fields.decimal("c", 10, 2), Some(Decimal::new(42, 0)));
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn test_decimal_rejects_non_numbers() {
        let data = object(json!({"a": "invalid", "b": true, "c": ""}));
        let mut fields = Fields::new(&data);

        assert_eq!(fields.decimal("a", 10, 2), None);
        assert_eq!(fields.decimal("b", 10, 2), None);
        assert_eq!(fields.decimal("c", 10, 2), None);

        let errors = fields.finish().unwrap_err();
        for field in ["a", "b", "c"] {
            assert_eq!(errors.get(field).unwrap(), [messages::INVALID_NUMBER]);
        }
    }

    #[test]
    fn test_decimal_precision_limits() {
        let data = object(json!({"places": "1.234", "digits": "123456789.5", "ok": "12345678.90"}));
        let mut fields = Fields::new(&data);

        assert_eq!(fields.decimal("places", 10, 2), None);
        assert_eq!(fields.decimal("digits", 10, 2), None);
        assert!(fields.decimal("ok", 10, 2).is_some());

        let errors = fields.finish().unwrap_err();
        assert_eq!(
            errors.get("places").unwrap(),
            [messages::max_decimal_places(2)]
        );
        assert_eq!(
            errors.get("digits").unwrap(),
            [messages::max_whole_digits(8)]
        );
    }

    #[test]
    fn test_primary_key_shapes() {
        let data = object(json!({"a": 3, "b": "4", "c": "Hotel A", "d": -1, "e": [1], "f": 1.0}));
        let mut fields = Fields::new(&data);

        assert_eq!(fields.primary_key("a"), Some(3));
        assert_eq!(fields.primary_key("b"), Some(4));
        assert_eq!(fields.primary_key("c"), None);
        assert_eq!(fields.primary_key("d"), None);
        assert_eq!(fields.primary_key("e"), None);
        assert_eq!(fields.primary_key("f"), None);

        let errors = fields.finish().unwrap_err();
        assert_eq!(
            errors.get("c").unwrap(),
            ["Incorrect type. Expected pk value, received str."]
        );
        assert_eq!(
            errors.get("d").unwrap(),
            ["Invalid pk \"-1\" - object does not exist."]
        );
        assert_eq!(
            errors.get("e").unwrap(),
            ["Incorrect type. Expected pk value, received list."]
        );
        assert_eq!(
            errors.get("f").unwrap(),
            ["Incorrect type. Expected pk value, received float."]
        );
    }

    #[test]
    fn test_date_format() {
        let data = object(json!({"ok": "2026-03-01", "bad": "01/03/2026"}));
        let mut fields = Fields::new(&data);

        assert_eq!(
            fields.date("ok"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(fields.date("bad"), None);
        assert!(fields.has_error("bad"));
    }

    #[test]
    fn test_errors_serialize_as_map_of_lists() {
        let mut errors = FieldErrors::single("email", messages::EMAIL_DOMAIN);
        errors.add("email", messages::EMAIL_TAKEN);

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"email": [messages::EMAIL_DOMAIN, messages::EMAIL_TAKEN]})
        );
        assert_eq!(
            errors.to_string(),
            "email: Email must end with @gmail.com.; email: User with this email already exists."
        );
    }
}
