use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    constants::{MAX_CHAR_FIELD_LENGTH, PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS},
    error::ValidationError,
};

/// Inbound payloads must be JSON objects; anything else is rejected up
/// front with a non-field error.
pub fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    match value.as_object() {
        Some(map) => Ok(map),
        None => {
            let mut errors = ValidationError::new();
            errors.add("non_field_errors", "Invalid data. Expected an object.");
            Err(errors)
        }
    }
}

pub fn string_field(
    map: &Map<String, Value>,
    key: &str,
    required: bool,
    allow_blank: bool,
    errors: &mut ValidationError,
) -> Option<String> {
    match map.get(key) {
        Some(Value::String(value)) => {
            if !allow_blank && value.is_empty() {
                errors.add(key, "This field may not be blank.");
                None
            } else if value.chars().count() > MAX_CHAR_FIELD_LENGTH {
                errors.add(
                    key,
                    &format!(
                        "Ensure this field has no more than {MAX_CHAR_FIELD_LENGTH} characters."
                    ),
                );
                None
            } else {
                Some(value.clone())
            }
        }
        Some(Value::Null) | None => {
            if required {
                errors.add(key, "This field is required.");
            }
            None
        }
        Some(_) => {
            errors.add(key, "Not a valid string.");
            None
        }
    }
}

/* Accepts JSON numbers and numeric strings, the way a form post would
arrive. Fractions are not silently truncated. */
pub fn integer_field(
    map: &Map<String, Value>,
    key: &str,
    required: bool,
    errors: &mut ValidationError,
) -> Option<i32> {
    let parsed = match map.get(key) {
        Some(Value::Number(value)) => value.as_i64().and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(value)) => value.trim().parse::<i32>().ok(),
        Some(Value::Null) | None => {
            if required {
                errors.add(key, "This field is required.");
            }
            return None;
        }
        Some(_) => None,
    };

    match parsed {
        Some(value) => Some(value),
        None => {
            errors.add(key, "A valid integer is required.");
            None
        }
    }
}

pub fn decimal_field(
    map: &Map<String, Value>,
    key: &str,
    required: bool,
    errors: &mut ValidationError,
) -> Option<Decimal> {
    let parsed = match map.get(key) {
        Some(Value::Number(value)) => parse_decimal(&value.to_string()),
        Some(Value::String(value)) => parse_decimal(value.trim()),
        Some(Value::Null) | None => {
            if required {
                errors.add(key, "This field is required.");
            }
            return None;
        }
        Some(_) => None,
    };

    let value = match parsed {
        Some(value) => value,
        None => {
            errors.add(key, "A valid number is required.");
            return None;
        }
    };

    if value.scale() > PRICE_DECIMAL_PLACES {
        errors.add(
            key,
            &format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        );
        return None;
    }

    let integer_limit = Decimal::from(10i64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));
    if value.abs() >= integer_limit {
        errors.add(
            key,
            &format!("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."),
        );
        return None;
    }

    Some(value)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Nested `{name, ...}` lists for the recipe relations. Returns `None`
/// when the key is absent so callers can tell "leave associations alone"
/// apart from "clear them" (an explicit empty list).
pub fn name_list_field(
    map: &Map<String, Value>,
    key: &str,
    errors: &mut ValidationError,
) -> Option<Vec<String>> {
    let items = match map.get(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return None,
        Some(_) => {
            errors.add(key, "Expected a list of items.");
            return None;
        }
    };

    let mut names = Vec::with_capacity(items.len());
    let mut valid = true;
    for (index, item) in items.iter().enumerate() {
        let object = match item.as_object() {
            Some(object) => object,
            None => {
                errors.add(key, &format!("Item {index}: expected an object."));
                valid = false;
                continue;
            }
        };

        let mut item_errors = ValidationError::new();
        match string_field(object, "name", true, false, &mut item_errors) {
            Some(name) => names.push(name),
            None => {
                for field in item_errors.fields() {
                    let messages = item_errors.field(field).unwrap_or(&[]).join(" ");
                    errors.add(key, &format!("Item {index}, {field}: {messages}"));
                }
                valid = false;
            }
        }
    }

    if valid {
        Some(names)
    } else {
        None
    }
}

/// Render a price the way it is validated: fixed two decimal places.
pub fn format_price(price: &Decimal) -> String {
    let mut price = *price;
    price.rescale(PRICE_DECIMAL_PLACES);
    price.to_string()
}
