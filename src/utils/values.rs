// ABOUTME: Lenient coercion of JSON cells into nutrient numbers
// ABOUTME: Numbers and numeric strings are accepted, anything else degrades to absent with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use grocery_core::models::{NutrientField, RawNutrientReading};
use serde_json::{Map, Value};
use tracing::warn;

/// Whether a cell carries no value at all (missing, null or blank)
#[must_use]
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn warn_malformed(value: &Value, product_id: &str, field: &str) {
    warn!(
        product_id,
        field,
        value = %value,
        "Malformed numeric value, treating as absent"
    );
}

/// Coerce a cell into a float, accepting numbers and numeric strings (`"1,5"` included)
#[must_use]
pub fn coerce_f64(value: Option<&Value>, product_id: &str, field: &str) -> Option<f64> {
    if is_blank(value) {
        return None;
    }
    let value = value?;
    let parsed = match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    if parsed.is_none() {
        warn_malformed(value, product_id, field);
    }
    parsed
}

/// Coerce a cell into an integer: numbers truncate toward zero, strings must be integers
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_i64(value: Option<&Value>, product_id: &str, field: &str) -> Option<i64> {
    if is_blank(value) {
        return None;
    }
    let value = value?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && v.abs() < 9.0e15)
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn_malformed(value, product_id, field);
    }
    parsed
}

/// Coerce a cell into text; numbers are rendered, blanks are absent
#[must_use]
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build a reading from a key/value record, with `key` naming the cell of each field
pub fn reading_from_map<'a>(
    map: &Map<String, Value>,
    key: impl Fn(NutrientField) -> &'a str,
    product_id: &str,
) -> RawNutrientReading {
    let float = |field: NutrientField| {
        let name = key(field);
        coerce_f64(map.get(name), product_id, name)
    };
    let energy_key = key(NutrientField::Energy);

    RawNutrientReading {
        energy_kcal: coerce_i64(map.get(energy_key), product_id, energy_key),
        fat_g: float(NutrientField::Fat),
        sat_fat_g: float(NutrientField::SaturatedFat),
        carbs_g: float(NutrientField::Carbohydrates),
        sugars_g: float(NutrientField::Sugars),
        protein_g: float(NutrientField::Protein),
        salt_g: float(NutrientField::Salt),
    }
}
