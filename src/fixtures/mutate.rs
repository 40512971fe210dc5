//! Seeded, type-preserving mutation of fixture mappings

use crate::pickle::{Date, Value};
use rand::Rng;

/// Day count of 9999-12-31; mutated dates stay in `1..=MAX_DAYS`
const MAX_DAYS: i32 = 3_652_059;

/// Copy `orig` and replace every value with a random value of the same type
///
/// Entries are visited in insertion order and each replaced scalar consumes
/// exactly one `f64` draw, so the output only depends on the generator state.
pub fn mutate_dict<R: Rng>(orig: &Value, rng: &mut R) -> Value {
    match orig {
        Value::Dict(entries) => Value::Dict(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), mutate_value(value, rng)))
                .collect(),
        ),
        other => mutate_value(other, rng),
    }
}

/// Replace a single value with a same-typed random value
pub fn mutate_value<R: Rng>(value: &Value, rng: &mut R) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(_) => Value::Bool(rng.random::<f64>() < 0.5),
        Value::Int(_) => Value::Int(scaled(rng) as i64),
        Value::Str(_) => Value::Str(scaled(rng).to_string()),
        Value::Date(_) => {
            let days = 1 + (rng.random::<f64>() * f64::from(MAX_DAYS - 1)) as i32;
            Date::from_days(days).map_or(Value::Null, Value::Date)
        }
        Value::List(items) => Value::List(items.iter().map(|v| mutate_value(v, rng)).collect()),
        Value::Tuple(items) => Value::Tuple(items.iter().map(|v| mutate_value(v, rng)).collect()),
        Value::Dict(_) => mutate_dict(value, rng),
    }
}

fn scaled<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>() * i64::MAX as f64
}
