//! Built-in coercion rules — the fallback behind
//! [`ResolutionContext::convert_to_type`](crate::resolver::context::ResolutionContext::convert_to_type).
//!
//! These rules are intentionally minimal: identity, null propagation,
//! integer-to-float widening, rendering to string, and parsing from string.
//! Anything richer belongs in a resolver's `convert_to_type` hook.

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;

/// Coerce `value` to `target`, or fail with an evaluation error.
pub fn coerce(value: &Value, target: &TypeDescriptor) -> Result<Value, ResolveError> {
    if let TypeDescriptor::Any = target {
        return Ok(value.clone());
    }
    if let Value::Null = value {
        return Ok(Value::Null);
    }
    if target.is_assignable_from(&value.type_of()) {
        return Ok(widened(value, target));
    }
    match target {
        TypeDescriptor::String => Ok(Value::String(value.to_string())),
        TypeDescriptor::Integer => match value {
            Value::Float(n) if n.fract() == 0.0 => Ok(Value::Integer(*n as i64)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| cannot_coerce(value, target)),
            _ => Err(cannot_coerce(value, target)),
        },
        TypeDescriptor::Float => match value {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| cannot_coerce(value, target)),
            _ => Err(cannot_coerce(value, target)),
        },
        TypeDescriptor::Boolean => match value {
            Value::String(s) => match s.trim() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(cannot_coerce(value, target)),
            },
            _ => Err(cannot_coerce(value, target)),
        },
        _ => Err(cannot_coerce(value, target)),
    }
}

/// Coerce a property value to a sequence index.
pub fn coerce_to_index(property: &Value) -> Option<i64> {
    match property {
        Value::Integer(i) => Some(*i),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn widened(value: &Value, target: &TypeDescriptor) -> Value {
    match (value, target) {
        (Value::Integer(i), TypeDescriptor::Float) => Value::Float(*i as f64),
        _ => value.clone(),
    }
}

fn cannot_coerce(value: &Value, target: &TypeDescriptor) -> ResolveError {
    ResolveError::evaluation(format!(
        "cannot coerce {} ({}) to {}",
        value,
        value.type_of(),
        target
    ))
}
