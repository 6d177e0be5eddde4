//! Type descriptors for resolved properties.
//!
//! A `TypeDescriptor` names the most general shape a resolver accepts or
//! produces. It is deliberately coarser than a value's concrete contents:
//! an array of integers reports its element type as `Integer` even when a
//! slot currently holds `Null`.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::ds::value::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// The universal top type. Accepts any value.
    Any,
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    List,
    Map,
    Optional,
    Record,
}

impl TypeDescriptor {
    /// The runtime descriptor of a value.
    pub fn of(value: &Value) -> TypeDescriptor {
        match value {
            Value::Null => TypeDescriptor::Null,
            Value::Boolean(_) => TypeDescriptor::Boolean,
            Value::Integer(_) => TypeDescriptor::Integer,
            Value::Float(_) => TypeDescriptor::Float,
            Value::String(_) => TypeDescriptor::String,
            Value::Array(_) => TypeDescriptor::Array,
            Value::List(_) => TypeDescriptor::List,
            Value::Map(_) => TypeDescriptor::Map,
            Value::Optional(_) => TypeDescriptor::Optional,
            Value::Record(_) => TypeDescriptor::Record,
        }
    }

    /// Whether a value of type `other` can be stored in a slot declared as
    /// `self` without conversion. `Any` accepts everything, `Null` assigns
    /// anywhere, and an integer widens into a float slot.
    pub fn is_assignable_from(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Any, _) => true,
            (_, TypeDescriptor::Null) => true,
            (TypeDescriptor::Float, TypeDescriptor::Integer) => true,
            (a, b) => a == b,
        }
    }

    /// Widening union used when aggregating common property types across a
    /// resolver chain: equal descriptors collapse, any disagreement widens
    /// to `Any`.
    pub fn widen(&self, other: &TypeDescriptor) -> TypeDescriptor {
        if self == other {
            self.clone()
        } else {
            TypeDescriptor::Any
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeDescriptor::Any => "any",
            TypeDescriptor::Null => "null",
            TypeDescriptor::Boolean => "boolean",
            TypeDescriptor::Integer => "integer",
            TypeDescriptor::Float => "float",
            TypeDescriptor::String => "string",
            TypeDescriptor::Array => "array",
            TypeDescriptor::List => "list",
            TypeDescriptor::Map => "map",
            TypeDescriptor::Optional => "optional",
            TypeDescriptor::Record => "record",
        };
        write!(f, "{}", name)
    }
}
