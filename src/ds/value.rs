use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::ds::record::RecordData;
use crate::ds::types::TypeDescriptor;

pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Rc<RefCell<ArrayData>>),
    List(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<MapData>>),
    Optional(Rc<Option<Value>>),
    Record(Rc<RefCell<RecordData>>),
}

impl Value {
    pub fn array(element_type: TypeDescriptor, items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(ArrayData::new(element_type, items))))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn map(data: MapData) -> Value {
        Value::Map(Rc::new(RefCell::new(data)))
    }

    pub fn optional_of(value: Value) -> Value {
        Value::Optional(Rc::new(Some(value)))
    }

    pub fn optional_empty() -> Value {
        Value::Optional(Rc::new(None))
    }

    pub fn record(data: RecordData) -> Value {
        Value::Record(Rc::new(RefCell::new(data)))
    }

    pub fn type_of(&self) -> TypeDescriptor {
        TypeDescriptor::of(self)
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Integer(i) => Value::Integer(*i),
            Value::Float(n) => Value::Float(*n),
            Value::String(s) => Value::String(s.to_string()),
            Value::Array(a) => Value::Array(a.clone()),
            Value::List(l) => Value::List(l.clone()),
            Value::Map(m) => Value::Map(m.clone()),
            Value::Optional(o) => Value::Optional(o.clone()),
            Value::Record(r) => Value::Record(r.clone()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(a) => {
                let a = a.borrow();
                write!(f, "[")?;
                for (i, item) in a.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::List(l) => {
                let l = l.borrow();
                write!(f, "[")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                let m = m.borrow();
                write!(f, "{{")?;
                for (i, (key, value)) in m.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Optional(o) => match &**o {
                Some(v) => write!(f, "optional({})", v),
                None => write!(f, "optional()"),
            },
            Value::Record(r) => write!(f, "{}", r.borrow().type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Integer(i) => write!(f, "Value::Integer({})", i),
            Value::Float(n) => write!(f, "Value::Float({})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Array(_) => write!(f, "Value::Array(...)"),
            Value::List(_) => write!(f, "Value::List(...)"),
            Value::Map(_) => write!(f, "Value::Map(...)"),
            Value::Optional(o) => match &**o {
                Some(v) => write!(f, "Value::Optional({:?})", v),
                None => write!(f, "Value::Optional(empty)"),
            },
            Value::Record(r) => write!(f, "Value::Record({})", r.borrow().type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Optional(a), Value::Optional(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Fixed-length, element-typed storage. The length never changes after
/// construction; only element slots can be written.
pub struct ArrayData {
    element_type: TypeDescriptor,
    items: Vec<Value>,
}

impl ArrayData {
    pub fn new(element_type: TypeDescriptor, items: Vec<Value>) -> Self {
        ArrayData {
            element_type,
            items,
        }
    }

    pub fn element_type(&self) -> &TypeDescriptor {
        &self.element_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn set(&mut self, index: usize, value: Value) {
        if index < self.items.len() {
            self.items[index] = value;
        }
    }
}

/// Keyed storage with an optional read-only mode.
pub struct MapData {
    entries: HashMap<MapKey, Value>,
    read_only: bool,
}

impl MapData {
    pub fn new() -> Self {
        MapData {
            entries: HashMap::new(),
            read_only: false,
        }
    }

    /// Mark this map read-only. Writes through a resolver will be rejected.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_entry(mut self, key: MapKey, value: Value) -> Self {
        self.entries.insert(key, value);
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn entries(&self) -> &HashMap<MapKey, Value> {
        &self.entries
    }

    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: MapKey, value: Value) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MapData {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashable subset of `Value` usable as a mapping key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl MapKey {
    /// Convert a property value into a key. Only strings, integers and
    /// booleans are keyable.
    pub fn from_value(value: &Value) -> Option<MapKey> {
        match value {
            Value::String(s) => Some(MapKey::Str(s.to_string())),
            Value::Integer(i) => Some(MapKey::Int(*i)),
            Value::Boolean(b) => Some(MapKey::Bool(*b)),
            _ => None,
        }
    }
}

impl Display for MapKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Str(s) => write!(f, "{}", s),
            MapKey::Int(i) => write!(f, "{}", i),
            MapKey::Bool(b) => write!(f, "{}", b),
        }
    }
}
