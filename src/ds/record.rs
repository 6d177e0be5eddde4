//! Record values — named-field objects with native methods.
//!
//! A record is the explicit-field analog of introspection-based property
//! access: each field carries a declared type and a writability flag, and
//! methods are registered as native functions, optionally with declared
//! parameter types so overloads can be told apart.

use std::collections::HashMap;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;

/// Function signature for record methods.
/// Native functions receive the resolution context, the receiver value, and
/// the call arguments.
pub type NativeFn =
    fn(ctx: &mut ResolutionContext, this: &Value, args: &[Value]) -> Result<Value, ResolveError>;

/// A single named field: current value, declared (most general) type, and
/// whether writes are allowed.
pub struct FieldSlot {
    pub value: Value,
    pub declared_type: TypeDescriptor,
    pub read_only: bool,
}

/// One registered method body. `param_types` is the declared signature used
/// for overload selection; `None` means the method accepts any arguments.
pub struct MethodEntry {
    pub param_types: Option<Vec<TypeDescriptor>>,
    pub body: NativeFn,
}

/// Named-field object definition.
pub struct RecordData {
    type_name: String,
    fields: HashMap<String, FieldSlot>,
    methods: HashMap<String, Vec<MethodEntry>>,
}

impl RecordData {
    /// Create a new record with the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        RecordData {
            type_name: type_name.into(),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Add a writable field.
    pub fn add_field(
        mut self,
        name: impl Into<String>,
        declared_type: TypeDescriptor,
        value: Value,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldSlot {
                value,
                declared_type,
                read_only: false,
            },
        );
        self
    }

    /// Add a field that rejects writes.
    pub fn add_read_only_field(
        mut self,
        name: impl Into<String>,
        declared_type: TypeDescriptor,
        value: Value,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldSlot {
                value,
                declared_type,
                read_only: true,
            },
        );
        self
    }

    /// Add a method accepting any arguments.
    pub fn add_method(mut self, name: impl Into<String>, body: NativeFn) -> Self {
        self.methods
            .entry(name.into())
            .or_insert_with(Vec::new)
            .push(MethodEntry {
                param_types: None,
                body,
            });
        self
    }

    /// Add an overload with a declared parameter signature.
    pub fn add_overloaded_method(
        mut self,
        name: impl Into<String>,
        param_types: Vec<TypeDescriptor>,
        body: NativeFn,
    ) -> Self {
        self.methods
            .entry(name.into())
            .or_insert_with(Vec::new)
            .push(MethodEntry {
                param_types: Some(param_types),
                body,
            });
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldSlot> {
        self.fields.get_mut(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn methods_named(&self, name: &str) -> Option<&[MethodEntry]> {
        self.methods.get(name).map(|entries| entries.as_slice())
    }

    pub fn field_names(&self) -> Vec<&String> {
        self.fields.keys().collect()
    }
}
