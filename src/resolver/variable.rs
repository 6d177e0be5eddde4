//! Resolver for top-level names — the bottom of the resolution chain.
//!
//! Handles lookups where the base is absent and the property is a name.
//! Bindings come in two flavors:
//!
//! - **Direct bindings**: materialized up front, always visible.
//! - **Lazy bindings**: a supplier function is registered and the value is
//!   materialized on first access, then cached so each name is built at
//!   most once.
//!
//! Looking up a lazy name is the expensive path, so it is only taken when
//! the evaluator has flagged the lookup as a single, stand-alone
//! identifier via [`MarkerKey::StandaloneIdentifier`]; for every other kind
//! of lookup, lazy names are invisible to this resolver and it declines.
//! Once materialized, a cached name resolves like a direct binding.
//!
//! Top-level bindings are read-only: expression code can observe them but
//! never rebind them.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;
use crate::resolver::resolver::{Outcome, Resolver};

/// Supplier for a lazily materialized top-level value.
pub type VariableSupplier = fn() -> Value;

pub struct VariableResolver {
    bindings: RefCell<HashMap<String, Value>>,
    suppliers: HashMap<String, VariableSupplier>,
}

impl VariableResolver {
    pub fn new() -> Self {
        VariableResolver {
            bindings: RefCell::new(HashMap::new()),
            suppliers: HashMap::new(),
        }
    }

    /// Register an eagerly materialized top-level binding.
    pub fn add_variable(self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.borrow_mut().insert(name.into(), value);
        self
    }

    /// Register a name whose value is built on first stand-alone lookup.
    pub fn add_lazy(mut self, name: impl Into<String>, supplier: VariableSupplier) -> Self {
        self.suppliers.insert(name.into(), supplier);
        self
    }

    /// The name this lookup asks for, if this resolver can recognize it:
    /// base must be absent and the property a string naming a binding. Lazy
    /// names count only for stand-alone identifier lookups.
    fn known_name(
        &self,
        ctx: &ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Option<String> {
        if base.is_some() {
            return None;
        }
        let name = match property {
            Some(Value::String(name)) => name,
            _ => return None,
        };
        if self.bindings.borrow().contains_key(name) {
            return Some(name.to_string());
        }
        if ctx.is_standalone_identifier() && self.suppliers.contains_key(name) {
            return Some(name.to_string());
        }
        None
    }

    fn lookup(&self, ctx: &ResolutionContext, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        let supplier = self.suppliers.get(name)?;
        let value = supplier();
        trace!(
            evaluation = %ctx.evaluation_id(),
            name,
            "top-level binding materialized"
        );
        self.bindings
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Some(value)
    }
}

impl Default for VariableResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for VariableResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let name = match self.known_name(ctx, base, property) {
            Some(name) => name,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        match self.lookup(ctx, &name) {
            Some(value) => Ok(Outcome::Resolved(value)),
            None => Err(ResolveError::PropertyNotFound(format!(
                "top-level name '{}' vanished during lookup",
                name
            ))),
        }
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        _value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        let name = match self.known_name(ctx, base, property) {
            Some(name) => name,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        Err(ResolveError::PropertyNotWritable(format!(
            "top-level name '{}' is read-only",
            name
        )))
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        if self.known_name(ctx, base, property).is_none() {
            return Ok(Outcome::Declined);
        }
        ctx.note_resolved(base, property);
        Ok(Outcome::Resolved(None))
    }

    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError> {
        if self.known_name(ctx, base, property).is_none() {
            return Ok(Outcome::Declined);
        }
        ctx.note_resolved(base, property);
        Ok(Outcome::Resolved(true))
    }

    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            None => Some(TypeDescriptor::String),
            Some(_) => None,
        }
    }

    fn name(&self) -> &str {
        "variable"
    }
}
