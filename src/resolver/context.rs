//! Per-evaluation resolution state.
//!
//! A `ResolutionContext` is created once per expression evaluation, handed
//! to every resolver consulted during that evaluation, and discarded when
//! the evaluation ends. The resolver chain itself is configured once and
//! shared; all mutable state lives here.

use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::convert;
use crate::resolver::resolver::{Outcome, Resolver};

/// Key into the context's marker side-table.
///
/// `StandaloneIdentifier` is set by the evaluator (with `Value::Boolean(true)`)
/// before resolving a single, stand-alone top-level identifier, so resolvers
/// with expensive name lookups can skip them for every other kind of lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKey {
    StandaloneIdentifier,
    Named(String),
}

pub struct ResolutionContext {
    resolver: Rc<dyn Resolver>,
    evaluation_id: Uuid,
    resolved: bool,
    resolved_base: Option<Value>,
    resolved_property: Option<Value>,
    markers: HashMap<MarkerKey, Value>,
}

impl ResolutionContext {
    /// Create a context driving the given top-level resolver chain.
    pub fn new(resolver: Rc<dyn Resolver>) -> Self {
        ResolutionContext {
            resolver,
            evaluation_id: Uuid::new_v4(),
            resolved: false,
            resolved_base: None,
            resolved_property: None,
            markers: HashMap::new(),
        }
    }

    /// Unique id of this evaluation, carried into trace events and useful
    /// for correlating diagnostics.
    pub fn evaluation_id(&self) -> Uuid {
        self.evaluation_id
    }

    /// The top-level resolver chain this context drives. Variants that
    /// delegate (like the optional resolver) re-enter the whole chain
    /// through this handle rather than through themselves.
    pub fn resolver(&self) -> Rc<dyn Resolver> {
        self.resolver.clone()
    }

    /// Whether the current resolution attempt has been claimed.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Record that a resolver recognized the given pair. Called by a
    /// resolver the moment it recognizes a (base, property) shape; the last
    /// recording in an attempt is the most specific pair actually resolved.
    pub fn note_resolved(&mut self, base: Option<&Value>, property: Option<&Value>) {
        self.resolved = true;
        self.resolved_base = base.cloned();
        self.resolved_property = property.cloned();
    }

    /// Reset the resolved state for a new, logically distinct resolution
    /// attempt. Markers survive; they are evaluation-scoped.
    pub fn begin_attempt(&mut self) {
        self.resolved = false;
        self.resolved_base = None;
        self.resolved_property = None;
    }

    /// Base of the most specific pair resolved in the current attempt.
    pub fn resolved_base(&self) -> Option<&Value> {
        self.resolved_base.as_ref()
    }

    /// Property of the most specific pair resolved in the current attempt.
    pub fn resolved_property(&self) -> Option<&Value> {
        self.resolved_property.as_ref()
    }

    pub fn put_marker(&mut self, key: MarkerKey, value: Value) {
        self.markers.insert(key, value);
    }

    pub fn marker(&self, key: &MarkerKey) -> Option<&Value> {
        self.markers.get(key)
    }

    pub fn clear_marker(&mut self, key: &MarkerKey) -> Option<Value> {
        self.markers.remove(key)
    }

    /// Whether the evaluator has flagged the current lookup as a single,
    /// stand-alone top-level identifier.
    pub fn is_standalone_identifier(&self) -> bool {
        match self.markers.get(&MarkerKey::StandaloneIdentifier) {
            Some(Value::Boolean(true)) => true,
            _ => false,
        }
    }

    /// Ask the whole system to convert `value` to `target`.
    ///
    /// The resolver chain's conversion hooks are consulted first; if every
    /// resolver declines, the built-in coercion rules apply. An error means
    /// neither path could produce a value of the target type.
    pub fn convert_to_type(
        &mut self,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ResolveError> {
        let chain = self.resolver.clone();
        match chain.convert_to_type(self, value, target)? {
            Outcome::Resolved(converted) => Ok(converted),
            Outcome::Declined => convert::coerce(value, target),
        }
    }
}
