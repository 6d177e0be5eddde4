//! Resolver for optional-wrapper bases — containers holding zero or one
//! value.
//!
//! This resolver is transparent: resolving a property on a non-empty
//! wrapper forwards one level of indirection, re-entering the top-level
//! chain (obtained from the context, never from itself) with the unwrapped
//! inner value as the base. Wrappers are immutable, so the resolver is
//! always read-only.
//!
//! Resolution rules for a recognized base:
//!
//! - empty wrapper, no property requested → `Value::Null`
//! - non-empty wrapper, no property requested → the unwrapped inner value
//! - non-empty wrapper, property requested → delegate to the top-level
//!   chain with the inner value as base
//! - empty wrapper, property requested → `Value::Null`, no delegation

use std::rc::Rc;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;
use crate::resolver::resolver::{Outcome, Resolver};

pub struct OptionalResolver;

impl OptionalResolver {
    pub fn new() -> Self {
        OptionalResolver
    }
}

impl Default for OptionalResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn optional_base(base: Option<&Value>) -> Option<Rc<Option<Value>>> {
    match base {
        Some(Value::Optional(inner)) => Some(inner.clone()),
        _ => None,
    }
}

impl Resolver for OptionalResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let inner = match optional_base(base) {
            Some(inner) => inner,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        match (&*inner, property) {
            (None, _) => Ok(Outcome::Resolved(Value::Null)),
            (Some(value), None) => Ok(Outcome::Resolved(value.clone())),
            (Some(value), Some(_)) => {
                let chain = ctx.resolver();
                chain.get_value(ctx, Some(value), property)
            }
        }
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        _value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        if optional_base(base).is_none() {
            return Ok(Outcome::Declined);
        }
        // Writability is rejected before the wrapped path is even examined.
        ctx.note_resolved(base, property);
        Err(ResolveError::PropertyNotWritable(
            "optional wrappers are immutable".to_string(),
        ))
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        if optional_base(base).is_none() {
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
        if optional_base(base).is_none() {
            return Ok(Outcome::Declined);
        }
        ctx.note_resolved(base, property);
        Ok(Outcome::Resolved(true))
    }

    /// After unwrapping, any property might apply.
    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            Some(Value::Optional(_)) => Some(TypeDescriptor::Any),
            _ => None,
        }
    }

    fn invoke(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        method: &str,
        param_types: Option<&[TypeDescriptor]>,
        params: &[Value],
    ) -> Result<Outcome<Value>, ResolveError> {
        let inner = match optional_base(base) {
            Some(inner) => inner,
            None => return Ok(Outcome::Declined),
        };
        let method_value = Value::String(method.to_string());
        ctx.note_resolved(base, Some(&method_value));
        match &*inner {
            None => Ok(Outcome::Resolved(Value::Null)),
            Some(value) => {
                let chain = ctx.resolver();
                chain.invoke(ctx, Some(value), method, param_types, params)
            }
        }
    }

    fn convert_to_type(
        &self,
        ctx: &mut ResolutionContext,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Result<Outcome<Value>, ResolveError> {
        let inner = match value {
            Value::Optional(inner) => inner.clone(),
            _ => return Ok(Outcome::Declined),
        };
        if let Some(unwrapped) = &*inner {
            if target.is_assignable_from(&unwrapped.type_of()) {
                return Ok(Outcome::Resolved(unwrapped.clone()));
            }
        }
        let unwrapped_or_null = match &*inner {
            Some(unwrapped) => unwrapped.clone(),
            None => Value::Null,
        };
        // A failed generic conversion declines so the rest of the chain
        // still gets a chance at the wrapper.
        match ctx.convert_to_type(&unwrapped_or_null, target) {
            Ok(converted) => Ok(Outcome::Resolved(converted)),
            Err(_) => Ok(Outcome::Declined),
        }
    }

    fn name(&self) -> &str {
        "optional"
    }
}
