//! Ordered aggregation of resolvers behind the single-resolver contract.
//!
//! The composite consults its children in insertion order and stops at the
//! first one that claims the pair. It is itself a [`Resolver`], so
//! composites nest; a tree of composites is evaluated depth-first
//! left-to-right, which flattens into one total priority order.

use std::rc::Rc;

use tracing::trace;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;
use crate::resolver::resolver::{Outcome, Resolver};

/// An ordered chain of resolvers.
///
/// Insertion order is resolution-priority order. Duplicates are permitted.
/// The chain is meant to be configured once, wrapped in an `Rc`, and shared
/// read-only by every evaluation that uses it.
pub struct CompositeResolver {
    resolvers: Vec<Rc<dyn Resolver>>,
}

impl CompositeResolver {
    pub fn new() -> Self {
        CompositeResolver {
            resolvers: Vec::new(),
        }
    }

    /// Append a resolver at the end of the chain (lowest priority so far).
    pub fn add(mut self, resolver: Rc<dyn Resolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for CompositeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for CompositeResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.get_value(ctx, base, property)? {
                Outcome::Resolved(value) => {
                    trace!(
                        evaluation = %ctx.evaluation_id(),
                        resolver = resolver.name(),
                        "property value resolved"
                    );
                    return Ok(Outcome::Resolved(value));
                }
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.set_value(ctx, base, property, value.clone())? {
                Outcome::Resolved(()) => {
                    trace!(
                        evaluation = %ctx.evaluation_id(),
                        resolver = resolver.name(),
                        "property value written"
                    );
                    return Ok(Outcome::Resolved(()));
                }
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.get_type(ctx, base, property)? {
                Outcome::Resolved(descriptor) => return Ok(Outcome::Resolved(descriptor)),
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.is_read_only(ctx, base, property)? {
                Outcome::Resolved(read_only) => return Ok(Outcome::Resolved(read_only)),
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    /// Union of the children's answers: absent if every child is absent,
    /// otherwise the widened single type covering all non-absent answers,
    /// which collapses to `Any` as soon as two children disagree.
    fn common_property_type(
        &self,
        ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        let mut common: Option<TypeDescriptor> = None;
        for resolver in &self.resolvers {
            if let Some(accepted) = resolver.common_property_type(ctx, base) {
                common = Some(match common {
                    None => accepted,
                    Some(previous) => previous.widen(&accepted),
                });
                if common == Some(TypeDescriptor::Any) {
                    break;
                }
            }
        }
        common
    }

    fn invoke(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        method: &str,
        param_types: Option<&[TypeDescriptor]>,
        params: &[Value],
    ) -> Result<Outcome<Value>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.invoke(ctx, base, method, param_types, params)? {
                Outcome::Resolved(value) => {
                    trace!(
                        evaluation = %ctx.evaluation_id(),
                        resolver = resolver.name(),
                        method,
                        "method invoked"
                    );
                    return Ok(Outcome::Resolved(value));
                }
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    fn convert_to_type(
        &self,
        ctx: &mut ResolutionContext,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Result<Outcome<Value>, ResolveError> {
        ctx.begin_attempt();
        for resolver in &self.resolvers {
            match resolver.convert_to_type(ctx, value, target)? {
                Outcome::Resolved(converted) => return Ok(Outcome::Resolved(converted)),
                Outcome::Declined => {}
            }
        }
        Ok(Outcome::Declined)
    }

    fn name(&self) -> &str {
        "composite"
    }
}
