//! Resolver for map bases — keyed storage accepting string, integer and
//! boolean keys.
//!
//! A mapping accepts arbitrary keys, so a lookup of an absent key resolves
//! to `Value::Null` rather than failing: the pair is handled and the answer
//! is legitimately the absence-value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::{MapData, MapKey, Value};
use crate::resolver::context::ResolutionContext;
use crate::resolver::resolver::{Outcome, Resolver};

pub struct MapResolver;

impl MapResolver {
    pub fn new() -> Self {
        MapResolver
    }
}

impl Default for MapResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn map_base(base: Option<&Value>) -> Option<Rc<RefCell<MapData>>> {
    match base {
        Some(Value::Map(entries)) => Some(entries.clone()),
        _ => None,
    }
}

fn map_key(property: Option<&Value>) -> Result<MapKey, ResolveError> {
    let property =
        property.ok_or_else(|| ResolveError::PropertyNotFound("map key missing".to_string()))?;
    MapKey::from_value(property).ok_or_else(|| {
        ResolveError::PropertyNotFound(format!("'{}' cannot be used as a mapping key", property))
    })
}

impl Resolver for MapResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let entries = match map_base(base) {
            Some(entries) => entries,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let key = map_key(property)?;
        let entries = entries.borrow();
        Ok(Outcome::Resolved(
            entries.get(&key).cloned().unwrap_or(Value::Null),
        ))
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        let entries = match map_base(base) {
            Some(entries) => entries,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let key = map_key(property)?;
        let mut entries = entries.borrow_mut();
        if entries.is_read_only() {
            return Err(ResolveError::PropertyNotWritable(format!(
                "map is read-only, cannot write key '{}'",
                key
            )));
        }
        entries.insert(key, value);
        Ok(Outcome::Resolved(()))
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        let entries = match map_base(base) {
            Some(entries) => entries,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        map_key(property)?;
        if entries.borrow().is_read_only() {
            Ok(Outcome::Resolved(None))
        } else {
            Ok(Outcome::Resolved(Some(TypeDescriptor::Any)))
        }
    }

    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError> {
        let entries = match map_base(base) {
            Some(entries) => entries,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        map_key(property)?;
        let read_only = entries.borrow().is_read_only();
        Ok(Outcome::Resolved(read_only))
    }

    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            Some(Value::Map(_)) => Some(TypeDescriptor::Any),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "map"
    }
}
