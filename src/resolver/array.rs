//! Resolver for array bases — fixed-length, element-typed storage indexed
//! by integer properties.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::{ArrayData, Value};
use crate::resolver::context::ResolutionContext;
use crate::resolver::convert;
use crate::resolver::resolver::{Outcome, Resolver};

pub struct ArrayResolver {
    read_only: bool,
}

impl ArrayResolver {
    pub fn new() -> Self {
        ArrayResolver { read_only: false }
    }

    /// A variant that rejects all writes regardless of the array's own
    /// shape.
    pub fn read_only() -> Self {
        ArrayResolver { read_only: true }
    }
}

impl Default for ArrayResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn array_base(base: Option<&Value>) -> Option<Rc<RefCell<ArrayData>>> {
    match base {
        Some(Value::Array(items)) => Some(items.clone()),
        _ => None,
    }
}

fn index_within(property: Option<&Value>, len: usize) -> Result<usize, ResolveError> {
    let property =
        property.ok_or_else(|| ResolveError::PropertyNotFound("array index missing".to_string()))?;
    let index = convert::coerce_to_index(property).ok_or_else(|| {
        ResolveError::PropertyNotFound(format!("'{}' is not a valid array index", property))
    })?;
    if index < 0 || index as usize >= len {
        return Err(ResolveError::PropertyNotFound(format!(
            "index {} out of range for array of length {}",
            index, len
        )));
    }
    Ok(index as usize)
}

impl Resolver for ArrayResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let items = match array_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let items = items.borrow();
        let index = index_within(property, items.len())?;
        Ok(Outcome::Resolved(
            items.get(index).cloned().unwrap_or(Value::Null),
        ))
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        let items = match array_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        if self.read_only {
            return Err(ResolveError::PropertyNotWritable(
                "array resolver is read-only".to_string(),
            ));
        }
        let mut items = items.borrow_mut();
        let index = index_within(property, items.len())?;
        if !items.element_type().is_assignable_from(&value.type_of()) {
            return Err(ResolveError::evaluation(format!(
                "{} is not assignable to array of {}",
                value.type_of(),
                items.element_type()
            )));
        }
        items.set(index, value);
        Ok(Outcome::Resolved(()))
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        let items = match array_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let items = items.borrow();
        index_within(property, items.len())?;
        if self.read_only {
            Ok(Outcome::Resolved(None))
        } else {
            // The declared element type, not the runtime type of the slot.
            Ok(Outcome::Resolved(Some(items.element_type().clone())))
        }
    }

    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError> {
        let items = match array_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        index_within(property, items.borrow().len())?;
        Ok(Outcome::Resolved(self.read_only))
    }

    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            Some(Value::Array(_)) => Some(TypeDescriptor::Integer),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "array"
    }
}
