//! Resolver for list bases — growable ordered sequences indexed by integer
//! properties, with an optional `length` pseudo-property.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;
use crate::resolver::convert;
use crate::resolver::resolver::{Outcome, Resolver};

lazy_static! {
    static ref LENGTH_PROP: String = "length".to_string();
}

pub struct ListResolver {
    read_only: bool,
    length_property: bool,
}

impl ListResolver {
    pub fn new() -> Self {
        ListResolver {
            read_only: false,
            length_property: false,
        }
    }

    pub fn read_only() -> Self {
        ListResolver {
            read_only: true,
            length_property: false,
        }
    }

    /// Expose the sequence length as a read-only `length` pseudo-property.
    pub fn with_length_property(mut self) -> Self {
        self.length_property = true;
        self
    }

    fn is_length_lookup(&self, property: Option<&Value>) -> bool {
        if !self.length_property {
            return false;
        }
        match property {
            Some(Value::String(name)) => *name == *LENGTH_PROP,
            _ => false,
        }
    }
}

impl Default for ListResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn list_base(base: Option<&Value>) -> Option<Rc<RefCell<Vec<Value>>>> {
    match base {
        Some(Value::List(items)) => Some(items.clone()),
        _ => None,
    }
}

fn index_within(property: Option<&Value>, len: usize) -> Result<usize, ResolveError> {
    let property =
        property.ok_or_else(|| ResolveError::PropertyNotFound("list index missing".to_string()))?;
    let index = convert::coerce_to_index(property).ok_or_else(|| {
        ResolveError::PropertyNotFound(format!("'{}' is not a valid list index", property))
    })?;
    if index < 0 || index as usize >= len {
        return Err(ResolveError::PropertyNotFound(format!(
            "index {} out of range for list of length {}",
            index, len
        )));
    }
    Ok(index as usize)
}

impl Resolver for ListResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let items = match list_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let items = items.borrow();
        if self.is_length_lookup(property) {
            return Ok(Outcome::Resolved(Value::Integer(items.len() as i64)));
        }
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
        let items = match list_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        if self.is_length_lookup(property) {
            return Err(ResolveError::PropertyNotWritable(
                "list length is derived, not settable".to_string(),
            ));
        }
        if self.read_only {
            return Err(ResolveError::PropertyNotWritable(
                "list resolver is read-only".to_string(),
            ));
        }
        let mut items = items.borrow_mut();
        let index = index_within(property, items.len())?;
        items[index] = value;
        Ok(Outcome::Resolved(()))
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        let items = match list_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        if self.is_length_lookup(property) {
            return Ok(Outcome::Resolved(None));
        }
        index_within(property, items.borrow().len())?;
        if self.read_only {
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
        let items = match list_base(base) {
            Some(items) => items,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        if self.is_length_lookup(property) {
            return Ok(Outcome::Resolved(true));
        }
        index_within(property, items.borrow().len())?;
        Ok(Outcome::Resolved(self.read_only))
    }

    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            Some(Value::List(_)) => Some(TypeDescriptor::Integer),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "list"
    }
}
