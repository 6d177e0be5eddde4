//! Resolver for record bases — named fields and native method invocation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ds::error::ResolveError;
use crate::ds::record::{MethodEntry, NativeFn, RecordData};
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;
use crate::resolver::resolver::{Outcome, Resolver};

pub struct RecordResolver;

impl RecordResolver {
    pub fn new() -> Self {
        RecordResolver
    }
}

impl Default for RecordResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn record_base(base: Option<&Value>) -> Option<Rc<RefCell<RecordData>>> {
    match base {
        Some(Value::Record(record)) => Some(record.clone()),
        _ => None,
    }
}

fn field_name(property: Option<&Value>) -> Result<String, ResolveError> {
    let property = property
        .ok_or_else(|| ResolveError::PropertyNotFound("record field name missing".to_string()))?;
    Ok(property.to_string())
}

/// Pick the method body matching the call. A declared signature wins on an
/// exact `param_types` match; without declared `param_types`, overloads are
/// selected by arity and argument assignability, and an entry with no
/// declared signature accepts anything.
fn select_overload(
    entries: &[MethodEntry],
    param_types: Option<&[TypeDescriptor]>,
    params: &[Value],
) -> Option<NativeFn> {
    if let Some(signature) = param_types {
        return entries
            .iter()
            .find(|entry| entry.param_types.as_deref() == Some(signature))
            .map(|entry| entry.body);
    }
    entries
        .iter()
        .find(|entry| match &entry.param_types {
            Some(declared) => {
                declared.len() == params.len()
                    && declared
                        .iter()
                        .zip(params.iter())
                        .all(|(expected, arg)| expected.is_assignable_from(&arg.type_of()))
            }
            None => true,
        })
        .map(|entry| entry.body)
}

impl Resolver for RecordResolver {
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError> {
        let record = match record_base(base) {
            Some(record) => record,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let name = field_name(property)?;
        let record = record.borrow();
        match record.field(&name) {
            Some(slot) => Ok(Outcome::Resolved(slot.value.clone())),
            None => Err(ResolveError::PropertyNotFound(format!(
                "{} has no property '{}'",
                record.type_name(),
                name
            ))),
        }
    }

    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        value: Value,
    ) -> Result<Outcome<()>, ResolveError> {
        let record = match record_base(base) {
            Some(record) => record,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let name = field_name(property)?;
        let mut record = record.borrow_mut();
        let type_name = record.type_name().to_string();
        match record.field_mut(&name) {
            Some(slot) => {
                if slot.read_only {
                    return Err(ResolveError::PropertyNotWritable(format!(
                        "{}.{} is read-only",
                        type_name, name
                    )));
                }
                if !slot.declared_type.is_assignable_from(&value.type_of()) {
                    return Err(ResolveError::evaluation(format!(
                        "{} is not assignable to {}.{} ({})",
                        value.type_of(),
                        type_name,
                        name,
                        slot.declared_type
                    )));
                }
                slot.value = value;
                Ok(Outcome::Resolved(()))
            }
            None => Err(ResolveError::PropertyNotFound(format!(
                "{} has no property '{}'",
                type_name, name
            ))),
        }
    }

    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError> {
        let record = match record_base(base) {
            Some(record) => record,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let name = field_name(property)?;
        let record = record.borrow();
        match record.field(&name) {
            Some(slot) if slot.read_only => Ok(Outcome::Resolved(None)),
            Some(slot) => Ok(Outcome::Resolved(Some(slot.declared_type.clone()))),
            None => Err(ResolveError::PropertyNotFound(format!(
                "{} has no property '{}'",
                record.type_name(),
                name
            ))),
        }
    }

    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError> {
        let record = match record_base(base) {
            Some(record) => record,
            None => return Ok(Outcome::Declined),
        };
        ctx.note_resolved(base, property);
        let name = field_name(property)?;
        let record = record.borrow();
        match record.field(&name) {
            Some(slot) => Ok(Outcome::Resolved(slot.read_only)),
            None => Err(ResolveError::PropertyNotFound(format!(
                "{} has no property '{}'",
                record.type_name(),
                name
            ))),
        }
    }

    fn common_property_type(
        &self,
        _ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor> {
        match base {
            Some(Value::Record(_)) => Some(TypeDescriptor::String),
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
        let record = match record_base(base) {
            Some(record) => record,
            None => return Ok(Outcome::Declined),
        };
        let method_value = Value::String(method.to_string());
        ctx.note_resolved(base, Some(&method_value));
        let body = {
            let record = record.borrow();
            let entries = record.methods_named(method).ok_or_else(|| {
                ResolveError::MethodNotFound(format!("{}.{}", record.type_name(), method))
            })?;
            select_overload(entries, param_types, params).ok_or_else(|| {
                ResolveError::MethodNotFound(format!(
                    "no overload of {}.{} matches the call",
                    record.type_name(),
                    method
                ))
            })?
        };
        let this = Value::Record(record.clone());
        let result = body(ctx, &this, params)?;
        Ok(Outcome::Resolved(result))
    }

    fn name(&self) -> &str {
        "record"
    }
}
