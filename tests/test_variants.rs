//! Tests for the concrete resolver variants: arrays, lists, maps,
//! optionals, records, and top-level variables.

extern crate propel;

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use propel::ds::error::ResolveError;
use propel::ds::record::RecordData;
use propel::ds::types::TypeDescriptor;
use propel::ds::value::{MapData, MapKey, Value};
use propel::resolver::array::ArrayResolver;
use propel::resolver::composite::CompositeResolver;
use propel::resolver::context::{MarkerKey, ResolutionContext};
use propel::resolver::list::ListResolver;
use propel::resolver::map::MapResolver;
use propel::resolver::optional::OptionalResolver;
use propel::resolver::record::RecordResolver;
use propel::resolver::resolver::{Outcome, Resolver};
use propel::resolver::variable::VariableResolver;

/// A chain carrying every built-in variant, in the order an evaluator
/// would normally register them.
fn full_chain() -> Rc<dyn Resolver> {
    Rc::new(
        CompositeResolver::new()
            .add(Rc::new(OptionalResolver::new()))
            .add(Rc::new(ArrayResolver::new()))
            .add(Rc::new(ListResolver::new().with_length_property()))
            .add(Rc::new(MapResolver::new()))
            .add(Rc::new(RecordResolver::new())),
    )
}

fn ctx_for(chain: &Rc<dyn Resolver>) -> ResolutionContext {
    ResolutionContext::new(chain.clone())
}

/// An employee record with a writable name, a read-only id, and a couple
/// of methods.
fn employee() -> Value {
    Value::record(
        RecordData::new("Employee")
            .add_field(
                "name",
                TypeDescriptor::String,
                Value::String("Ada".to_string()),
            )
            .add_read_only_field("id", TypeDescriptor::Integer, Value::Integer(1))
            .add_method("greet", greet)
            .add_overloaded_method("scale", vec![TypeDescriptor::Integer], scale_int)
            .add_overloaded_method("scale", vec![TypeDescriptor::String], scale_str),
    )
}

fn greet(
    _ctx: &mut ResolutionContext,
    this: &Value,
    _args: &[Value],
) -> Result<Value, ResolveError> {
    if let Value::Record(record) = this {
        let record = record.borrow();
        if let Some(slot) = record.field("name") {
            return Ok(Value::String(format!("hello {}", slot.value)));
        }
    }
    Ok(Value::Null)
}

fn scale_int(
    _ctx: &mut ResolutionContext,
    _this: &Value,
    args: &[Value],
) -> Result<Value, ResolveError> {
    match args.first() {
        Some(Value::Integer(i)) => Ok(Value::Integer(i * 2)),
        _ => Ok(Value::Null),
    }
}

fn scale_str(
    _ctx: &mut ResolutionContext,
    _this: &Value,
    args: &[Value],
) -> Result<Value, ResolveError> {
    match args.first() {
        Some(Value::String(s)) => Ok(Value::String(format!("{}{}", s, s))),
        _ => Ok(Value::Null),
    }
}

#[test]
fn test_array_get_and_set() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::array(
        TypeDescriptor::Integer,
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
    );

    let out = chain
        .get_value(&mut ctx, Some(&base), Some(&Value::Integer(2)))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(3)));

    chain
        .set_value(
            &mut ctx,
            Some(&base),
            Some(&Value::Integer(0)),
            Value::Integer(42),
        )
        .unwrap();
    let out = chain
        .get_value(&mut ctx, Some(&base), Some(&Value::Integer(0)))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(42)));
}

#[test]
fn test_array_index_out_of_range_is_property_not_found() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::array(TypeDescriptor::Integer, vec![Value::Integer(1)]);

    let result = chain.get_value(&mut ctx, Some(&base), Some(&Value::Integer(5)));
    match result {
        Err(ResolveError::PropertyNotFound(_)) => {}
        other => panic!("expected PropertyNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_array_type_is_declared_element_type() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    // The slot holds null but the array's element type is what getType
    // reports.
    let base = Value::array(TypeDescriptor::String, vec![Value::Null]);

    let out = chain
        .get_type(&mut ctx, Some(&base), Some(&Value::Integer(0)))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Some(TypeDescriptor::String)));
}

#[test]
fn test_array_rejects_element_type_mismatch() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::array(TypeDescriptor::Integer, vec![Value::Integer(1)]);

    let result = chain.set_value(
        &mut ctx,
        Some(&base),
        Some(&Value::Integer(0)),
        Value::String("nope".to_string()),
    );
    match result {
        Err(ResolveError::Evaluation { .. }) => {}
        other => panic!("expected Evaluation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_read_only_array_resolver() {
    let chain: Rc<dyn Resolver> =
        Rc::new(CompositeResolver::new().add(Rc::new(ArrayResolver::read_only())));
    let mut ctx = ctx_for(&chain);
    let base = Value::array(TypeDescriptor::Integer, vec![Value::Integer(1)]);

    let out = chain
        .is_read_only(&mut ctx, Some(&base), Some(&Value::Integer(0)))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(true));

    // The read-only invariant: a positive isReadOnly means setValue must
    // fail with PropertyNotWritable.
    let result = chain.set_value(
        &mut ctx,
        Some(&base),
        Some(&Value::Integer(0)),
        Value::Integer(2),
    );
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_list_length_pseudo_property() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::list(vec![Value::Integer(1), Value::Integer(2)]);

    let out = chain
        .get_value(
            &mut ctx,
            Some(&base),
            Some(&Value::String("length".to_string())),
        )
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(2)));

    let out = chain
        .is_read_only(
            &mut ctx,
            Some(&base),
            Some(&Value::String("length".to_string())),
        )
        .unwrap();
    assert_eq!(out, Outcome::Resolved(true));

    let result = chain.set_value(
        &mut ctx,
        Some(&base),
        Some(&Value::String("length".to_string())),
        Value::Integer(10),
    );
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_list_index_access_and_string_index_coercion() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::list(vec![
        Value::String("a".to_string()),
        Value::String("b".to_string()),
    ]);

    let out = chain
        .get_value(&mut ctx, Some(&base), Some(&Value::String("1".to_string())))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("b".to_string())));
}

#[test]
fn test_map_missing_key_resolves_to_null() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::map(MapData::new().with_entry(
        MapKey::Str("present".to_string()),
        Value::Integer(1),
    ));

    let out = chain
        .get_value(
            &mut ctx,
            Some(&base),
            Some(&Value::String("absent".to_string())),
        )
        .unwrap();
    // Resolved, not declined: the map owns the pair and the answer is the
    // absence-value.
    assert_eq!(out, Outcome::Resolved(Value::Null));
    assert!(ctx.is_resolved());
}

#[test]
fn test_map_write_and_read_back() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::map(MapData::new());

    chain
        .set_value(
            &mut ctx,
            Some(&base),
            Some(&Value::Integer(7)),
            Value::String("seven".to_string()),
        )
        .unwrap();
    let out = chain
        .get_value(&mut ctx, Some(&base), Some(&Value::Integer(7)))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("seven".to_string())));
}

#[test]
fn test_read_only_map_rejects_writes() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let base = Value::map(MapData::new().read_only());

    let result = chain.set_value(
        &mut ctx,
        Some(&base),
        Some(&Value::String("k".to_string())),
        Value::Integer(1),
    );
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_optional_unwraps_without_property() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);

    let wrapped = Value::optional_of(Value::Integer(5));
    let out = chain.get_value(&mut ctx, Some(&wrapped), None).unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(5)));

    let empty = Value::optional_empty();
    let out = chain.get_value(&mut ctx, Some(&empty), None).unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Null));
}

#[test]
fn test_optional_property_delegates_through_top_level_chain() {
    let chain = full_chain();
    let person = employee();
    let property = Value::String("name".to_string());

    // Resolving through the wrapper equals resolving directly against the
    // inner value.
    let mut ctx = ctx_for(&chain);
    let direct = chain
        .get_value(&mut ctx, Some(&person), Some(&property))
        .unwrap();

    let wrapped = Value::optional_of(person.clone());
    let mut ctx = ctx_for(&chain);
    let via_wrapper = chain
        .get_value(&mut ctx, Some(&wrapped), Some(&property))
        .unwrap();

    assert_eq!(direct, via_wrapper);
    assert_eq!(
        via_wrapper,
        Outcome::Resolved(Value::String("Ada".to_string()))
    );
}

#[test]
fn test_optional_set_is_property_not_writable_even_when_empty() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let empty = Value::optional_empty();

    // The wrapper is recognized before writability of the wrapped path is
    // even considered, so this is PropertyNotWritable, not
    // PropertyNotFound.
    let result = chain.set_value(
        &mut ctx,
        Some(&empty),
        Some(&Value::String("name".to_string())),
        Value::Integer(1),
    );
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }

    let out = chain
        .is_read_only(&mut ctx, Some(&empty), Some(&Value::String("name".to_string())))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(true));
}

#[test]
fn test_optional_invoke_delegates_to_inner_value() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let wrapped = Value::optional_of(employee());

    let out = chain
        .invoke(&mut ctx, Some(&wrapped), "greet", None, &[])
        .unwrap();
    assert_eq!(
        out,
        Outcome::Resolved(Value::String("hello Ada".to_string()))
    );

    let empty = Value::optional_empty();
    let out = chain
        .invoke(&mut ctx, Some(&empty), "greet", None, &[])
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Null));
}

#[test]
fn test_optional_convert_unwraps_assignable_value() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let wrapped = Value::optional_of(Value::Integer(5));

    let converted = ctx
        .convert_to_type(&wrapped, &TypeDescriptor::Integer)
        .unwrap();
    assert_eq!(converted, Value::Integer(5));
}

#[test]
fn test_optional_convert_falls_back_to_coercion() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);

    let wrapped = Value::optional_of(Value::String("42".to_string()));
    let converted = ctx
        .convert_to_type(&wrapped, &TypeDescriptor::Integer)
        .unwrap();
    assert_eq!(converted, Value::Integer(42));

    let empty = Value::optional_empty();
    let converted = ctx.convert_to_type(&empty, &TypeDescriptor::String).unwrap();
    assert_eq!(converted, Value::Null);
}

#[test]
fn test_optional_convert_declines_on_uncoercible_target() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let wrapped = Value::optional_of(Value::Boolean(true));

    // The optional resolver declines rather than erroring, and with no
    // other conversion hook in the chain the built-in coercion reports the
    // failure.
    let result = ctx.convert_to_type(&wrapped, &TypeDescriptor::Map);
    assert!(result.is_err());
}

#[test]
fn test_record_field_access_and_write() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();

    let out = chain
        .get_value(&mut ctx, Some(&person), Some(&Value::String("name".to_string())))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("Ada".to_string())));

    chain
        .set_value(
            &mut ctx,
            Some(&person),
            Some(&Value::String("name".to_string())),
            Value::String("Grace".to_string()),
        )
        .unwrap();
    let out = chain
        .get_value(&mut ctx, Some(&person), Some(&Value::String("name".to_string())))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("Grace".to_string())));
}

#[test]
fn test_record_read_only_field() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();
    let id = Value::String("id".to_string());

    let out = chain.is_read_only(&mut ctx, Some(&person), Some(&id)).unwrap();
    assert_eq!(out, Outcome::Resolved(true));

    // Read-only fields report no acceptable write type.
    let out = chain.get_type(&mut ctx, Some(&person), Some(&id)).unwrap();
    assert_eq!(out, Outcome::Resolved(None));

    let result = chain.set_value(&mut ctx, Some(&person), Some(&id), Value::Integer(2));
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_record_unknown_field_is_property_not_found() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();

    let result = chain.get_value(
        &mut ctx,
        Some(&person),
        Some(&Value::String("salary".to_string())),
    );
    match result {
        Err(ResolveError::PropertyNotFound(_)) => {}
        other => panic!("expected PropertyNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_record_invoke_selects_overload_by_argument_type() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();

    let out = chain
        .invoke(&mut ctx, Some(&person), "scale", None, &[Value::Integer(4)])
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(8)));

    let out = chain
        .invoke(
            &mut ctx,
            Some(&person),
            "scale",
            None,
            &[Value::String("ab".to_string())],
        )
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("abab".to_string())));
}

#[test]
fn test_record_invoke_honors_declared_param_types() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();

    let signature = [TypeDescriptor::String];
    let out = chain
        .invoke(
            &mut ctx,
            Some(&person),
            "scale",
            Some(&signature),
            &[Value::String("x".to_string())],
        )
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::String("xx".to_string())));
}

#[test]
fn test_record_invoke_method_not_found() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);
    let person = employee();

    let result = chain.invoke(&mut ctx, Some(&person), "fire", None, &[]);
    match result {
        Err(ResolveError::MethodNotFound(_)) => {}
        other => panic!("expected MethodNotFound, got {:?}", other.map(|_| ())),
    }

    // A known name with no matching overload is also MethodNotFound.
    let result = chain.invoke(
        &mut ctx,
        Some(&person),
        "scale",
        None,
        &[Value::Boolean(true)],
    );
    match result {
        Err(ResolveError::MethodNotFound(_)) => {}
        other => panic!("expected MethodNotFound, got {:?}", other.map(|_| ())),
    }
}

static CONFIG_BUILDS: AtomicUsize = AtomicUsize::new(0);

fn build_config() -> Value {
    CONFIG_BUILDS.fetch_add(1, Ordering::SeqCst);
    Value::Integer(7)
}

#[test]
fn test_variable_resolution_and_lazy_materialization() {
    let chain: Rc<dyn Resolver> = Rc::new(
        CompositeResolver::new().add(Rc::new(
            VariableResolver::new()
                .add_variable("answer", Value::Integer(42))
                .add_lazy("config", build_config),
        )),
    );
    let name = Value::String("config".to_string());

    // Without the stand-alone identifier marker the lazy path is skipped
    // entirely and the resolver declines.
    let mut ctx = ctx_for(&chain);
    let out = chain.get_value(&mut ctx, None, Some(&name)).unwrap();
    assert_eq!(out, Outcome::Declined);
    assert_eq!(CONFIG_BUILDS.load(Ordering::SeqCst), 0);

    // Direct bindings resolve with or without the marker.
    let out = chain
        .get_value(&mut ctx, None, Some(&Value::String("answer".to_string())))
        .unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(42)));

    // With the marker, the supplier runs once and the result is cached.
    ctx.put_marker(MarkerKey::StandaloneIdentifier, Value::Boolean(true));
    let out = chain.get_value(&mut ctx, None, Some(&name)).unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(7)));
    assert_eq!(CONFIG_BUILDS.load(Ordering::SeqCst), 1);

    // Cached now: resolves even without the marker, without rebuilding.
    ctx.clear_marker(&MarkerKey::StandaloneIdentifier);
    let out = chain.get_value(&mut ctx, None, Some(&name)).unwrap();
    assert_eq!(out, Outcome::Resolved(Value::Integer(7)));
    assert_eq!(CONFIG_BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_variable_bindings_are_read_only() {
    let chain: Rc<dyn Resolver> = Rc::new(CompositeResolver::new().add(Rc::new(
        VariableResolver::new().add_variable("answer", Value::Integer(42)),
    )));
    let mut ctx = ctx_for(&chain);

    let result = chain.set_value(
        &mut ctx,
        None,
        Some(&Value::String("answer".to_string())),
        Value::Integer(0),
    );
    match result {
        Err(ResolveError::PropertyNotWritable(_)) => {}
        other => panic!("expected PropertyNotWritable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_context_conversion_falls_back_to_builtin_coercion() {
    let chain = full_chain();
    let mut ctx = ctx_for(&chain);

    let converted = ctx
        .convert_to_type(&Value::String("3.5".to_string()), &TypeDescriptor::Float)
        .unwrap();
    assert_eq!(converted, Value::Float(3.5));

    let converted = ctx
        .convert_to_type(&Value::Integer(2), &TypeDescriptor::Any)
        .unwrap();
    assert_eq!(converted, Value::Integer(2));
}
