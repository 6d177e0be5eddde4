//! # propel - pluggable property resolution
//!
//! A property/variable resolution engine for evaluating dotted and indexed
//! path expressions (`a.b[c]`, `a.method(x)`) against arbitrary runtime
//! object graphs, featuring:
//! - An open, ordered set of resolution strategies, one per base shape
//! - Composite chaining with first-claim-wins short-circuit dispatch
//! - Read, write, type-query, read-only-query, invocation and conversion
//!   through one uniform contract
//! - Per-evaluation contexts over a shared, immutable resolver chain
//!
//! ## Quick Start
//!
//! ### Resolving an indexed property
//!
//! ```
//! use std::rc::Rc;
//!
//! use propel::ds::types::TypeDescriptor;
//! use propel::ds::value::Value;
//! use propel::resolver::array::ArrayResolver;
//! use propel::resolver::composite::CompositeResolver;
//! use propel::resolver::context::ResolutionContext;
//! use propel::resolver::map::MapResolver;
//! use propel::resolver::resolver::{Outcome, Resolver};
//!
//! // Configure the chain once; share it across evaluations.
//! let chain: Rc<dyn Resolver> = Rc::new(
//!     CompositeResolver::new()
//!         .add(Rc::new(ArrayResolver::new()))
//!         .add(Rc::new(MapResolver::new())),
//! );
//!
//! // One context per evaluation.
//! let mut ctx = ResolutionContext::new(chain.clone());
//!
//! let base = Value::array(
//!     TypeDescriptor::Integer,
//!     vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)],
//! );
//! let out = chain
//!     .get_value(&mut ctx, Some(&base), Some(&Value::Integer(1)))
//!     .unwrap();
//! assert_eq!(out, Outcome::Resolved(Value::Integer(20)));
//! assert!(ctx.is_resolved());
//! ```
//!
//! ### Resolving a top-level name
//!
//! ```
//! use std::rc::Rc;
//!
//! use propel::ds::value::Value;
//! use propel::resolver::composite::CompositeResolver;
//! use propel::resolver::context::{MarkerKey, ResolutionContext};
//! use propel::resolver::resolver::{Outcome, Resolver};
//! use propel::resolver::variable::VariableResolver;
//!
//! let chain: Rc<dyn Resolver> = Rc::new(
//!     CompositeResolver::new().add(Rc::new(
//!         VariableResolver::new().add_variable("answer", Value::Integer(42)),
//!     )),
//! );
//! let mut ctx = ResolutionContext::new(chain.clone());
//!
//! // The evaluator flags bare identifier lookups before entering the chain.
//! ctx.put_marker(MarkerKey::StandaloneIdentifier, Value::Boolean(true));
//! let out = chain
//!     .get_value(&mut ctx, None, Some(&Value::String("answer".to_string())))
//!     .unwrap();
//! assert_eq!(out, Outcome::Resolved(Value::Integer(42)));
//! ```
//!
//! ## Architecture
//!
//! - **[`ds`]** - Data structures (values, type descriptors, records, errors)
//! - **[`resolver`]** - The resolution protocol
//!   - **[`resolver::resolver`]** - The `Resolver` contract and `Outcome`
//!   - **[`resolver::composite`]** - Ordered chaining with short-circuit
//!   - **[`resolver::context`]** - Per-evaluation state and markers
//!   - Concrete variants: arrays, lists, maps, optionals, records, and
//!     top-level variables

#[macro_use]
extern crate lazy_static;

pub mod ds;
pub mod resolver;
