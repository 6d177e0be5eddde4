//! The resolver contract — the polymorphic unit of resolution strategy.
//!
//! Resolvers are queried in registration order when a (base, property) pair
//! is resolved. Each resolver owns exactly one base shape (arrays, maps,
//! optional wrappers, records, top-level names, ...). A resolver that does
//! not recognize the shape it is handed declines; the first resolver that
//! recognizes the pair owns the outcome.

use crate::ds::error::ResolveError;
use crate::ds::types::TypeDescriptor;
use crate::ds::value::Value;
use crate::resolver::context::ResolutionContext;

/// The result of a single resolver call.
///
/// `Resolved` means the resolver recognized the (base, property) pair and
/// the carried value is authoritative, including `Value::Null`, which is a
/// legitimate resolved result rather than a miss. `Declined` means the resolver
/// does not handle the shape at all and the caller must try the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Resolved(T),
    Declined,
}

impl<T> Outcome<T> {
    pub fn is_resolved(&self) -> bool {
        match self {
            Outcome::Resolved(_) => true,
            Outcome::Declined => false,
        }
    }

    pub fn is_declined(&self) -> bool {
        !self.is_resolved()
    }

    /// The resolved value, or `None` on decline.
    pub fn resolved(self) -> Option<T> {
        match self {
            Outcome::Resolved(v) => Some(v),
            Outcome::Declined => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Resolved(v) => Outcome::Resolved(f(v)),
            Outcome::Declined => Outcome::Declined,
        }
    }
}

/// A resolution strategy for one shape of base object.
///
/// Every operation follows the same recognize-or-decline contract:
///
/// - If the resolver does not recognize the base's shape (or, for a `base`
///   of `None`, does not recognize the property as one of its top-level
///   names), it returns `Ok(Outcome::Declined)` and must not touch the
///   context's resolved state. Declining is the only valid "not mine"
///   signal; an unrecognized shape is never an error.
/// - If it recognizes the shape, it calls
///   [`ResolutionContext::note_resolved`] and then either returns
///   `Ok(Outcome::Resolved(..))` or raises the appropriate
///   [`ResolveError`]. It must not decline after recognizing.
///
/// Implementations hold configuration only; per-evaluation state lives in
/// the [`ResolutionContext`], which is handed in for the duration of the
/// call and must not be retained.
pub trait Resolver {
    /// Resolve the value of `property` on `base`.
    ///
    /// A `base` of `None` is a top-level variable lookup; a `property` of
    /// `None` asks the resolver for the base itself (the optional resolver
    /// uses this to unwrap). Fails with `PropertyNotFound` when the
    /// recognized base has no such property.
    fn get_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Value>, ResolveError>;

    /// Write `value` into the slot named by `property` on `base`.
    ///
    /// Fails with `PropertyNotFound` when the recognized base has no such
    /// slot, and with `PropertyNotWritable` when the slot exists but is
    /// immutable. Not-writable is a definitive rejection, not a decline.
    fn set_value(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
        value: Value,
    ) -> Result<Outcome<()>, ResolveError>;

    /// The most general type acceptable for a future `set_value` of this
    /// pair. `Resolved(None)` means the pair is recognized but read-only.
    /// This is the declared slot type, not the runtime type of whatever the
    /// slot currently holds.
    fn get_type(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<Option<TypeDescriptor>>, ResolveError>;

    /// Whether a `set_value` on this pair would always fail due to
    /// immutability.
    fn is_read_only(
        &self,
        ctx: &mut ResolutionContext,
        base: Option<&Value>,
        property: Option<&Value>,
    ) -> Result<Outcome<bool>, ResolveError>;

    /// The most general property key type this resolver accepts for the
    /// given base shape: `None` if the shape is not recognized at all,
    /// `Any` if arbitrary keys are accepted.
    ///
    /// Advisory, for tooling and auto-completion. Not a resolution attempt:
    /// it takes the context immutably and never marks anything resolved.
    fn common_property_type(
        &self,
        ctx: &ResolutionContext,
        base: Option<&Value>,
    ) -> Option<TypeDescriptor>;

    /// Resolve and invoke `method` on `base`.
    ///
    /// `param_types` optionally pins an overload; otherwise overloads are
    /// selected from `params`. Fails with `MethodNotFound` when the
    /// recognized base has no matching method. The default body declines;
    /// a resolver with no invocation capability never claims the pair.
    fn invoke(
        &self,
        _ctx: &mut ResolutionContext,
        _base: Option<&Value>,
        _method: &str,
        _param_types: Option<&[TypeDescriptor]>,
        _params: &[Value],
    ) -> Result<Outcome<Value>, ResolveError> {
        Ok(Outcome::Declined)
    }

    /// Convert a single object to `target`. The dual of the property
    /// protocol: recognition is keyed on `value`'s shape directly, there is
    /// no property. The default body declines; a resolver with no
    /// conversion capability leaves the object to the rest of the chain.
    fn convert_to_type(
        &self,
        _ctx: &mut ResolutionContext,
        _value: &Value,
        _target: &TypeDescriptor,
    ) -> Result<Outcome<Value>, ResolveError> {
        Ok(Outcome::Declined)
    }

    /// Human-readable name for this resolver (for debugging/logging).
    fn name(&self) -> &str;
}
