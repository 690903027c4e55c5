//! Resolution of a signature against an availability mapping.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::{
    callable::Callable,
    errors::UnsupportedCallable,
    signature::{Signature, extract_signature},
    value::Value,
};

/// The caller-supplied name → value table representing what can be injected.
pub type Availability = AHashMap<String, Value>;

/// Anything the resolver can obtain a [`Signature`] from.
///
/// Implemented by [`Callable`] (runs extraction) and by [`Signature`] itself
/// (returns a copy), so callers resolving the same callable repeatedly can
/// extract once and reuse the signature.
pub trait SignatureSource {
    /// Produces the signature to resolve against.
    fn to_signature(&self) -> Result<Signature, UnsupportedCallable>;
}

impl SignatureSource for Callable {
    fn to_signature(&self) -> Result<Signature, UnsupportedCallable> {
        extract_signature(self)
    }
}

impl SignatureSource for Signature {
    fn to_signature(&self) -> Result<Signature, UnsupportedCallable> {
        Ok(self.clone())
    }
}

/// The computed argument set for one invocation attempt.
///
/// `positional` and `named` carry exactly the same resolved parameters, in
/// declaration order; which one to invoke with is the framework's choice.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    positional: Vec<Value>,
    named: IndexMap<String, Value>,
    signature: Signature,
}

impl Resolution {
    /// Resolved values aligned with parameter declaration order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Resolved values keyed by parameter name, in declaration order.
    pub fn named(&self) -> &IndexMap<String, Value> {
        &self.named
    }

    /// The signature that was resolved.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// True when every declared parameter was resolved.
    pub fn is_complete(&self) -> bool {
        self.named.len() == self.signature.param_count()
    }

    /// Parameters that were left unresolved, in declaration order.
    ///
    /// The resolver itself never errors on these; frameworks layering a
    /// "missing required dependency" policy can check here before invoking.
    pub fn missing(&self) -> Vec<&str> {
        self.signature
            .parameters()
            .iter()
            .filter(|name| !self.named.contains_key(*name))
            .map(String::as_str)
            .collect()
    }

    /// Decomposes into `(positional, named, signature)`.
    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>, Signature) {
        (self.positional, self.named, self.signature)
    }
}

/// Resolves a callable's parameters against an availability mapping.
///
/// Accepts either a [`Callable`] (its signature is extracted first, and an
/// extraction failure propagates unwrapped) or a cached [`Signature`]. Each
/// parameter is then resolved in declaration order:
///
/// 1. A value present in `available` wins — regardless of what it is,
///    including `Value::None`. The caller's explicit intent, even to supply
///    "nothing", is never overridden by a default.
/// 2. Otherwise a declared default is used.
/// 3. Otherwise the parameter is omitted from the resolution entirely. This
///    is not an error, even for a required parameter: resolving against a
///    partial availability mapping is a supported, staged-injection use.
///
/// ```
/// use syringe::{Availability, Callable, ParamList, Value, resolve_dependencies};
///
/// // def foo(bar, baz)
/// let foo = Callable::function("foo", ParamList::of(["bar", "baz"]));
/// let available = Availability::from_iter([
///     ("bar".to_string(), Value::Int(1)),
///     ("baz".to_string(), Value::Int(2)),
///     ("bloo".to_string(), Value::Str("blee".to_string())),
/// ]);
/// let resolution = resolve_dependencies(&foo, &available).unwrap();
/// assert_eq!(resolution.positional(), &[Value::Int(1), Value::Int(2)]);
/// ```
pub fn resolve_dependencies(
    target: &impl SignatureSource,
    available: &Availability,
) -> Result<Resolution, UnsupportedCallable> {
    let signature = target.to_signature()?;
    let mut positional = Vec::with_capacity(signature.param_count());
    let mut named = IndexMap::with_capacity(signature.param_count());

    for name in signature.parameters() {
        // Look up by presence, not by .get-with-fallback: an explicit None in
        // the availability mapping must shadow a declared default.
        let value = if let Some(value) = available.get(name) {
            value.clone()
        } else if let Some(default) = signature.optional().get(name) {
            default.clone()
        } else {
            continue;
        };
        positional.push(value.clone());
        named.insert(name.clone(), value);
    }

    Ok(Resolution {
        positional,
        named,
        signature,
    })
}
