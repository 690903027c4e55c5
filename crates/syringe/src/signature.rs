//! Structured signatures and the extraction rules that produce them.

use indexmap::IndexMap;

use crate::{
    callable::{Callable, ParamList},
    errors::UnsupportedCallable,
    value::Value,
};

/// A callable's parameters partitioned into required and optional.
///
/// Immutable once constructed. The parameter order is declaration order, and
/// required parameters always precede optional ones: `parameters` is exactly
/// `required` followed by the keys of `optional`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawSignature")]
pub struct Signature {
    /// All parameter names in declaration order.
    parameters: Vec<String>,
    /// Number of leading parameters with no default value.
    required_count: usize,
    /// Defaulted parameters mapped to their defaults, in declaration order.
    optional: IndexMap<String, Value>,
}

/// Unvalidated wire form of [`Signature`].
///
/// Deserialization goes through here so that external data cannot break the
/// partition invariant: `required_count` must stay within `parameters` and
/// `optional` must cover exactly the trailing names, in order.
#[derive(serde::Deserialize)]
struct RawSignature {
    parameters: Vec<String>,
    required_count: usize,
    optional: IndexMap<String, Value>,
}

impl TryFrom<RawSignature> for Signature {
    type Error = String;

    fn try_from(raw: RawSignature) -> Result<Self, Self::Error> {
        if raw.required_count > raw.parameters.len() {
            return Err(format!(
                "required_count {} exceeds {} parameters",
                raw.required_count,
                raw.parameters.len()
            ));
        }
        if !raw.optional.keys().eq(&raw.parameters[raw.required_count..]) {
            return Err("optional keys must match the trailing parameters in declaration order".to_string());
        }
        Ok(Self {
            parameters: raw.parameters,
            required_count: raw.required_count,
            optional: raw.optional,
        })
    }
}

impl Signature {
    /// Builds a signature from a declared parameter list.
    ///
    /// Defaults apply to the trailing block of the list, so the required
    /// partition is simply the leading names not covered by a default.
    pub(crate) fn from_params(params: &ParamList) -> Self {
        let names = params.names();
        // Builder and validated deserialization both keep the default count
        // within the name count; if an internal caller ever breaks that, the
        // unpairable leading defaults are dropped rather than underflowing.
        let defaults = params.defaults();
        let defaults = &defaults[defaults.len().saturating_sub(names.len())..];
        let required_count = names.len() - defaults.len();
        let optional = names[required_count..]
            .iter()
            .zip(defaults)
            .map(|(name, default)| (name.clone(), default.clone()))
            .collect();
        Self {
            parameters: names.to_vec(),
            required_count,
            optional,
        }
    }

    /// The signature of a callable taking zero parameters.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// All parameter names in declaration order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Names with no default value, in declaration order.
    pub fn required(&self) -> &[String] {
        &self.parameters[..self.required_count]
    }

    /// Defaulted parameter names mapped to their default values.
    pub fn optional(&self) -> &IndexMap<String, Value> {
        &self.optional
    }

    /// Number of declared parameters.
    pub fn param_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Extracts the [`Signature`] of a declared callable.
///
/// The underlying parameter list is chosen by classification:
///
/// 1. Functions and methods expose their parameter list directly. A receiver
///    (`self`) parameter is treated as an ordinary required parameter.
/// 2. A class uses its constructor: the explicit initializer if one is
///    defined, else the explicit allocator hook, else — no custom constructor
///    of either kind — the class takes zero parameters.
/// 3. A call-capable instance uses its call operator's parameter list.
/// 4. Anything else fails with [`UnsupportedCallable`] carrying the
///    offending input.
///
/// ```
/// use syringe::{Callable, ParamList, Value, extract_signature};
///
/// // def foo(bar, baz=1)
/// let foo = Callable::function("foo", ParamList::new().param("bar").param_with_default("baz", 1));
/// let signature = extract_signature(&foo).unwrap();
/// assert_eq!(signature.parameters(), &["bar", "baz"]);
/// assert_eq!(signature.required(), &["bar"]);
/// assert_eq!(signature.optional().get("baz"), Some(&Value::Int(1)));
/// ```
pub fn extract_signature(callable: &Callable) -> Result<Signature, UnsupportedCallable> {
    let params = match callable {
        Callable::Function(def) | Callable::Method(def) => &def.params,
        Callable::Class(def) => match (&def.init, &def.new) {
            (Some(init), _) => init,
            (None, Some(new)) => new,
            (None, None) => return Ok(Signature::empty()),
        },
        Callable::Instance(def) => match &def.call {
            Some(call) => call,
            None => return Err(UnsupportedCallable::new(callable.clone())),
        },
        Callable::Opaque(_) => return Err(UnsupportedCallable::new(callable.clone())),
    };
    Ok(Signature::from_params(params))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::callable::{ClassDef, InstanceDef};

    fn params_foo_bar_baz() -> ParamList {
        ParamList::new().param("foo").param("bar").param_with_default("baz", 2)
    }

    #[test]
    fn infers_defaults() {
        let func = Callable::function("func", ParamList::new().param_with_default("foo", "bar"));
        let signature = extract_signature(&func).unwrap();
        assert_eq!(signature.parameters(), &["foo"]);
        assert_eq!(signature.required(), &[] as &[String]);
        assert_eq!(
            signature.optional(),
            &IndexMap::from([("foo".to_string(), Value::Str("bar".into()))])
        );
    }

    #[test]
    fn no_defaults_means_empty_optional() {
        let func = Callable::function("func", ParamList::of(["foo", "bar", "baz"]));
        let signature = extract_signature(&func).unwrap();
        assert_eq!(signature.parameters(), &["foo", "bar", "baz"]);
        assert_eq!(signature.required(), signature.parameters());
        assert!(signature.optional().is_empty());
    }

    #[test]
    fn mixed_required_and_defaulted() {
        let func = Callable::function("func", params_foo_bar_baz());
        let signature = extract_signature(&func).unwrap();
        assert_eq!(signature.parameters(), &["foo", "bar", "baz"]);
        assert_eq!(signature.required(), &["foo", "bar"]);
        assert_eq!(signature.optional(), &IndexMap::from([("baz".to_string(), Value::Int(2))]));
    }

    #[test]
    fn signature_serde_round_trip() {
        let signature = extract_signature(&Callable::function("func", params_foo_bar_baz())).unwrap();
        let json = serde_json::to_string(&signature).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, signature);
        assert_eq!(restored.required(), &["foo", "bar"]);
    }

    #[test]
    fn deserialization_rejects_required_count_out_of_range() {
        let err = serde_json::from_str::<Signature>(r#"{"parameters":["a"],"required_count":2,"optional":{}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("required_count 2 exceeds 1 parameters"));
    }

    #[test]
    fn deserialization_rejects_mismatched_optional_keys() {
        let json = r#"{"parameters":["a","b"],"required_count":1,"optional":{"c":{"Int":1}}}"#;
        let err = serde_json::from_str::<Signature>(json).unwrap_err();
        assert!(err.to_string().contains("optional keys must match the trailing parameters"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let func = Callable::function("func", params_foo_bar_baz());
        assert_eq!(extract_signature(&func).unwrap(), extract_signature(&func).unwrap());
    }

    #[test]
    fn method_receiver_is_an_ordinary_required_param() {
        let method = Callable::method(
            "method",
            ParamList::new().param("self").param("foo").param_with_default("bar", ()),
        );
        let signature = extract_signature(&method).unwrap();
        assert_eq!(signature.parameters(), &["self", "foo", "bar"]);
        assert_eq!(signature.required(), &["self", "foo"]);
    }

    #[test]
    fn class_prefers_init_over_new() {
        let class = ClassDef::plain("Foo")
            .with_init(ParamList::new().param("self").param("foo"))
            .with_new(ParamList::new().param("cls").param("other"));
        let signature = extract_signature(&class.into()).unwrap();
        assert_eq!(signature.parameters(), &["self", "foo"]);
    }

    #[test]
    fn class_falls_back_to_new() {
        let class = ClassDef::plain("Foo").with_new(ParamList::new().param("cls").param("foo"));
        let signature = extract_signature(&class.into()).unwrap();
        assert_eq!(signature.parameters(), &["cls", "foo"]);
    }

    #[test]
    fn class_without_constructor_takes_zero_params() {
        let signature = extract_signature(&ClassDef::plain("Foo").into()).unwrap();
        assert!(signature.parameters().is_empty());
        assert!(signature.required().is_empty());
        assert!(signature.optional().is_empty());
    }

    #[test]
    fn instance_uses_call_operator() {
        let instance = InstanceDef::plain("Foo").with_call(ParamList::new().param("self").param("foo"));
        let signature = extract_signature(&instance.into()).unwrap();
        assert_eq!(signature.parameters(), &["self", "foo"]);
    }

    #[test]
    fn instance_without_call_is_unsupported() {
        let err = extract_signature(&InstanceDef::plain("Foo").into()).unwrap_err();
        assert_eq!(err.to_string(), "cannot determine a signature for <Foo instance>");
    }

    #[test]
    fn opaque_value_is_unsupported() {
        let err = extract_signature(&Callable::opaque(42)).unwrap_err();
        assert_eq!(err.callable(), &Callable::Opaque(Value::Int(42)));
        assert_eq!(err.to_string(), "cannot determine a signature for 42");
    }
}
