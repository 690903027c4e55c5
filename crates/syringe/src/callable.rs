//! Declared callables and their parameter lists.
//!
//! There is no runtime reflection to lean on, so callers describe what they
//! are going to invoke: which kind of callable it is and which parameters it
//! declares. The kind is a tagged classification resolved once, at
//! declaration time — each variant carries exactly the parameter information
//! its extraction rule needs (see [`extract_signature`](crate::extract_signature)).

use std::fmt;

use crate::value::Value;

/// An ordered parameter list with an optional trailing block of defaults.
///
/// Defaults can only apply to the last N parameters, matching standard
/// parameter-list syntax. They are stored positionally: the K-th default
/// belongs to the K-th name of the trailing defaulted block.
///
/// ```
/// use syringe::ParamList;
///
/// // def connect(host, port=5432, timeout=None)
/// let params = ParamList::new()
///     .param("host")
///     .param_with_default("port", 5432)
///     .param_with_default("timeout", ());
/// assert_eq!(params.names(), &["host", "port", "timeout"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawParamList")]
pub struct ParamList {
    names: Vec<String>,
    defaults: Vec<Value>,
}

/// Unvalidated wire form of [`ParamList`].
///
/// Deserialization goes through here so that data from outside the builder
/// cannot carry more defaults than parameters.
#[derive(serde::Deserialize)]
struct RawParamList {
    names: Vec<String>,
    #[serde(default)]
    defaults: Vec<Value>,
}

impl TryFrom<RawParamList> for ParamList {
    type Error = String;

    fn try_from(raw: RawParamList) -> Result<Self, Self::Error> {
        if raw.defaults.len() > raw.names.len() {
            return Err(format!(
                "{} default values declared for {} parameters",
                raw.defaults.len(),
                raw.names.len()
            ));
        }
        Ok(Self {
            names: raw.names,
            defaults: raw.defaults,
        })
    }
}

impl ParamList {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter list of required-only parameters.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            defaults: Vec::new(),
        }
    }

    /// Appends a parameter without a default value.
    ///
    /// Must not follow a defaulted parameter, just as `def f(a=1, b)` is a
    /// syntax error. Debug builds assert this; in release builds the declared
    /// defaults stay attached to the trailing parameters, so a late required
    /// parameter shifts which names they pair with.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        debug_assert!(
            self.defaults.is_empty(),
            "parameter without a default follows a defaulted parameter"
        );
        self.names.push(name.into());
        self
    }

    /// Appends a parameter with a declared default value.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.names.push(name.into());
        self.defaults.push(default.into());
        self
    }

    /// All parameter names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Default values for the trailing defaulted block, in order.
    pub fn defaults(&self) -> &[Value] {
        &self.defaults
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A plain function or a method, described by name and parameter list.
///
/// Methods declare their receiver (`self`) as an ordinary leading parameter;
/// it is not special-cased or removed during extraction. A bound method is
/// simply declared without it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDef {
    /// Name used in diagnostics.
    pub name: String,
    /// Declared parameters.
    pub params: ParamList,
}

/// A class object, invoked via its constructor.
///
/// `init` is the explicit initializer (`__init__`-like) and `new` the explicit
/// allocator hook (`__new__`-like). Extraction prefers `init`; a class with
/// neither takes zero parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassDef {
    /// Class name used in diagnostics.
    pub name: String,
    /// Parameters of the explicit initializer, if one is defined.
    pub init: Option<ParamList>,
    /// Parameters of the explicit allocator hook, if one is defined.
    pub new: Option<ParamList>,
}

impl ClassDef {
    /// Creates a class with no custom constructor of either kind.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            init: None,
            new: None,
        }
    }

    /// Declares an explicit initializer.
    pub fn with_init(mut self, params: ParamList) -> Self {
        self.init = Some(params);
        self
    }

    /// Declares an explicit allocator hook.
    pub fn with_new(mut self, params: ParamList) -> Self {
        self.new = Some(params);
        self
    }
}

/// An object instance that may expose a call operator.
///
/// An instance without a declared call capability is not callable and fails
/// signature extraction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstanceDef {
    /// Name of the instance's class, used in diagnostics.
    pub class_name: String,
    /// Parameters of the call operator, if the instance is call-capable.
    pub call: Option<ParamList>,
}

impl InstanceDef {
    /// Creates an instance with no call capability.
    pub fn plain(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            call: None,
        }
    }

    /// Declares the instance's call operator parameters.
    pub fn with_call(mut self, params: ParamList) -> Self {
        self.call = Some(params);
        self
    }
}

/// Anything invocable with arguments, classified once at declaration time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Callable {
    /// A plain function with a directly inspectable parameter list.
    Function(FunctionDef),
    /// A bound or unbound method; handled like a function.
    Method(FunctionDef),
    /// A class object; invocation runs its constructor.
    Class(ClassDef),
    /// An instance that may expose a call operator.
    Instance(InstanceDef),
    /// A value with no callable capability at all.
    Opaque(Value),
}

/// The classification tag of a [`Callable`], mostly useful for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum CallableKind {
    Function,
    Method,
    Class,
    Instance,
    Opaque,
}

impl Callable {
    /// Declares a plain function.
    pub fn function(name: impl Into<String>, params: ParamList) -> Self {
        Self::Function(FunctionDef {
            name: name.into(),
            params,
        })
    }

    /// Declares a bound or unbound method.
    ///
    /// For an unbound method, declare the receiver as the first parameter.
    pub fn method(name: impl Into<String>, params: ParamList) -> Self {
        Self::Method(FunctionDef {
            name: name.into(),
            params,
        })
    }

    /// Wraps a plain value that has no callable capability.
    pub fn opaque(value: impl Into<Value>) -> Self {
        Self::Opaque(value.into())
    }

    /// Returns the classification tag.
    pub fn kind(&self) -> CallableKind {
        match self {
            Self::Function(_) => CallableKind::Function,
            Self::Method(_) => CallableKind::Method,
            Self::Class(_) => CallableKind::Class,
            Self::Instance(_) => CallableKind::Instance,
            Self::Opaque(_) => CallableKind::Opaque,
        }
    }
}

impl From<ClassDef> for Callable {
    fn from(class: ClassDef) -> Self {
        Self::Class(class)
    }
}

impl From<InstanceDef> for Callable {
    fn from(instance: InstanceDef) -> Self {
        Self::Instance(instance)
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(def) => write!(f, "<function {}>", def.name),
            Self::Method(def) => write!(f, "<method {}>", def.name),
            Self::Class(def) => write!(f, "<class {}>", def.name),
            Self::Instance(def) => write!(f, "<{} instance>", def.class_name),
            Self::Opaque(value) => write!(f, "{}", value.repr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn param_list_tracks_trailing_defaults() {
        let params = ParamList::new()
            .param("foo")
            .param("bar")
            .param_with_default("baz", "buz");
        assert_eq!(params.names(), &["foo", "bar", "baz"]);
        assert_eq!(params.defaults(), &[Value::Str("buz".into())]);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn param_list_of_builds_required_only() {
        let params = ParamList::of(["foo", "bar"]);
        assert_eq!(params.names(), &["foo", "bar"]);
        assert!(params.defaults().is_empty());
    }

    #[test]
    fn param_list_serde_round_trip() {
        let params = ParamList::new().param("foo").param_with_default("bar", ());
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"names":["foo","bar"],"defaults":["None"]}"#);
        assert_eq!(serde_json::from_str::<ParamList>(&json).unwrap(), params);
    }

    #[test]
    fn param_list_rejects_excess_defaults() {
        let err = serde_json::from_str::<ParamList>(r#"{"names":["a"],"defaults":[{"Int":1},{"Int":2}]}"#).unwrap_err();
        assert!(err.to_string().contains("2 default values declared for 1 parameters"));
    }

    #[test]
    fn kind_tags_display_lowercase() {
        let func = Callable::function("foo", ParamList::new());
        assert_eq!(func.kind(), CallableKind::Function);
        assert_eq!(func.kind().to_string(), "function");
        assert_eq!(Callable::opaque(()).kind().to_string(), "opaque");
    }

    #[test]
    fn display_forms() {
        assert_eq!(Callable::function("foo", ParamList::new()).to_string(), "<function foo>");
        assert_eq!(Callable::from(ClassDef::plain("Foo")).to_string(), "<class Foo>");
        assert_eq!(Callable::from(InstanceDef::plain("Foo")).to_string(), "<Foo instance>");
        assert_eq!(Callable::opaque(42).to_string(), "42");
    }
}
