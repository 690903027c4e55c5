use std::fmt::{self, Write};

use indexmap::IndexMap;

/// A dynamic value that can be declared as a default or supplied for injection.
///
/// This is the public-facing value type for the crate. It owns all its data and
/// can be freely cloned, serialized, or stored. `Value::None` is the canonical
/// "no value" sentinel — it is an ordinary value like any other, and in
/// particular it is distinct from a name being absent from an availability
/// mapping.
///
/// # JSON Serialization
///
/// `Value` supports JSON with natural mappings in both directions:
///
/// - `None` ↔ JSON `null`
/// - `Bool` ↔ JSON `true`/`false`
/// - `Int` ↔ JSON integer
/// - `Float` ↔ JSON float (NaN/Infinity serialize as `null`)
/// - `Str` ↔ JSON string
/// - `List` ↔ JSON array
/// - `Dict` ↔ JSON object (insertion order preserved)
///
/// See [`Value::to_json_value`] and [`Value::from_json_value`]. The derived
/// serde impls use the externally tagged format (e.g. `{"Int": 42}`) and are
/// kept for embedding `Value` inside larger serialized structures such as
/// [`Signature`](crate::Signature).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// The `None` singleton.
    #[serde(alias = "none", alias = "NoneType")]
    None,
    /// Boolean (`True` or `False` in repr form).
    #[serde(alias = "bool")]
    Bool(bool),
    /// 64-bit signed integer.
    #[serde(alias = "int")]
    Int(i64),
    /// 64-bit IEEE 754 float.
    #[serde(alias = "float")]
    Float(f64),
    /// UTF-8 string.
    #[serde(alias = "str")]
    Str(String),
    /// Ordered sequence.
    #[serde(alias = "list")]
    List(Vec<Self>),
    /// Insertion-ordered mapping with string keys.
    #[serde(alias = "dict")]
    Dict(IndexMap<String, Self>),
}

impl Value {
    /// Returns true for the `None` sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the type name of this value, matching Python spelling.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
        }
    }

    /// Returns the repr string for this value.
    pub fn repr(&self) -> String {
        let mut s = String::new();
        self.repr_fmt(&mut s).expect("formatting into a String cannot fail");
        s
    }

    /// Writes the repr form of this value into `f`.
    fn repr_fmt(&self, f: &mut impl Write) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => {
                let s = v.to_string();
                f.write_str(&s)?;
                if !s.contains('.') && !s.contains("inf") && !s.contains("NaN") {
                    f.write_str(".0")?;
                }
                Ok(())
            }
            Self::Str(s) => string_repr_fmt(s, f),
            Self::List(items) => {
                f.write_char('[')?;
                let mut iter = items.iter();
                if let Some(first) = iter.next() {
                    first.repr_fmt(f)?;
                    for item in iter {
                        f.write_str(", ")?;
                        item.repr_fmt(f)?;
                    }
                }
                f.write_char(']')
            }
            Self::Dict(map) => {
                f.write_char('{')?;
                let mut iter = map.iter();
                if let Some((k, v)) = iter.next() {
                    string_repr_fmt(k, f)?;
                    f.write_str(": ")?;
                    v.repr_fmt(f)?;
                    for (k, v) in iter {
                        f.write_str(", ")?;
                        string_repr_fmt(k, f)?;
                        f.write_str(": ")?;
                        v.repr_fmt(f)?;
                    }
                }
                f.write_char('}')
            }
        }
    }

    /// Converts this value to its natural JSON representation.
    ///
    /// Unlike the derived `serde::Serialize` (externally tagged, e.g.
    /// `{"Int": 42}`), this produces plain JSON that hosts can consume without
    /// understanding the crate's type system. Non-finite floats become `null`.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value as JV;
        match self {
            Self::None => JV::Null,
            Self::Bool(b) => JV::Bool(*b),
            Self::Int(i) => JV::from(*i),
            Self::Float(f) => {
                if f.is_finite() {
                    serde_json::Number::from_f64(*f).map_or(JV::Null, JV::Number)
                } else {
                    JV::Null
                }
            }
            Self::Str(s) => JV::String(s.clone()),
            Self::List(items) => JV::Array(items.iter().map(Self::to_json_value).collect()),
            Self::Dict(map) => {
                let object: serde_json::Map<String, JV> =
                    map.iter().map(|(k, v)| (k.clone(), v.to_json_value())).collect();
                JV::Object(object)
            }
        }
    }

    /// Converts natural JSON into a value.
    ///
    /// Integers that fit `i64` become `Int`; all other JSON numbers become
    /// `Float`. Object key order is preserved.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        use serde_json::Value as JV;
        match value {
            JV::Null => Self::None,
            JV::Bool(b) => Self::Bool(b),
            JV::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JV::String(s) => Self::Str(s),
            JV::Array(arr) => Self::List(arr.into_iter().map(Self::from_json_value).collect()),
            JV::Object(obj) => Self::Dict(obj.into_iter().map(|(k, v)| (k, Self::from_json_value(v))).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // str displays its raw content, everything else its repr.
            Self::Str(s) => f.write_str(s),
            _ => self.repr_fmt(f),
        }
    }
}

/// Writes the Python-style repr of a string: quoted and escaped.
///
/// Prefers single quotes, switching to double quotes when the content contains
/// a single quote but no double quote.
fn string_repr_fmt(s: &str, f: &mut impl Write) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(map: IndexMap<String, Self>) -> Self {
        Self::Dict(map)
    }
}

/// `Option<T>` maps `Option::None` to the `None` sentinel.
impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::None,
        }
    }
}
