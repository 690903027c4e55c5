#![doc = include_str!("../../../README.md")]

mod callable;
mod errors;
mod resolve;
mod signature;
mod value;

pub use crate::{
    callable::{Callable, CallableKind, ClassDef, FunctionDef, InstanceDef, ParamList},
    errors::UnsupportedCallable,
    resolve::{Availability, Resolution, SignatureSource, resolve_dependencies},
    signature::{Signature, extract_signature},
    value::Value,
};
