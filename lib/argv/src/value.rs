//! # Flag Values
//!
//! Flags carry values of a fixed kind, which is chosen when the flag is
//! registered and never changes afterwards. A `Value` can be parsed from a
//! string, in which case the string is coerced according to the kind the
//! value already has.
//!
//! The `Kind` trait links the Rust types `bool`, `String`, `i64`, and `f64`
//! to their respective `Tag`, which allows typed access to values through
//! typed flag handles.

use alloc::string::{String, ToString};

/// Enumeration of the kinds a flag value can have.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tag {
    /// Boolean value, used for toggle flags.
    Bool,
    /// Arbitrary UTF-8 string.
    String,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit floating point number.
    Float,
}

/// A flag value tagged with its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
}

/// Enumeration of all errors that can be raised when coercing a string into
/// a value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The string is not part of the boolean grammar.
    #[error("invalid boolean '{value}'")]
    Bool {
        value: String,
    },

    /// The string is not a valid integer.
    #[error("invalid integer: {0}")]
    Int(#[from] core::num::ParseIntError),

    /// The string is not a valid floating point number.
    #[error("invalid float: {0}")]
    Float(#[from] core::num::ParseFloatError),
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for alloc::string::String {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// Rust types that can be stored in a `Value`. This trait is sealed and
/// implemented for exactly one type per `Tag`.
pub trait Kind: Clone + core::fmt::Debug + sealed::Sealed + 'static {
    /// Tag of values of this type.
    const TAG: Tag;

    /// Wrap this value into a tagged `Value`.
    fn into_value(self) -> Value;

    /// Borrow the payload of a `Value`, if it carries this type.
    fn from_value(value: &Value) -> Option<&Self>;
}

/// Types that can be used as defaults for flags. Apart from all `Kind` types,
/// this covers some convenience types that are converted on registration.
pub trait IntoKind {
    /// Type stored in the flag.
    type Kind: Kind;

    /// Convert into the type stored in the flag.
    fn into_kind(self) -> Self::Kind;
}

/// Parse a string according to the boolean grammar.
///
/// `on`, `1`, `yes`, `y`, `true`, and the empty string are `true`, while
/// `off`, `0`, `no`, `n`, and `false` are `false`. Anything else is rejected.
pub fn parse_bool(value: &str) -> Result<bool, Error> {
    match value {
        "" | "on" | "1" | "yes" | "y" | "true" => Ok(true),
        "off" | "0" | "no" | "n" | "false" => Ok(false),
        _ => Err(Error::Bool {
            value: value.to_string(),
        }),
    }
}

impl Tag {
    /// Yield a human-readable name of the tag.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Bool => "bool",
            Tag::String => "string",
            Tag::Int => "int",
            Tag::Float => "float",
        }
    }
}

impl Value {
    /// Yield the tag of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Bool(_) => Tag::Bool,
            Value::String(_) => Tag::String,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
        }
    }

    /// Coerce `from` according to the tag of this value and replace the
    /// payload with the result. The tag never changes. On error, the value
    /// is left untouched.
    pub fn parse(&mut self, from: &str) -> Result<(), Error> {
        match self {
            Value::Bool(v) => *v = parse_bool(from)?,
            Value::String(v) => {
                v.clear();
                v.push_str(from);
            },
            Value::Int(v) => *v = from.parse()?,
            Value::Float(v) => *v = from.parse()?,
        }

        Ok(())
    }
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Bool(v) => core::fmt::Display::fmt(v, f),
            Value::String(v) => f.write_str(v),
            Value::Int(v) => core::fmt::Display::fmt(v, f),
            Value::Float(v) => core::fmt::Display::fmt(v, f),
        }
    }
}

impl Kind for bool {
    const TAG: Tag = Tag::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Kind for String {
    const TAG: Tag = Tag::String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

impl Kind for i64 {
    const TAG: Tag = Tag::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl Kind for f64 {
    const TAG: Tag = Tag::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Kind> IntoKind for T {
    type Kind = T;

    fn into_kind(self) -> T {
        self
    }
}

impl IntoKind for &str {
    type Kind = String;

    fn into_kind(self) -> String {
        self.into()
    }
}

// Integer literals fall back to `i32`, so accept it (and `u32`) as defaults
// for integer flags.
impl IntoKind for i32 {
    type Kind = i64;

    fn into_kind(self) -> i64 {
        self.into()
    }
}

impl IntoKind for u32 {
    type Kind = i64;

    fn into_kind(self) -> i64 {
        self.into()
    }
}
