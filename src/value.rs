//! Values produced by gauges and passed to reflective method calls.
//!
//! See [`Value`] for details.

use crate::reflect::InvokeError;

/// The result of a gauge query, or an argument of a reflective method call.
///
/// A gauge may be numeric or object valued. Only numeric values (and
/// booleans, as `1`/`0`) are exposed by the text encoder.
///
/// ```
/// # use managed_gauges::value::Value;
/// assert_eq!(Value::Int(-3), Value::from(-3i32));
/// assert_eq!(Value::Unit, Value::from(None::<u64>));
/// assert_eq!(Some(2.5), Value::from(2.5f32).as_f64());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Unit,
}

impl Value {
    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Text(_) | Value::Unit => None,
        }
    }

    /// Whether the value can be exposed as a numeric sample.
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Unit => "unit",
        }
    }
}

macro_rules! impl_from_for_value {
    ($variant:ident, $target:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_for_value!(Int, i64, i8, i16, i32, i64, isize);
impl_from_for_value!(UInt, u64, u8, u16, u32, u64, usize);
impl_from_for_value!(Float, f64, f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Unit)
    }
}

/// Conversion of a [`Value`] argument into a typed method parameter.
///
/// Implemented for the primitive types a gauge method may declare as
/// parameters. Conversions are exact: a `Float` never converts to an integer
/// and out-of-range integers are rejected.
pub trait FromValue: Sized {
    /// Convert the argument at position `index`.
    fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError>;
}

fn argument_type<T>(index: usize) -> InvokeError {
    InvokeError::ArgumentType {
        index,
        expected: std::any::type_name::<T>(),
    }
}

macro_rules! impl_from_value_for_integer {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError> {
                    match value {
                        Value::Int(v) => <$t>::try_from(*v).map_err(|_| argument_type::<$t>(index)),
                        Value::UInt(v) => <$t>::try_from(*v).map_err(|_| argument_type::<$t>(index)),
                        _ => Err(argument_type::<$t>(index)),
                    }
                }
            }
        )*
    };
}

impl_from_value_for_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::UInt(v) => Ok(*v as f64),
            _ => Err(argument_type::<f64>(index)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError> {
        f64::from_value(value, index).map(|v| v as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError> {
        match value {
            Value::Bool(v) => Ok(*v),
            _ => Err(argument_type::<bool>(index)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value, index: usize) -> Result<Self, InvokeError> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            _ => Err(argument_type::<String>(index)),
        }
    }
}
