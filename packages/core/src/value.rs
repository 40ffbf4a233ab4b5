//! The Value type - a field payload on its way to becoming text.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::duration::{format_duration, DurationError};

/// A value stored in a `WriteRecord` or registered as a column default.
///
/// This is a closed set of the scalar kinds a delimited field usually
/// carries, plus `Opaque` for anything else that knows how to display itself.
#[derive(Clone)]
pub enum Value {
    /// UTF-8 string, rendered as-is.
    String(String),
    /// Boolean, rendered as `true` / `false`.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Point in time with its original offset.
    Timestamp(DateTime<FixedOffset>),
    /// Signed duration.
    Duration(TimeDelta),
    /// Caller-defined value; formatters can downcast it through `as_any`.
    Opaque(Arc<dyn Opaque>),
}

/// A custom value that can live inside `Value::Opaque`.
///
/// Implemented for every `Display + Debug + Send + Sync + 'static` type.
pub trait Opaque: fmt::Display + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: fmt::Display + fmt::Debug + Send + Sync + 'static> Opaque for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value {
    /// Wrap any displayable value.
    pub fn opaque<T: Opaque + 'static>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Timestamp(_) => "timestamp",
            Value::Duration(_) => "duration",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Downcast an opaque payload.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Value::Opaque(o) => (**o).as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// The natural textual form of a value.
///
/// Timestamps print as RFC 3339, durations in the compact `12m10s` form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Timestamp(t) => f.write_str(&t.to_rfc3339()),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::Opaque(o) => write!(f, "{}", o),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Timestamp(t) => f.debug_tuple("Timestamp").field(t).finish(),
            Value::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            Value::Opaque(o) => f.debug_tuple("Opaque").field(o).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Conversion from common types

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v.fixed_offset())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(Utc.from_utc_datetime(&v).fixed_offset())
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Duration(v)
    }
}

/// Fails with `DurationError::Overflow` past `TimeDelta::MAX`.
impl TryFrom<std::time::Duration> for Value {
    type Error = DurationError;

    fn try_from(v: std::time::Duration) -> Result<Self, Self::Error> {
        TimeDelta::from_std(v)
            .map(Value::Duration)
            .map_err(|_| DurationError::Overflow {
                input: format!("{:?}", v),
            })
    }
}
