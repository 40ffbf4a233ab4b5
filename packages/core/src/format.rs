//! Field formatters - turning a `Value` into the text of a field.
//!
//! A formatter is a pure function `&Value -> Result<String, FormatError>`.
//! Formatters compose: in a chain, each stage's output is handed to the next
//! stage as a `Value::String`, and the first failure stops the chain.
//!
//! # Example
//!
//! ```rust
//! use csvhandler::{Formatter, Value};
//!
//! let shout = Formatter::chain(vec![
//!     Formatter::string("{}!"),
//!     Formatter::infallible(|v| v.to_string().to_uppercase()),
//! ]);
//! assert_eq!(shout.format(&Value::from("hello")).unwrap(), "HELLO!");
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::Value;

/// Errors produced by formatters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A timestamp formatter received something else.
    #[error("{value} ({kind}) is not a timestamp")]
    NotATimestamp { value: String, kind: &'static str },

    /// A chain was built without any formatter in it.
    #[error("cannot apply an empty formatter chain")]
    EmptyChain,

    /// Failure reported by a caller-defined formatter.
    #[error("{message}")]
    Custom { message: String },
}

impl FormatError {
    pub fn custom(message: impl Into<String>) -> Self {
        FormatError::Custom {
            message: message.into(),
        }
    }
}

type FormatFn = dyn Fn(&Value) -> Result<String, FormatError> + Send + Sync;

/// A shareable formatting function.
///
/// Cloning is cheap; clones share the same function.
#[derive(Clone)]
pub struct Formatter(Arc<FormatFn>);

impl Formatter {
    /// Wrap a fallible formatting function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        Formatter(Arc::new(f))
    }

    /// Wrap a formatting function that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Formatter::new(move |v| Ok(f(v)))
    }

    /// Renders a value in its natural textual form (see `Value`'s `Display`).
    pub fn default_formatter() -> Self {
        Formatter::infallible(Value::to_string)
    }

    /// Substitutes the rendered value into the first `{}` of `template`.
    ///
    /// A template without a placeholder renders as the template itself.
    pub fn string(template: impl Into<String>) -> Self {
        let template = template.into();
        Formatter::infallible(move |v| template.replacen("{}", &v.to_string(), 1))
    }

    /// Renders timestamps with a chrono `strftime` layout.
    ///
    /// Any other kind of value fails with `FormatError::NotATimestamp`.
    pub fn time(layout: impl Into<String>) -> Self {
        let layout = layout.into();
        Formatter::new(move |v| match v.as_timestamp() {
            Some(t) => {
                let mut out = String::new();
                write!(out, "{}", t.format(&layout))
                    .map_err(|_| FormatError::custom(format!("invalid time layout {:?}", layout)))?;
                Ok(out)
            }
            None => Err(FormatError::NotATimestamp {
                value: v.to_string(),
                kind: v.kind(),
            }),
        })
    }

    /// Applies each formatter to the previous one's output.
    ///
    /// An empty chain fails when applied.
    pub fn chain(formatters: Vec<Formatter>) -> Self {
        Formatter::new(move |v| {
            let (last, init) = formatters.split_last().ok_or(FormatError::EmptyChain)?;
            let mut current = v.clone();
            for f in init {
                current = Value::String(f.format(&current)?);
            }
            last.format(&current)
        })
    }

    /// Collapse an optional list of formatters into at most one formatter.
    ///
    /// Zero formatters give `None`, one is returned unchanged, more are chained.
    pub fn compose(formatters: impl IntoIterator<Item = Formatter>) -> Option<Self> {
        let mut formatters: Vec<Formatter> = formatters.into_iter().collect();
        match formatters.len() {
            0 => None,
            1 => formatters.pop(),
            _ => Some(Formatter::chain(formatters)),
        }
    }

    /// `self`, then `next` on its output.
    pub fn then(self, next: Formatter) -> Self {
        Formatter::chain(vec![self, next])
    }

    /// Format a value.
    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        (self.0)(value)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::default_formatter()
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}
