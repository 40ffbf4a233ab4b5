//! The write-side record - values waiting to be formatted into a row.

use std::collections::HashMap;

use crate::{Error, Formatter, Result, Value};

/// A value together with the formatter chosen for it, if any.
#[derive(Clone, Debug)]
pub struct Field {
    pub value: Value,
    pub formatter: Option<Formatter>,
}

impl Field {
    pub fn new(value: impl Into<Value>, formatters: impl IntoIterator<Item = Formatter>) -> Self {
        Self {
            value: value.into(),
            formatter: Formatter::compose(formatters),
        }
    }
}

/// Column name → value mapping handed to `Writer::write`.
///
/// Field order is irrelevant here; the writer's header decides the column
/// order. A record can be written any number of times.
///
/// ```rust
/// use csvhandler::{Formatter, WriteRecord};
///
/// let mut record = WriteRecord::new();
/// record.set("first_name", "Holly").set("age", 27);
/// record.set_formatted("last_name", "franklin", vec![Formatter::infallible(|v| v.to_string().to_uppercase())]);
///
/// assert_eq!(record.get("age").unwrap(), "27");
/// assert_eq!(record.get("last_name").unwrap(), "FRANKLIN");
/// ```
#[derive(Clone, Debug, Default)]
pub struct WriteRecord {
    fields: HashMap<String, Field>,
}

impl WriteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value with no formatter of its own; the writer decides how it
    /// is rendered.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(
            name.into(),
            Field {
                value: value.into(),
                formatter: None,
            },
        );
        self
    }

    /// Set a value rendered by the given formatters, applied in order.
    ///
    /// An empty list behaves like `set`.
    pub fn set_formatted(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        formatters: impl IntoIterator<Item = Formatter>,
    ) -> &mut Self {
        self.fields
            .insert(name.into(), Field::new(value, formatters));
        self
    }

    /// Render a field for display, using its own formatter or the default one.
    ///
    /// Column-level formatters registered on a `Writer` are not applied here.
    pub fn get(&self, name: &str) -> Result<String> {
        let field = self.field(name).ok_or_else(|| Error::unknown_key(name))?;
        let rendered = match &field.formatter {
            Some(f) => f.format(&field.value),
            None => Formatter::default_formatter().format(&field.value),
        };
        rendered.map_err(|source| Error::Format {
            name: name.to_string(),
            source,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).map(|f| &f.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.fields.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for WriteRecord
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = WriteRecord::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}
