//! Ordered, duplicate-free column names.

use std::collections::HashMap;

use crate::{Error, Result};

/// The column names of a table, in declaration order, with a name → position
/// table for lookups.
///
/// A header never contains the same name twice; `Header::new` is the only
/// way to build one and it rejects duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    /// Build a header, failing with `DuplicateKey` on the first repeated name.
    ///
    /// ```rust
    /// use csvhandler::{Error, Header};
    ///
    /// let header = Header::new(["first_name", "age"]).unwrap();
    /// assert_eq!(header.position("age"), Some(1));
    ///
    /// let err = Header::new(["age", "age"]).unwrap_err();
    /// assert!(matches!(err, Error::DuplicateKey { name } if name == "age"));
    /// ```
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::DuplicateKey { name: name.clone() });
            }
        }
        Ok(Self { names, index })
    }

    /// Position of a column, if declared.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Build a header whose index table may disagree with its row width.
    ///
    /// Only used to exercise the out-of-range guard in `Record::get`.
    #[cfg(test)]
    pub(crate) fn with_positions(entries: &[(&str, usize)]) -> Self {
        Self {
            names: entries.iter().map(|(n, _)| n.to_string()).collect(),
            index: entries.iter().map(|(n, i)| (n.to_string(), *i)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let header = Header::new(vec!["first_name", "last_name", "age"]).unwrap();
        assert_eq!(header.names(), &["first_name", "last_name", "age"]);
        assert_eq!(header.position("first_name"), Some(0));
        assert_eq!(header.position("age"), Some(2));
        assert_eq!(header.position("unknown"), None);
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn rejects_duplicates_anywhere() {
        for names in [
            vec!["a", "a"],
            vec!["a", "b", "a"],
            vec!["x", "y", "z", "z"],
        ] {
            let err = Header::new(names.clone()).unwrap_err();
            match err {
                Error::DuplicateKey { name } => assert!(names.contains(&name.as_str())),
                other => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn names_the_repeated_column() {
        let err = Header::new(["first_name", "first_name", "age"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { name } if name == "first_name"));
    }

    #[test]
    fn empty_header_is_valid() {
        let header = Header::new(Vec::<String>::new()).unwrap();
        assert!(header.is_empty());
    }

    #[test]
    fn iterates_names() {
        let header = Header::new(["a", "b"]).unwrap();
        let names: Vec<&str> = header.iter().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(header.contains("b"));
    }
}
