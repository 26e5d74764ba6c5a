use crate::common::{FieldPath, Value, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, LilDbError, LilDbResult};
use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display};

/// Represents a schema-less record in a LilDb collection.
///
/// A document is an ordered mapping from [String] keys to [Value]s. Field order is the
/// insertion order and is preserved when the document is written to disk.
///
/// Nested values can be addressed with the field separator (default: `.`), so
/// `document.get("a.b")` reads `b` inside the nested document `a`. Use
/// [Document::get_field] and [Document::put_field] to work with a top level key
/// verbatim, even when it contains the separator.
///
/// Equality is structural: two documents are equal when they hold the same keys with
/// equal values, whatever their field order.
#[derive(Clone, Default, PartialEq)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.size(), 0);
    /// ```
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// If the key contains the field separator, the value is written into the nested
    /// document it addresses, creating intermediate documents as needed.
    ///
    /// # Arguments
    ///
    /// * `key` - The key or separator-delimited path. Cannot be empty.
    /// * `value` - Anything that implements `Into<Value>`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidOperation] if the key is empty.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("user.name", "Alice")?;
    /// assert_eq!(doc.get("user.name"), Some(&Value::String("Alice".to_string())));
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> LilDbResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(LilDbError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        if key.contains(FIELD_SEPARATOR) {
            FieldPath::parse(key).assign(self, value.into());
        } else {
            self.data.insert(key.to_string(), value.into());
        }
        Ok(())
    }

    /// Sets a top level field verbatim and returns the previous value, if any.
    pub fn put_field<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    /// Resolves a separator-delimited path against this document.
    ///
    /// Returns `None` when the path does not exist. An explicit `null` field
    /// resolves to `Some(&Value::Null)`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        FieldPath::parse(path).resolve(self)
    }

    /// Returns a top level field verbatim.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_field_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Returns the slot for a top level key, inserting `null` when it does not exist.
    pub(crate) fn field_slot(&mut self, key: &str) -> &mut Value {
        self.data.entry(key.to_string()).or_insert(Value::Null)
    }

    /// Removes a top level field, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Checks if a top level key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a (possibly nested) field exists in the document.
    pub fn contains_field(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.data.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Deep merges another document into this one.
    ///
    /// When both sides hold a document under the same key, the two are merged
    /// recursively. In every other case the value from `other` replaces the current
    /// value. Keys that only exist in this document are left untouched.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc1 = doc!{ "address": { "city": "NY" } };
    /// let doc2 = doc!{ "address": { "zip": "X" } };
    /// doc1.merge(&doc2);
    ///
    /// assert_eq!(doc1.get("address.city"), Some(&Value::from("NY")));
    /// assert_eq!(doc1.get("address.zip"), Some(&Value::from("X")));
    /// ```
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            match (self.data.get_mut(key), value) {
                (Some(Value::Document(nested)), Value::Document(patch)) => nested.merge(patch),
                _ => {
                    self.data.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Renders the document as a compact JSON object.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Document {
            data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.data.iter())
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Document(doc) => Ok(doc),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                other.type_name()
            ))),
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a LilDb Document with JSON-like syntax.
///
/// Keys are stored verbatim, so `doc!{ "a.b": 1 }` creates a single top level field named
/// `a.b`. This is what query and projection documents need, since their keys are paths.
/// Negative numbers and other multi-token expressions go in parentheses.
///
/// # Examples
///
/// ```rust
/// use lildb::doc;
///
/// let empty = doc!{};
///
/// let simple = doc!{
///     name: "Alice",
///     age: 30
/// };
///
/// let query = doc!{
///     "$or": [{ "role": "admin" }, { "$gte": { "age": 18 } }],
///     "balance": (-5)
/// };
///
/// let complex = doc!{
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"],
///         manager: null
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put_field($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, `null` and expressions.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    (null) => {
        $crate::common::Value::Null
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
