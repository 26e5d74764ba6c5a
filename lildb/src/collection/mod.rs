//! Documents and the operations of a document collection.
//!
//! A [Document] is an ordered map from field names to [crate::common::Value]s. Nested
//! fields are addressed with the field separator (default: ".").
//!
//! ```rust
//! use lildb::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice").unwrap();
//! doc.put("address.city", "New York").unwrap();
//! assert_eq!(doc.get("address.city").unwrap().as_string().unwrap(), "New York");
//! ```
//!
//! # Document IDs
//!
//! Every stored document carries a string id in its identity field (`_id` unless
//! configured otherwise). A random alphanumeric id is generated when a document is
//! inserted without one.

mod document;
mod event;
mod find_options;
pub(crate) mod operation;
mod query_result;

pub use document::*;
pub use event::*;
pub use find_options::*;
pub use query_result::*;
