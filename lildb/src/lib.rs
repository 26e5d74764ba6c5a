//! # LilDb - Embedded JSON Document Store
//!
//! LilDb keeps a single collection of schema-less JSON documents in memory, answers
//! MongoDB-style queries against it and mirrors it to a JSON Lines file.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Query language**: `$or`, `$and`, `$not`, comparisons, `$in`, `$nin`, `$null`,
//!   `$size` and `$regex` over dot-separated field paths
//! - **Result shaping**: Sort, group and project query results
//! - **Persistence**: One JSON document per line, written atomically, with optional
//!   autosave on a background timer
//! - **Events**: Listeners for loaded, saved and error events
//!
//! ## Quick Start
//!
//! ```rust
//! use lildb::{doc, LilDb};
//! use lildb::collection::FindOptions;
//! use lildb::filter::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = LilDb::new();
//!
//! db.insert(vec![
//!     doc! { name: "John", age: 30, tags: ["admin"] },
//!     doc! { name: "Jane", age: 25, tags: [] },
//! ])?;
//!
//! // query documents
//! let adults = db.find(doc! { "$gte": { age: 18 } })?;
//! assert_eq!(adults.len(), 2);
//!
//! // or fluent filters
//! let admins = db.find(field("tags").size(1))?;
//! assert_eq!(admins.len(), 1);
//!
//! // deep-merge a patch into every match
//! db.update(doc! { name: "Jane" }, doc! { age: 26 })?;
//!
//! let sorted = db.query(doc! {}, &FindOptions::new().sort_desc("age"))?;
//! assert_eq!(sorted.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Pattern
//!
//! [LilDb] uses the PIMPL pattern. Clones share the same collection through an
//! `Arc`, so a store can be used from several threads and from its own autosave
//! timer.
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, query options, results and store events
//! - [`common`] - The value model, field paths and utilities
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - The query parser and filters
//! - [`store`] - Persistence gateways

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod store;

mod lildb;
mod lildb_builder;
mod lildb_config;

pub use crate::collection::{Document, FindOptions, QueryResult, StoreEvent, StoreEventListener};
pub use crate::common::Value;
pub use crate::errors::{ErrorKind, LilDbError, LilDbResult};
pub use crate::lildb::LilDb;
pub use crate::lildb_builder::LilDbBuilder;
pub use crate::lildb_config::LilDbConfig;
