//! Query filters for selecting documents.
//!
//! A query is turned once into a [Filter] tree which is then evaluated against each
//! document of a collection. Filters come from two sources:
//!
//! - query documents, parsed by [QueryParser]: `{"$gte": {"age": 18}}`
//! - the fluent API: `field("age").gte(18)`
//!
//! # Examples
//!
//! ```rust
//! use lildb::doc;
//! use lildb::filter::{field, or, QueryParser};
//!
//! let parsed = QueryParser::default()
//!     .parse_document(&doc! { "$or": [{ "role": "admin" }, { "role": "owner" }] })
//!     .unwrap();
//! let built = or(vec![field("role").eq("admin"), field("role").eq("owner")]);
//!
//! let owner = doc! { "role": "owner" };
//! assert!(parsed.apply(&owner));
//! assert!(built.apply(&owner));
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: plain `path: literal`, `$ne`
//! - **Comparison**: `$gt`, `$gte`, `$lt`, `$lte`
//! - **Membership**: `$in`, `$nin`
//! - **Shape**: `$null`, `$size`, `$regex`
//! - **Logical**: `$and`, `$or`, `$not`

mod filter;
mod fluent;
mod query_parser;

mod basic_filters;
mod logical_filters;
mod pattern_filters;
mod range_filters;

pub use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;
pub use pattern_filters::*;
pub use query_parser::*;
pub use range_filters::*;
