//! Persistence of the document collection.
//!
//! The store only depends on the [PersistenceProvider] contract: load every document
//! at connect time and write every document back on save. Two providers ship with
//! LilDb:
//!
//! - [JsonlGateway] - a JSON Lines file, one document per line
//! - [MemoryGateway] - an in-memory buffer, handy for tests
//!
//! Custom providers are wrapped in a [PersistenceGateway] and handed to
//! [crate::LilDbBuilder::gateway].

mod jsonl_gateway;
mod memory_gateway;
mod persistence_gateway;

pub use jsonl_gateway::*;
pub use memory_gateway::*;
pub use persistence_gateway::*;
