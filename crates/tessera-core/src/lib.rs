//! Tessera Core - contracts for typed record persistence
//!
//! This crate holds the storage-agnostic half of tessera:
//! - `RecordId`, the opaque store-scoped identifier
//! - `Record` and `Convertible`, the capabilities every storable type implements
//! - `Relation` and the duplicate-free merge used to link children to a parent
//! - `FetchDescriptor`, the query description handed to a store
//!
//! The `tessera-db` crate builds the serialized CRUD handler on top of these.

mod fetch;
mod identity;
mod record;
mod relation;

pub use fetch::FetchDescriptor;
pub use identity::RecordId;
pub use record::{Convertible, Record};
pub use relation::{extend_unique, merge_unique, Relation};
