//! Adapters implementing the domain ports.

pub mod catalog;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
