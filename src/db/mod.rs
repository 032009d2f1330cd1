pub mod bid_repository;
pub mod connection;
pub mod job_repository;
#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod store;

pub use store::{DocumentStore, StoreError};
