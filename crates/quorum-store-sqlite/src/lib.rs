//! SQLite backend for the Quorum minutes store.
//!
//! Implements the collaborator side of the core's persistence seams: minutes
//! documents with their embedded topic arrays, the parent lookup handed to
//! topics, and the topics-finder queries. The core contract is synchronous,
//! so all access goes through one mutex-guarded connection and no async
//! runtime is involved.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{MinutesDoc, SqliteMinutesStore, StoredMinutes};

#[cfg(test)]
mod tests;
