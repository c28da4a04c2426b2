//! Core types and trait definitions for the Quorum meeting-minutes model.
//!
//! This crate is deliberately free of storage and framework dependencies.
//! It owns the Topic/InfoItem document model; durable storage, queries and
//! any presentation layer live in the crates that depend on it.

pub mod error;
pub mod info_item;
pub mod store;
pub mod topic;

pub use error::{Error, Result};
