//! Core types shared across apicompat facilities
//!
//! This crate provides foundational types used by both the error and the
//! logging facilities:
//!
//! - **Correlation types**: RunId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, RunId};
