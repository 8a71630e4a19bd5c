//! Deterministic tree comparison.

pub mod engine;
pub mod filter;
pub mod visitor;

pub use engine::compare;
pub use filter::{AllMembersFilter, ApiFilter, PublicApiFilter};
pub use visitor::ComparisonVisitor;
