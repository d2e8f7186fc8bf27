//! Test utilities
//!
//! In-memory repository implementations and fixtures for unit and router
//! tests. The in-memory repositories behave like the Postgres adapters for
//! everything the services rely on (ordering, active filtering, child-row
//! sync), so tests exercise the real service code without a database.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
