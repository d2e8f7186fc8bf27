//! Request authentication
//!
//! Resolves the acting user for audit stamping.

pub mod actor;

pub use actor::{actor_middleware, Actor, ACTOR_HEADER};
