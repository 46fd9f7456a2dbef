//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: domain types
//! - `wire.rs`: raw serde structs matching command arguments and replies
//! - `client.rs`: sub-client generic over [`crate::session::Gateway`]

pub mod account;
pub mod chart;
pub mod history;
pub mod market;
pub mod trade;

#[cfg(test)]
pub(crate) mod fake;
