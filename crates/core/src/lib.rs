//! Domain logic for the Quanda Q&A forum.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` crate
//! gathers the data and the `api` crate wires requests to these functions.

pub mod error;
pub mod list_order;
pub mod ranking;
pub mod reputation;
pub mod roles;
pub mod tags;
pub mod types;
pub mod voting;
