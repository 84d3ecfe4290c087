//! Domain types and pure helpers shared by the Ecoleta crates.
//!
//! Nothing in here touches the database or the network, so the API server
//! and the registration client can both depend on it.

pub mod error;
pub mod items;
pub mod media;
pub mod types;
