//! Ecoleta registration client.
//!
//! Loads the reference data a registration needs (item categories from the
//! directory API, states and cities from the IBGE localities catalog),
//! holds the registration form state and submits it as multipart form data.
//! The `ecoleta` binary in `main.rs` drives all of this from the command
//! line.

pub mod directory;
pub mod error;
pub mod form;
pub mod geography;
pub mod models;
