//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - insert DTOs and query parameter structs
//! - response views carrying the derived `image_url`

pub mod item;
pub mod point;
