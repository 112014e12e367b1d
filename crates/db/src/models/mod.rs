//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for create and update payloads (update fields are all `Option`)
//!
//! All wire names are camelCase.

pub mod note;
pub mod notebook;
pub mod tag;
