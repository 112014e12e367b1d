//! Domain logic for the notebook service.
//!
//! No I/O lives here: identifiers, the domain error type, hashtag
//! extraction, and input validation shared by every store implementation.

pub mod error;
pub mod notebooks;
pub mod notes;
pub mod tags;
pub mod types;
