//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Single-statement methods accept any SQLite executor (a pool or an open
//! transaction); multi-statement methods take `&mut SqliteConnection` so the
//! caller decides the transaction boundary.

pub mod note_repo;
pub mod notebook_repo;
pub mod tag_repo;

pub use note_repo::NoteRepo;
pub use notebook_repo::NotebookRepo;
pub use tag_repo::TagRepo;
