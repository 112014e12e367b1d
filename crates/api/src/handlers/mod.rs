pub mod fallback;
pub mod health;
pub mod notebooks;
pub mod notes;
pub mod search;
pub mod tags;
pub mod trash;
