//! Client-side state controller for the notebook API.
//!
//! - [`api`]: typed HTTP client, one method per endpoint
//! - [`state`]: the view state a UI renders from
//! - [`debounce`]: cancellable delayed tasks for search and autosave
//! - [`controller`]: user actions that fetch, mutate, and update state

pub mod api;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod state;

pub use api::ApiClient;
pub use controller::Controller;
pub use error::ClientError;
pub use state::{ClientState, View};
