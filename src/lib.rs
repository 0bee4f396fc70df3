//! Platform-neutral core of the NoteSync browser client: reply formatting,
//! the assistant's speech state machine, upload bookkeeping, routing and the
//! HTTP boundary models. The Leptos frontend wires these to the DOM.

pub mod assistant;
pub mod capability;
pub mod config;
pub mod errors;
pub mod format;
pub mod inflight;
pub mod models;
pub mod notes;
pub mod route;
pub mod upload;

pub use capability::Capability;
pub use config::ClientConfig;
pub use errors::ClientError;
