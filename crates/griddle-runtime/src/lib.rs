//! Runtime orchestration for the word-guessing game client.
//!
//! This crate wires the pure session state from `griddle-core` to a remote
//! game authority. Consumers embed [`GameClient`] to resume games, submit
//! guesses, and start new sessions; presentation layers observe the store
//! through the event bus and the validation watch channel.
//!
//! Modules are organized by responsibility:
//! - [`backend`] defines the remote collaborator boundary and wire DTOs
//! - [`store`] owns the session and publishes events after committed mutations
//! - [`events`] provides the broadcast bus consumed by renderers
//! - [`client`] drives the synchronization protocol (single-flight, staleness)
pub mod backend;
pub mod client;
pub mod error;
pub mod events;
pub mod store;

pub use backend::{BackendError, GameBackend, GuessReply, NewSessionReply};
pub use client::{GameClient, SubmitOutcome};
pub use error::{ClientError, Result};
pub use events::{EventBus, StoreEvent};
pub use store::SessionStore;
