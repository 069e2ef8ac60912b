//! Room and session state machine of the party game.
//!
//! Everything in here is synchronous and transport agnostic. The gRPC layer feeds
//! [`types::ClientEvent`]s into a [`coordinator::SessionCoordinator`] from a single task
//! and receives [`types::OutboundMessage`]s back through the [`coordinator::Transport`] seam.

pub mod coordinator;
pub mod directory;
pub mod models;
pub mod registry;
pub mod types;
pub mod words;
