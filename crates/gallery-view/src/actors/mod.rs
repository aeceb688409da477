//! Actor model for the gallery view.
//!
//! A single `ViewActor` per call owns the participant registry and the
//! layout/quality pipeline; all mutation is serialized through its mailbox.

pub mod messages;
pub mod view;

pub use messages::{ViewMessage, ViewSnapshot};
pub use view::{ViewActor, ViewActorHandle};
