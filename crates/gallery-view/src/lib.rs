//! Gallery View Core Library
//!
//! This library renders a live multi-party call as an adaptive grid of
//! video tiles and keeps each participant's media state synchronized with
//! events from an underlying conferencing engine. It performs no network
//! or media I/O itself; the engine and the host UI are reached through
//! narrow trait seams.
//!
//! # Architecture
//!
//! One `ViewActor` per call owns all mutable state:
//!
//! ```text
//! ViewActor (one per call)
//! ├── owns the ParticipantRegistry (local + remotes, id-keyed dispatch)
//! ├── runs the layout pass (GridDimensions + TileSize, pure geometry)
//! ├── runs the quality pass (QualityController -> EngineCommands)
//! └── owns the resize debounce timer (cancelled with the actor)
//! ```
//!
//! Engine events mutate the registry; roster changes recompute the layout
//! immediately, resize triggers are coalesced with a trailing debounce, and
//! every mutation publishes a revision for rendering code to observe.
//!
//! # Key Design Decisions
//!
//! - **Dispatch by id**: events route through a map keyed by participant
//!   id rather than broadcasting to every participant's handler.
//! - **One measurement per pass**: the container size is read once and
//!   shared by the layout and quality stages.
//! - **One representative tile**: tiles are uniform by construction, so a
//!   single sampled tile drives the receive-quality ceiling for everyone.
//! - **Nothing is fatal**: failures degrade to skipping one recomputation
//!   or keeping the last known good state.
//!
//! # Modules
//!
//! - [`actors`] - View actor, handle, and mailbox messages
//! - [`config`] - View configuration with environment overrides
//! - [`engine`] - Engine event/command and host surface interfaces
//! - [`errors`] - Error types
//! - [`layout`] - Pure grid geometry
//! - [`participant`] - Per-participant state and reducers
//! - [`quality`] - Quality tiers and the adaptation controller
//! - [`registry`] - Ordered participant collection with event dispatch

pub mod actors;
pub mod config;
pub mod engine;
pub mod errors;
pub mod layout;
pub mod participant;
pub mod quality;
pub mod registry;

pub use actors::{ViewActor, ViewActorHandle, ViewMessage, ViewSnapshot};
pub use config::{ConfigError, ViewConfig};
pub use engine::{EngineCommands, EngineEvent, Surface, TrackInfo, TrackKind};
pub use errors::ViewError;
pub use layout::{CropMode, GridDimensions, PixelSize, TileSize};
pub use participant::{Participant, TrackRef};
pub use quality::{QualityController, QualityTier};
pub use registry::{DispatchOutcome, ParticipantRegistry};
