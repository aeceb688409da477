//! Message types for the view actor mailbox.
//!
//! All mutation flows through strongly-typed messages over
//! `tokio::sync::mpsc`; snapshot reads and local mute commands use
//! `tokio::sync::oneshot` for request-reply semantics.

use serde::Serialize;
use tokio::sync::oneshot;

use crate::engine::{EngineEvent, TrackInfo, TrackKind};
use crate::errors::ViewError;
use crate::layout::{CropMode, GridDimensions, PixelSize, TileSize};
use crate::participant::Participant;

/// Messages sent to `ViewActor`.
#[derive(Debug)]
pub enum ViewMessage {
    /// An event arrived from the engine subscription.
    EngineEvent(EngineEvent),

    /// The grid container was resized. Coalesced with a trailing debounce;
    /// the recompute runs once the burst settles.
    ContainerResized { size: PixelSize },

    /// Switch between cropped and aspect-preserving tiles.
    SetCropMode { mode: CropMode },

    /// The local participant attached one of its own tracks. Local tracks
    /// never arrive through engine events.
    LocalTrackAdded { track: TrackInfo },

    /// The local participant detached one of its own tracks.
    LocalTrackRemoved { kind: TrackKind },

    /// Mute or unmute a local track via the engine.
    SetLocalMute {
        kind: TrackKind,
        muted: bool,
        /// Response channel for the command result.
        respond_to: oneshot::Sender<Result<(), ViewError>>,
    },

    /// Read the current view state.
    GetSnapshot {
        /// Response channel for the snapshot.
        respond_to: oneshot::Sender<ViewSnapshot>,
    },
}

/// Read-only view of the call, consumed by the page layer.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    /// All participants in stable tile order, local last.
    pub participants: Vec<Participant>,
    /// The local participant.
    pub local: Participant,
    /// Grid shape for the current participant count.
    pub grid: GridDimensions,
    /// Last computed tile sizing, once a layout pass has run.
    pub render_hints: Option<TileSize>,
    /// Current tile sizing policy.
    pub crop_mode: CropMode,
}
