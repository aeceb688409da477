//! External interfaces to the conferencing engine and the host surface.
//!
//! The view core performs no network or media I/O of its own. It consumes
//! the engine through two narrow seams: decoded [`EngineEvent`]s fed into
//! the view actor, and the [`EngineCommands`] interface for requests flowing
//! back upstream. The host UI is reached through [`Surface`]: measurements
//! in, render hints out.

use serde::{Deserialize, Serialize};

use crate::errors::ViewError;
use crate::layout::{PixelSize, TileSize};
use crate::quality::QualityTier;

/// Media track kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Audio,
    Video,
}

/// Description of an engine-owned media track.
///
/// The view model never owns track lifetime; it records the identifier and
/// the mute state observed when the event was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Id of the participant this track belongs to.
    pub participant_id: String,
    /// Engine-assigned track identifier, stable for the track's lifetime.
    pub track_id: String,
    /// Audio or video.
    pub kind: TrackKind,
    /// Mute state at the time of the event.
    pub muted: bool,
}

/// Events emitted by the conferencing engine, decoded to the subset the
/// view core consumes.
///
/// Events are routed by participant id; anything referencing an unknown
/// participant is treated as stale and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A remote peer joined the call.
    ParticipantJoined {
        participant_id: String,
        display_name: Option<String>,
    },
    /// A remote peer left the call.
    ParticipantLeft { participant_id: String },
    /// A track was added for a remote participant.
    TrackAdded(TrackInfo),
    /// A track was removed for a remote participant.
    TrackRemoved(TrackInfo),
    /// A track's mute state changed (local or remote).
    TrackMuteChanged(TrackInfo),
    /// The engine identified a new dominant speaker.
    DominantSpeakerChanged { participant_id: String },
    /// A participant changed their display name.
    DisplayNameChanged {
        participant_id: String,
        display_name: Option<String>,
    },
    /// A participant's role changed.
    RoleChanged {
        participant_id: String,
        role: String,
    },
    /// A participant's presence status changed.
    StatusChanged {
        participant_id: String,
        status: String,
    },
}

impl EngineEvent {
    /// Participant id this event routes to.
    #[must_use]
    pub fn participant_id(&self) -> &str {
        match self {
            EngineEvent::ParticipantJoined { participant_id, .. }
            | EngineEvent::ParticipantLeft { participant_id }
            | EngineEvent::DominantSpeakerChanged { participant_id }
            | EngineEvent::DisplayNameChanged { participant_id, .. }
            | EngineEvent::RoleChanged { participant_id, .. }
            | EngineEvent::StatusChanged { participant_id, .. } => participant_id,
            EngineEvent::TrackAdded(track)
            | EngineEvent::TrackRemoved(track)
            | EngineEvent::TrackMuteChanged(track) => &track.participant_id,
        }
    }
}

/// Commands the view core issues back to the conferencing engine.
///
/// Commands are fire-and-forget from the view's perspective: a failure is
/// logged, the last known good state is kept, and nothing is retried.
pub trait EngineCommands: Send + Sync {
    /// Mark all participants as selected for high-detail delivery.
    fn select_all_participants(&self) -> Result<(), ViewError>;

    /// Cap the vertical resolution of received video at `tier`.
    fn set_receiver_quality_ceiling(&self, tier: QualityTier) -> Result<(), ViewError>;

    /// Mute or unmute an engine-owned track. Only local tracks are ever
    /// driven from here.
    fn set_track_muted(&self, track_id: &str, muted: bool) -> Result<(), ViewError>;
}

/// Host rendering surface: measured by the layout pass, written with
/// render hints.
///
/// `container_size` and `sample_tile_height` report what is actually on
/// screen; both return `None` until the host has mounted and measured the
/// corresponding element.
pub trait Surface: Send {
    /// Current measured size of the grid container, if mounted.
    fn container_size(&self) -> Option<PixelSize>;

    /// Height of one representative rendered tile, if any tile is mounted.
    fn sample_tile_height(&self) -> Option<f64>;

    /// Push the computed tile dimensions to the styling layer.
    fn apply_render_hints(&mut self, hints: &TileSize);
}
