//! Pre-configured events and tracks for view tests.

use gallery_view::engine::{EngineEvent, TrackInfo, TrackKind};
use uuid::Uuid;

/// A remote participant joining.
#[must_use]
pub fn join(participant_id: &str, display_name: &str) -> EngineEvent {
    EngineEvent::ParticipantJoined {
        participant_id: participant_id.to_string(),
        display_name: Some(display_name.to_string()),
    }
}

/// A remote participant leaving.
#[must_use]
pub fn leave(participant_id: &str) -> EngineEvent {
    EngineEvent::ParticipantLeft {
        participant_id: participant_id.to_string(),
    }
}

/// An audio track description.
#[must_use]
pub fn audio_track(participant_id: &str, track_id: &str, muted: bool) -> TrackInfo {
    TrackInfo {
        participant_id: participant_id.to_string(),
        track_id: track_id.to_string(),
        kind: TrackKind::Audio,
        muted,
    }
}

/// A video track description.
#[must_use]
pub fn video_track(participant_id: &str, track_id: &str, muted: bool) -> TrackInfo {
    TrackInfo {
        participant_id: participant_id.to_string(),
        track_id: track_id.to_string(),
        kind: TrackKind::Video,
        muted,
    }
}

/// A unique id with a readable prefix, for tests that need fresh identity.
#[must_use]
pub fn unique_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Initialize test logging once per process, driven by `RUST_LOG`.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_events_carry_routing_ids() {
        assert_eq!(join("p-1", "Alice").participant_id(), "p-1");
        assert_eq!(leave("p-2").participant_id(), "p-2");
        assert_eq!(audio_track("p-3", "t-1", true).participant_id, "p-3");
    }

    #[test]
    fn test_unique_ids_differ() {
        assert_ne!(unique_id("p"), unique_id("p"));
    }
}
