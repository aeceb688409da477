//! Per-participant media and presence state.
//!
//! `Participant` is the leaf of the view model: one instance per call
//! member, mutated exclusively through reducer operations invoked by the
//! registry's event dispatch, never by rendering code. Every reducer
//! returns whether state actually changed so the caller can publish a
//! change notification only when there is something to observe.

use serde::{Deserialize, Serialize};

use crate::engine::{TrackInfo, TrackKind};

/// Reference to an engine-owned media track.
///
/// The engine owns track lifetime; the view holds the identifier only and
/// releases it when the track is removed or the participant leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    /// Engine-assigned track identifier.
    pub track_id: String,
}

/// Live media and presence state for one call member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque stable identifier, unique for the call's lifetime.
    pub id: String,
    /// Fixed at creation. The local participant owns its own tracks and
    /// never receives track-added/removed events from the engine.
    pub is_local: bool,
    /// Display name, if known.
    pub display_name: Option<String>,
    /// Current audio track reference, if any.
    pub audio_track: Option<TrackRef>,
    /// Current video track reference, if any.
    pub video_track: Option<TrackRef>,
    /// Mirror of the audio track's mute state.
    pub is_audio_muted: bool,
    /// Mirror of the video track's mute state.
    pub is_video_muted: bool,
    /// Whether the engine currently identifies this participant as the
    /// primary active talker. Exclusivity is enforced by the registry.
    pub is_dominant_speaker: bool,
    /// Free-form role set by role events.
    pub role: Option<String>,
    /// Free-form presence status set by status events.
    pub status: Option<String>,
    /// Unix timestamp at creation.
    pub joined_at: i64,
}

impl Participant {
    /// Create a participant with no tracks and default flags.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: Option<String>, is_local: bool) -> Self {
        Self {
            id: id.into(),
            is_local,
            display_name,
            audio_track: None,
            video_track: None,
            is_audio_muted: false,
            is_video_muted: false,
            is_dominant_speaker: false,
            role: None,
            status: None,
            joined_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Attach or replace the track of the event's kind.
    ///
    /// The track is replaced only when the incoming id differs from the
    /// held one, which makes duplicate delivery of the same stream a no-op
    /// and avoids redundant change notifications. The matching mute flag is
    /// taken from the track itself.
    ///
    /// Returns `true` when state changed.
    pub fn add_track(&mut self, track: &TrackInfo) -> bool {
        match track.kind {
            TrackKind::Audio => {
                if self
                    .audio_track
                    .as_ref()
                    .is_some_and(|held| held.track_id == track.track_id)
                {
                    return false;
                }
                self.audio_track = Some(TrackRef {
                    track_id: track.track_id.clone(),
                });
                self.is_audio_muted = track.muted;
            }
            TrackKind::Video => {
                if self
                    .video_track
                    .as_ref()
                    .is_some_and(|held| held.track_id == track.track_id)
                {
                    return false;
                }
                self.video_track = Some(TrackRef {
                    track_id: track.track_id.clone(),
                });
                self.is_video_muted = track.muted;
            }
        }
        true
    }

    /// Release the held track of `kind`.
    ///
    /// Video mute resets to unmuted, so a tile with no video renders as
    /// "camera off" rather than "muted". The audio flag keeps its last
    /// observed value across removal.
    ///
    /// Returns `true` when a track was actually released.
    pub fn remove_track(&mut self, kind: TrackKind) -> bool {
        match kind {
            TrackKind::Audio => {
                if self.audio_track.is_none() {
                    return false;
                }
                self.audio_track = None;
            }
            TrackKind::Video => {
                if self.video_track.is_none() {
                    return false;
                }
                self.video_track = None;
                self.is_video_muted = false;
            }
        }
        true
    }

    /// Mirror the track's current mute state into the matching flag.
    ///
    /// No-op when no track of the event's kind is held.
    pub fn update_track_mute(&mut self, track: &TrackInfo) -> bool {
        match track.kind {
            TrackKind::Audio => {
                if self.audio_track.is_none() || self.is_audio_muted == track.muted {
                    return false;
                }
                self.is_audio_muted = track.muted;
            }
            TrackKind::Video => {
                if self.video_track.is_none() || self.is_video_muted == track.muted {
                    return false;
                }
                self.is_video_muted = track.muted;
            }
        }
        true
    }

    /// Set the dominant speaker flag. Returns `true` when it changed.
    pub fn set_dominant_speaker(&mut self, speaking: bool) -> bool {
        if self.is_dominant_speaker == speaking {
            return false;
        }
        self.is_dominant_speaker = speaking;
        true
    }

    /// Set the display name. Returns `true` when it changed.
    pub fn set_display_name(&mut self, display_name: Option<String>) -> bool {
        if self.display_name == display_name {
            return false;
        }
        self.display_name = display_name;
        true
    }

    /// Set the role. Returns `true` when it changed.
    pub fn set_role(&mut self, role: String) -> bool {
        if self.role.as_deref() == Some(role.as_str()) {
            return false;
        }
        self.role = Some(role);
        true
    }

    /// Set the presence status. Returns `true` when it changed.
    pub fn set_status(&mut self, status: String) -> bool {
        if self.status.as_deref() == Some(status.as_str()) {
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Track id a local mute command for `kind` should target.
    ///
    /// `None` when this participant is remote or holds no track of `kind`;
    /// callers treat that as a no-op.
    #[must_use]
    pub fn local_track_id(&self, kind: TrackKind) -> Option<&str> {
        if !self.is_local {
            return None;
        }
        let held = match kind {
            TrackKind::Audio => self.audio_track.as_ref(),
            TrackKind::Video => self.video_track.as_ref(),
        };
        held.map(|track| track.track_id.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn audio(track_id: &str, muted: bool) -> TrackInfo {
        TrackInfo {
            participant_id: "p-1".to_string(),
            track_id: track_id.to_string(),
            kind: TrackKind::Audio,
            muted,
        }
    }

    fn video(track_id: &str, muted: bool) -> TrackInfo {
        TrackInfo {
            participant_id: "p-1".to_string(),
            track_id: track_id.to_string(),
            kind: TrackKind::Video,
            muted,
        }
    }

    #[test]
    fn test_add_track_sets_reference_and_mute_flag() {
        let mut participant = Participant::new("p-1", None, false);

        assert!(participant.add_track(&audio("a-1", true)));
        assert_eq!(
            participant.audio_track.as_ref().unwrap().track_id,
            "a-1"
        );
        assert!(participant.is_audio_muted);

        assert!(participant.add_track(&video("v-1", false)));
        assert!(!participant.is_video_muted);
    }

    #[test]
    fn test_add_track_is_idempotent_for_same_id() {
        let mut participant = Participant::new("p-1", None, false);

        assert!(participant.add_track(&audio("a-1", false)));
        // Duplicate delivery of the same stream: state must not change even
        // though the event claims a different mute value.
        assert!(!participant.add_track(&audio("a-1", true)));
        assert!(!participant.is_audio_muted);
    }

    #[test]
    fn test_add_track_replaces_on_different_id() {
        let mut participant = Participant::new("p-1", None, false);

        assert!(participant.add_track(&video("v-1", false)));
        assert!(participant.add_track(&video("v-2", true)));
        assert_eq!(
            participant.video_track.as_ref().unwrap().track_id,
            "v-2"
        );
        assert!(participant.is_video_muted);
    }

    #[test]
    fn test_remove_video_resets_mute_flag() {
        let mut participant = Participant::new("p-1", None, false);
        participant.add_track(&video("v-1", true));
        assert!(participant.is_video_muted);

        assert!(participant.remove_track(TrackKind::Video));
        assert!(participant.video_track.is_none());
        assert!(!participant.is_video_muted);
    }

    #[test]
    fn test_remove_audio_retains_mute_flag() {
        let mut participant = Participant::new("p-1", None, false);
        participant.add_track(&audio("a-1", true));

        assert!(participant.remove_track(TrackKind::Audio));
        assert!(participant.audio_track.is_none());
        // Regression: the audio flag keeps its pre-removal value.
        assert!(participant.is_audio_muted);
    }

    #[test]
    fn test_remove_without_track_is_noop() {
        let mut participant = Participant::new("p-1", None, false);
        assert!(!participant.remove_track(TrackKind::Audio));
        assert!(!participant.remove_track(TrackKind::Video));
    }

    #[test]
    fn test_update_track_mute_requires_held_track() {
        let mut participant = Participant::new("p-1", None, false);
        assert!(!participant.update_track_mute(&audio("a-1", true)));
        assert!(!participant.is_audio_muted);

        participant.add_track(&audio("a-1", false));
        assert!(participant.update_track_mute(&audio("a-1", true)));
        assert!(participant.is_audio_muted);
        // Same value again: nothing to observe.
        assert!(!participant.update_track_mute(&audio("a-1", true)));
    }

    #[test]
    fn test_local_track_id_guards() {
        let mut remote = Participant::new("p-1", None, false);
        remote.add_track(&audio("a-1", false));
        assert!(remote.local_track_id(TrackKind::Audio).is_none());

        let mut local = Participant::new("local", None, true);
        assert!(local.local_track_id(TrackKind::Audio).is_none());
        local.add_track(&audio("a-2", false));
        assert_eq!(local.local_track_id(TrackKind::Audio), Some("a-2"));
        assert!(local.local_track_id(TrackKind::Video).is_none());
    }

    #[test]
    fn test_field_setters_report_changes() {
        let mut participant = Participant::new("p-1", None, false);

        assert!(participant.set_display_name(Some("Alice".to_string())));
        assert!(!participant.set_display_name(Some("Alice".to_string())));

        assert!(participant.set_role("moderator".to_string()));
        assert!(!participant.set_role("moderator".to_string()));

        assert!(participant.set_status("away".to_string()));
        assert!(!participant.set_status("away".to_string()));

        assert!(participant.set_dominant_speaker(true));
        assert!(!participant.set_dominant_speaker(true));
        assert!(participant.set_dominant_speaker(false));
    }
}
