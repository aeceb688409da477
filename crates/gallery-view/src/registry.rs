//! Ordered participant collection with id-keyed event dispatch.
//!
//! The registry routes each engine event straight to the participant it
//! names instead of broadcasting to every participant's handler; an event
//! for an unknown id is stale and drops here. It also owns dominant-speaker
//! exclusivity: at most one participant carries the flag, updated as a
//! single rule when the engine reports a new speaker.
//!
//! Iteration order is stable: remote participants in arrival order, the
//! local participant appended last, which keeps tile placement
//! deterministic across recomputes.

use std::collections::HashMap;

use tracing::debug;

use crate::engine::EngineEvent;
use crate::participant::Participant;

/// Outcome of dispatching one engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Participant state mutated; layout inputs unchanged.
    Updated,
    /// The participant set changed; layout must recompute.
    RosterChanged,
    /// Stale or duplicate event; nothing changed.
    Ignored,
}

/// All participants in a call: remotes keyed by id plus the distinguished
/// local participant.
pub struct ParticipantRegistry {
    local: Participant,
    remote: HashMap<String, Participant>,
    /// Arrival order of remote participant ids.
    order: Vec<String>,
    /// Id of the current dominant speaker, if any (may be the local id).
    dominant: Option<String>,
}

impl ParticipantRegistry {
    /// Create a registry holding only the local participant.
    #[must_use]
    pub fn new(local_id: impl Into<String>, local_display_name: Option<String>) -> Self {
        Self {
            local: Participant::new(local_id, local_display_name, true),
            remote: HashMap::new(),
            order: Vec::new(),
            dominant: None,
        }
    }

    /// Total participant count including the local participant.
    ///
    /// Never zero: the local participant exists from construction, so the
    /// layout engine always receives at least one tile.
    #[must_use]
    pub fn count(&self) -> usize {
        self.remote.len() + 1
    }

    /// The local participant.
    #[must_use]
    pub fn local(&self) -> &Participant {
        &self.local
    }

    /// Mutable access to the local participant (local track attach/detach).
    pub fn local_mut(&mut self) -> &mut Participant {
        &mut self.local
    }

    /// Look up any participant by id, local included.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Participant> {
        if self.local.id == id {
            Some(&self.local)
        } else {
            self.remote.get(id)
        }
    }

    /// Participants in stable tile order: remotes by arrival, local last.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.order
            .iter()
            .filter_map(|id| self.remote.get(id))
            .chain(std::iter::once(&self.local))
    }

    /// Route one engine event to the participant it names.
    pub fn apply(&mut self, event: &EngineEvent) -> DispatchOutcome {
        match event {
            EngineEvent::ParticipantJoined {
                participant_id,
                display_name,
            } => self.handle_joined(participant_id, display_name.clone()),

            EngineEvent::ParticipantLeft { participant_id } => self.handle_left(participant_id),

            EngineEvent::TrackAdded(track) => {
                // The local participant owns its tracks directly and never
                // takes them from engine events.
                if track.participant_id == self.local.id {
                    return DispatchOutcome::Ignored;
                }
                match self.remote.get_mut(&track.participant_id) {
                    Some(participant) => {
                        if participant.add_track(track) {
                            DispatchOutcome::Updated
                        } else {
                            DispatchOutcome::Ignored
                        }
                    }
                    _ => DispatchOutcome::Ignored,
                }
            }

            EngineEvent::TrackRemoved(track) => {
                if track.participant_id == self.local.id {
                    return DispatchOutcome::Ignored;
                }
                match self.remote.get_mut(&track.participant_id) {
                    Some(participant) => {
                        if participant.remove_track(track.kind) {
                            DispatchOutcome::Updated
                        } else {
                            DispatchOutcome::Ignored
                        }
                    }
                    _ => DispatchOutcome::Ignored,
                }
            }

            EngineEvent::TrackMuteChanged(track) => {
                match self.participant_mut(&track.participant_id) {
                    Some(participant) => {
                        if participant.update_track_mute(track) {
                            DispatchOutcome::Updated
                        } else {
                            DispatchOutcome::Ignored
                        }
                    }
                    _ => DispatchOutcome::Ignored,
                }
            }

            EngineEvent::DominantSpeakerChanged { participant_id } => {
                self.handle_dominant_speaker(participant_id)
            }

            EngineEvent::DisplayNameChanged {
                participant_id,
                display_name,
            } => match self.participant_mut(participant_id) {
                Some(participant) => {
                    if participant.set_display_name(display_name.clone()) {
                        DispatchOutcome::Updated
                    } else {
                        DispatchOutcome::Ignored
                    }
                }
                _ => DispatchOutcome::Ignored,
            },

            EngineEvent::RoleChanged {
                participant_id,
                role,
            } => match self.participant_mut(participant_id) {
                Some(participant) => {
                    if participant.set_role(role.clone()) {
                        DispatchOutcome::Updated
                    } else {
                        DispatchOutcome::Ignored
                    }
                }
                _ => DispatchOutcome::Ignored,
            },

            EngineEvent::StatusChanged {
                participant_id,
                status,
            } => match self.participant_mut(participant_id) {
                Some(participant) => {
                    if participant.set_status(status.clone()) {
                        DispatchOutcome::Updated
                    } else {
                        DispatchOutcome::Ignored
                    }
                }
                _ => DispatchOutcome::Ignored,
            },
        }
    }

    fn handle_joined(
        &mut self,
        participant_id: &str,
        display_name: Option<String>,
    ) -> DispatchOutcome {
        if participant_id == self.local.id || self.remote.contains_key(participant_id) {
            debug!(
                target: "gv.registry",
                participant_id = %participant_id,
                "duplicate join ignored"
            );
            return DispatchOutcome::Ignored;
        }

        self.remote.insert(
            participant_id.to_string(),
            Participant::new(participant_id, display_name, false),
        );
        self.order.push(participant_id.to_string());

        debug!(
            target: "gv.registry",
            participant_id = %participant_id,
            total = self.count(),
            "participant joined"
        );
        DispatchOutcome::RosterChanged
    }

    fn handle_left(&mut self, participant_id: &str) -> DispatchOutcome {
        if self.remote.remove(participant_id).is_none() {
            return DispatchOutcome::Ignored;
        }
        self.order.retain(|id| id != participant_id);
        if self.dominant.as_deref() == Some(participant_id) {
            self.dominant = None;
        }

        debug!(
            target: "gv.registry",
            participant_id = %participant_id,
            remaining = self.count(),
            "participant left"
        );
        DispatchOutcome::RosterChanged
    }

    /// Move the dominant-speaker flag to `participant_id`.
    ///
    /// Clearing the previous holder and setting the new one in one step is
    /// what keeps the flag exclusive; an unknown id clears it entirely.
    fn handle_dominant_speaker(&mut self, participant_id: &str) -> DispatchOutcome {
        if self.dominant.as_deref() == Some(participant_id) {
            return DispatchOutcome::Ignored;
        }

        let mut changed = false;

        if let Some(previous_id) = self.dominant.take() {
            if let Some(previous) = self.participant_mut(&previous_id) {
                changed |= previous.set_dominant_speaker(false);
            }
        }

        if let Some(current) = self.participant_mut(participant_id) {
            changed |= current.set_dominant_speaker(true);
            self.dominant = Some(participant_id.to_string());
        }

        if changed {
            DispatchOutcome::Updated
        } else {
            DispatchOutcome::Ignored
        }
    }

    fn participant_mut(&mut self, id: &str) -> Option<&mut Participant> {
        if self.local.id == id {
            Some(&mut self.local)
        } else {
            self.remote.get_mut(id)
        }
    }
}
