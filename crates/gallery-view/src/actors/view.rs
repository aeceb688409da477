//! `ViewActor` - owns all view state for one call.
//!
//! The actor serializes every mutation through its mailbox, so engine
//! events, resize triggers, and snapshot reads execute on one logical
//! thread and recomputes never observe a half-applied update. Resize
//! triggers are coalesced with a trailing debounce; roster and crop-mode
//! changes recompute immediately.
//!
//! # Control flow
//!
//! ```text
//! engine events ─┐
//! host triggers ─┴─> mailbox ─> registry mutation ─> publish revision
//!                                      │ (roster/crop/resize)
//!                                      v
//!                         layout pass ─> render hints ─> Surface
//!                                      │
//!                                      v
//!                         quality pass ─> EngineCommands
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::messages::{ViewMessage, ViewSnapshot};
use crate::config::ViewConfig;
use crate::engine::{EngineCommands, EngineEvent, Surface, TrackInfo, TrackKind};
use crate::errors::ViewError;
use crate::layout::{CropMode, GridDimensions, PixelSize, TileSize};
use crate::quality::QualityController;
use crate::registry::{DispatchOutcome, ParticipantRegistry};

/// Handle to a `ViewActor`.
#[derive(Clone)]
pub struct ViewActorHandle {
    sender: mpsc::Sender<ViewMessage>,
    changes: watch::Receiver<u64>,
    cancel_token: CancellationToken,
}

impl ViewActorHandle {
    /// Feed one decoded engine event into the view.
    pub async fn engine_event(&self, event: EngineEvent) -> Result<(), ViewError> {
        self.send(ViewMessage::EngineEvent(event)).await
    }

    /// Report a new measured container size. Coalesced: bursts of resizes
    /// produce a single recompute after the debounce window.
    pub async fn container_resized(&self, width: f64, height: f64) -> Result<(), ViewError> {
        self.send(ViewMessage::ContainerResized {
            size: PixelSize::new(width, height),
        })
        .await
    }

    /// Switch the tile sizing policy. Recomputes immediately.
    pub async fn set_crop_mode(&self, mode: CropMode) -> Result<(), ViewError> {
        self.send(ViewMessage::SetCropMode { mode }).await
    }

    /// Attach a local track. The local participant owns its tracks and
    /// never receives them through engine events.
    pub async fn local_track_added(&self, track: TrackInfo) -> Result<(), ViewError> {
        self.send(ViewMessage::LocalTrackAdded { track }).await
    }

    /// Detach a local track.
    pub async fn local_track_removed(&self, kind: TrackKind) -> Result<(), ViewError> {
        self.send(ViewMessage::LocalTrackRemoved { kind }).await
    }

    /// Mute or unmute the local audio track via the engine. No-op when no
    /// local audio track is attached.
    pub async fn set_local_audio_muted(&self, muted: bool) -> Result<(), ViewError> {
        self.set_local_mute(TrackKind::Audio, muted).await
    }

    /// Mute or unmute the local video track via the engine. No-op when no
    /// local video track is attached.
    pub async fn set_local_video_muted(&self, muted: bool) -> Result<(), ViewError> {
        self.set_local_mute(TrackKind::Video, muted).await
    }

    async fn set_local_mute(&self, kind: TrackKind, muted: bool) -> Result<(), ViewError> {
        let (tx, rx) = oneshot::channel();
        self.send(ViewMessage::SetLocalMute {
            kind,
            muted,
            respond_to: tx,
        })
        .await?;

        rx.await
            .map_err(|e| ViewError::Detached(format!("response receive failed: {e}")))?
    }

    /// Read the current view state.
    pub async fn snapshot(&self) -> Result<ViewSnapshot, ViewError> {
        let (tx, rx) = oneshot::channel();
        self.send(ViewMessage::GetSnapshot { respond_to: tx }).await?;

        rx.await
            .map_err(|e| ViewError::Detached(format!("response receive failed: {e}")))
    }

    /// Receiver observing a revision bump after every state mutation.
    ///
    /// This is the explicit publish step consumed by rendering code: wait
    /// for a change, then pull a fresh snapshot.
    #[must_use]
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }

    /// Cancel the view actor, tearing down any pending debounce timer.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Check if the actor is cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    async fn send(&self, message: ViewMessage) -> Result<(), ViewError> {
        self.sender
            .send(message)
            .await
            .map_err(|e| ViewError::Detached(format!("channel send failed: {e}")))
    }
}

/// The `ViewActor` implementation.
pub struct ViewActor {
    config: ViewConfig,
    receiver: mpsc::Receiver<ViewMessage>,
    cancel_token: CancellationToken,
    registry: ParticipantRegistry,
    engine: Arc<dyn EngineCommands>,
    surface: Box<dyn Surface>,
    quality: QualityController,
    crop_mode: CropMode,
    render_hints: Option<TileSize>,
    revision: u64,
    changes: watch::Sender<u64>,
    /// Deadline of the pending debounced resize recompute, if any.
    resize_deadline: Option<Instant>,
}

impl ViewActor {
    /// Spawn a view actor for a call.
    ///
    /// `local_id` and `local_display_name` seed the local participant,
    /// which exists from construction so the grid always has at least one
    /// tile. Returns a handle and the task join handle.
    pub fn spawn(
        config: ViewConfig,
        local_id: impl Into<String>,
        local_display_name: Option<String>,
        engine: Arc<dyn EngineCommands>,
        surface: Box<dyn Surface>,
    ) -> (ViewActorHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(config.mailbox_buffer);
        let (changes_tx, changes_rx) = watch::channel(0);
        let cancel_token = CancellationToken::new();

        let actor = Self {
            registry: ParticipantRegistry::new(local_id.into(), local_display_name),
            quality: QualityController::new(Arc::clone(&engine)),
            config,
            receiver,
            cancel_token: cancel_token.clone(),
            engine,
            surface,
            crop_mode: CropMode::Uncropped,
            render_hints: None,
            revision: 0,
            changes: changes_tx,
            resize_deadline: None,
        };

        let task_handle = tokio::spawn(actor.run());

        let handle = ViewActorHandle {
            sender,
            changes: changes_rx,
            cancel_token,
        };

        (handle, task_handle)
    }

    /// Run the actor message loop.
    #[instrument(skip_all, name = "gv.actor.view")]
    async fn run(mut self) {
        info!(target: "gv.actor.view", "ViewActor started");

        // Initial pass so an already-mounted surface gets hints for the
        // local tile before any event arrives.
        self.recompute();

        loop {
            let deadline = self.resize_deadline;

            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    debug!(target: "gv.actor.view", "ViewActor received cancellation signal");
                    break;
                }

                // Trailing edge of the resize debounce window.
                () = async move {
                    match deadline {
                        Some(at) => tokio::time::sleep_until(at).await,
                        None => std::future::pending().await,
                    }
                } => {
                    self.resize_deadline = None;
                    self.recompute();
                }

                msg = self.receiver.recv() => {
                    match msg {
                        Some(message) => self.handle_message(message),
                        None => {
                            debug!(target: "gv.actor.view", "ViewActor channel closed, exiting");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            target: "gv.actor.view",
            participants = self.registry.count(),
            "ViewActor stopped"
        );
    }

    /// Handle a single message.
    fn handle_message(&mut self, message: ViewMessage) {
        match message {
            ViewMessage::EngineEvent(event) => self.handle_engine_event(&event),

            ViewMessage::ContainerResized { size } => {
                debug!(
                    target: "gv.actor.view",
                    width = size.width,
                    height = size.height,
                    "container resized, debouncing"
                );
                // A new resize restarts the pending window.
                self.resize_deadline = Some(Instant::now() + self.config.resize_debounce);
            }

            ViewMessage::SetCropMode { mode } => {
                if self.crop_mode != mode {
                    self.crop_mode = mode;
                    self.publish_change();
                    self.recompute();
                }
            }

            ViewMessage::LocalTrackAdded { track } => {
                if self.registry.local_mut().add_track(&track) {
                    self.publish_change();
                }
            }

            ViewMessage::LocalTrackRemoved { kind } => {
                if self.registry.local_mut().remove_track(kind) {
                    self.publish_change();
                }
            }

            ViewMessage::SetLocalMute {
                kind,
                muted,
                respond_to,
            } => {
                let _ = respond_to.send(self.handle_local_mute(kind, muted));
            }

            ViewMessage::GetSnapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
        }
    }

    fn handle_engine_event(&mut self, event: &EngineEvent) {
        match self.registry.apply(event) {
            DispatchOutcome::RosterChanged => {
                self.publish_change();
                // Join/leave is discrete and infrequent; no debounce.
                self.recompute();
            }
            DispatchOutcome::Updated => self.publish_change(),
            DispatchOutcome::Ignored => {
                debug!(
                    target: "gv.actor.view",
                    participant_id = event.participant_id(),
                    "stale or duplicate event ignored"
                );
            }
        }
    }

    /// Forward a local mute command to the engine.
    ///
    /// Command only: the mirrored flag updates when the engine reports the
    /// mute change back, same as for remote tracks.
    fn handle_local_mute(&mut self, kind: TrackKind, muted: bool) -> Result<(), ViewError> {
        let Some(track_id) = self.registry.local().local_track_id(kind) else {
            debug!(target: "gv.actor.view", ?kind, "no local track to mute, ignoring");
            return Ok(());
        };
        let track_id = track_id.to_string();

        self.engine.set_track_muted(&track_id, muted).map_err(|e| {
            warn!(target: "gv.actor.view", error = %e, "local mute command failed");
            e
        })
    }

    /// One layout + quality pass.
    ///
    /// The container is measured exactly once and shared by both stages, so
    /// a single pass never mixes two different measurements.
    fn recompute(&mut self) {
        let Some(container) = self.surface.container_size() else {
            debug!(target: "gv.actor.view", "container not mounted, skipping layout");
            return;
        };
        if !container.is_positive() {
            debug!(
                target: "gv.actor.view",
                width = container.width,
                height = container.height,
                "container has no positive size yet, skipping layout"
            );
            return;
        }

        let grid = GridDimensions::for_count(self.registry.count());
        let hints = TileSize::compute(&grid, container, self.crop_mode, &self.config);
        self.surface.apply_render_hints(&hints);
        self.render_hints = Some(hints);

        debug!(
            target: "gv.actor.view",
            rows = grid.rows,
            columns = grid.columns,
            tile_width = hints.width,
            tile_height = hints.height,
            "layout updated"
        );

        self.quality.apply(self.surface.sample_tile_height());
        self.publish_change();
    }

    /// Explicit publish step: bump the revision observed by
    /// `subscribe_changes` after a mutation.
    fn publish_change(&mut self) {
        self.revision += 1;
        let _ = self.changes.send(self.revision);
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            participants: self.registry.participants().cloned().collect(),
            local: self.registry.local().clone(),
            grid: GridDimensions::for_count(self.registry.count()),
            render_hints: self.render_hints,
            crop_mode: self.crop_mode,
        }
    }
}
