//! Mock conferencing engine for view testing.
//!
//! Records every command the view issues through `EngineCommands` so tests
//! can assert on exact command sequences, and can be switched into a
//! failing mode to exercise the degraded paths.
//!
//! # Example
//!
//! ```rust,ignore
//! use gv_test_utils::{MockEngine, RecordedCommand};
//!
//! let engine = MockEngine::new();
//! // ... run the view against Arc::new(engine.clone()) ...
//! assert_eq!(
//!     engine.take_commands(),
//!     vec![
//!         RecordedCommand::SelectAllParticipants,
//!         RecordedCommand::SetReceiverQualityCeiling(QualityTier::P360),
//!     ],
//! );
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use gallery_view::engine::EngineCommands;
use gallery_view::errors::ViewError;
use gallery_view::quality::QualityTier;

/// A command recorded by [`MockEngine`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCommand {
    SelectAllParticipants,
    SetReceiverQualityCeiling(QualityTier),
    SetTrackMuted { track_id: String, muted: bool },
}

/// Mock engine that records every command it receives.
///
/// Clones share state, so a clone can be handed to the view while the test
/// keeps one for assertions.
#[derive(Debug, Default, Clone)]
pub struct MockEngine {
    commands: Arc<Mutex<Vec<RecordedCommand>>>,
    failing: Arc<AtomicBool>,
}

impl MockEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands
            .lock()
            .expect("mock engine lock poisoned")
            .clone()
    }

    /// Drain and return the recorded commands.
    pub fn take_commands(&self) -> Vec<RecordedCommand> {
        std::mem::take(&mut *self.commands.lock().expect("mock engine lock poisoned"))
    }

    /// Quality ceilings requested so far, in order.
    #[must_use]
    pub fn quality_ceilings(&self) -> Vec<QualityTier> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                RecordedCommand::SetReceiverQualityCeiling(tier) => Some(tier),
                _ => None,
            })
            .collect()
    }

    /// Make every subsequent command fail (or stop failing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, command: RecordedCommand) -> Result<(), ViewError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ViewError::Engine(
                "mock engine rejecting commands".to_string(),
            ));
        }
        self.commands
            .lock()
            .expect("mock engine lock poisoned")
            .push(command);
        Ok(())
    }
}

impl EngineCommands for MockEngine {
    fn select_all_participants(&self) -> Result<(), ViewError> {
        self.record(RecordedCommand::SelectAllParticipants)
    }

    fn set_receiver_quality_ceiling(&self, tier: QualityTier) -> Result<(), ViewError> {
        self.record(RecordedCommand::SetReceiverQualityCeiling(tier))
    }

    fn set_track_muted(&self, track_id: &str, muted: bool) -> Result<(), ViewError> {
        self.record(RecordedCommand::SetTrackMuted {
            track_id: track_id.to_string(),
            muted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands_in_order() {
        let engine = MockEngine::new();
        engine.select_all_participants().unwrap();
        engine
            .set_receiver_quality_ceiling(QualityTier::P720)
            .unwrap();

        assert_eq!(
            engine.take_commands(),
            vec![
                RecordedCommand::SelectAllParticipants,
                RecordedCommand::SetReceiverQualityCeiling(QualityTier::P720),
            ]
        );
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_failing_mode_rejects_and_records_nothing() {
        let engine = MockEngine::new();
        engine.set_failing(true);
        assert!(engine.select_all_participants().is_err());
        assert!(engine.commands().is_empty());

        engine.set_failing(false);
        assert!(engine.select_all_participants().is_ok());
    }
}
