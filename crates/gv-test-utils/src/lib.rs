//! # Gallery View Test Utilities
//!
//! Shared test utilities for the gallery view library: mock implementations
//! of the engine and surface seams plus event fixtures, so view behavior
//! can be tested without a real conferencing engine or a real DOM.
//!
//! ## Modules
//!
//! - `mock_engine` - Records every command the view issues upstream
//! - `mock_surface` - Settable container measurements, captured render hints
//! - `fixtures` - Pre-built events and tracks, test logging init
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gv_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let engine = MockEngine::new();
//!     let surface = MockSurface::with_container(1200.0, 800.0);
//!
//!     let (view, _task) = ViewActor::spawn(
//!         ViewConfig::default(),
//!         "local-1",
//!         None,
//!         Arc::new(engine.clone()),
//!         Box::new(surface.clone()),
//!     );
//!
//!     view.engine_event(join("alice", "Alice")).await.unwrap();
//!     assert!(!engine.quality_ceilings().is_empty());
//! }
//! ```

pub mod fixtures;
pub mod mock_engine;
pub mod mock_surface;

// Re-export commonly used items
pub use fixtures::*;
pub use mock_engine::*;
pub use mock_surface::*;
