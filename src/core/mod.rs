//! Core editor modules - document, debounce, surface state machine
//!
//! These modules hold all decision logic, independent of UI.

pub mod debounce;
pub mod document;
pub mod surface;

// Re-exports for convenience
pub use debounce::Debouncer;
pub use document::{EditInput, default_spec, normalize, pretty};
pub use surface::{EditMode, EditorSurface};
