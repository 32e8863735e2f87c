//! VIZPAD - Live chart-specification editor library
//!
//! Re-exports all modules for use by the binary target.

// Core editor logic (document, debounce, surface)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod widgets;

// Re-export commonly used types from core
pub use core::debounce::Debouncer;
pub use core::document::{EditInput, default_spec, normalize, pretty};
pub use core::surface::{EditMode, EditorSurface};
