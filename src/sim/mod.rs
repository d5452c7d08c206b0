//! Program loading and the interactive/batch driver — external collaborators
//! to the pipeline core, never depended on by `core::*`.

/// Plain-text program loader.
pub mod loader;

/// The four run modes and trace/report rendering.
pub mod driver;
