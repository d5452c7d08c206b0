//! APEX architectural state.

/// General-purpose register file with a per-register busy counter.
pub mod regfile;

pub use regfile::RegisterFile;
