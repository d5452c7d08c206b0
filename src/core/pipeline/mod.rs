//! Instruction pipeline implementation.
//!
//! Five stages, each a plain function over `&mut Cpu`, connected by single-
//! entry latches (APEX is strictly single-issue — no `Vec<Entry>` here).
//! Hazard detection lives in `hazards`, the latch definitions in `latches`,
//! and the shared latch interface in `traits`.

/// Pipeline hazard detection (data-hazard stalling; no forwarding).
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// The five pipeline stage procedures.
pub mod stages;

/// Shared latch interface.
pub mod traits;

pub use latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
