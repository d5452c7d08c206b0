//! Fault definitions for the APEX pipeline core.
//!
//! These are the architectural conditions the source left undefined:
//! division by zero, a memory address or branch target outside the bounds
//! the hardware actually wires up. The core traps on them rather than
//! silently replicating unspecified behavior.

use std::fmt;

/// A fault raised by a pipeline stage when it hits undefined behavior.
///
/// Unlike a malformed-program error (the loader's responsibility), a fault
/// here means a well-formed instruction stream produced a runtime condition
/// the architecture has no defined result for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApexFault {
    /// A `DIV` instruction's divisor was zero.
    DivisionByZero { pc: i32 },
    /// A load/store effective address fell outside the data memory.
    MemoryOutOfBounds { pc: i32, address: i32 },
    /// A taken branch computed a target outside the loaded code memory.
    BranchTargetOutOfRange { pc: i32, target: i32 },
    /// Fetch was asked to read a `pc` outside the loaded code memory.
    CodeFetchOutOfRange { pc: i32 },
}

impl fmt::Display for ApexFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApexFault::DivisionByZero { pc } => {
                write!(f, "division by zero (pc={pc})")
            }
            ApexFault::MemoryOutOfBounds { pc, address } => {
                write!(f, "memory address {address} out of bounds (pc={pc})")
            }
            ApexFault::BranchTargetOutOfRange { pc, target } => {
                write!(f, "branch target {target} outside code memory (pc={pc})")
            }
            ApexFault::CodeFetchOutOfRange { pc } => {
                write!(f, "fetch at pc={pc} outside code memory")
            }
        }
    }
}

impl std::error::Error for ApexFault {}
