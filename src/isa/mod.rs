//! APEX Instruction Set Architecture definitions.
//!
//! Nineteen opcodes, grouped into register-register ALU, register-immediate
//! ALU, load/store, compare/branch, and the two no-op-ish control opcodes
//! `NOP`/`HALT`. Each opcode carries a fixed operand shape — which of
//! `{rs1, rs2, rs3, rd}` it reads or writes — so decode, hazard detection,
//! and tracing all dispatch off the same table instead of re-deriving it.

/// Opcode enumeration and per-opcode operand shape.
pub mod opcode;

/// The decoded instruction record the loader produces and the core consumes.
pub mod instruction;

pub use instruction::Instruction;
pub use opcode::{Opcode, OperandShape};
