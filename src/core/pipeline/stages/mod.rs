//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: retrieves the next instruction from code memory
//! - Decode: reads register values and detects data hazards
//! - Execute: performs ALU operations, address computation, and branch resolution
//! - Memory: handles load/store access to data memory
//! - Writeback: commits results to the register file and retires

/// Instruction decode / register-read stage.
pub mod decode;

/// Execute stage: ALU, effective-address computation, branch resolution.
pub mod execute;

/// Instruction fetch stage.
pub mod fetch;

/// Memory access stage.
pub mod memory;

/// Writeback stage.
pub mod write_back;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::memory_stage;
pub use write_back::write_back_stage;
