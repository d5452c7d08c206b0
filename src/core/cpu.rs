//! The CPU: architectural state, the four inter-stage latches, and the
//! cycle orchestration that ties the five stage procedures together.

use crate::common::ApexFault;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
use crate::core::pipeline::stages;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// The first instruction executes at this program counter.
pub const PC_BASE: i32 = 4000;

/// Data memory size, in 32-bit words.
pub const DATA_MEMORY_WORDS: usize = 4096;

/// Register file size.
pub const REGISTER_COUNT: usize = 16;

/// A snapshot of what each stage held at some point during a cycle, used
/// only for human-readable tracing — the pipeline's actual behavior never
/// consults it.
#[derive(Clone, Debug, Default)]
pub struct CycleTrace {
    pub fetch: Option<(i32, Instruction)>,
    pub decode: Option<(i32, Instruction)>,
    pub execute: Option<(i32, Instruction)>,
    pub memory: Option<(i32, Instruction)>,
    pub writeback: Option<(i32, Instruction)>,
}

/// The APEX CPU: architectural state plus the pipeline's four latches.
pub struct Cpu {
    pub pc: i32,
    pub regs: RegisterFile,
    pub zero_flag: bool,
    pub data_memory: Vec<i32>,
    pub code_memory: Vec<Instruction>,

    pub if_id: IfIdLatch,
    pub id_ex: IdExLatch,
    pub ex_mem: ExMemLatch,
    pub mem_wb: MemWbLatch,

    /// Set by Execute on a taken branch; consumed (and cleared) by Fetch
    /// the very next time Fetch runs, which — since Fetch always runs last
    /// in a tick — is the same cycle the branch resolved.
    pub fetch_from_next_cycle: bool,
    /// Cleared once `HALT` has been fetched; no further instructions are
    /// fetched afterward, though `HALT` itself still drains through the
    /// remaining stages.
    pub fetch_enabled: bool,
    /// Asserted by Decode this cycle when a data hazard blocks it; read by
    /// Fetch later in the same cycle.
    pub stall_signal: bool,
    /// Set once Writeback retires `HALT`.
    pub halted: bool,

    pub cycle: u64,
    pub stats: SimStats,
    pub trace: CycleTrace,
}

impl Cpu {
    /// Builds a fresh CPU with the given decoded program loaded at
    /// [`PC_BASE`].
    pub fn new(code_memory: Vec<Instruction>) -> Self {
        Self {
            pc: PC_BASE,
            regs: RegisterFile::new(),
            zero_flag: false,
            data_memory: vec![0; DATA_MEMORY_WORDS],
            code_memory,
            if_id: IfIdLatch::default(),
            id_ex: IdExLatch::default(),
            ex_mem: ExMemLatch::default(),
            mem_wb: MemWbLatch::default(),
            fetch_from_next_cycle: false,
            fetch_enabled: true,
            stall_signal: false,
            halted: false,
            cycle: 0,
            stats: SimStats::default(),
            trace: CycleTrace::default(),
        }
    }

    /// Runs one clock tick: all five stages, in reverse order
    /// (Writeback, Memory, Execute, Decode, Fetch).
    ///
    /// This ordering is load-bearing, not cosmetic: Writeback's register and
    /// busy-counter writes land before Decode reads them in the same cycle,
    /// giving a dependent consumer a one-cycle-earlier unstall than program
    /// order would.
    pub fn tick(&mut self) -> Result<(), ApexFault> {
        let writeback_snapshot = snapshot(&self.mem_wb);
        stages::write_back_stage(self)?;

        let memory_snapshot = snapshot(&self.ex_mem);
        stages::memory_stage(self)?;

        let execute_snapshot = snapshot(&self.id_ex);
        stages::execute_stage(self)?;

        let decode_snapshot = snapshot(&self.if_id);
        stages::decode_stage(self)?;

        stages::fetch_stage(self)?;
        let fetch_snapshot = snapshot(&self.if_id);

        self.trace = CycleTrace {
            fetch: fetch_snapshot,
            decode: decode_snapshot,
            execute: execute_snapshot,
            memory: memory_snapshot,
            writeback: writeback_snapshot,
        };

        self.cycle += 1;
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// Maps a program counter to a code-memory index, rejecting anything
    /// outside the loaded program.
    pub(crate) fn code_index(&self, pc: i32) -> Result<usize, ApexFault> {
        let end = PC_BASE + 4 * self.code_memory.len() as i32;
        if pc < PC_BASE || pc >= end || (pc - PC_BASE) % 4 != 0 {
            return Err(ApexFault::CodeFetchOutOfRange { pc });
        }
        Ok(((pc - PC_BASE) / 4) as usize)
    }

    /// Maps an effective address to a data-memory index, rejecting anything
    /// out of bounds.
    pub(crate) fn data_index(&self, address: i32, pc: i32) -> Result<usize, ApexFault> {
        if address < 0 || address as usize >= self.data_memory.len() {
            return Err(ApexFault::MemoryOutOfBounds { pc, address });
        }
        Ok(address as usize)
    }

    /// Rejects a computed branch target outside the loaded code memory.
    pub(crate) fn validate_branch_target(&self, target: i32, pc: i32) -> Result<(), ApexFault> {
        let end = PC_BASE + 4 * self.code_memory.len() as i32;
        if target < PC_BASE || target >= end || (target - PC_BASE) % 4 != 0 {
            return Err(ApexFault::BranchTargetOutOfRange { pc, target });
        }
        Ok(())
    }
}

fn snapshot<L: LatchSnapshot>(latch: &L) -> Option<(i32, Instruction)> {
    latch.snapshot()
}

/// Lets `Cpu::tick` snapshot any of the four latch types identically.
trait LatchSnapshot {
    fn snapshot(&self) -> Option<(i32, Instruction)>;
}

impl LatchSnapshot for IfIdLatch {
    fn snapshot(&self) -> Option<(i32, Instruction)> {
        self.valid.then(|| (self.pc, self.instruction.clone()))
    }
}

impl LatchSnapshot for IdExLatch {
    fn snapshot(&self) -> Option<(i32, Instruction)> {
        self.valid.then(|| (self.pc, self.instruction.clone()))
    }
}

impl LatchSnapshot for ExMemLatch {
    fn snapshot(&self) -> Option<(i32, Instruction)> {
        self.valid.then(|| (self.pc, self.instruction.clone()))
    }
}

impl LatchSnapshot for MemWbLatch {
    fn snapshot(&self) -> Option<(i32, Instruction)> {
        self.valid.then(|| (self.pc, self.instruction.clone()))
    }
}
