//! Data hazard detection for Decode.
//!
//! APEX has no forwarding path (a deliberate non-goal — adding one would
//! change observable cycle counts). The only hazard resolution is stalling
//! Decode until every source register it needs reads back `busy == 0`.

use crate::core::arch::RegisterFile;
use crate::isa::Instruction;

/// `true` if `instruction` must stall in Decode this cycle: at least one
/// register it reads still has a pending writer in flight.
pub fn needs_stall(instruction: &Instruction, regs: &RegisterFile) -> bool {
    let shape = instruction.opcode.operand_shape();
    (shape.reads_rs1 && regs.busy(instruction.rs1) > 0)
        || (shape.reads_rs2 && regs.busy(instruction.rs2) > 0)
        || (shape.reads_rs3 && regs.busy(instruction.rs3) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Opcode;

    #[test]
    fn stalls_when_a_read_register_is_busy() {
        let mut regs = RegisterFile::new();
        regs.inc_busy(1);
        let add = Instruction { opcode: Opcode::Add, rd: 3, rs1: 1, rs2: 2, ..Default::default() };
        assert!(needs_stall(&add, &regs));
    }

    #[test]
    fn does_not_stall_when_sources_are_clear() {
        let regs = RegisterFile::new();
        let add = Instruction { opcode: Opcode::Add, rd: 3, rs1: 1, rs2: 2, ..Default::default() };
        assert!(!needs_stall(&add, &regs));
    }

    #[test]
    fn branch_never_stalls_it_reads_no_registers() {
        let mut regs = RegisterFile::new();
        regs.inc_busy(0);
        regs.inc_busy(1);
        let bz = Instruction { opcode: Opcode::Bz, imm: 8, ..Default::default() };
        assert!(!needs_stall(&bz, &regs));
    }

    #[test]
    fn str_checks_all_three_sources() {
        let mut regs = RegisterFile::new();
        regs.inc_busy(5);
        let str_insn = Instruction { opcode: Opcode::Str, rs1: 1, rs2: 2, rs3: 5, ..Default::default() };
        assert!(needs_stall(&str_insn, &regs));
    }
}
