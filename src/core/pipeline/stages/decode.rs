use crate::common::ApexFault;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{IdExLatch, PipelineLatch as _};
use crate::core::Cpu;

/// Reads source operand values from the register file and detects data
/// hazards.
///
/// A stalling instruction leaves its latch (`if_id`) untouched so Fetch
/// re-presents it next cycle, and leaves `id_ex` empty so nothing advances
/// to Execute. Resolution happens naturally: Writeback (earlier in this
/// same tick) may have just cleared the busy count this instruction was
/// waiting on.
pub fn decode_stage(cpu: &mut Cpu) -> Result<(), ApexFault> {
    cpu.stall_signal = false;

    if cpu.if_id.is_empty() {
        return Ok(());
    }

    let instruction = cpu.if_id.instruction.clone();

    if hazards::needs_stall(&instruction, &cpu.regs) {
        cpu.stall_signal = true;
        cpu.stats.data_hazard_stalls += 1;
        tracing::trace!(pc = cpu.if_id.pc, opcode = %instruction.opcode, "decode stall");
        return Ok(());
    }

    let shape = instruction.opcode.operand_shape();
    let rs1_value = if shape.reads_rs1 { cpu.regs.read(instruction.rs1) } else { 0 };
    let rs2_value = if shape.reads_rs2 { cpu.regs.read(instruction.rs2) } else { 0 };
    let rs3_value = if shape.reads_rs3 { cpu.regs.read(instruction.rs3) } else { 0 };

    if shape.writes_rd {
        cpu.regs.inc_busy(instruction.rd);
    }

    tracing::trace!(pc = cpu.if_id.pc, opcode = %instruction.opcode, "decode");

    cpu.id_ex = IdExLatch {
        valid: true,
        pc: cpu.if_id.pc,
        instruction,
        rs1_value,
        rs2_value,
        rs3_value,
    };
    cpu.if_id.flush();
    Ok(())
}
