use crate::common::ApexFault;
use crate::core::pipeline::latches::PipelineLatch as _;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Commits results to the register file, retires the instruction, and
/// signals simulation completion on `HALT`.
pub fn write_back_stage(cpu: &mut Cpu) -> Result<(), ApexFault> {
    if cpu.mem_wb.is_empty() {
        return Ok(());
    }

    let latch = cpu.mem_wb.clone();
    let shape = latch.instruction.opcode.operand_shape();

    tracing::trace!(pc = latch.pc, opcode = %latch.instruction.opcode, "writeback");

    if shape.writes_rd {
        cpu.regs.write(latch.instruction.rd, latch.result_buffer);
        cpu.regs.dec_busy(latch.instruction.rd);
    }

    cpu.stats.instructions_retired += 1;
    cpu.mem_wb.flush();

    if latch.instruction.opcode == Opcode::Halt {
        tracing::info!(cycle = cpu.cycle, "halt retired");
        cpu.halted = true;
    }

    Ok(())
}
