use crate::common::ApexFault;
use crate::core::pipeline::latches::IfIdLatch;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Delivers the next instruction into the Decode latch.
///
/// Runs last in the reverse cycle order, so by the time Fetch executes,
/// Decode has already decided (earlier in this same tick) whether it
/// stalled — `cpu.stall_signal` and the emptiness of `cpu.if_id` both
/// reflect that decision.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<(), ApexFault> {
    if cpu.fetch_from_next_cycle {
        cpu.fetch_from_next_cycle = false;
        return Ok(());
    }

    if !cpu.fetch_enabled {
        return Ok(());
    }

    if cpu.stall_signal {
        // Decode held its latch this cycle; nothing to hand it.
        return Ok(());
    }

    let index = cpu.code_index(cpu.pc)?;
    let instruction = cpu.code_memory[index].clone();

    tracing::trace!(pc = cpu.pc, opcode = %instruction.opcode, "fetch");

    if instruction.opcode == Opcode::Halt {
        cpu.fetch_enabled = false;
    }

    cpu.if_id = IfIdLatch {
        valid: true,
        pc: cpu.pc,
        instruction,
    };
    cpu.pc += 4;
    Ok(())
}
