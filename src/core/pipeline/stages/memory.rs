use crate::common::ApexFault;
use crate::core::pipeline::latches::{MemWbLatch, PipelineLatch as _};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Single-cycle data-memory access for loads and stores; everything else
/// passes its `result_buffer` through unchanged.
pub fn memory_stage(cpu: &mut Cpu) -> Result<(), ApexFault> {
    if cpu.ex_mem.is_empty() {
        cpu.mem_wb.flush();
        return Ok(());
    }

    let latch = cpu.ex_mem.clone();
    let mut result_buffer = latch.result_buffer;

    tracing::trace!(pc = latch.pc, opcode = %latch.instruction.opcode, "memory");

    match latch.instruction.opcode {
        Opcode::Load | Opcode::Ldr => {
            let index = cpu.data_index(latch.memory_address, latch.pc)?;
            result_buffer = cpu.data_memory[index];
        }
        Opcode::Store => {
            let index = cpu.data_index(latch.memory_address, latch.pc)?;
            cpu.data_memory[index] = latch.rs1_value;
        }
        Opcode::Str => {
            let index = cpu.data_index(latch.memory_address, latch.pc)?;
            cpu.data_memory[index] = latch.rs3_value;
        }
        _ => {}
    }

    cpu.mem_wb = MemWbLatch {
        valid: true,
        pc: latch.pc,
        instruction: latch.instruction,
        result_buffer,
    };
    cpu.ex_mem.flush();
    Ok(())
}
