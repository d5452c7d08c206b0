use crate::common::ApexFault;
use crate::core::pipeline::latches::{ExMemLatch, PipelineLatch as _};
use crate::core::Cpu;
use crate::isa::Opcode;

/// ALU, effective-address computation, and branch resolution.
pub fn execute_stage(cpu: &mut Cpu) -> Result<(), ApexFault> {
    if cpu.id_ex.is_empty() {
        cpu.ex_mem.flush();
        return Ok(());
    }

    let latch = cpu.id_ex.clone();
    let instruction = latch.instruction.clone();
    let mut result_buffer = 0i32;
    let mut memory_address = 0i32;

    tracing::trace!(pc = latch.pc, opcode = %instruction.opcode, "execute");

    use Opcode::*;
    match instruction.opcode {
        Add => result_buffer = latch.rs1_value.wrapping_add(latch.rs2_value),
        Sub => result_buffer = latch.rs1_value.wrapping_sub(latch.rs2_value),
        Mul => result_buffer = latch.rs1_value.wrapping_mul(latch.rs2_value),
        Div => {
            if latch.rs2_value == 0 {
                return Err(ApexFault::DivisionByZero { pc: latch.pc });
            }
            result_buffer = latch.rs1_value.wrapping_div(latch.rs2_value);
        }
        And => result_buffer = latch.rs1_value & latch.rs2_value,
        Or => result_buffer = latch.rs1_value | latch.rs2_value,
        Xor => result_buffer = latch.rs1_value ^ latch.rs2_value,
        Addl => result_buffer = latch.rs1_value.wrapping_add(instruction.imm),
        Subl => result_buffer = latch.rs1_value.wrapping_sub(instruction.imm),
        Movc => result_buffer = instruction.imm,
        Cmp => cpu.zero_flag = latch.rs1_value == latch.rs2_value,
        Load => memory_address = latch.rs1_value.wrapping_add(instruction.imm),
        Ldr => memory_address = latch.rs1_value.wrapping_add(latch.rs2_value),
        Store => memory_address = latch.rs2_value.wrapping_add(instruction.imm),
        Str => memory_address = latch.rs1_value.wrapping_add(latch.rs2_value),
        Bz | Bnz => {
            let taken = if instruction.opcode == Bz { cpu.zero_flag } else { !cpu.zero_flag };
            if taken {
                let target = latch.pc.wrapping_add(instruction.imm);
                cpu.validate_branch_target(target, latch.pc)?;
                cpu.pc = target;
                cpu.fetch_from_next_cycle = true;
                cpu.fetch_enabled = true;
                cpu.if_id.flush();
                cpu.stats.branches_taken += 1;
            } else {
                cpu.stats.branches_not_taken += 1;
            }
        }
        Nop | Halt => {}
    }

    if instruction.opcode.updates_zero_flag_from_result() {
        cpu.zero_flag = result_buffer == 0;
    }

    cpu.ex_mem = ExMemLatch {
        valid: true,
        pc: latch.pc,
        instruction,
        rs1_value: latch.rs1_value,
        rs2_value: latch.rs2_value,
        rs3_value: latch.rs3_value,
        result_buffer,
        memory_address,
    };
    cpu.id_ex.flush();
    Ok(())
}
