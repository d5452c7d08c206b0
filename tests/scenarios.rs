//! End-to-end pipeline scenarios, built directly against decoded
//! instructions so they exercise the core without going through the loader.

use apex_pipe_sim::core::Cpu;
use apex_pipe_sim::isa::{Instruction, Opcode};

fn movc(rd: usize, imm: i32) -> Instruction {
    Instruction { opcode: Opcode::Movc, rd, imm, ..Default::default() }
}

fn add(rd: usize, rs1: usize, rs2: usize) -> Instruction {
    Instruction { opcode: Opcode::Add, rd, rs1, rs2, ..Default::default() }
}

fn cmp(rs1: usize, rs2: usize) -> Instruction {
    Instruction { opcode: Opcode::Cmp, rs1, rs2, ..Default::default() }
}

fn bz(imm: i32) -> Instruction {
    Instruction { opcode: Opcode::Bz, imm, ..Default::default() }
}

fn bnz(imm: i32) -> Instruction {
    Instruction { opcode: Opcode::Bnz, imm, ..Default::default() }
}

fn store(rs1: usize, rs2: usize, imm: i32) -> Instruction {
    Instruction { opcode: Opcode::Store, rs1, rs2, imm, ..Default::default() }
}

fn load(rd: usize, rs1: usize, imm: i32) -> Instruction {
    Instruction { opcode: Opcode::Load, rd, rs1, imm, ..Default::default() }
}

fn halt() -> Instruction {
    Instruction { opcode: Opcode::Halt, ..Default::default() }
}

fn run_to_completion(cpu: &mut Cpu, budget: u64) {
    while !cpu.is_halted() && cpu.cycle_count() < budget {
        cpu.tick().expect("no fault expected in these scenarios");
    }
    assert!(cpu.is_halted(), "program did not halt within {budget} cycles");
}

#[test]
fn scenario_a_basic_arithmetic() {
    let mut cpu = Cpu::new(vec![movc(1, 10), movc(2, 20), add(3, 1, 2), halt()]);
    run_to_completion(&mut cpu, 20);

    assert_eq!(cpu.regs.read(1), 10);
    assert_eq!(cpu.regs.read(2), 20);
    assert_eq!(cpu.regs.read(3), 30);
    assert!(!cpu.zero_flag);
    assert_eq!(cpu.stats.instructions_retired, 4);
}

#[test]
fn scenario_b_raw_stall() {
    let mut cpu = Cpu::new(vec![movc(1, 5), add(2, 1, 1), halt()]);
    run_to_completion(&mut cpu, 20);

    assert_eq!(cpu.regs.read(1), 5);
    assert_eq!(cpu.regs.read(2), 10);
    assert_eq!(cpu.stats.instructions_retired, 3);
    assert_eq!(cpu.cycle_count(), 10);
    assert_eq!(cpu.stats.data_hazard_stalls, 3);
}

#[test]
fn scenario_c_taken_branch_flushes_decode() {
    let mut cpu = Cpu::new(vec![
        movc(1, 0),
        cmp(1, 1),
        bz(8),
        movc(2, 99),
        movc(3, 7),
        halt(),
    ]);
    run_to_completion(&mut cpu, 30);

    assert_eq!(cpu.regs.read(2), 0, "flushed MOVC must never retire");
    assert_eq!(cpu.regs.read(3), 7);
    assert_eq!(cpu.stats.instructions_retired, 5);
    assert_eq!(cpu.stats.branches_taken, 1);
}

#[test]
fn scenario_d_store_load_round_trip() {
    let mut cpu = Cpu::new(vec![
        movc(1, 42),
        movc(2, 4),
        store(1, 2, 0),
        load(3, 2, 0),
        halt(),
    ]);
    run_to_completion(&mut cpu, 30);

    assert_eq!(cpu.data_memory[4], 42);
    assert_eq!(cpu.regs.read(3), 42);
}

#[test]
fn scenario_e_not_taken_branch_falls_through() {
    let mut cpu = Cpu::new(vec![movc(1, 1), cmp(1, 1), bnz(8), movc(2, 77), halt()]);
    run_to_completion(&mut cpu, 30);

    assert_eq!(cpu.regs.read(2), 77);
    assert_eq!(cpu.stats.branches_not_taken, 1);
    assert_eq!(cpu.stats.branches_taken, 0);
}

#[test]
fn halt_only_program_retires_in_exactly_five_cycles() {
    let mut cpu = Cpu::new(vec![halt()]);
    run_to_completion(&mut cpu, 10);

    assert_eq!(cpu.cycle_count(), 5);
    assert_eq!(cpu.stats.instructions_retired, 1);
}

#[test]
fn sub_self_always_sets_zero_flag() {
    let mut cpu = Cpu::new(vec![
        movc(1, 123),
        Instruction { opcode: Opcode::Sub, rd: 1, rs1: 1, rs2: 1, ..Default::default() },
        halt(),
    ]);
    run_to_completion(&mut cpu, 20);

    assert!(cpu.zero_flag);
    assert_eq!(cpu.regs.read(1), 0);
}

#[test]
fn retired_count_never_exceeds_cycle_count() {
    let mut cpu = Cpu::new(vec![movc(1, 10), movc(2, 20), add(3, 1, 2), halt()]);
    let mut last_retired = 0;
    while !cpu.is_halted() {
        cpu.tick().unwrap();
        assert!(cpu.stats.instructions_retired >= last_retired, "retired count must not decrease");
        assert!(cpu.stats.instructions_retired <= cpu.cycle_count(), "retired count must not exceed cycle count");
        last_retired = cpu.stats.instructions_retired;
    }
}

#[test]
fn division_by_zero_traps() {
    let div = Instruction { opcode: Opcode::Div, rd: 2, rs1: 1, rs2: 3, ..Default::default() };
    let mut cpu = Cpu::new(vec![movc(1, 10), div, halt()]);

    let mut fault = None;
    while !cpu.is_halted() {
        if let Err(err) = cpu.tick() {
            fault = Some(err);
            break;
        }
    }
    assert!(matches!(fault, Some(apex_pipe_sim::common::ApexFault::DivisionByZero { .. })));
}
