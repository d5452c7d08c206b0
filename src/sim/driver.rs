//! The CLI-facing control surface: the four run modes spec.md §6 names,
//! per-cycle trace rendering, and final state reporting.

use std::io::{self, BufRead, Write};

use crate::common::ApexFault;
use crate::core::Cpu;
use crate::isa::Instruction;

const STAGE_NAMES: [&str; 5] = ["Fetch", "Decode", "Execute", "Memory", "Writeback"];

/// Runs silently for up to `max_cycles` cycles or until `HALT` retires, then
/// prints the final state.
pub fn simulate(cpu: &mut Cpu, max_cycles: u64) -> Result<(), ApexFault> {
    run(cpu, max_cycles, false)?;
    report(cpu);
    Ok(())
}

/// Same as [`simulate`], but emits a per-cycle pipeline trace.
pub fn display(cpu: &mut Cpu, max_cycles: u64) -> Result<(), ApexFault> {
    run(cpu, max_cycles, true)?;
    report(cpu);
    Ok(())
}

/// Emits a trace and pauses after each cycle for a keypress; `q`/`Q` aborts.
pub fn single_step(cpu: &mut Cpu) -> Result<(), ApexFault> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if cpu.is_halted() {
            break;
        }
        cpu.tick()?;
        print_trace(cpu);

        print!("press enter to continue, 'q' to quit: ");
        io::stdout().flush().ok();
        match lines.next() {
            Some(Ok(line)) if matches!(line.trim(), "q" | "Q") => break,
            Some(Ok(_)) => continue,
            _ => break,
        }
    }
    report(cpu);
    Ok(())
}

/// Runs to `HALT` then prints the word at `address`.
pub fn show_mem(cpu: &mut Cpu, address: usize) -> Result<(), ApexFault> {
    run(cpu, u64::MAX, false)?;
    report(cpu);
    let value = cpu.data_memory.get(address).copied().unwrap_or(0);
    println!("mem[{address}] = {value}");
    Ok(())
}

fn run(cpu: &mut Cpu, max_cycles: u64, trace: bool) -> Result<(), ApexFault> {
    while !cpu.is_halted() && cpu.cycle_count() < max_cycles {
        cpu.tick()?;
        if trace {
            print_trace(cpu);
        }
    }
    Ok(())
}

fn print_trace(cpu: &Cpu) {
    println!("--- cycle {} ---", cpu.cycle_count());
    let slots = [
        &cpu.trace.fetch,
        &cpu.trace.decode,
        &cpu.trace.execute,
        &cpu.trace.memory,
        &cpu.trace.writeback,
    ];
    for (name, slot) in STAGE_NAMES.iter().zip(slots) {
        match slot {
            Some((pc, instruction)) => println!("{}", trace_line(name, *pc, instruction)),
            None => println!("Instruction at {name} ---> EMPTY"),
        }
    }
}

fn trace_line(stage: &str, pc: i32, instruction: &Instruction) -> String {
    format!("Instruction at {stage} ---> pc({pc}) {}", instruction.disassemble())
}

fn report(cpu: &Cpu) {
    println!("==========================================================");
    println!("APEX SIMULATION COMPLETE");
    println!("==========================================================");
    println!("cycles: {}", cpu.cycle_count());
    println!("retired: {}", cpu.stats.instructions_retired);
    println!("zero_flag: {}", cpu.zero_flag);
    println!();
    println!("register file (value, busy):");
    for (idx, value, busy) in cpu.regs.iter() {
        println!("  R{idx:<2} = {value:<12} busy={busy}");
    }
    println!();
    println!("data memory (first 100 words):");
    for chunk in cpu.data_memory[..100.min(cpu.data_memory.len())].chunks(10) {
        let row: Vec<String> = chunk.iter().map(|w| w.to_string()).collect();
        println!("  {}", row.join(" "));
    }
    cpu.stats.print(cpu.cycle_count());
}
