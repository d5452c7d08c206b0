//! APEX pipeline simulator CLI.
//!
//! Loads a program and drives it through one of the four run modes spec.md
//! §6 names: `simulate`, `display`, `single-step`, `show-mem`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use apex_pipe_sim::core::Cpu;
use apex_pipe_sim::sim::{driver, loader};

/// Command-line arguments for the APEX pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "APEX 5-stage pipeline simulator")]
struct Args {
    /// Path to the program file.
    program: PathBuf,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run silently for up to N cycles or until HALT, then report state.
    Simulate { cycles: u64 },
    /// Same as simulate, but emit a per-cycle pipeline trace.
    Display { cycles: u64 },
    /// Trace and pause after each cycle for a keypress ('q' aborts).
    SingleStep,
    /// Run to HALT then print the word at the given data memory address.
    ShowMem { address: usize },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let program = match loader::load_program(&args.program) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut cpu = Cpu::new(program);

    let result = match args.mode {
        Mode::Simulate { cycles } => driver::simulate(&mut cpu, cycles),
        Mode::Display { cycles } => driver::display(&mut cpu, cycles),
        Mode::SingleStep => driver::single_step(&mut cpu),
        Mode::ShowMem { address } => driver::show_mem(&mut cpu, address),
    };

    if let Err(fault) = result {
        eprintln!("\nfatal: {fault} (cycle {})", cpu.cycle_count());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
