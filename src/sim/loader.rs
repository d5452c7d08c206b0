//! Plain-text program loader.
//!
//! APEX has no assembler in scope — programs are written directly in the
//! mnemonic-and-operand syntax spec examples use throughout, one instruction
//! per line: `MOVC R1,#10`, `ADD  R3,R1,R2`, `STORE R1,R2,#0`, `BZ #8`,
//! `HALT`. A trailing `;` starts a comment that runs to end of line; blank
//! lines are skipped.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use crate::core::REGISTER_COUNT;
use crate::isa::{Instruction, Opcode};

/// Parses a program file into an ordered instruction stream.
pub fn load_program(path: &Path) -> Result<Vec<Instruction>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading program file {}", path.display()))?;

    let mut program = Vec::new();
    for (line_no, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let instruction = parse_line(line)
            .with_context(|| format!("{}:{}: {raw_line}", path.display(), line_no + 1))?;
        program.push(instruction);
    }

    ensure!(!program.is_empty(), "program file {} has no instructions", path.display());
    Ok(program)
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_line(line: &str) -> Result<Instruction> {
    let (mnemonic, rest) = match line.split_once(char::is_whitespace) {
        Some((m, r)) => (m, r.trim()),
        None => (line, ""),
    };
    let mnemonic = mnemonic.to_ascii_uppercase();
    let opcode = Opcode::from_mnemonic(&mnemonic)
        .with_context(|| format!("unknown mnemonic '{mnemonic}'"))?;

    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };

    use Opcode::*;
    let instruction = match opcode {
        Add | Sub | Mul | Div | And | Or | Xor | Ldr => {
            expect_operands(&operands, 3, &mnemonic)?;
            Instruction {
                opcode,
                rd: register(operands[0])?,
                rs1: register(operands[1])?,
                rs2: register(operands[2])?,
                ..Default::default()
            }
        }
        Addl | Subl | Load => {
            expect_operands(&operands, 3, &mnemonic)?;
            Instruction {
                opcode,
                rd: register(operands[0])?,
                rs1: register(operands[1])?,
                imm: immediate(operands[2])?,
                ..Default::default()
            }
        }
        Store => {
            expect_operands(&operands, 3, &mnemonic)?;
            Instruction {
                opcode,
                rs1: register(operands[0])?,
                rs2: register(operands[1])?,
                imm: immediate(operands[2])?,
                ..Default::default()
            }
        }
        Str => {
            expect_operands(&operands, 3, &mnemonic)?;
            Instruction {
                opcode,
                rs3: register(operands[0])?,
                rs1: register(operands[1])?,
                rs2: register(operands[2])?,
                ..Default::default()
            }
        }
        Movc => {
            expect_operands(&operands, 2, &mnemonic)?;
            Instruction {
                opcode,
                rd: register(operands[0])?,
                imm: immediate(operands[1])?,
                ..Default::default()
            }
        }
        Cmp => {
            expect_operands(&operands, 2, &mnemonic)?;
            Instruction {
                opcode,
                rs1: register(operands[0])?,
                rs2: register(operands[1])?,
                ..Default::default()
            }
        }
        Bz | Bnz => {
            expect_operands(&operands, 1, &mnemonic)?;
            Instruction { opcode, imm: immediate(operands[0])?, ..Default::default() }
        }
        Nop | Halt => {
            expect_operands(&operands, 0, &mnemonic)?;
            Instruction { opcode, ..Default::default() }
        }
    };

    Ok(instruction)
}

fn expect_operands(operands: &[&str], expected: usize, mnemonic: &str) -> Result<()> {
    ensure!(
        operands.len() == expected,
        "{mnemonic} expects {expected} operand(s), found {}",
        operands.len()
    );
    Ok(())
}

fn register(token: &str) -> Result<usize> {
    let Some(digits) = token.strip_prefix(['R', 'r']) else {
        bail!("expected a register operand like 'R3', found '{token}'");
    };
    let idx: usize = digits.parse().with_context(|| format!("invalid register '{token}'"))?;
    ensure!(idx < REGISTER_COUNT, "register index {idx} out of range (R0..R{REGISTER_COUNT})");
    Ok(idx)
}

fn immediate(token: &str) -> Result<i32> {
    let Some(digits) = token.strip_prefix('#') else {
        bail!("expected an immediate operand like '#10', found '{token}'");
    };
    digits.parse().with_context(|| format!("invalid immediate '{token}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_register_form() {
        let insn = parse_line("ADD R3,R1,R2").unwrap();
        assert_eq!(insn, Instruction { opcode: Opcode::Add, rd: 3, rs1: 1, rs2: 2, ..Default::default() });
    }

    #[test]
    fn parses_movc() {
        let insn = parse_line("MOVC R1,#10").unwrap();
        assert_eq!(insn, Instruction { opcode: Opcode::Movc, rd: 1, imm: 10, ..Default::default() });
    }

    #[test]
    fn parses_store_in_source_order() {
        let insn = parse_line("STORE R1,R2,#0").unwrap();
        assert_eq!(insn, Instruction { opcode: Opcode::Store, rs1: 1, rs2: 2, imm: 0, ..Default::default() });
    }

    #[test]
    fn parses_bare_mnemonics() {
        assert_eq!(parse_line("HALT").unwrap().opcode, Opcode::Halt);
        assert_eq!(parse_line("NOP").unwrap().opcode, Opcode::Nop);
    }

    #[test]
    fn strips_trailing_comments() {
        let insn = parse_line("BZ #8").unwrap();
        assert_eq!(insn, Instruction { opcode: Opcode::Bz, imm: 8, ..Default::default() });
        assert_eq!(strip_comment("BZ #8 ; loop back"), "BZ #8 ");
    }

    #[test]
    fn rejects_unknown_mnemonic() {
        assert!(parse_line("FOO R1,R2,R3").is_err());
    }

    #[test]
    fn rejects_out_of_range_register() {
        assert!(parse_line("MOVC R99,#1").is_err());
    }
}
