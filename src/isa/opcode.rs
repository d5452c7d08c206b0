//! Opcode enumeration and operand-shape dispatch.
//!
//! The source pairs a `switch` per pipeline stage with the same opcode set,
//! which is how a stage ends up forgetting a variant another stage handles.
//! Here every opcode is paired once with its operand shape via an exhaustive
//! match, and every stage that needs to know which registers an instruction
//! reads or writes goes through `Opcode::operand_shape`.

use std::fmt;

/// The full APEX opcode set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Addl,
    Subl,
    Load,
    Ldr,
    Store,
    Str,
    Movc,
    Cmp,
    Bz,
    Bnz,
    #[default]
    Nop,
    Halt,
}

/// Which operand slots a given opcode reads (hazard sources) and writes
/// (hazard destination).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandShape {
    pub reads_rs1: bool,
    pub reads_rs2: bool,
    pub reads_rs3: bool,
    pub writes_rd: bool,
}

impl Opcode {
    /// Parses the all-caps assembly mnemonic, e.g. `"ADDL"`.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        use Opcode::*;
        Some(match mnemonic {
            "ADD" => Add,
            "SUB" => Sub,
            "MUL" => Mul,
            "DIV" => Div,
            "AND" => And,
            "OR" => Or,
            "XOR" => Xor,
            "ADDL" => Addl,
            "SUBL" => Subl,
            "LOAD" => Load,
            "LDR" => Ldr,
            "STORE" => Store,
            "STR" => Str,
            "MOVC" => Movc,
            "CMP" => Cmp,
            "BZ" => Bz,
            "BNZ" => Bnz,
            "NOP" => Nop,
            "HALT" => Halt,
            _ => return None,
        })
    }

    /// The assembly mnemonic, also used verbatim in pipeline traces.
    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Addl => "ADDL",
            Subl => "SUBL",
            Load => "LOAD",
            Ldr => "LDR",
            Store => "STORE",
            Str => "STR",
            Movc => "MOVC",
            Cmp => "CMP",
            Bz => "BZ",
            Bnz => "BNZ",
            Nop => "NOP",
            Halt => "HALT",
        }
    }

    /// Which registers this opcode reads and which one it writes.
    pub fn operand_shape(self) -> OperandShape {
        use Opcode::*;
        match self {
            Add | Sub | Mul | Div | And | Or | Xor | Ldr => OperandShape {
                reads_rs1: true,
                reads_rs2: true,
                reads_rs3: false,
                writes_rd: true,
            },
            Addl | Subl | Load => OperandShape {
                reads_rs1: true,
                reads_rs2: false,
                reads_rs3: false,
                writes_rd: true,
            },
            Store => OperandShape {
                reads_rs1: true,
                reads_rs2: true,
                reads_rs3: false,
                writes_rd: false,
            },
            Str => OperandShape {
                reads_rs1: true,
                reads_rs2: true,
                reads_rs3: true,
                writes_rd: false,
            },
            Cmp => OperandShape {
                reads_rs1: true,
                reads_rs2: true,
                reads_rs3: false,
                writes_rd: false,
            },
            Movc => OperandShape {
                reads_rs1: false,
                reads_rs2: false,
                reads_rs3: false,
                writes_rd: true,
            },
            Bz | Bnz | Nop | Halt => OperandShape::default(),
        }
    }

    /// Whether this opcode is one of the ALU-producing forms that update the
    /// zero flag from its computed result (as opposed to `CMP`, which
    /// compares operands directly, or opcodes that don't touch the flag).
    pub fn updates_zero_flag_from_result(self) -> bool {
        use Opcode::*;
        matches!(self, Add | Sub | Mul | Div | And | Or | Xor | Addl | Subl | Movc)
    }

}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
