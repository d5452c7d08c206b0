//! The decoded instruction record.

use super::opcode::Opcode;

/// An immutable decoded instruction, as produced by the loader and consumed
/// unchanged by every pipeline stage.
///
/// Operand slots an opcode doesn't use (per its `OperandShape`) are simply
/// left at `0`; no stage reads them without first consulting the shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub rs1: usize,
    pub rs2: usize,
    pub rs3: usize,
    pub rd: usize,
    pub imm: i32,
}

impl Instruction {
    /// Renders the `<mnemonic>,<operands>` suffix of a pipeline trace line,
    /// per the per-opcode operand formatting table.
    pub fn disassemble(&self) -> String {
        use Opcode::*;
        let m = self.opcode.mnemonic();
        match self.opcode {
            Add | Sub | Mul | Div | And | Or | Xor | Ldr => {
                format!("{m},R{},R{},R{}", self.rd, self.rs1, self.rs2)
            }
            Addl | Subl | Load => {
                format!("{m},R{},R{},#{}", self.rd, self.rs1, self.imm)
            }
            Store => {
                format!("{m},R{},R{},#{}", self.rs1, self.rs2, self.imm)
            }
            Str => {
                format!("{m},R{},R{},R{}", self.rs3, self.rs1, self.rs2)
            }
            Movc => format!("{m},R{},#{}", self.rd, self.imm),
            Cmp => format!("{m},R{},R{}", self.rs1, self.rs2),
            Bz | Bnz => format!("{m},#{}", self.imm),
            Nop | Halt => m.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassembles_three_register_form() {
        let insn = Instruction { opcode: Opcode::Add, rd: 3, rs1: 1, rs2: 2, ..Default::default() };
        assert_eq!(insn.disassemble(), "ADD,R3,R1,R2");
    }

    #[test]
    fn disassembles_movc() {
        let insn = Instruction { opcode: Opcode::Movc, rd: 1, imm: 10, ..Default::default() };
        assert_eq!(insn.disassemble(), "MOVC,R1,#10");
    }

    #[test]
    fn disassembles_store_in_semantic_register_order() {
        let insn = Instruction { opcode: Opcode::Store, rs1: 1, rs2: 2, imm: 0, ..Default::default() };
        assert_eq!(insn.disassemble(), "STORE,R1,R2,#0");
    }

    #[test]
    fn disassembles_branch() {
        let insn = Instruction { opcode: Opcode::Bz, imm: 8, ..Default::default() };
        assert_eq!(insn.disassemble(), "BZ,#8");
    }

    #[test]
    fn disassembles_nop_and_halt_as_bare_mnemonic() {
        let nop = Instruction { opcode: Opcode::Nop, ..Default::default() };
        let halt = Instruction { opcode: Opcode::Halt, ..Default::default() };
        assert_eq!(nop.disassemble(), "NOP");
        assert_eq!(halt.disassemble(), "HALT");
    }
}
