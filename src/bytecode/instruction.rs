use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

const OPERAND_COUNT_SHIFT: u8 = 6;
const ALU_FLAG: u8 = 0b0010_0000;
const SETS_PC_FLAG: u8 = 0b0001_0000;
const IDENTIFIER_MASK: u8 = 0b0000_1111;

/**
  Opcodes of the machine. The discriminant of each variant is its opcode byte, so
  `Operation::try_from(byte)` is the whole decode step, and the bit fields described in the
  module documentation are read straight off the discriminant.

  The low nibble of an ALU opcode is the operation the ALU performs. See `alu::AluOp`.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[strum(serialize_all = "shouty_snake_case")]
#[repr(u8)]
pub enum Operation {
  // Control //
  Hlt = 0b0000_0001, // hlt
  Ldi = 0b1000_0010, // ldi( register, immediate )
  Prn = 0b0100_0111, // prn( register )

  // ALU, two registers //
  Add = 0b1010_0000,
  Sub = 0b1010_0001,
  Mul = 0b1010_0010,
  Div = 0b1010_0011,
  Mod = 0b1010_0100,
  And = 0b1010_1000,
  Or  = 0b1010_1010,
  Xor = 0b1010_1011,
  Shl = 0b1010_1100,
  Shr = 0b1010_1101,

  // ALU, one register //
  Inc = 0b0110_0101,
  Dec = 0b0110_0110,
  Not = 0b0110_1001,
}

/// What an operand byte refers to.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OperandKind {
  Register,
  Immediate
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn mnemonic(&self) -> &'static str {
    self.into()
  }

  pub fn operand_count(&self) -> usize {
    (self.code() >> OPERAND_COUNT_SHIFT) as usize
  }

  pub fn is_alu(&self) -> bool {
    self.code() & ALU_FLAG != 0
  }

  pub fn sets_pc(&self) -> bool {
    self.code() & SETS_PC_FLAG != 0
  }

  /// The instruction identifier, the low four bits of the opcode.
  pub fn id(&self) -> u8 {
    self.code() & IDENTIFIER_MASK
  }

  pub fn operand_kinds(&self) -> &'static [OperandKind] {
    use OperandKind::*;
    match self {
      Operation::Hlt => &[],
      Operation::Ldi => &[Register, Immediate],
      | Operation::Prn
      | Operation::Inc
      | Operation::Dec
      | Operation::Not => &[Register],
      _ => &[Register, Register]
    }
  }
}

/// Holds a decoded instruction. As such, it enumerates the possible operand combinations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [OpCode:8][A:8][B:8]
  Binary {
    opcode: Operation,
    operand_a: u8,
    operand_b: u8
  },
  /// [OpCode:8][A:8]
  Unary {
    opcode: Operation,
    operand: u8
  },
  /// [OpCode:8]
  Nullary(Operation),
}

impl Instruction {
  pub fn opcode(&self) -> Operation {
    match self {
      | Instruction::Binary { opcode, .. }
      | Instruction::Unary { opcode, .. }
      | Instruction::Nullary(opcode) => *opcode
    }
  }

  pub fn operands(&self) -> Vec<u8> {
    match self {
      Instruction::Binary { operand_a, operand_b, .. } => vec![*operand_a, *operand_b],
      Instruction::Unary { operand, .. } => vec![*operand],
      Instruction::Nullary(_) => vec![]
    }
  }

  /// Size in bytes, including the opcode.
  pub fn size(&self) -> usize {
    self.opcode().operand_count() + 1
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let opcode = self.opcode();
    let operands =
      opcode
        .operand_kinds()
        .iter()
        .zip(self.operands())
        .map(|(kind, value)| match kind {
          OperandKind::Register  => format!("R{}", value),
          OperandKind::Immediate => format!("{}", value)
        })
        .collect::<Vec<String>>();

    match operands.is_empty() {
      true  => write!(f, "{}", opcode.mnemonic()),
      false => write!(f, "{} {}", opcode.mnemonic(), operands.join(", "))
    }
  }
}
