//! The arithmetic logic unit. Results are stored back into the first register and are always
//! truncated to eight bits.

use std::convert::TryFrom;

use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::error::CpuError;
use crate::registers::RegisterFile;

/// ALU operations, numbered by the identifier bits of their opcode.
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum AluOp {
  Add = 0x0,
  Sub = 0x1,
  Mul = 0x2,
  Div = 0x3,
  Mod = 0x4,
  Inc = 0x5,
  Dec = 0x6,
  And = 0x8,
  Not = 0x9,
  Or  = 0xA,
  Xor = 0xB,
  Shl = 0xC,
  Shr = 0xD,
}

/**
  Applies `op` to the values of registers `reg_a` and `reg_b` and stores the result in `reg_a`.
  Single operand operations (`INC`, `DEC`, `NOT`) ignore `reg_b`.
*/
pub fn apply(registers: &mut RegisterFile, op: u8, reg_a: usize, reg_b: usize)
  -> Result<(), CpuError>
{
  let op = AluOp::try_from(op).map_err(|_| CpuError::UnsupportedOperation { op })?;
  let a = registers.get(reg_a)?;
  let b = registers.get(reg_b)?;

  let result =
    match op {
      AluOp::Add => a.wrapping_add(b),
      AluOp::Sub => a.wrapping_sub(b),
      AluOp::Mul => a.wrapping_mul(b),
      AluOp::Div => a.checked_div(b).ok_or(CpuError::DivisionByZero { register: reg_b })?,
      AluOp::Mod => a.checked_rem(b).ok_or(CpuError::DivisionByZero { register: reg_b })?,
      AluOp::Inc => a.wrapping_add(1),
      AluOp::Dec => a.wrapping_sub(1),
      AluOp::And => a & b,
      AluOp::Not => !a,
      AluOp::Or  => a | b,
      AluOp::Xor => a ^ b,
      // Shifting by eight or more clears the register.
      AluOp::Shl => a.checked_shl(b as u32).unwrap_or(0),
      AluOp::Shr => a.checked_shr(b as u32).unwrap_or(0),
    };

  registers.set(reg_a, result)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registers_with(a: u8, b: u8) -> RegisterFile {
    let mut registers = RegisterFile::new();
    registers.set(0, a).unwrap();
    registers.set(1, b).unwrap();
    registers
  }

  fn compute(op: AluOp, a: u8, b: u8) -> u8 {
    let mut registers = registers_with(a, b);
    apply(&mut registers, op.into(), 0, 1).unwrap();
    assert_eq!(registers.get(1).unwrap(), b);
    registers.get(0).unwrap()
  }

  #[test]
  fn multiply() {
    assert_eq!(compute(AluOp::Mul, 8, 9), 72);
  }

  #[test]
  fn arithmetic_wraps() {
    assert_eq!(compute(AluOp::Mul, 16, 17), 16);
    assert_eq!(compute(AluOp::Add, 200, 100), 44);
    assert_eq!(compute(AluOp::Sub, 1, 2), 255);
    assert_eq!(compute(AluOp::Inc, 255, 0), 0);
    assert_eq!(compute(AluOp::Dec, 0, 0), 255);
  }

  #[test]
  fn division() {
    assert_eq!(compute(AluOp::Div, 72, 9), 8);
    assert_eq!(compute(AluOp::Mod, 74, 9), 2);
  }

  #[test]
  fn division_by_zero() {
    let mut registers = registers_with(5, 0);
    assert!(matches!(
      apply(&mut registers, AluOp::Div.into(), 0, 1),
      Err(CpuError::DivisionByZero { register: 1 })
    ));
    assert!(matches!(
      apply(&mut registers, AluOp::Mod.into(), 0, 1),
      Err(CpuError::DivisionByZero { register: 1 })
    ));
    assert_eq!(registers.get(0).unwrap(), 5);
  }

  #[test]
  fn bitwise() {
    assert_eq!(compute(AluOp::And, 0b1100, 0b1010), 0b1000);
    assert_eq!(compute(AluOp::Or, 0b1100, 0b1010), 0b1110);
    assert_eq!(compute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
    assert_eq!(compute(AluOp::Not, 0b1111_0000, 0), 0b0000_1111);
    assert_eq!(compute(AluOp::Shl, 0b0000_0011, 2), 0b0000_1100);
    assert_eq!(compute(AluOp::Shr, 0b1100_0000, 6), 0b0000_0011);
    assert_eq!(compute(AluOp::Shl, 0xFF, 8), 0);
    assert_eq!(compute(AluOp::Shr, 0xFF, 200), 0);
  }

  #[test]
  fn unsupported_operation() {
    let mut registers = registers_with(1, 2);
    // 0x7 is CMP, which needs a flags register this machine does not have.
    assert!(matches!(
      apply(&mut registers, 0x7, 0, 1),
      Err(CpuError::UnsupportedOperation { op: 0x7 })
    ));
    assert!(matches!(
      apply(&mut registers, 0xF, 0, 1),
      Err(CpuError::UnsupportedOperation { op: 0xF })
    ));
  }

  #[test]
  fn invalid_register() {
    let mut registers = RegisterFile::new();
    assert!(matches!(
      apply(&mut registers, AluOp::Add.into(), 0, 9),
      Err(CpuError::InvalidRegister { index: 9 })
    ));
  }
}
