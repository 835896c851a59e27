//! Errors raised while loading or executing a program. Every `CpuError` is fatal: the CPU halts
//! and the error is handed back to the caller.

use std::io;

use thiserror::Error;

use crate::memory::AddressNumberType;

#[derive(Debug, Error)]
pub enum CpuError {
  /// An address (or the program counter) lies outside of memory.
  #[error("address {address:#04X} is out of range")]
  OutOfRange { address: AddressNumberType },

  /// A register operand names a register that does not exist.
  #[error("invalid register R{index}")]
  InvalidRegister { index: usize },

  /// The byte at `address` is not an opcode.
  #[error("illegal instruction {opcode:#010b} at address {address:#04X}")]
  IllegalInstruction { address: AddressNumberType, opcode: u8 },

  #[error("program of {length} bytes does not fit in memory at origin {origin:#04X}")]
  ProgramTooLarge { origin: AddressNumberType, length: usize },

  /// The ALU was asked to perform an operation it does not implement.
  #[error("unsupported ALU operation {op:#06b}")]
  UnsupportedOperation { op: u8 },

  #[error("division by zero (divisor in R{register})")]
  DivisionByZero { register: usize },

  #[error("failed to write output: {0}")]
  Output(#[from] io::Error),
}

/// Failure to read an `.ls8` program text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
  #[error("line {line}: expected eight binary digits, found `{text}`")]
  Syntax { line: usize, text: String },
}
