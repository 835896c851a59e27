use std::fmt::{Display, Formatter};

use crate::error::CpuError;

pub const REGISTER_COUNT: usize = 8;
/// R7 is reserved as the stack pointer and starts just below the interrupt vectors.
pub const STACK_POINTER: usize = 7;
pub const STACK_POINTER_RESET: u8 = 0xF4;

/// The general purpose registers R0-R7.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterFile {
  registers: [u8; REGISTER_COUNT]
}

impl RegisterFile {

  pub fn new() -> RegisterFile {
    let mut registers = [0; REGISTER_COUNT];
    registers[STACK_POINTER] = STACK_POINTER_RESET;
    RegisterFile { registers }
  }

  pub fn get(&self, index: usize) -> Result<u8, CpuError> {
    self.registers
        .get(index)
        .copied()
        .ok_or(CpuError::InvalidRegister { index })
  }

  pub fn set(&mut self, index: usize, value: u8) -> Result<(), CpuError> {
    match self.registers.get_mut(index) {
      Some(register) => {
        *register = value;
        Ok(())
      }
      None => Err(CpuError::InvalidRegister { index })
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &u8> {
    self.registers.iter()
  }

}

impl Default for RegisterFile {
  fn default() -> RegisterFile {
    RegisterFile::new()
  }
}

/// Register values as they appear in a trace line: `00 08 00 00 00 00 00 F4`.
impl Display for RegisterFile {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      self.registers
          .iter()
          .map(|r| format!("{:02X}", r))
          .collect::<Vec<String>>()
          .join(" ")
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_with_stack_pointer_set() {
    let registers = RegisterFile::new();
    for index in 0..STACK_POINTER {
      assert_eq!(registers.get(index).unwrap(), 0);
    }
    assert_eq!(registers.get(STACK_POINTER).unwrap(), 0xF4);
  }

  #[test]
  fn default_matches_new() {
    assert_eq!(RegisterFile::default(), RegisterFile::new());
  }

  #[test]
  fn set_and_get() {
    let mut registers = RegisterFile::new();
    registers.set(3, 200).unwrap();
    assert_eq!(registers.get(3).unwrap(), 200);
  }

  #[test]
  fn rejects_invalid_register() {
    let mut registers = RegisterFile::new();
    assert!(matches!(registers.get(8), Err(CpuError::InvalidRegister { index: 8 })));
    assert!(matches!(registers.set(255, 1), Err(CpuError::InvalidRegister { index: 255 })));
  }

  #[test]
  fn display_as_hex() {
    let mut registers = RegisterFile::new();
    registers.set(0, 8).unwrap();
    assert_eq!(registers.to_string(), "08 00 00 00 00 00 00 F4");
  }
}
