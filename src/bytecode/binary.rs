/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use super::{Operation, Instruction};
use crate::error::CpuError;
use crate::memory::{AddressNumberType, Memory};

/**
  Decodes the instruction whose opcode is at `address`. Operands are read from the bytes that
  follow it, and reading past the end of memory is an error rather than a wrap to address zero.
*/
pub fn try_decode_instruction(memory: &Memory, address: AddressNumberType)
  -> Result<Instruction, CpuError>
{
  let byte = memory.read(address)?;
  let opcode = Operation::try_from(byte)
    .map_err(|_| CpuError::IllegalInstruction { address, opcode: byte })?;

  let instruction =
    match opcode.operand_count() {
      2 => Instruction::Binary {
        opcode,
        operand_a: memory.read(address + 1)?,
        operand_b: memory.read(address + 2)?,
      },
      1 => Instruction::Unary {
        opcode,
        operand: memory.read(address + 1)?,
      },
      _ => Instruction::Nullary(opcode)
    };

  Ok(instruction)
}

/**
  Encodes the instruction into machine code. It is the caller's responsibility to use the
  `Instruction` variant matching the operand count of the opcode.
*/
pub fn encode_instruction(instruction: &Instruction) -> Vec<u8> {
  match *instruction {

    Instruction::Binary { opcode, operand_a, operand_b } => {
      vec![opcode.code(), operand_a, operand_b]
    },

    Instruction::Unary { opcode, operand } => {
      vec![opcode.code(), operand]
    },

    Instruction::Nullary(opcode) => {
      vec![opcode.code()]
    },
  }
}

pub fn encode_program(instructions: &[Instruction]) -> Vec<u8> {
  instructions.iter().flat_map(encode_instruction).collect()
}

/// Either a decoded instruction or a byte that does not begin a complete instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListingEntry {
  Instruction(Instruction),
  Data(u8)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingLine {
  pub address: AddressNumberType,
  pub bytes: Vec<u8>,
  pub entry: ListingEntry
}

impl Display for ListingLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let bytes = self.bytes
                    .iter()
                    .map(|b| format!("{:08b}", b))
                    .collect::<Vec<String>>()
                    .join(" ");
    match &self.entry {
      ListingEntry::Instruction(instruction) => {
        write!(f, "{:02X}: {:<26} {}", self.address, bytes, instruction)
      }
      ListingEntry::Data(byte) => {
        write!(f, "{:02X}: {:<26} .byte {}", self.address, bytes, byte)
      }
    }
  }
}

/**
  Decodes `program` linearly from address zero into listing lines. Bytes that are not an opcode,
  or an instruction cut off by the end of the program, are listed as data.
*/
pub fn disassemble(program: &[u8]) -> Result<Vec<ListingLine>, CpuError> {
  let mut memory = Memory::new();
  memory.load_program(program, 0)?;

  let mut listing = Vec::new();
  let mut address = 0;
  while address < program.len() {
    let line =
      match try_decode_instruction(&memory, address) {
        Ok(instruction) if address + instruction.size() <= program.len() => {
          ListingLine {
            address,
            bytes: program[address..address + instruction.size()].to_vec(),
            entry: ListingEntry::Instruction(instruction)
          }
        }
        _ => {
          ListingLine {
            address,
            bytes: vec![program[address]],
            entry: ListingEntry::Data(program[address])
          }
        }
      };
    address += line.bytes.len();
    listing.push(line);
  }

  Ok(listing)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn memory_with(program: &[u8], origin: usize) -> Memory {
    let mut memory = Memory::new();
    memory.load_program(program, origin).unwrap();
    memory
  }

  #[test]
  fn decode_each_arity() {
    let memory = memory_with(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001], 0);
    assert_eq!(
      try_decode_instruction(&memory, 0).unwrap(),
      Instruction::Binary { opcode: Operation::Ldi, operand_a: 0, operand_b: 8 }
    );
    assert_eq!(
      try_decode_instruction(&memory, 3).unwrap(),
      Instruction::Unary { opcode: Operation::Prn, operand: 0 }
    );
    assert_eq!(
      try_decode_instruction(&memory, 5).unwrap(),
      Instruction::Nullary(Operation::Hlt)
    );
  }

  #[test]
  fn decode_illegal_opcode() {
    let memory = memory_with(&[0, 0b1111_1111], 0);
    assert!(matches!(
      try_decode_instruction(&memory, 1),
      Err(CpuError::IllegalInstruction { address: 1, opcode: 0xFF })
    ));
  }

  #[test]
  fn decode_does_not_wrap() {
    let memory = memory_with(&[0b1000_0010, 1], 254);
    assert!(matches!(
      try_decode_instruction(&memory, 254),
      Err(CpuError::OutOfRange { address: 256 })
    ));
    assert!(matches!(
      try_decode_instruction(&memory, 256),
      Err(CpuError::OutOfRange { address: 256 })
    ));
  }

  #[test]
  fn encode() {
    let program = encode_program(&[
      Instruction::Binary { opcode: Operation::Ldi, operand_a: 0, operand_b: 8 },
      Instruction::Unary { opcode: Operation::Prn, operand: 0 },
      Instruction::Nullary(Operation::Hlt),
    ]);
    assert_eq!(program, vec![0x82, 0, 8, 0x47, 0, 0x01]);
  }

  #[test]
  fn disassemble_program_with_data() {
    // LDI R0,8 | illegal byte | PRN cut off by the end of the program
    let listing = disassemble(&[0x82, 0, 8, 0xFF, 0x47]).unwrap();
    assert_eq!(listing.len(), 3);
    assert_eq!(
      listing[0].entry,
      ListingEntry::Instruction(
        Instruction::Binary { opcode: Operation::Ldi, operand_a: 0, operand_b: 8 }
      )
    );
    assert_eq!(listing[1].address, 3);
    assert_eq!(listing[1].entry, ListingEntry::Data(0xFF));
    assert_eq!(listing[2].entry, ListingEntry::Data(0x47));
    assert!(listing[0].to_string().ends_with("LDI R0, 8"));
    assert!(listing[1].to_string().starts_with("03: 11111111"));
  }

  #[test]
  fn disassemble_too_large() {
    assert!(matches!(
      disassemble(&[1; 300]),
      Err(CpuError::ProgramTooLarge { origin: 0, length: 300 })
    ));
  }
}
