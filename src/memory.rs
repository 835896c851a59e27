//! Main memory of the machine: 256 byte-sized cells. Every access is bounds checked, so a bad
//! address surfaces as `CpuError::OutOfRange` instead of wrapping around.

use crate::error::CpuError;

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

pub const MEMORY_SIZE: usize = 256;

pub struct Memory {
  cells: [u8; MEMORY_SIZE]
}

impl Memory {

  pub fn new() -> Memory {
    Memory {
      cells: [0; MEMORY_SIZE]
    }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  /// Reads the byte at `address`.
  pub fn read(&self, address: AddressNumberType) -> Result<u8, CpuError> {
    self.cells
        .get(address)
        .copied()
        .ok_or(CpuError::OutOfRange { address })
  }

  /// Stores the low byte of `value` at `address`.
  pub fn write(&mut self, address: AddressNumberType, value: u32) -> Result<(), CpuError> {
    match self.cells.get_mut(address) {
      Some(cell) => {
        *cell = (value & 0xFF) as u8;
        Ok(())
      }
      None => Err(CpuError::OutOfRange { address })
    }
  }

  /**
    Copies `program` into memory starting at `origin`. Nothing is written if the program would
    run past the last cell.
  */
  pub fn load_program(&mut self, program: &[u8], origin: AddressNumberType)
    -> Result<(), CpuError>
  {
    let end = origin
      .checked_add(program.len())
      .filter(|end| *end <= self.len())
      .ok_or(CpuError::ProgramTooLarge { origin, length: program.len() })?;

    self.cells[origin..end].copy_from_slice(program);
    Ok(())
  }

  pub fn clear(&mut self) {
    self.cells = [0; MEMORY_SIZE];
  }

  /// The cells in `start..start + len`, clamped to memory, paired with their addresses.
  pub fn window(&self, start: AddressNumberType, len: usize)
    -> impl Iterator<Item = (AddressNumberType, u8)> + '_
  {
    self.cells
        .iter()
        .copied()
        .enumerate()
        .skip(start)
        .take(len)
  }

}

impl Default for Memory {
  fn default() -> Memory {
    Memory::new()
  }
}
