/*!

  An emulator for the LS-8, a tiny educational 8-bit CPU with 256 bytes of memory and eight
  registers. A `Cpu` owns its `Memory` and `RegisterFile`, and runs a fetch-decode-execute loop
  until it reaches a `HLT` instruction or fails.

  ```
  use ls8::Cpu;

  let mut cpu = Cpu::new();
  // LDI R0, 8; PRN R0; HLT
  cpu.load_program(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]).unwrap();
  let mut out = Vec::new();
  cpu.run(&mut out).unwrap();
  assert_eq!(out, b"8\n");
  ```

*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod alu;
pub mod bytecode;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod registers;

pub use cpu::{Cpu, State};
pub use error::{CpuError, ParseError};
pub use memory::Memory;
pub use registers::RegisterFile;
