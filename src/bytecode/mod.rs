/*!

  Machine code of the LS-8. Every instruction is one opcode byte followed by zero, one, or two
  operand bytes. The opcode byte is laid out as

  ```text
  AABCDDDD

    AA:   number of operands (0-2)
    B:    1 if the instruction is handled by the ALU
    C:    1 if the instruction sets the program counter itself
    DDDD: instruction identifier
  ```

  so the size of an instruction is known from its first byte alone. The `Operation` enum is the
  decode table: its discriminants are the opcode bytes, and an unknown byte simply has no
  variant.

  Programs are either raw bytes or the `.ls8` text form, one byte per line written in binary.

*/

mod binary;
mod instruction;
mod program;

pub use binary::{encode_instruction, encode_program, try_decode_instruction, disassemble,
                 ListingLine, ListingEntry};
pub use instruction::{Instruction, Operation, OperandKind};
pub use program::parse_program;
