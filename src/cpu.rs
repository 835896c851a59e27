//! The LS-8 processor: a fetch-decode-execute loop over the machine's memory and register file.

use std::fmt::{Display, Formatter};
use std::io::Write;

use prettytable::{format as TableFormat, Table};
use tracing::{debug, info, trace};

use crate::alu;
use crate::bytecode::{try_decode_instruction, Instruction, Operation};
use crate::error::CpuError;
use crate::memory::{AddressNumberType, Memory};
use crate::registers::RegisterFile;

/// Number of memory cells shown around the program counter in the machine state tables.
const MEMORY_WINDOW: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
  Running,
  Halted
}

pub struct Cpu {
  state     : State,
  pc        : AddressNumberType, // Program counter
  ir        : u8,                // Instruction register, the last fetched opcode byte
  cycles    : u64,               // Instructions executed since reset
  registers : RegisterFile,
  memory    : Memory,
}

impl Cpu {

  // region Display methods

  fn make_register_table<T> (
      name      : &str,
      cells     : impl Iterator<Item = (usize, T)>,
      highlight : Option<usize>
    ) -> Table
    where T: Display
  {

    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, cell) in cells {
      match Some(i) == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> {}[{:02X}] =", name, i), format!("{}", cell)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("{}[{:02X}] =", name, i), format!("{}", cell)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  /// The bytes at `PC`..`PC+2` followed by the registers, all in hex.
  fn trace_line(&self) -> String {
    let peek = |offset: usize| {
      self.memory
          .read(self.pc + offset)
          .map(|byte| format!("{:02X}", byte))
          .unwrap_or_else(|_| "--".to_string())
    };
    format!(
      "TRACE: {:02X} | {} {} {} | {}",
      self.pc, peek(0), peek(1), peek(2), self.registers
    )
  }

  // endregion

  // region Machine lifetime

  pub fn new() -> Cpu {
    Cpu {
      state     : State::Running,
      pc        : 0,
      ir        : 0,
      cycles    : 0,
      registers : RegisterFile::new(),
      memory    : Memory::new(),
    }
  }

  /// Returns the machine to its power-on state. Memory is cleared, so the program must be
  /// loaded again.
  pub fn reset(&mut self) {
    self.state  = State::Running;
    self.pc     = 0;
    self.ir     = 0;
    self.cycles = 0;
    self.registers = RegisterFile::new();
    self.memory.clear();
  }

  pub fn load_program(&mut self, program: &[u8]) -> Result<(), CpuError> {
    self.load_program_at(program, 0)
  }

  pub fn load_program_at(&mut self, program: &[u8], origin: AddressNumberType)
    -> Result<(), CpuError>
  {
    self.memory.load_program(program, origin)?;
    info!(bytes = program.len(), origin, "loaded program");
    Ok(())
  }

  // endregion

  // region Accessors

  pub fn pc(&self) -> AddressNumberType {
    self.pc
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn is_running(&self) -> bool {
    self.state == State::Running
  }

  pub fn cycles(&self) -> u64 {
    self.cycles
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  // endregion

  // region Execution

  /// Runs until the machine halts. `PRN` output is written to `out`.
  pub fn run(&mut self, out: &mut dyn Write) -> Result<(), CpuError> {
    while self.is_running() {
      self.step(out)?;
    }
    info!(cycles = self.cycles, "halted");
    Ok(())
  }

  /**
    Executes a single instruction. Any error halts the machine before it is returned, so a
    failed machine never fetches again.
  */
  pub fn step(&mut self, out: &mut dyn Write) -> Result<(), CpuError> {
    if !self.is_running() {
      return Ok(());
    }

    #[cfg(feature = "trace_computation")] eprintln!("{}", self);

    match self.cycle(out) {
      Ok(()) => Ok(()),
      Err(error) => {
        self.state = State::Halted;
        debug!(pc = self.pc, "{}", error);
        Err(error)
      }
    }
  }

  fn cycle(&mut self, out: &mut dyn Write) -> Result<(), CpuError> {
    trace!("{}", self.trace_line());

    // Fetch
    self.ir = self.memory.read(self.pc)?;
    // Decode
    let instruction = try_decode_instruction(&self.memory, self.pc)?;
    debug!(pc = self.pc, "{}", instruction);
    // Execute
    self.execute(&instruction, out)?;
    self.cycles += 1;

    let opcode = instruction.opcode();
    if !opcode.sets_pc() {
      self.pc += instruction.size();
    }
    Ok(())
  }

  /// Dispatches on the decoded opcode. ALU instructions are all forwarded to `alu::apply`.
  fn execute(&mut self, instruction: &Instruction, out: &mut dyn Write) -> Result<(), CpuError> {
    match *instruction {

      Instruction::Nullary(Operation::Hlt) => {
        self.hlt();
        Ok(())
      }

      Instruction::Binary { opcode: Operation::Ldi, operand_a, operand_b } => {
        self.ldi(operand_a, operand_b)
      }

      Instruction::Unary { opcode: Operation::Prn, operand } => {
        self.prn(operand, out)
      }

      Instruction::Binary { opcode, operand_a, operand_b } if opcode.is_alu() => {
        alu::apply(&mut self.registers, opcode.id(), operand_a as usize, operand_b as usize)
      }

      Instruction::Unary { opcode, operand } if opcode.is_alu() => {
        alu::apply(&mut self.registers, opcode.id(), operand as usize, operand as usize)
      }

      _ => {
        Err(CpuError::IllegalInstruction { address: self.pc, opcode: self.ir })
      }

    }
  }

  // endregion

  // region Instruction methods

  fn hlt(&mut self) {
    self.state = State::Halted;
  }

  /// Store the literal `value` in register `reg`.
  fn ldi(&mut self, reg: u8, value: u8) -> Result<(), CpuError> {
    self.registers.set(reg as usize, value)
  }

  /// Write the value of register `reg` to `out`, one decimal number per line.
  fn prn(&mut self, reg: u8, out: &mut dyn Write) -> Result<(), CpuError> {
    let value = self.registers.get(reg as usize)?;
    writeln!(out, "{}", value)?;
    Ok(())
  }

  // endregion

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Default for Cpu {
  fn default() -> Cpu {
    Cpu::new()
  }
}

impl Display for Cpu {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let r_table = Cpu::make_register_table(
      "R",
      self.registers.iter().copied().enumerate(),
      None
    );
    let window_start = self.pc.saturating_sub(MEMORY_WINDOW / 2);
    let m_table = Cpu::make_register_table(
      "RAM",
      self.memory.window(window_start, MEMORY_WINDOW).map(|(a, b)| (a, format!("{:08b}", b))),
      Some(self.pc)
    );

    let mut combined_table = table!([r_table, m_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(
      f,
      "State: {}\tPC: {:02X}\tIR: {:08b}\tCycles: {}\n{}",
      self.state, self.pc, self.ir, self.cycles, combined_table
    )
  }
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      State::Running => {
        write!(f, "Running")
      },
      State::Halted => {
        write!(f, "Halted")
      }
    }
  }
}
