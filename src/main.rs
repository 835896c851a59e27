mod logging;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::debug;

use ls8::bytecode::{disassemble, encode_program, parse_program, Instruction, Operation};
use ls8::Cpu;

const USAGE: &str = "usage: ls8 [--disassemble] [PROGRAM]

  PROGRAM         an `.ls8` text file, or raw machine code for any other extension.
                  Runs a built-in demo program if omitted.
  --disassemble   print a listing of the program instead of running it

  Set RUST_LOG=debug to log every executed instruction.";

#[derive(Debug, Default, Eq, PartialEq)]
struct Options {
  program     : Option<PathBuf>,
  disassemble : bool,
  help        : bool,
}

impl Options {
  fn from_args<I>(args: I) -> anyhow::Result<Options>
    where I: IntoIterator<Item = String>
  {
    let mut options = Options::default();

    for arg in args {
      match arg.as_str() {
        "--disassemble" => options.disassemble = true,
        "-h" | "--help" => options.help = true,
        flag if flag.starts_with('-') => bail!("unknown option `{}`\n\n{}", flag, USAGE),
        path => {
          if options.program.is_some() {
            bail!("more than one program given\n\n{}", USAGE);
          }
          options.program = Some(PathBuf::from(path));
        }
      }
    }

    Ok(options)
  }
}

/// `LDI R0, 8; PRN R0; HLT`
fn demo_program() -> Vec<u8> {
  encode_program(&[
    Instruction::Binary { opcode: Operation::Ldi, operand_a: 0, operand_b: 8 },
    Instruction::Unary { opcode: Operation::Prn, operand: 0 },
    Instruction::Nullary(Operation::Hlt),
  ])
}

fn read_program(path: &Path) -> anyhow::Result<Vec<u8>> {
  match path.extension().and_then(|e| e.to_str()) {

    Some("ls8") => {
      let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
      parse_program(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    _ => {
      fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }

  }
}

fn main() -> anyhow::Result<()> {
  logging::init();

  let options = Options::from_args(env::args().skip(1))?;
  if options.help {
    println!("{}", USAGE);
    return Ok(());
  }

  let program = match &options.program {
    Some(path) => read_program(path)?,
    None       => demo_program()
  };

  if options.disassemble {
    for line in disassemble(&program)? {
      println!("{}", line);
    }
    return Ok(());
  }

  let mut machine = Cpu::new();
  machine.load_program(&program).context("failed to load program")?;

  let stdout = io::stdout();
  let mut out = stdout.lock();
  if let Err(error) = machine.run(&mut out) {
    debug!("machine state at failure:\n{}", machine);
    return Err(error).context("execution failed");
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn no_arguments() {
    assert_eq!(Options::from_args(args(&[])).unwrap(), Options::default());
  }

  #[test]
  fn program_and_flags() {
    let options = Options::from_args(args(&["--disassemble", "programs/mult.ls8"])).unwrap();
    assert_eq!(options.program, Some(PathBuf::from("programs/mult.ls8")));
    assert!(options.disassemble);
    assert!(!options.help);
  }

  #[test]
  fn rejects_bad_arguments() {
    assert!(Options::from_args(args(&["--fast"])).is_err());
    assert!(Options::from_args(args(&["a.ls8", "b.ls8"])).is_err());
  }

  #[test]
  fn demo_program_prints_eight() {
    let mut machine = Cpu::new();
    machine.load_program(&demo_program()).unwrap();
    let mut out = Vec::new();
    machine.run(&mut out).unwrap();
    assert_eq!(out, b"8\n".to_vec());
  }

  #[test]
  fn read_text_and_raw_programs() {
    let ls8 = Path::new(env!("CARGO_MANIFEST_DIR")).join("programs/print8.ls8");
    assert_eq!(read_program(&ls8).unwrap(), demo_program());

    let raw = env::temp_dir().join(format!("ls8-test-{}.bin", std::process::id()));
    fs::write(&raw, demo_program()).unwrap();
    assert_eq!(read_program(&raw).unwrap(), demo_program());
    fs::remove_file(&raw).unwrap();

    assert!(read_program(Path::new("does/not/exist.ls8")).is_err());
  }
}
