/*!
  The `.ls8` text form of a program: one byte per line, written as exactly eight binary digits
  and optionally followed by a `#` comment. Blank and comment-only lines are ignored.

  ```text
  10000010 # LDI R0,8
  00000000
  00001000
  01000111 # PRN R0
  00000000
  00000001 # HLT
  ```
*/

use nom::{
  IResult,
  bytes::complete::{take_while, take_while_m_n},
  character::complete::{char as one_char, space0},
  combinator::{all_consuming, map_res, opt},
  sequence::{delimited, pair, preceded},
};

use crate::error::ParseError;

fn is_binary_digit(c: char) -> bool {
  c == '0' || c == '1'
}

fn binary_byte(input: &str) -> IResult<&str, u8> {
  map_res(
    take_while_m_n(8, 8, is_binary_digit),
    |digits: &str| u8::from_str_radix(digits, 2)
  )(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  preceded(one_char('#'), take_while(|_c: char| true))(input)
}

/// A whole line: an optional byte, then an optional comment, and nothing else.
fn program_line(input: &str) -> IResult<&str, Option<u8>> {
  all_consuming(
    delimited(
      space0,
      opt(binary_byte),
      pair(space0, opt(comment))
    )
  )(input)
}

pub fn parse_program(text: &str) -> Result<Vec<u8>, ParseError> {
  let mut program = Vec::new();

  for (line_idx, line) in text.lines().enumerate() {
    match program_line(line) {
      Ok((_rest, Some(byte))) => program.push(byte),
      Ok((_rest, None))       => {},
      Err(_e)                 => {
        return Err(ParseError::Syntax { line: line_idx + 1, text: line.trim().to_string() });
      }
    }
  }

  Ok(program)
}
