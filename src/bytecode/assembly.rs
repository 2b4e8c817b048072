/*!
  The human readable textual form of a program is called assembly. This module splits assembly
  source into `ParsedLine`s, one per line that holds code. Labels are not resolved here; that is
  the job of `compiler::compile`.

  The language is line oriented:
    ```text
    <line>    ::= [<label>] <mnemonic> [<operand>] ['#' <comment>]
    <operand> ::= <integer> | <label>
    <integer> ::= ['+' | '-'] <digit>+
    ```
  Fields are separated by whitespace. A line with two fields is `<mnemonic> <operand>` if the
  first field is a mnemonic, and `<label> <mnemonic>` otherwise. Mnemonics are case-sensitive.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  bytes::complete::{take_till, take_till1, take_while, take_while1},
  character::complete::{digit1, one_of},
  combinator::{all_consuming, opt, recognize},
  multi::separated_list,
  sequence::{pair, preceded},
  IResult
};
use string_cache::DefaultAtom;

use crate::bytecode::{Mnemonic, Operand, Word};
use crate::error::CompileError;

const COMMENT_MARKER: char = '#';

/// One line of source code that holds an instruction or a data declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedLine {
  /// 1-based line number in the original source text, comments and blank lines included.
  pub line     : usize,
  pub label    : Option<DefaultAtom>,
  pub mnemonic : Mnemonic,
  pub operand  : Option<Operand>,
  /// The code on the line with its comment removed.
  pub code     : String
}

impl Display for ParsedLine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if let Some(label) = &self.label {
      write!(f, "{} ", label)?;
    }
    write!(f, "{}", self.mnemonic)?;
    if let Some(operand) = &self.operand {
      write!(f, " {}", operand)?;
    }
    Ok(())
  }
}

// region Parsers

/// Everything before the comment marker.
fn code_p(input: &str) -> IResult<&str, &str> {
  take_till(|c: char| c == COMMENT_MARKER)(input)
}

/// Whitespace separated fields.
fn fields_p(input: &str) -> IResult<&str, Vec<&str>> {
  preceded(
    take_while(char::is_whitespace),
    separated_list(
      take_while1(char::is_whitespace),
      take_till1(char::is_whitespace)
    )
  )(input)
}

fn integer_p(input: &str) -> IResult<&str, &str> {
  recognize(pair(opt(one_of("+-")), digit1))(input)
}

// endregion

fn parse_operand(line: usize, token: &str) -> Result<Operand, CompileError> {
  match all_consuming(integer_p)(token) {

    Ok((_rest, digits)) => {
      digits.parse::<Word>()
            .map(Operand::Immediate)
            .map_err(|_| CompileError::InvalidInteger{ line, text: token.to_string() })
    }

    // Anything that isn't a number is a reference to a label.
    Err(_e) => Ok(Operand::Label(DefaultAtom::from(token)))

  }
}

/**
  Parses a single line of source. Returns `Ok(None)` for lines that are blank once the comment is
  removed.
*/
pub fn parse_line(line: usize, text: &str) -> Result<Option<ParsedLine>, CompileError> {
  // Neither parser can fail on complete input.
  let code = code_p(text).map(|(_comment, code)| code).unwrap_or_default().trim();
  if code.is_empty() {
    return Ok(None);
  }

  let fields = fields_p(code).map(|(_rest, fields)| fields).unwrap_or_default();

  let no_opcode = || CompileError::NoOpcode{ line, text: code.to_string() };

  let (label, mnemonic, operand) =
    match fields.as_slice() {

      [opcode] => {
        let mnemonic = Mnemonic::from_str(opcode).map_err(|_| no_opcode())?;
        (None, mnemonic, None)
      }

      [first, second] => {
        match (Mnemonic::from_str(first), Mnemonic::from_str(second)) {
          (Ok(mnemonic), _) => (None, mnemonic, Some(parse_operand(line, second)?)),
          (_, Ok(mnemonic)) => (Some(DefaultAtom::from(*first)), mnemonic, None),
          _                 => return Err(no_opcode())
        }
      }

      [label, opcode, operand] => {
        let mnemonic = Mnemonic::from_str(opcode).map_err(|_| no_opcode())?;
        (Some(DefaultAtom::from(*label)), mnemonic, Some(parse_operand(line, operand)?))
      }

      _ => {
        return Err(CompileError::TooManyParts{
          line,
          count: fields.len(),
          text: code.to_string()
        });
      }

    };

  Ok(Some(ParsedLine{ line, label, mnemonic, operand, code: code.to_string() }))
}

/// Parses assembly source into one `ParsedLine` per line of code, in order. The index of a line
/// in the result is the address it will be assembled to.
pub fn parse_assembly(text: &str) -> Result<Vec<ParsedLine>, CompileError> {
  let mut parsed = Vec::new();
  for (idx, line_text) in text.lines().enumerate() {
    if let Some(line) = parse_line(idx + 1, line_text)? {
      parsed.push(line);
    }
  }
  Ok(parsed)
}
