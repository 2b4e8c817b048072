use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use string_cache::DefaultAtom;
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::bytecode::Word;

/**
  Opcodes of the virtual machine.

  The discriminant of each variant is the digit that is packed into the high digits of a word,
  so the order the opcodes are listed below is significant. `Halt` must be zero: a zeroed word
  decodes to `Halt`, which is what stops a program that runs off the end of its code.
*/
#[derive(
StrumDisplay, EnumString, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,       Eq, PartialEq,    Debug,         Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(serialize = "HLT")]
  Halt,              // hlt
  #[strum(serialize = "ADD")]
  Add,               // acc += M[operand]
  #[strum(serialize = "SUB")]
  Subtract,          // acc -= M[operand]
  #[strum(serialize = "STA")]
  Store,             // M[operand] = acc
  #[strum(serialize = "LDA")]
  Load,              // acc = M[operand]
  #[strum(serialize = "BRA")]
  Branch,            // pc = operand
  #[strum(serialize = "BRZ")]
  BranchIfZero,      // if acc == 0 { pc = operand }
  #[strum(serialize = "BRP")]
  BranchIfPositive,  // if acc > 0 { pc = operand }
  #[strum(serialize = "INP")]
  Input,             // acc = <input>
  #[strum(serialize = "OUT")]
  Output,            // <output> acc
}

impl Operation{
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Looks up the operation for a decoded opcode digit.
  pub fn from_code(code: Word) -> Option<Operation> {
    u8::try_from(code).ok().and_then(|code| Operation::try_from(code).ok())
  }
}

/**
  Every name that may appear in the opcode column of a source line. `DAT` is a pseudo-opcode
  that reserves a word of data; it has no numeric code and is never executed deliberately.
*/
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Mnemonic {
  Operation(Operation),
  Data,
}

const DATA_MNEMONIC: &str = "DAT";

impl Mnemonic {
  /// The numeric opcode, or `None` for `DAT`.
  pub fn code(&self) -> Option<u8> {
    match self {
      Mnemonic::Operation(operation) => Some(operation.code()),
      Mnemonic::Data                 => None
    }
  }
}

impl FromStr for Mnemonic {
  type Err = strum::ParseError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    match text {
      DATA_MNEMONIC => Ok(Mnemonic::Data),
      _             => Operation::from_str(text).map(Mnemonic::Operation)
    }
  }
}

impl Display for Mnemonic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Mnemonic::Operation(operation) => write!(f, "{}", operation),
      Mnemonic::Data                 => write!(f, "{}", DATA_MNEMONIC)
    }
  }
}

/// The operand column of a source line before labels are resolved.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Operand {
  Label(DefaultAtom),
  Immediate(Word),
}

impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{
      Operand::Label(name)      => write!(f, "{}", name),
      Operand::Immediate(value) => write!(f, "{}", value)
    }
  }
}

/// A resolved instruction: every operand is a concrete number.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub mnemonic : Mnemonic,
  pub operand  : Word
}

impl Instruction {
  pub fn new(mnemonic: Mnemonic, operand: Word) -> Instruction {
    Instruction{ mnemonic, operand }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.mnemonic {
      // The operand of these is ignored by the machine.
      | Mnemonic::Operation(Operation::Halt)
      | Mnemonic::Operation(Operation::Input)
      | Mnemonic::Operation(Operation::Output) if self.operand == 0 => {
        write!(f, "{}", self.mnemonic)
      }

      _ => write!(f, "{} {}", self.mnemonic, self.operand)
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mnemonics_are_case_sensitive() {
    assert_eq!(Mnemonic::from_str("ADD"), Ok(Mnemonic::Operation(Operation::Add)));
    assert_eq!(Mnemonic::from_str("DAT"), Ok(Mnemonic::Data));
    assert!(Mnemonic::from_str("add").is_err());
    assert!(Mnemonic::from_str("Dat").is_err());
    assert!(Mnemonic::from_str("loop").is_err());
  }

  #[test]
  fn opcode_table() {
    let expected = [
      ("HLT", 0u8), ("ADD", 1), ("SUB", 2), ("STA", 3), ("LDA", 4),
      ("BRA", 5), ("BRZ", 6), ("BRP", 7), ("INP", 8), ("OUT", 9)
    ];
    for (name, code) in expected.iter() {
      let operation = Operation::from_str(name).unwrap();
      assert_eq!(operation.code(), *code);
      assert_eq!(Operation::from_code(*code as Word), Some(operation));
      assert_eq!(operation.to_string(), *name);
    }
    assert_eq!(Mnemonic::Data.code(), None);
    assert_eq!(Operation::from_code(10), None);
    assert_eq!(Operation::from_code(-1), None);
  }

  #[test]
  fn instructions_display_like_source() {
    let add = Instruction::new(Mnemonic::Operation(Operation::Add), 9);
    assert_eq!(add.to_string(), "ADD 9");
    let halt = Instruction::new(Mnemonic::Operation(Operation::Halt), 0);
    assert_eq!(halt.to_string(), "HLT");
    let data = Instruction::new(Mnemonic::Data, -4);
    assert_eq!(data.to_string(), "DAT -4");
  }
}
