//! Errors raised while assembling source text and while running the machine.

use thiserror::Error;

use crate::address::AddressNumberType;
use crate::bytecode::{Mnemonic, Word};

/// Raised by the assembler. Assembly stops at the first error, so no partially built memory
/// image ever escapes.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum CompileError {
  #[error("No valid opcode found on line {line} (`{text}`)")]
  NoOpcode {
    line : usize,
    text : String
  },

  #[error("Too many parts ({count}) on line {line} (`{text}`)")]
  TooManyParts {
    line  : usize,
    count : usize,
    text  : String
  },

  #[error("Line {line}: label `{label}` is already declared on line {first}")]
  DuplicateLabel {
    line  : usize,
    label : String,
    first : usize
  },

  #[error("Line {line}: unknown label `{label}`")]
  UnknownLabel {
    line  : usize,
    label : String
  },

  #[error("Line {line}: integer `{text}` does not fit in a word")]
  InvalidInteger {
    line : usize,
    text : String
  },

  /// The operand would spill into the opcode's digits.
  #[error("Line {line}: operand {operand} of {mnemonic} must lie in 0..{limit}")]
  OperandOutOfRange {
    line     : usize,
    mnemonic : Mnemonic,
    operand  : Word,
    limit    : Word
  },

  #[error("Program needs {records} words but memory holds only {capacity}")]
  ProgramTooLarge {
    records  : usize,
    capacity : usize
  },

  #[error("Memory capacity must be at least one word, got {0}")]
  InvalidCapacity(usize),
}

impl CompileError {
  /// The 1-based source line the error was raised on, if it belongs to a single line.
  pub fn line(&self) -> Option<usize> {
    match self {
      | CompileError::NoOpcode { line, .. }
      | CompileError::TooManyParts { line, .. }
      | CompileError::DuplicateLabel { line, .. }
      | CompileError::UnknownLabel { line, .. }
      | CompileError::InvalidInteger { line, .. }
      | CompileError::OperandOutOfRange { line, .. } => Some(*line),

      | CompileError::ProgramTooLarge { .. }
      | CompileError::InvalidCapacity(_) => None
    }
  }
}

/// Raised by the machine. Any of these terminates the run.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum RuntimeError {
  #[error("Address {address} is outside of memory (capacity {capacity})")]
  AddressOutOfBounds {
    address  : AddressNumberType,
    capacity : usize
  },

  /// Raised when the program counter reaches a word that does not decode, typically a data word.
  #[error("Word {word} at address {address} is not an instruction")]
  IllegalInstruction {
    address : AddressNumberType,
    word    : Word
  },

  #[error("Input requested but no more input is available")]
  InputExhausted,

  #[error("Input `{0}` is not an integer")]
  InvalidInput(String),

  #[error("I/O failure: {0}")]
  Io(String),

  #[error("Machine did not halt within {0} cycles")]
  StepLimitExceeded(usize),
}

impl From<std::io::Error> for RuntimeError {
  fn from(error: std::io::Error) -> Self {
    RuntimeError::Io(error.to_string())
  }
}
