/*!
  This module is responsible for the encoding and decoding of instruction words.

  A word holds its opcode and its operand in disjoint ranges of decimal digits:

    word = opcode * multiplier + operand

  where `multiplier` is the smallest power of ten that can hold every address of the memory. For
  the classic 100-word machine the multiplier is 100, so `ADD 42` is stored as `142`.

*/

use super::{Instruction, Mnemonic, Operation};

// If you change this you must also change `encode_instruction` and `decode_word`.
pub type Word = i64;

/// Returns `10^d` for the smallest `d` with `10^d >= capacity`, or `None` if that power of ten
/// does not fit in a `Word` next to an opcode.
pub fn operand_multiplier(capacity: usize) -> Option<Word> {
  let mut multiplier: Word = 1;
  while (multiplier as u128) < capacity as u128 {
    multiplier = multiplier.checked_mul(10)?;
  }
  // The largest opcode must still fit.
  multiplier.checked_mul(10)?;
  Some(multiplier)
}

/**
  Encodes the instruction into a word. `DAT` words are the operand itself.

  It is the caller's responsibility to ensure that the operand of an operation lies in
  `0..multiplier`; otherwise it spills into the opcode's digits.
*/
pub fn encode_instruction(instruction: &Instruction, multiplier: Word) -> Word {
  match instruction.mnemonic {
    Mnemonic::Data                 => instruction.operand,
    Mnemonic::Operation(operation) => (operation.code() as Word) * multiplier + instruction.operand
  }
}

/// Splits a word into its `(opcode, operand)` digits. The opcode is `floor(word / multiplier)`,
/// so the operand is never negative.
pub fn decode_word(word: Word, multiplier: Word) -> (Word, Word) {
  (word.div_euclid(multiplier), word.rem_euclid(multiplier))
}

/// Decodes a word into an operation, or `None` if its opcode digits name no operation.
pub fn try_decode_instruction(word: Word, multiplier: Word) -> Option<Instruction> {
  let (opcode, operand) = decode_word(word, multiplier);
  let operation = Operation::from_code(opcode)?;
  Some(Instruction::new(Mnemonic::Operation(operation), operand))
}
