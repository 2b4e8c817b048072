//! The unified instruction and data store of the machine.

use std::fmt::{Display, Formatter};
use std::ops::Index;

use prettytable::{format as TableFormat, Cell as TableCell, Row, Table};

use crate::address::Address;
use crate::bytecode::{operand_multiplier, Word};
use crate::error::{CompileError, RuntimeError};

/// Width of the grid printed by `Display for Memory`.
pub const DISPLAY_COLUMNS: usize = 10;

/**
  A fixed number of zero-initialised words, addressed from zero. The memory knows its
  multiplier, the power of ten that separates the opcode digits of a word from its operand
  digits, since the multiplier depends only on the capacity.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  words      : Vec<Word>,
  multiplier : Word
}

impl Memory {

  pub fn new(capacity: usize) -> Result<Memory, CompileError> {
    Memory::from_words(vec![0; capacity])
  }

  /// Wraps an existing image. The capacity is the number of words given.
  pub fn from_words(words: Vec<Word>) -> Result<Memory, CompileError> {
    let capacity = words.len();
    if capacity == 0 {
      return Err(CompileError::InvalidCapacity(capacity));
    }
    let multiplier =
      operand_multiplier(capacity).ok_or(CompileError::InvalidCapacity(capacity))?;

    Ok(Memory{ words, multiplier })
  }

  pub fn capacity(&self) -> usize {
    self.words.len()
  }

  pub fn multiplier(&self) -> Word {
    self.multiplier
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  pub(crate) fn words_mut(&mut self) -> &mut [Word] {
    &mut self.words
  }

  fn check(&self, address: Address) -> Result<usize, RuntimeError> {
    match address.is_within(self.capacity()) {
      true  => Ok(address.idx()),
      false => Err(RuntimeError::AddressOutOfBounds{
        address  : address.idx(),
        capacity : self.capacity()
      })
    }
  }

  pub fn read(&self, address: Address) -> Result<Word, RuntimeError> {
    let idx = self.check(address)?;
    Ok(self.words[idx])
  }

  pub fn write(&mut self, address: Address, value: Word) -> Result<(), RuntimeError> {
    let idx = self.check(address)?;
    self.words[idx] = value;
    Ok(())
  }

  /// Lays the words out in rows of `columns`, each row titled with the address of its first word.
  pub fn to_table(&self, columns: usize) -> Table {
    let columns = columns.max(1);
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);

    let mut titles = vec![TableCell::new("")];
    titles.extend((0..columns).map(|c| TableCell::new(&format!("+{}", c)).style_spec("br")));
    table.set_titles(Row::new(titles));

    for (row_idx, chunk) in self.words.chunks(columns).enumerate() {
      let mut cells = vec![TableCell::new(&format!("{}", row_idx * columns)).style_spec("br")];
      cells.extend(chunk.iter().map(|word| TableCell::new(&word.to_string()).style_spec("r")));
      table.add_row(Row::new(cells));
    }
    table
  }
}

impl Index<usize> for Memory {
  type Output = Word;

  fn index(&self, idx: usize) -> &Word {
    &self.words[idx]
  }
}

impl Display for Memory {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_table(DISPLAY_COLUMNS))
  }
}


lazy_static! {
  pub(crate) static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
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
