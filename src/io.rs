/*!
  The machine's only contact with the outside world is through `INP` and `OUT`. Both go through
  an `Io` implementation supplied by the caller: `TextIo` talks to a terminal (or any reader and
  writer), `QueuedIo` replays a fixed list of inputs and records the outputs, which is what tests
  and the `--input` command line option use.
*/

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::bytecode::Word;
use crate::error::RuntimeError;

pub trait Io {
  /// Blocks until the next input value is available.
  fn input(&mut self) -> Result<Word, RuntimeError>;

  fn output(&mut self, value: Word) -> Result<(), RuntimeError>;
}

/// Prompts with `< ` for each input line and prints each output as `> value`.
pub struct TextIo<R, W> {
  reader : R,
  writer : W
}

pub type StdIo = TextIo<BufReader<Stdin>, Stdout>;

impl<R: BufRead, W: Write> TextIo<R, W> {
  pub fn new(reader: R, writer: W) -> Self {
    TextIo{ reader, writer }
  }

  pub fn into_inner(self) -> (R, W) {
    (self.reader, self.writer)
  }
}

impl StdIo {
  pub fn stdio() -> StdIo {
    TextIo::new(BufReader::new(io::stdin()), io::stdout())
  }
}

impl<R: BufRead, W: Write> Io for TextIo<R, W> {
  fn input(&mut self) -> Result<Word, RuntimeError> {
    write!(self.writer, "< ")?;
    self.writer.flush()?;

    let mut line = String::new();
    if self.reader.read_line(&mut line)? == 0 {
      return Err(RuntimeError::InputExhausted);
    }
    let text = line.trim();
    text.parse::<Word>().map_err(|_| RuntimeError::InvalidInput(text.to_string()))
  }

  fn output(&mut self, value: Word) -> Result<(), RuntimeError> {
    writeln!(self.writer, "> {}", value)?;
    Ok(())
  }
}

/// Supplies inputs from a queue and collects outputs in emission order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueuedIo {
  inputs  : VecDeque<Word>,
  outputs : Vec<Word>
}

impl QueuedIo {
  pub fn new<I: IntoIterator<Item = Word>>(inputs: I) -> QueuedIo {
    QueuedIo{
      inputs  : inputs.into_iter().collect(),
      outputs : Vec::new()
    }
  }

  pub fn outputs(&self) -> &[Word] {
    &self.outputs
  }

  /// Inputs that were never consumed.
  pub fn remaining_inputs(&self) -> usize {
    self.inputs.len()
  }
}

impl Io for QueuedIo {
  fn input(&mut self) -> Result<Word, RuntimeError> {
    self.inputs.pop_front().ok_or(RuntimeError::InputExhausted)
  }

  fn output(&mut self, value: Word) -> Result<(), RuntimeError> {
    self.outputs.push(value);
    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  #[test]
  fn queued_inputs_run_out() {
    let mut io = QueuedIo::new(vec![3, 4]);
    assert_eq!(io.input(), Ok(3));
    assert_eq!(io.remaining_inputs(), 1);
    assert_eq!(io.input(), Ok(4));
    assert_eq!(io.input(), Err(RuntimeError::InputExhausted));

    io.output(7).unwrap();
    io.output(-1).unwrap();
    assert_eq!(io.outputs(), &[7, -1]);
  }

  #[test]
  fn text_io_prompts_and_prints() {
    let mut io = TextIo::new(Cursor::new("12\n  -3 \nseven\n"), Vec::new());
    assert_eq!(io.input(), Ok(12));
    assert_eq!(io.input(), Ok(-3));
    assert_eq!(io.input(), Err(RuntimeError::InvalidInput("seven".to_string())));
    assert_eq!(io.input(), Err(RuntimeError::InputExhausted));
    io.output(15).unwrap();

    let (_reader, written) = io.into_inner();
    assert_eq!(String::from_utf8(written).unwrap(), "< < < < > 15\n");
  }
}
