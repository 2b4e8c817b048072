/*!
  Functions to produce a compilation artifact from source code input.
  Accepts a program as a string and turns it into a memory image ready to be executed.

  The compilation pipeline is this:
  ```text
  text -> [`parse_assembly`] -> `ParsedLine`s ->⋯

  ⋯-> [`build_symbol_table`] -> `SymbolTable` ->⋯

  ⋯-> [`resolve`] -> `Instruction`s -> [`encode_instruction`] -> `Memory`
  ```
  Every line of code becomes exactly one word, so the address of a line is its index among the
  lines of code. That is what makes it possible to build the whole symbol table before any
  operand is resolved, which in turn is what allows forward references.
*/

use prettytable::Table;

use crate::address::Address;
use crate::bytecode::{
  encode_instruction, parse_assembly, Instruction, Mnemonic, Operand, ParsedLine, Word
};
use crate::error::CompileError;
use crate::memory::{Memory, TABLE_DISPLAY_FORMAT};
use crate::symboltable::SymbolTable;

/// A `Compilation` is the result of executing `Compilation::compile(source, capacity)`. It holds
/// the memory image along with what is needed to relate the image back to the source.
pub struct Compilation{
  pub memory       : Memory,
  pub symbols      : SymbolTable,
  /// The lines of code, indexed by address.
  pub lines        : Vec<ParsedLine>,
  /// The resolved form of each line, indexed by address.
  pub instructions : Vec<Instruction>,
}

impl Compilation {

  /// Assembles `text` into a memory of `capacity` words. The first error aborts compilation.
  pub fn compile(text: &str, capacity: usize) -> Result<Compilation, CompileError>{
    #[cfg(feature = "trace_computation")]
    let compilation_time = std::time::Instant::now();

    let mut memory = Memory::new(capacity)?;
    let lines = parse_assembly(text)?;
    if lines.len() > capacity {
      return Err(CompileError::ProgramTooLarge{ records: lines.len(), capacity });
    }

    let symbols      = build_symbol_table(&lines)?;
    let instructions = resolve(&lines, &symbols)?;
    let multiplier   = memory.multiplier();

    for (word, (instruction, line)) in
      memory.words_mut().iter_mut().zip(instructions.iter().zip(lines.iter()))
    {
      check_operand(instruction, line, multiplier)?;
      *word = encode_instruction(instruction, multiplier);
    }

    let compilation = Compilation{ memory, symbols, lines, instructions };

    #[cfg(feature = "trace_computation")]
      {
        println!("Compiled {} lines with {} labels into a {} word memory in {:?}.\n{}",
                 compilation.lines.len(), compilation.symbols.len(), capacity,
                 compilation_time.elapsed(), compilation.listing());
      }

    Ok(compilation)
  }

  /// A table relating every populated address to its source line and encoded word.
  pub fn listing(&self) -> Table {
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(
      row![ubr->"Address", ubr->"Word", ubl->"Label", ubl->"Instruction", ubr->"Line", ubl->"Source"]
    );

    for (idx, (instruction, line)) in self.instructions.iter().zip(self.lines.iter()).enumerate() {
      let label = match self.symbols.get_symbol(&Address(idx)) {
        Some(label) => label.to_string(),
        None        => String::new()
      };
      table.add_row(row![
        r->idx,
        r->self.memory[idx],
        label,
        instruction.to_string(),
        r->line.line,
        line.code
      ]);
    }
    table
  }

  pub fn into_memory(self) -> Memory {
    self.memory
  }
}

/// Assembles `text` into a memory image of `capacity` words.
pub fn compile(text: &str, capacity: usize) -> Result<Memory, CompileError>{
  Compilation::compile(text, capacity).map(Compilation::into_memory)
}

/// Binds every label to the address of the line that declares it.
pub fn build_symbol_table(lines: &[ParsedLine]) -> Result<SymbolTable, CompileError> {
  let mut symbols = SymbolTable::new();

  for (idx, line) in lines.iter().enumerate() {
    if let Some(label) = &line.label {
      if let Err((label, first)) = symbols.insert(label.clone(), Address(idx)) {
        return Err(CompileError::DuplicateLabel{
          line  : line.line,
          label : label.to_string(),
          first : lines[first.idx()].line
        });
      }
    }
  }

  Ok(symbols)
}

/// Replaces every label reference with the address it names. Missing operands become zero.
pub fn resolve(lines: &[ParsedLine], symbols: &SymbolTable)
  -> Result<Vec<Instruction>, CompileError>
{
  lines.iter().map(|line| {
    let operand =
      match &line.operand {

        None                       => 0,

        Some(Operand::Immediate(value)) => *value,

        Some(Operand::Label(label)) => {
          match symbols.get_address(label) {
            Some(address) => address.idx() as Word,
            None          => {
              return Err(CompileError::UnknownLabel{ line: line.line, label: label.to_string() });
            }
          }
        }

      };
    Ok(Instruction::new(line.mnemonic, operand))
  }).collect()
}

/// An operation's operand must fit in the digits below its opcode. `DAT` words are unrestricted.
fn check_operand(instruction: &Instruction, line: &ParsedLine, multiplier: Word)
  -> Result<(), CompileError>
{
  match instruction.mnemonic {

    Mnemonic::Data => Ok(()),

    Mnemonic::Operation(_) => {
      match (0..multiplier).contains(&instruction.operand) {
        true  => Ok(()),
        false => Err(CompileError::OperandOutOfRange{
          line     : line.line,
          mnemonic : instruction.mnemonic,
          operand  : instruction.operand,
          limit    : multiplier
        })
      }
    }

  }
}
