//! Structures and functions for the Little Man Virtual Machine, what I'm calling an
//! implementation of the Little Man Computer.

use std::fmt::{Display, Formatter};

use prettytable::Table;

use crate::address::{Address, AddressNumberType};
use crate::bytecode::{decode_word, Operation, Word};
use crate::error::RuntimeError;
use crate::io::Io;
use crate::memory::{Memory, DISPLAY_COLUMNS, TABLE_DISPLAY_FORMAT};

/**
  The register set. The memory address register (MAR) and memory data register (MDR) stage every
  transfer between the processor and memory, and the current instruction register (CIR) holds the
  word being decoded. They are kept so that traces show the machine the way it is taught.
*/
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Registers {
  pub accumulator : Word,
  pub pc          : AddressNumberType,
  pub mar         : AddressNumberType,
  pub mdr         : Word,
  pub cir         : Word,
}

impl Registers {
  pub fn new(pc: AddressNumberType) -> Registers {
    Registers{ pc, ..Registers::default() }
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum State {
  Running,
  Halted
}

impl Display for State{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{
      State::Running => write!(f, "Running"),
      State::Halted  => write!(f, "Halted")
    }
  }
}

/// What a run leaves behind besides the memory it mutated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
  pub registers : Registers,
  /// The number of fetches, including the fetch of the halting instruction.
  pub cycles    : usize
}

// region Fetch-decode-execute

fn read_memory(registers: &mut Registers, memory: &Memory, address: AddressNumberType)
  -> Result<(), RuntimeError>
{
  registers.mar = address;
  registers.mdr = memory.read(Address(registers.mar))?;
  #[cfg(feature = "trace_computation")]
    println!("Read {} from address {} into MDR", registers.mdr, registers.mar);
  Ok(())
}

fn write_memory(registers: &mut Registers, memory: &mut Memory, address: AddressNumberType)
  -> Result<(), RuntimeError>
{
  registers.mar = address;
  registers.mdr = registers.accumulator;
  memory.write(Address(registers.mar), registers.mdr)?;
  #[cfg(feature = "trace_computation")]
    println!("Wrote {} to address {}", registers.mdr, registers.mar);
  Ok(())
}

/**
  Performs one fetch-decode-execute cycle.

  The program counter is incremented as part of the fetch, before the instruction is executed,
  so a branch sets the address of the next fetch directly.
*/
pub fn step<I>(registers: &mut Registers, memory: &mut Memory, io: &mut I)
  -> Result<State, RuntimeError>
  where I: Io + ?Sized
{
  // Fetch. The read bounds-checks the address, so the increment cannot overflow.
  let address = registers.pc;
  read_memory(registers, memory, address)?;
  registers.pc = address + 1;
  registers.cir = registers.mdr;

  // Decode
  let (opcode, operand) = decode_word(registers.cir, memory.multiplier());
  let operation =
    Operation::from_code(opcode).ok_or(RuntimeError::IllegalInstruction{
      address : registers.mar,
      word    : registers.cir
    })?;
  // `decode_word` never yields a negative operand.
  let operand = operand as AddressNumberType;

  #[cfg(feature = "trace_computation")]
    println!("Executing {} {} from address {}", operation, operand, registers.mar);

  // Execute
  match operation {

    Operation::Halt => {
      return Ok(State::Halted);
    }

    Operation::Add => {
      read_memory(registers, memory, operand)?;
      registers.accumulator = registers.accumulator.wrapping_add(registers.mdr);
    }

    Operation::Subtract => {
      read_memory(registers, memory, operand)?;
      registers.accumulator = registers.accumulator.wrapping_sub(registers.mdr);
    }

    Operation::Store => {
      write_memory(registers, memory, operand)?;
    }

    Operation::Load => {
      read_memory(registers, memory, operand)?;
      registers.accumulator = registers.mdr;
    }

    Operation::Branch => {
      registers.pc = operand;
    }

    Operation::BranchIfZero => {
      if registers.accumulator == 0 {
        registers.pc = operand;
      }
    }

    // Zero is not positive.
    Operation::BranchIfPositive => {
      if registers.accumulator > 0 {
        registers.pc = operand;
      }
    }

    Operation::Input => {
      registers.accumulator = io.input()?;
    }

    Operation::Output => {
      io.output(registers.accumulator)?;
    }

  }

  Ok(State::Running)
}

// endregion

/**
  The machine holds its memory by exclusive reference for as long as it exists, so nothing else
  can observe or modify the memory while a program runs. When the machine is dropped, the
  caller's memory holds whatever the program left in it.
*/
#[allow(clippy::upper_case_acronyms)]
pub struct LMVM<'m> {
  memory    : &'m mut Memory,
  registers : Registers,
  state     : State,
  cycles    : usize,
}

impl<'m> LMVM<'m> {

  pub fn new(memory: &'m mut Memory, start_pc: AddressNumberType) -> LMVM<'m> {
    LMVM{
      memory,
      registers : Registers::new(start_pc),
      state     : State::Running,
      cycles    : 0
    }
  }

  // region Accessors

  pub fn registers(&self) -> &Registers {
    &self.registers
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn cycles(&self) -> usize {
    self.cycles
  }

  fn outcome(&self) -> Outcome {
    Outcome{ registers: self.registers, cycles: self.cycles }
  }

  // endregion

  // region Execution

  /// Performs one cycle. A halted machine stays halted and does not fetch.
  pub fn step<I>(&mut self, io: &mut I) -> Result<State, RuntimeError>
    where I: Io + ?Sized
  {
    if self.state == State::Halted {
      return Ok(State::Halted);
    }

    self.cycles += 1;
    self.state = step(&mut self.registers, self.memory, io)?;

    #[cfg(feature = "trace_computation")] println!("{}", self);

    Ok(self.state)
  }

  /// Runs until the program halts. A program that never halts never returns.
  pub fn run<I>(&mut self, io: &mut I) -> Result<Outcome, RuntimeError>
    where I: Io + ?Sized
  {
    #[cfg(feature = "trace_computation")] println!("{}", self);

    while self.step(io)? == State::Running {}
    Ok(self.outcome())
  }

  /// Runs until the program halts or `max_cycles` cycles have been performed in total.
  pub fn run_bounded<I>(&mut self, io: &mut I, max_cycles: usize) -> Result<Outcome, RuntimeError>
    where I: Io + ?Sized
  {
    #[cfg(feature = "trace_computation")] println!("{}", self);

    while self.state == State::Running {
      if self.cycles >= max_cycles {
        return Err(RuntimeError::StepLimitExceeded(max_cycles));
      }
      self.step(io)?;
    }
    Ok(self.outcome())
  }

  // endregion

  // region Display methods

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);

    table.add_row(row![r->"ACC =", self.registers.accumulator]);
    table.add_row(row![r->"PC =",  self.registers.pc]);
    table.add_row(row![r->"MAR =", self.registers.mar]);
    table.add_row(row![r->"MDR =", self.registers.mdr]);
    table.add_row(row![r->"CIR =", self.registers.cir]);
    table
  }

  // endregion

}

impl<'m> Display for LMVM<'m> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let memory_table   = self.memory.to_table(DISPLAY_COLUMNS);
    let register_table = self.make_register_table();

    let mut combined_table = table!([memory_table, register_table]);

    combined_table.set_titles(row![ub->"Memory", ub->"Registers"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "State: {}\tCycles: {}\n{}", self.state, self.cycles, combined_table)
  }
}

/// Runs the program in `memory` from `start_pc` until it halts, mutating `memory` in place.
pub fn execute<I>(memory: &mut Memory, start_pc: AddressNumberType, io: &mut I)
  -> Result<Outcome, RuntimeError>
  where I: Io + ?Sized
{
  LMVM::new(memory, start_pc).run(io)
}
