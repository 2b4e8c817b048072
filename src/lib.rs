/*!
  An assembler and virtual machine for the Little Man Computer, a von Neumann machine with a
  single accumulator, a program counter, and one memory that holds both instructions and data.

  ```
  use lmc::{compile, execute, QueuedIo};

  let source = "
        INP
        STA a
        INP
        ADD a
        OUT
        HLT
  a     DAT
  ";

  let mut memory = compile(source, 100).unwrap();
  let mut io = QueuedIo::new(vec![3, 4]);
  execute(&mut memory, 0, &mut io).unwrap();

  assert_eq!(io.outputs(), &[7]);
  assert_eq!(memory[6], 3);
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod compiler;
pub mod error;
pub mod io;
pub mod lmvm;
pub mod memory;
pub mod symboltable;

pub use compiler::{compile, Compilation};
pub use error::{CompileError, RuntimeError};
pub use io::{Io, QueuedIo, StdIo, TextIo};
pub use lmvm::{execute, Outcome, Registers, State, LMVM};
pub use memory::Memory;

/// The memory size of the classic Little Man Computer.
pub const DEFAULT_CAPACITY: usize = 100;
