use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lmc::{Compilation, Io, QueuedIo, StdIo, DEFAULT_CAPACITY, LMVM};

/// Multiplies two inputs by repeated addition.
const DEMO_PROGRAM: &str = "
        INP
        STA     a
        INP
        STA     b
loop    LDA     res
        ADD     b
        STA     res
        LDA     a
        SUB     dec
        STA     a
        BRP     loop
        LDA     res
        OUT
        HLT

a       DAT
b       DAT
res     DAT
dec     DAT 1
";

#[derive(Parser, Debug)]
#[command(name = "lmc")]
#[command(about = "Assemble and run a Little Man Computer program", long_about = None)]
struct Args {
  /// Assembly source file. Runs a built-in multiplication demo when omitted.
  source: Option<PathBuf>,

  /// Number of words of memory
  #[arg(long, default_value_t = DEFAULT_CAPACITY)]
  capacity: usize,

  /// Address of the first instruction to execute
  #[arg(long, default_value_t = 0)]
  start_pc: usize,

  /// Value for an INP instruction (repeatable). Inputs are read from stdin when none are given.
  #[arg(short, long = "input", value_name = "VALUE", allow_negative_numbers = true)]
  inputs: Vec<i64>,

  /// Fail instead of running forever if the program has not halted after this many cycles
  #[arg(long)]
  max_cycles: Option<usize>,

  /// Print the memory before and after execution
  #[arg(long)]
  dump: bool,

  /// Print the assembly listing
  #[arg(long)]
  listing: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let (name, text) = match &args.source {
    Some(path) => {
      let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
      (path.display().to_string(), text)
    }
    None => ("demo".to_string(), DEMO_PROGRAM.to_string())
  };

  let compilation = Compilation::compile(&text, args.capacity)
    .with_context(|| format!("Failed to assemble {}", name))?;

  if args.listing {
    println!("{}", compilation.listing());
  }

  let mut memory = compilation.into_memory();
  if args.dump {
    println!("Initial memory state:\n{}", memory);
  }

  match args.inputs.is_empty() {
    true  => run(&mut memory, &args, &mut StdIo::stdio())?,
    false => {
      let mut io = QueuedIo::new(args.inputs.iter().copied());
      run(&mut memory, &args, &mut io)?;
      for value in io.outputs() {
        println!("{}", value);
      }
    }
  }

  if args.dump {
    println!("Final memory state:\n{}", memory);
  }

  Ok(())
}

fn run<I: Io>(memory: &mut lmc::Memory, args: &Args, io: &mut I) -> Result<()> {
  let mut machine = LMVM::new(memory, args.start_pc);
  let result = match args.max_cycles {
    Some(max_cycles) => machine.run_bounded(io, max_cycles),
    None             => machine.run(io)
  };

  let outcome = result.with_context(|| {
    format!("Execution stopped at cycle {}\n{}", machine.cycles(), machine)
  })?;

  if args.dump {
    println!("Halted after {} cycles with accumulator {}.",
             outcome.cycles, outcome.registers.accumulator);
  }
  Ok(())
}
