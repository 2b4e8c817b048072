use std::io::Cursor;

use lmc::{
  compile, execute, Compilation, CompileError, QueuedIo, RuntimeError, TextIo, LMVM,
};
use lmc::bytecode::Word;

const ADDER: &str = "
    INP
    STA a
    INP
    STA b
    LDA a
    ADD b
    OUT
    HLT
a   DAT
b   DAT
";

const MULTIPLIER: &str = "
        INP
        STA     a
        INP
        STA     b
loop    LDA     res     # res += b
        ADD     b
        STA     res
        LDA     a       # a -= 1
        SUB     dec
        STA     a
        BRP     loop    # until a reaches zero
        LDA     res
        OUT
        HLT

a       DAT
b       DAT
res     DAT
dec     DAT 1
";

fn run(source: &str, inputs: Vec<Word>) -> (lmc::Memory, Result<lmc::Outcome, RuntimeError>, Vec<Word>) {
  let mut memory = compile(source, 100).unwrap();
  let mut io = QueuedIo::new(inputs);
  let result = execute(&mut memory, 0, &mut io);
  (memory, result, io.outputs().to_vec())
}

#[test]
fn adds_two_inputs() {
  let (memory, result, outputs) = run(ADDER, vec![3, 4]);

  assert_eq!(outputs, vec![7]);
  let outcome = result.unwrap();
  assert_eq!(outcome.cycles, 8);
  assert_eq!(outcome.registers.mar, 7);
  assert_eq!(memory[8], 3);
  assert_eq!(memory[9], 4);
}

#[test]
fn multiplies_by_repeated_addition() {
  let (memory, result, outputs) = run(MULTIPLIER, vec![4, 5]);

  assert_eq!(outputs, vec![20]);
  assert!(result.is_ok());
  // a counts down to zero, res holds the product.
  assert_eq!(memory[14], 0);
  assert_eq!(memory[16], 20);
}

#[test]
fn label_free_program_matches_hand_encoding() {
  let source = "
    LDA 5   # 405
    ADD 6   # 106
    STA 7   # 307
    HLT
    DAT 0
    DAT 20
    DAT 22
  ";
  let (memory, result, outputs) = run(source, vec![]);

  assert!(outputs.is_empty());
  assert_eq!(result.unwrap().cycles, 4);

  let mut expected: Vec<Word> = vec![405, 106, 307, 0, 0, 20, 22, 42];
  expected.resize(100, 0);
  assert_eq!(memory.words(), expected.as_slice());
}

#[test]
fn falls_through_to_a_zero_word() {
  // No trailing HLT: the zero word after the program halts it.
  let (_, result, outputs) = run("INP\nOUT", vec![9]);
  assert_eq!(outputs, vec![9]);
  assert_eq!(result.unwrap().cycles, 3);

  // An explicit HLT in the same place takes the same number of cycles.
  let (_, result, _) = run("INP\nOUT\nHLT", vec![9]);
  assert_eq!(result.unwrap().cycles, 3);
}

#[test]
fn runs_off_the_end_of_a_full_memory() {
  let mut memory = compile("INP\nOUT\nOUT", 3).unwrap();
  assert_eq!(memory.words(), &[80, 90, 90]);

  let mut io = QueuedIo::new(vec![1]);
  let result = execute(&mut memory, 0, &mut io);
  assert_eq!(result, Err(RuntimeError::AddressOutOfBounds{ address: 3, capacity: 3 }));
  assert_eq!(io.outputs(), &[1, 1]);
}

#[test]
fn counts_down_with_branch_if_zero() {
  let source = "
      INP
top   OUT
      SUB one
      BRZ done
      BRA top
done  OUT
      HLT
one   DAT 1
";
  let mut memory = compile(source, 100).unwrap();
  let mut io = QueuedIo::new(vec![3]);
  let mut machine = LMVM::new(&mut memory, 0);

  let outcome = machine.run_bounded(&mut io, 100).unwrap();
  assert_eq!(io.outputs(), &[3, 2, 1, 0]);
  assert_eq!(outcome.registers.accumulator, 0);
  assert_eq!(machine.registers(), &outcome.registers);
}

#[test]
fn reads_and_writes_text() {
  let mut memory = compile(ADDER, 100).unwrap();
  let mut io = TextIo::new(Cursor::new("10\n-4\n"), Vec::new());
  execute(&mut memory, 0, &mut io).unwrap();

  let (_, written) = io.into_inner();
  assert_eq!(String::from_utf8(written).unwrap(), "< < > 6\n");
}

#[test]
fn compile_errors_abort_assembly() {
  let error = compile("INP\nSTA total\nHLT", 100).unwrap_err();
  assert_eq!(error, CompileError::UnknownLabel{ line: 2, label: "total".to_string() });
  assert_eq!(error.line(), Some(2));
  assert_eq!(error.to_string(), "Line 2: unknown label `total`");

  assert!(matches!(
    compile("INP\n\nFOO BAR BAZ QUX", 100),
    Err(CompileError::TooManyParts{ line: 3, count: 4, .. })
  ));
}

#[test]
fn listing_relates_words_to_source() {
  let compilation = Compilation::compile(MULTIPLIER, 100).unwrap();
  assert_eq!(compilation.lines.len(), 18);
  assert_eq!(compilation.lines[4].line, 6);

  let listing = compilation.listing().to_string();
  assert!(listing.contains("loop"));
  assert!(listing.contains("BRP 4"));
}
