/*!

  The machine has a single kind of memory cell, a signed decimal `Word`, that holds either data or
  an instruction. An instruction word packs a one digit opcode above the digits of its operand:

    Opcode:  1 decimal digit  (0-9)
    Operand: d decimal digits (d = number of digits needed to address every word)

  Instructions are always one word long. Labels do not appear in the memory image. They are
  symbolic names for addresses that exist only during assembly, and are resolved to their address
  via a lookup in a symbol table maintained for that purpose.

  Rather than storing the decoded form of each instruction in memory, the machine decodes each
  word as it is fetched. A program may therefore overwrite its own instructions with `STA`, and
  the new word takes effect the next time it is fetched.

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::{parse_assembly, parse_line, ParsedLine};
pub use binary::{
  decode_word, encode_instruction, operand_multiplier, try_decode_instruction, Word
};
pub use instruction::{Instruction, Mnemonic, Operand, Operation};
