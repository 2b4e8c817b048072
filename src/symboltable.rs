use bimap::BiMap;
use string_cache::DefaultAtom;

use crate::address::Address;

/**
  A symbol table maps each label to the address of the line that declares it. Every line
  assembles to exactly one word, so an address carries at most one label and the mapping is
  one-to-one. A symbol table is really just a convenience wrapper around a BiMap; the reverse
  direction is used to annotate listings and traces.
*/
pub struct SymbolTable{
  table: BiMap<DefaultAtom, Address>
}

impl SymbolTable{

  pub fn new() -> SymbolTable {
    SymbolTable{
      table: BiMap::new()
    }
  }

  pub fn get_symbol(&self, address: &Address) -> Option<&DefaultAtom>{
    self.table.get_by_right(address)
  }

  pub fn get_address(&self, label: &DefaultAtom) -> Option<Address>{
    self.table.get_by_left(label).cloned()
  }

  /// Fails with the existing binding if the label or the address is already taken.
  pub fn insert(&mut self, label: DefaultAtom, address: Address)
    -> Result<(), (DefaultAtom, Address)>{
    match self.table.get_by_left(&label) {
      Some(existing) => Err((label, *existing)),
      None           => self.table.insert_no_overwrite(label, address)
    }
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}

impl Default for SymbolTable {
  fn default() -> SymbolTable {
    SymbolTable::new()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_are_unique() {
    let mut symbols = SymbolTable::new();
    assert!(symbols.insert(DefaultAtom::from("loop"), Address(4)).is_ok());
    assert!(symbols.insert(DefaultAtom::from("end"), Address(9)).is_ok());

    // The error names the address of the first declaration.
    assert_eq!(
      symbols.insert(DefaultAtom::from("loop"), Address(7)),
      Err((DefaultAtom::from("loop"), Address(4)))
    );

    assert_eq!(symbols.get_address(&DefaultAtom::from("end")), Some(Address(9)));
    assert_eq!(symbols.get_symbol(&Address(4)), Some(&DefaultAtom::from("loop")));
    assert_eq!(symbols.get_symbol(&Address(7)), None);
    assert_eq!(symbols.len(), 2);
    assert!(!symbols.is_empty());
  }
}
