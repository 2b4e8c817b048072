//! A memory address, with some convenience functions. Instructions and data share the same
//! address space, so there is only one kind of address.

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Address(pub AddressNumberType);

impl Address {
  /// Converts the address to an index into memory.
  pub fn idx(&self) -> AddressNumberType {
    self.0
  }

  /// Is this address inside a memory of the given capacity?
  pub fn is_within(&self, capacity: usize) -> bool {
    self.0 < capacity
  }
}
