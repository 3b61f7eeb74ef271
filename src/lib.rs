#![doc = include_str!("RUSTDOC.md")]

pub mod firestore;
pub mod laundry;
pub mod spaces;
pub mod util;

#[cfg(test)]
pub mod test_support;
