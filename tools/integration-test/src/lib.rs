#![deny(warnings)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, doc))]
pub mod tests;
