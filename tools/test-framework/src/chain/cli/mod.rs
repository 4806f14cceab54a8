/*!
   Wrappers around the chain command line.
*/

pub mod transfer;
pub mod tx;
pub mod wasm;
