/*!
   Functionalities for interacting with the running chains.

   The [`cli`] module contains the wrappers around the chain command line,
   which are combined by [`ChainDriver`](driver::ChainDriver) into an
   implementation of the [`ChainClient`](client::ChainClient) trait.
*/

pub mod cli;
pub mod client;
pub mod driver;
pub mod exec;
