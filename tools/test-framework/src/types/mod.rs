/*!
   This module contains definitions of core data structures that are used
   in the test suite.
*/

pub mod config;
pub mod env;
pub mod token;
pub mod tx;
pub mod wallet;
