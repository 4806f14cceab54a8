/*!
   Utility functions that are used by the test framework.
*/

pub mod assert;
pub mod retry;
pub mod suspend;
