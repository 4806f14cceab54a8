/*!
   Interchain queries: the contract registering them, the relayer
   submitting their results, and the recovery of failed submissions.
*/

pub mod contract;
pub mod relayer;
pub mod resubmit;
pub mod types;

#[cfg(test)]
mod fake;
