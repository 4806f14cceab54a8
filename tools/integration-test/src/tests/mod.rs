/*!
   All test cases are placed within this module.

   We expose the modules as public so that cargo doc
   will pick up the definition by default.
*/

#[cfg(any(doc, feature = "icq"))]
pub mod interchain_tx_query_resubmit;
