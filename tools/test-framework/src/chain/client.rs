/*!
   The chain capabilities used by the tests.
*/

use serde_json as json;
use std::path::Path;

use crate::error::Error;
use crate::types::token::Token;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;

/**
   Operations on a running chain that the test scenarios depend on.

   [`ChainDriver`](crate::chain::driver::ChainDriver) implements them on
   top of the chain CLI. Contract messages and queries are passed as JSON
   values and serialized by the implementation.
*/
pub trait ChainClient {
    /**
       Upload a wasm file and return its code ID.
    */
    fn store_code(&self, sender: &Wallet, wasm_file: &Path) -> Result<u64, Error>;

    /**
       Instantiate a stored code and return the new contract address.
    */
    fn instantiate_contract(
        &self,
        sender: &Wallet,
        code_id: u64,
        msg: &json::Value,
        label: &str,
    ) -> Result<String, Error>;

    fn execute_contract(
        &self,
        sender: &Wallet,
        contract: &str,
        msg: &json::Value,
    ) -> Result<TxResult, Error>;

    /**
       Send native tokens. The result is returned even when the
       transaction failed so that callers can assert on its code.
    */
    fn send_tokens(&self, sender: &Wallet, recipient: &str, token: &Token) -> Result<TxResult, Error>;

    fn query_contract(&self, contract: &str, query: &json::Value) -> Result<json::Value, Error>;

    /**
       Block until `count` more blocks have been produced.
    */
    fn wait_blocks(&self, count: u64) -> Result<(), Error>;
}
