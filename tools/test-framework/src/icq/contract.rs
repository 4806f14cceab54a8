/*!
   Access to the interchain-queries contract deployed on the primary chain.
*/

use serde::de::DeserializeOwned;
use serde_json::{self as json, json};
use std::path::Path;
use tracing::{debug, info};

use crate::chain::client::ChainClient;
use crate::error::Error;
use crate::icq::types::{
    RecipientTxsResponse, RegisteredQuery, RegisteredQueryResponse, Transfer,
    TransfersNumberResponse,
};
use crate::types::token::Token;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;
use crate::util::assert::assert_gt;

pub const CONTRACT_LABEL: &str = "neutron_interchain_queries";

pub const CONTRACT_WASM: &str = "neutron_interchain_queries.wasm";

/**
   An instantiated interchain-queries contract, together with the wallet
   that owns it.
*/
pub struct InterchainQueriesContract<'a, Chain> {
    pub chain: &'a Chain,
    pub wallet: Wallet,
    pub address: String,
}

impl<'a, Chain: ChainClient> InterchainQueriesContract<'a, Chain> {
    /**
       Store and instantiate the contract from `wasm_file`, then top up
       the contract with `deposit` so that it can pay for its queries.
    */
    pub fn deploy(
        chain: &'a Chain,
        wallet: &Wallet,
        wasm_file: &Path,
        deposit: &Token,
    ) -> Result<Self, Error> {
        let code_id = chain.store_code(wallet, wasm_file)?;
        assert_gt("stored code ID", &code_id, &0)?;

        let address = chain.instantiate_contract(wallet, code_id, &json!({}), CONTRACT_LABEL)?;
        info!(
            "instantiated contract {} from code {} at {}",
            CONTRACT_LABEL, code_id, address
        );

        chain
            .send_tokens(wallet, &address, deposit)?
            .ensure_success()?;

        Ok(Self {
            chain,
            wallet: wallet.clone(),
            address,
        })
    }

    fn execute(&self, msg: json::Value) -> Result<TxResult, Error> {
        debug!("executing {} on {}", msg, self.address);
        self.chain.execute_contract(&self.wallet, &self.address, &msg)
    }

    fn query<R: DeserializeOwned>(&self, query: json::Value) -> Result<R, Error> {
        let data = self.chain.query_contract(&self.address, &query)?;
        Ok(json::from_value(data)?)
    }

    /**
       Register a query over the transfers received by `recipient` on the
       chain at the other end of `connection_id`.
    */
    pub fn register_transfers_query(
        &self,
        connection_id: &str,
        update_period: u64,
        recipient: &str,
    ) -> Result<TxResult, Error> {
        self.execute(json!({
            "register_transfers_query": {
                "connection_id": connection_id,
                "update_period": update_period,
                "recipient": recipient,
            }
        }))
    }

    /**
       Make the contract reject every query result submitted to it.
    */
    pub fn set_query_mock(&self) -> Result<TxResult, Error> {
        self.execute(json!({ "integration_tests_set_query_mock": {} }))
    }

    pub fn unset_query_mock(&self) -> Result<TxResult, Error> {
        self.execute(json!({ "integration_tests_unset_query_mock": {} }))
    }

    pub fn registered_query(&self, query_id: u64) -> Result<RegisteredQuery, Error> {
        let response: RegisteredQueryResponse =
            self.query(json!({ "get_registered_query": { "query_id": query_id } }))?;

        Ok(response.registered_query)
    }

    /**
       The number of transfers the contract has recorded from query results.
    */
    pub fn transfers_number(&self) -> Result<u64, Error> {
        let response: TransfersNumberResponse =
            self.query(json!({ "get_transfers_number": {} }))?;

        Ok(response.transfers_number)
    }

    pub fn recipient_txs(&self, recipient: &str) -> Result<Vec<Transfer>, Error> {
        let response: RecipientTxsResponse =
            self.query(json!({ "get_recipient_txs": { "recipient": recipient } }))?;

        Ok(response.transfers)
    }

    /**
       Query the transfer count once per block, at most `attempts` times,
       until it reaches `expected`.
    */
    pub fn wait_for_transfers_number(&self, expected: u64, attempts: u64) -> Result<(), Error> {
        for attempt in 1..=attempts {
            match self.transfers_number() {
                Ok(number) if number == expected => {
                    info!("contract recorded {} transfers", number);
                    return Ok(());
                }
                Ok(number) => debug!(
                    "attempt {}: contract recorded {} transfers, expected {}",
                    attempt, number, expected
                ),
                Err(e) => debug!("attempt {}: failed to query transfers number: {}", attempt, e),
            }

            self.chain.wait_blocks(1)?;
        }

        Err(Error::assertion(format!(
            "expected the contract to record {} transfers within {} blocks",
            expected, attempts
        )))
    }
}
