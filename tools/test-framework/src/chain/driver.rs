/*!
   Implementation of [`ChainDriver`].
*/

use core::time::Duration;
use eyre::eyre;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json as json;
use std::path::Path;
use tracing::debug;

use crate::chain::cli::transfer::local_transfer_token;
use crate::chain::cli::wasm::{
    execute_wasm_contract, instantiate_wasm_contract, query_wasm_contract_smart,
    store_wasm_contract,
};
use crate::chain::client::ChainClient;
use crate::chain::exec::{simple_exec, ExecOutput};
use crate::error::{handle_generic_error, Error};
use crate::types::config::ChainConfig;
use crate::types::env::{EnvWriter, ExportEnv};
use crate::types::token::Token;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;
use crate::util::retry::{wait_until, WaitConfig};

/**
   Upper bound for the production of a single block when waiting for
   blocks with [`ChainClient::wait_blocks`].
*/
const BLOCK_TIMEOUT: Duration = Duration::from_secs(10);

const BLOCK_POLL_INTERVAL: Duration = Duration::from_millis(500);

const REST_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/**
    A driver for interacting with a running chain through its command
    line and its REST API.

    The full nodes themselves are managed outside of the driver, by
    the [`Infrastructure`](crate::bootstrap::infra::Infrastructure)
    of the test environment.
*/
#[derive(Debug, Clone)]
pub struct ChainDriver {
    pub chain_id: String,

    /**
       The filesystem path to the chain CLI, e.g. `neutrond`.
    */
    pub command_path: String,

    /**
       The home directory containing the test keyring.
    */
    pub home_path: String,

    /**
       The RPC address passed to the CLI with `--node`.
    */
    pub rpc_address: String,

    /**
       The base URL of the REST API.
    */
    pub rest_address: String,

    pub denom: String,

    pub gas_prices: String,

    http: Client,
}

#[derive(Deserialize)]
struct LatestBlockResponse {
    block: Block,
}

#[derive(Deserialize)]
struct Block {
    header: BlockHeader,
}

#[derive(Deserialize)]
struct BlockHeader {
    height: String,
}

impl ExportEnv for ChainDriver {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        writer.write_env("CHAIN_ID", &self.chain_id);
        writer.write_env("CMD", &self.command_path);
        writer.write_env("HOME", &self.home_path);
        writer.write_env("RPC_ADDR", &self.rpc_address);
        writer.write_env("REST_ADDR", &self.rest_address);
    }
}

impl ChainDriver {
    pub fn new(config: &ChainConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(REST_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(config.rest_address.clone(), e))?;

        Ok(Self {
            chain_id: config.chain_id.clone(),
            command_path: config.command_path.clone(),
            home_path: config.home_path.clone(),
            rpc_address: config.rpc_address.clone(),
            rest_address: config.rest_address.trim_end_matches('/').to_string(),
            denom: config.denom.clone(),
            gas_prices: config.gas_prices.clone(),
            http,
        })
    }

    /**
       Run the chain CLI with the given arguments.
    */
    pub fn exec(&self, args: &[&str]) -> Result<ExecOutput, Error> {
        simple_exec(&self.chain_id, &self.command_path, args)
    }

    /**
       Query the height of the latest block through the REST API.
    */
    pub fn latest_height(&self) -> Result<u64, Error> {
        let url = format!(
            "{}/cosmos/base/tendermint/v1beta1/blocks/latest",
            self.rest_address
        );

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| Error::http(url.clone(), e))?;

        if !response.status().is_success() {
            return Err(Error::http_status(url, response.status().as_u16()));
        }

        let body = response.text().map_err(|e| Error::http(url.clone(), e))?;
        let latest: LatestBlockResponse = json::from_str(&body)?;

        latest
            .block
            .header
            .height
            .parse()
            .map_err(handle_generic_error)
    }

    pub fn token(&self, amount: u128) -> Token {
        Token::new(self.denom.clone(), amount)
    }
}

impl ChainClient for ChainDriver {
    fn store_code(&self, sender: &Wallet, wasm_file: &Path) -> Result<u64, Error> {
        store_wasm_contract(self, sender, wasm_file)
    }

    fn instantiate_contract(
        &self,
        sender: &Wallet,
        code_id: u64,
        msg: &json::Value,
        label: &str,
    ) -> Result<String, Error> {
        instantiate_wasm_contract(self, sender, code_id, &msg.to_string(), label)
    }

    fn execute_contract(
        &self,
        sender: &Wallet,
        contract: &str,
        msg: &json::Value,
    ) -> Result<TxResult, Error> {
        execute_wasm_contract(self, sender, contract, &msg.to_string())
    }

    fn send_tokens(&self, sender: &Wallet, recipient: &str, token: &Token) -> Result<TxResult, Error> {
        local_transfer_token(self, sender, recipient, token)
    }

    fn query_contract(&self, contract: &str, query: &json::Value) -> Result<json::Value, Error> {
        query_wasm_contract_smart(self, contract, &query.to_string())
    }

    fn wait_blocks(&self, count: u64) -> Result<(), Error> {
        let start = wait_until(
            &format!("the REST API of {} to report a height", self.chain_id),
            &WaitConfig::new(BLOCK_POLL_INTERVAL, BLOCK_TIMEOUT)?,
            || self.latest_height(),
        )?;

        let target = start + count;
        debug!("waiting for {} to reach height {}", self.chain_id, target);

        let timeout = BLOCK_TIMEOUT * u32::try_from(count.max(1)).map_err(handle_generic_error)?;

        wait_until(
            &format!("{} to reach height {}", self.chain_id, target),
            &WaitConfig::new(BLOCK_POLL_INTERVAL, timeout)?,
            || {
                let height = self.latest_height()?;
                if height >= target {
                    Ok(height)
                } else {
                    Err(Error::generic(eyre!(
                        "{} is at height {}, expected {}",
                        self.chain_id,
                        height,
                        target
                    )))
                }
            },
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;

    fn driver(rest_address: &str) -> ChainDriver {
        let config = ChainConfig {
            rest_address: rest_address.to_string(),
            ..ChainConfig::neutron()
        };

        ChainDriver::new(&config).unwrap()
    }

    #[test]
    fn reads_latest_height() -> Result<(), Error> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/cosmos/base/tendermint/v1beta1/blocks/latest")
            .with_status(200)
            .with_body(r#"{"block_id":{},"block":{"header":{"chain_id":"test-1","height":"1234"}}}"#)
            .create();

        assert_eq!(driver(&server.url()).latest_height()?, 1234);
        mock.assert();

        Ok(())
    }

    #[test]
    fn waiting_for_no_block_only_reads_the_height() -> Result<(), Error> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/cosmos/base/tendermint/v1beta1/blocks/latest")
            .with_status(200)
            .with_body(r#"{"block":{"header":{"height":"20"}}}"#)
            .expect(2)
            .create();

        driver(&server.url()).wait_blocks(0)?;
        mock.assert();

        Ok(())
    }

    #[test]
    fn unavailable_api_is_an_http_status_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/cosmos/base/tendermint/v1beta1/blocks/latest")
            .with_status(503)
            .create();

        let err = driver(&server.url()).latest_height().unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::HttpStatus(_)));
    }

    #[test]
    fn exports_connection_details() {
        let envs = crate::types::env::format_env(&driver("http://127.0.0.1:1317/"));

        assert!(envs.contains("CHAIN_ID=test-1"));
        assert!(envs.contains("REST_ADDR=http://127.0.0.1:1317\n"));
        assert!(envs.contains("RPC_ADDR=tcp://127.0.0.1:26657"));
    }
}
