/*!
   Methods for storing, instantiating and calling CosmWasm contracts.
*/

use eyre::eyre;
use serde_json as json;
use std::path::Path;

use crate::chain::cli::tx::broadcast_tx;
use crate::chain::driver::ChainDriver;
use crate::error::{handle_generic_error, Error};
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;

pub fn store_wasm_contract(
    driver: &ChainDriver,
    sender: &Wallet,
    wasm_file: &Path,
) -> Result<u64, Error> {
    let wasm_file = wasm_file
        .to_str()
        .ok_or_else(|| eyre!("wasm file path {} is not valid UTF-8", wasm_file.display()))?;

    let tx = broadcast_tx(driver, sender, &["wasm", "store", wasm_file])?.ensure_success()?;

    tx.require_attribute("store_code", "code_id")?
        .parse::<u64>()
        .map_err(handle_generic_error)
}

pub fn instantiate_wasm_contract(
    driver: &ChainDriver,
    sender: &Wallet,
    code_id: u64,
    init_args: &str,
    label: &str,
) -> Result<String, Error> {
    let code_id = code_id.to_string();

    let tx = broadcast_tx(
        driver,
        sender,
        &[
            "wasm",
            "instantiate",
            &code_id,
            init_args,
            "--label",
            label,
            "--admin",
            sender.address.as_str(),
        ],
    )?
    .ensure_success()?;

    Ok(tx
        .require_attribute("instantiate", "_contract_address")?
        .to_string())
}

pub fn execute_wasm_contract(
    driver: &ChainDriver,
    sender: &Wallet,
    contract: &str,
    msg: &str,
) -> Result<TxResult, Error> {
    broadcast_tx(driver, sender, &["wasm", "execute", contract, msg])?.ensure_success()
}

/**
   Run a smart query against `contract` and return the `data` field of
   the response.
*/
pub fn query_wasm_contract_smart(
    driver: &ChainDriver,
    contract: &str,
    query: &str,
) -> Result<json::Value, Error> {
    let output = driver.exec(&[
        "query",
        "wasm",
        "contract-state",
        "smart",
        contract,
        query,
        "--node",
        &driver.rpc_address,
        "--output",
        "json",
    ])?;

    let mut response: json::Value = json::from_str(&output.stdout)?;

    response
        .get_mut("data")
        .map(json::Value::take)
        .ok_or_else(|| Error::generic(eyre!("smart query response has no data: {}", output.stdout)))
}
