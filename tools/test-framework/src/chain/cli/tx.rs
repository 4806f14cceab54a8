/*!
   Broadcasting transactions through the chain CLI.
*/

use core::time::Duration;

use crate::chain::driver::ChainDriver;
use crate::error::Error;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;
use crate::util::retry::assert_eventually_succeed;

/**
   Number of times (seconds) to try and query a broadcast transaction
   until it is included in a block and indexed.
*/
const WAIT_TX_INCLUSION_ATTEMPTS: u16 = 30;

/**
   Sign and broadcast the `tx` subcommand given in `args` with the key of
   `sender`, then wait for the transaction to be committed.

   The returned result carries the code of the delivered transaction, or
   the code of the rejected broadcast if the transaction did not pass
   `CheckTx`. It is up to the caller to check it.
*/
pub fn broadcast_tx(driver: &ChainDriver, sender: &Wallet, args: &[&str]) -> Result<TxResult, Error> {
    let mut full_args = vec!["tx"];
    full_args.extend_from_slice(args);
    full_args.extend_from_slice(&[
        "--from",
        sender.id.as_str(),
        "--chain-id",
        &driver.chain_id,
        "--node",
        &driver.rpc_address,
        "--home",
        &driver.home_path,
        "--keyring-backend",
        "test",
        "--gas",
        "auto",
        "--gas-adjustment",
        "1.5",
        "--gas-prices",
        &driver.gas_prices,
        "--broadcast-mode",
        "sync",
        "--output",
        "json",
        "--yes",
    ]);

    let output = driver.exec(&full_args)?;

    let broadcast: TxResult = serde_json::from_str(&output.stdout)?;

    if !broadcast.is_success() {
        return Ok(broadcast);
    }

    query_tx(driver, &broadcast.txhash)
}

/**
   Query a transaction by hash, retrying until it has been indexed.
*/
pub fn query_tx(driver: &ChainDriver, txhash: &str) -> Result<TxResult, Error> {
    assert_eventually_succeed(
        &format!("transaction {} to be committed", txhash),
        WAIT_TX_INCLUSION_ATTEMPTS,
        Duration::from_secs(1),
        || {
            let output = driver.exec(&[
                "query",
                "tx",
                txhash,
                "--node",
                &driver.rpc_address,
                "--output",
                "json",
            ])?;

            let tx: TxResult = serde_json::from_str(&output.stdout)?;

            Ok(tx)
        },
    )
}
