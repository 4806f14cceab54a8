/*!
   Methods for sending native tokens on a chain.
*/

use crate::chain::cli::tx::broadcast_tx;
use crate::chain::driver::ChainDriver;
use crate::error::Error;
use crate::types::token::Token;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;

pub fn local_transfer_token(
    driver: &ChainDriver,
    sender: &Wallet,
    recipient: &str,
    token: &Token,
) -> Result<TxResult, Error> {
    broadcast_tx(
        driver,
        sender,
        &[
            "bank",
            "send",
            sender.address.as_str(),
            recipient,
            &token.to_string(),
        ],
    )
}
