//! Tests the recovery of the transaction query results that the ICQ
//! relayer failed to submit.
//!
//! The contract is made to reject every query result, then the failed
//! submissions reported by the relayer are resubmitted until the contract
//! has recorded every transfer to the watched address.

use icq_test_framework::prelude::*;

#[test]
fn test_interchain_tx_query_resubmit() -> Result<(), Error> {
    run_icq_test(&InterchainTxQueryResubmitTest)
}

const CONTRACT_DEPOSIT: u128 = 1_000_000;

pub struct InterchainTxQueryResubmitTest;

impl IcqTest for InterchainTxQueryResubmitTest {
    fn run(&self, config: &TestConfig, chains: &TestChains) -> Result<(), Error> {
        let contract = InterchainQueriesContract::deploy(
            &chains.neutron,
            &chains.neutron_wallet,
            &config.contracts_dir.join(CONTRACT_WASM),
            &chains.neutron.token(CONTRACT_DEPOSIT),
        )?;

        info!("deployed interchain queries contract at {}", contract.address);

        ResubmitScenario::default().run(&ResubmitContext {
            contract: &contract,
            counterparty: &chains.gaia,
            counterparty_wallet: &chains.gaia_wallet,
            counterparty_denom: &chains.gaia.denom,
            relayer: &chains.icq,
        })?;

        info!("resubmitting a transaction unknown to the relayer");

        let message = resubmit_nonexistent(&chains.icq, 1, "nonexistent")?;

        assert_eq(
            "relayer rejection message",
            message.as_str(),
            "no tx found with queryID=1 and hash=nonexistent",
        )?;

        Ok(())
    }
}
