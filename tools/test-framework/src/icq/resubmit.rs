/*!
   Recovery of the query results that the ICQ relayer failed to submit.

   The scenario registers a transfers query, makes the contract reject
   every query result with its test-only query mock, and checks that the
   failed submissions reported by the relayer can be resubmitted once the
   mock is removed, until the contract has recorded every transfer.
*/

use std::collections::BTreeSet;
use tracing::info;

use crate::chain::client::ChainClient;
use crate::error::{Error, ErrorDetail};
use crate::icq::contract::InterchainQueriesContract;
use crate::icq::relayer::IcqRelayerApi;
use crate::icq::types::{QueryType, ResubmitTx, TransactionFilter, UnsuccessfulTx};
use crate::types::token::Token;
use crate::types::wallet::Wallet;
use crate::util::assert::{assert_empty, assert_eq};

/**
   The ID the first query registered by a fresh contract gets.
*/
pub const FIRST_QUERY_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResubmitScenario {
    pub connection_id: String,

    /// The counterparty address whose incoming transfers are queried.
    pub watched_address: String,

    /// Update period of the registered query, in blocks.
    pub update_period: u64,

    /// Number of transfers sent to the watched address.
    pub transfers: u64,

    /// Amount of the counterparty denomination sent in each transfer.
    pub transfer_amount: u128,

    pub blocks_after_failures: u64,

    pub blocks_after_resubmit: u64,
}

impl Default for ResubmitScenario {
    fn default() -> Self {
        Self {
            connection_id: "connection-0".to_string(),
            watched_address: "cosmos1fj6yqrkpw6fmp7f7jhj57dujfpwal4m2sj5tcp".to_string(),
            update_period: 4,
            transfers: 5,
            transfer_amount: 10000,
            blocks_after_failures: 5,
            blocks_after_resubmit: 20,
        }
    }
}

/**
   The deployed contract together with the counterparty chain and the
   relayer the scenario drives.
*/
pub struct ResubmitContext<'a, Primary, Counterparty, Relayer> {
    pub contract: &'a InterchainQueriesContract<'a, Primary>,
    pub counterparty: &'a Counterparty,
    pub counterparty_wallet: &'a Wallet,
    pub counterparty_denom: &'a str,
    pub relayer: &'a Relayer,
}

impl ResubmitScenario {
    /**
       Run every step of the scenario in order.
    */
    pub fn run<Primary, Counterparty, Relayer>(
        &self,
        ctx: &ResubmitContext<'_, Primary, Counterparty, Relayer>,
    ) -> Result<(), Error>
    where
        Primary: ChainClient,
        Counterparty: ChainClient,
        Relayer: IcqRelayerApi,
    {
        let query_id = self.register(ctx)?;
        info!("registered transfers query {}", query_id);

        let failed = self.induce_failures(ctx)?;
        info!("relayer reports {} unsuccessful transactions", failed.len());

        ctx.contract.unset_query_mock()?;

        let batch = failed_batch(ctx.relayer)?;
        resubmit(ctx.relayer, &batch)?;
        info!("resubmitted {} transactions", batch.len());

        self.await_convergence(ctx)
    }

    /**
       Register the transfers query and check what the contract reports
       about it. Return the query ID.
    */
    pub fn register<Primary, Counterparty, Relayer>(
        &self,
        ctx: &ResubmitContext<'_, Primary, Counterparty, Relayer>,
    ) -> Result<u64, Error>
    where
        Primary: ChainClient,
    {
        let contract = ctx.contract;

        contract.register_transfers_query(
            &self.connection_id,
            self.update_period,
            &self.watched_address,
        )?;

        let query = contract.registered_query(FIRST_QUERY_ID)?;

        assert_eq("registered query ID", &query.id, &FIRST_QUERY_ID)?;
        assert_eq("query owner", query.owner.as_str(), contract.address.as_str())?;
        assert_eq("number of query keys", &query.keys.len(), &0)?;
        assert_eq("query type", &query.query_type, &QueryType::Tx)?;
        assert_eq(
            "transactions filter",
            query.transactions_filter.as_str(),
            TransactionFilter::transfers_to(&self.watched_address)
                .to_json()
                .as_str(),
        )?;
        assert_eq("connection ID", query.connection_id.as_str(), self.connection_id.as_str())?;
        assert_eq("update period", &query.update_period, &self.update_period)?;

        Ok(query.id)
    }

    /**
       Set the query mock, send the transfers to the watched address and
       check that the relayer failed to submit each of them, and only them.
    */
    pub fn induce_failures<Primary, Counterparty, Relayer>(
        &self,
        ctx: &ResubmitContext<'_, Primary, Counterparty, Relayer>,
    ) -> Result<Vec<UnsuccessfulTx>, Error>
    where
        Primary: ChainClient,
        Counterparty: ChainClient,
        Relayer: IcqRelayerApi,
    {
        ctx.contract.set_query_mock()?;

        let token = Token::new(ctx.counterparty_denom, self.transfer_amount);
        let mut sent = BTreeSet::new();

        for _ in 0..self.transfers {
            let tx = ctx.counterparty.send_tokens(
                ctx.counterparty_wallet,
                &self.watched_address,
                &token,
            )?;

            assert_eq(
                &format!("code of transfer {}", tx.txhash),
                &tx.code,
                &0,
            )?;

            sent.insert(tx.txhash.to_uppercase());
        }

        ctx.contract.chain.wait_blocks(self.blocks_after_failures)?;

        let failed = ctx.relayer.unsuccessful_txs()?;

        assert_eq(
            "number of unsuccessful transactions",
            &(failed.len() as u64),
            &self.transfers,
        )?;

        // Hex casing differs between the chain CLI and the relayer.
        let reported: BTreeSet<_> = failed
            .iter()
            .map(|tx| tx.submitted_tx_hash.to_uppercase())
            .collect();

        assert_eq(
            "hashes of the unsuccessful transactions",
            &reported,
            &sent,
        )?;

        Ok(failed)
    }

    /**
       Wait until the contract has recorded every transfer and the relayer
       has no unsuccessful transaction left.
    */
    pub fn await_convergence<Primary, Counterparty, Relayer>(
        &self,
        ctx: &ResubmitContext<'_, Primary, Counterparty, Relayer>,
    ) -> Result<(), Error>
    where
        Primary: ChainClient,
        Relayer: IcqRelayerApi,
    {
        let contract = ctx.contract;

        contract.chain.wait_blocks(self.blocks_after_resubmit)?;

        contract.wait_for_transfers_number(self.transfers, self.update_period * 2)?;

        assert_empty(
            "unsuccessful transactions after resubmission",
            &ctx.relayer.unsuccessful_txs()?,
        )?;

        let transfers = contract.recipient_txs(&self.watched_address)?;

        assert_eq(
            "number of transfers recorded for the watched address",
            &(transfers.len() as u64),
            &self.transfers,
        )?;

        Ok(())
    }
}

/**
   One resubmission request for each unsuccessful transaction the relayer
   currently reports.
*/
pub fn failed_batch(relayer: &impl IcqRelayerApi) -> Result<Vec<ResubmitTx>, Error> {
    Ok(relayer
        .unsuccessful_txs()?
        .iter()
        .map(ResubmitTx::from)
        .collect())
}

/**
   Resubmit `batch` as a single request. The batch may reference any
   subset of the unsuccessful transactions.
*/
pub fn resubmit(relayer: &impl IcqRelayerApi, batch: &[ResubmitTx]) -> Result<(), Error> {
    relayer.resubmit_txs(batch)
}

/**
   Resubmit a transaction the relayer does not know about, expecting the
   relayer to reject it without changing its unsuccessful transactions.
   Return the rejection message.
*/
pub fn resubmit_nonexistent(
    relayer: &impl IcqRelayerApi,
    query_id: u64,
    hash: &str,
) -> Result<String, Error> {
    let before = relayer.unsuccessful_txs()?.len();

    let result = relayer.resubmit_txs(&[ResubmitTx {
        query_id,
        hash: hash.to_string(),
    }]);

    let message = match result {
        Err(e) => match e.detail() {
            ErrorDetail::ResubmitRejected(rejected) => rejected.message.clone(),
            _ => return Err(e),
        },
        Ok(()) => {
            return Err(Error::assertion(format!(
                "expected the relayer to reject the resubmission of query {} with hash {}",
                query_id, hash
            )))
        }
    };

    let after = relayer.unsuccessful_txs()?.len();
    assert_eq("number of unsuccessful transactions", &after, &before)?;

    Ok(message)
}
