/*!
   An in-memory network standing in for the two chains, the
   interchain-queries contract and the ICQ relayer.

   Query results are relayed once per block: a transfer to a watched
   address is recorded by the contract, or kept by the relayer as an
   unsuccessful transaction while the query mock is set. Resubmitted
   transactions are processed at the next block.
*/

use core::cell::RefCell;
use eyre::eyre;
use serde_json::{self as json, json};
use std::path::Path;
use std::rc::Rc;

use crate::chain::client::ChainClient;
use crate::error::Error;
use crate::icq::relayer::IcqRelayerApi;
use crate::icq::types::{
    QueryType, RegisteredQuery, ResubmitTx, TransactionFilter, Transfer, UnsuccessfulTx,
};
use crate::types::token::Token;
use crate::types::tx::TxResult;
use crate::types::wallet::Wallet;

pub const CONTRACT_ADDRESS: &str =
    "neutron14hj2tavq8fpesdwxxcu44rty3hh90vhujrvcmstl4zr3txmfvw9s5c2epq";

#[derive(Default)]
struct NetworkState {
    height: u64,
    next_tx: u64,
    next_code_id: u64,
    contract: Option<String>,
    query_mock: bool,
    queries: Vec<RegisteredQuery>,

    /// Transfers broadcast on the counterparty chain, by hash.
    sent: Vec<(String, Transfer)>,

    /// Hashes of the transfers not seen by the relayer yet.
    pending: Vec<String>,

    resubmitted: Vec<ResubmitTx>,
    unsuccessful: Vec<UnsuccessfulTx>,

    /// The relayer reports failures under hashes unrelated to the transfers.
    stale_hashes: bool,
    recorded: Vec<Transfer>,
}

impl NetworkState {
    fn tx(&mut self) -> TxResult {
        self.next_tx += 1;

        TxResult {
            code: 0,
            txhash: format!("{:064X}", self.next_tx),
            raw_log: String::new(),
            events: Vec::new(),
        }
    }

    fn transfer(&self, hash: &str) -> Option<Transfer> {
        self.sent
            .iter()
            .find(|(sent, _)| sent == hash)
            .map(|(_, transfer)| transfer.clone())
    }

    fn is_unsuccessful(&self, tx: &ResubmitTx) -> bool {
        self.unsuccessful
            .iter()
            .any(|failed| failed.query_id == tx.query_id && failed.submitted_tx_hash == tx.hash)
    }

    fn watching(&self, recipient: &str) -> Option<u64> {
        let filter = TransactionFilter::transfers_to(recipient).to_json();

        self.queries
            .iter()
            .find(|query| query.transactions_filter == filter)
            .map(|query| query.id)
    }

    fn submit(&mut self, query_id: u64, hash: String) {
        let transfer = match self.transfer(&hash) {
            Some(transfer) => transfer,
            None => return,
        };

        if self.query_mock {
            let hash = if self.stale_hashes {
                format!("DEAD{}", &hash[4..])
            } else {
                hash
            };

            if !self.unsuccessful.iter().any(|tx| tx.submitted_tx_hash == hash) {
                self.unsuccessful.push(UnsuccessfulTx {
                    query_id,
                    submitted_tx_hash: hash,
                    neutron_hash: None,
                    error_time: None,
                    message: Some("integration tests mock error".to_string()),
                });
            }
        } else {
            self.unsuccessful
                .retain(|tx| !(tx.query_id == query_id && tx.submitted_tx_hash == hash));
            self.recorded.push(transfer);
        }
    }

    fn produce_block(&mut self) {
        self.height += 1;

        for tx in core::mem::take(&mut self.resubmitted) {
            if self.is_unsuccessful(&tx) {
                self.submit(tx.query_id, tx.hash);
            }
        }

        for hash in core::mem::take(&mut self.pending) {
            let watched = self
                .transfer(&hash)
                .and_then(|transfer| self.watching(&transfer.recipient));

            if let Some(query_id) = watched {
                self.submit(query_id, hash);
            }
        }
    }

    fn execute(&mut self, sender: &Wallet, msg: &json::Value) -> Result<(), Error> {
        if let Some(register) = msg.get("register_transfers_query") {
            let recipient = register["recipient"]
                .as_str()
                .ok_or_else(|| eyre!("missing recipient"))?;

            let query = RegisteredQuery {
                id: self.queries.len() as u64 + 1,
                owner: self.contract.clone().unwrap_or_default(),
                query_type: QueryType::Tx,
                keys: Vec::new(),
                transactions_filter: TransactionFilter::transfers_to(recipient).to_json(),
                connection_id: register["connection_id"].as_str().unwrap_or_default().to_string(),
                update_period: register["update_period"].as_u64().unwrap_or_default(),
                last_submitted_result_local_height: None,
                last_submitted_result_remote_height: None,
                deposit: None,
                submit_timeout: None,
                registered_at_height: Some(self.height),
            };

            self.queries.push(query);
        } else if msg.get("integration_tests_set_query_mock").is_some() {
            self.query_mock = true;
        } else if msg.get("integration_tests_unset_query_mock").is_some() {
            self.query_mock = false;
        } else {
            return Err(eyre!("{} cannot execute unknown message {}", sender.id, msg).into());
        }

        Ok(())
    }

    fn query(&self, query: &json::Value) -> Result<json::Value, Error> {
        if let Some(registered) = query.get("get_registered_query") {
            let id = registered["query_id"].as_u64().unwrap_or_default();
            let query = self
                .queries
                .iter()
                .find(|query| query.id == id)
                .ok_or_else(|| eyre!("query {} not found", id))?;

            Ok(json!({ "registered_query": query }))
        } else if query.get("get_transfers_number").is_some() {
            Ok(json!({ "transfers_number": self.recorded.len() }))
        } else if let Some(recipient_txs) = query.get("get_recipient_txs") {
            let recipient = recipient_txs["recipient"].as_str().unwrap_or_default();
            let transfers: Vec<_> = self
                .recorded
                .iter()
                .filter(|transfer| transfer.recipient == recipient)
                .collect();

            Ok(json!({ "transfers": transfers }))
        } else {
            Err(eyre!("unknown query {}", query).into())
        }
    }
}

/**
   A handle to the shared network state. Cloning the handle gives access
   to the same network.
*/
#[derive(Clone, Default)]
pub struct FakeNetwork {
    state: Rc<RefCell<NetworkState>>,
}

pub struct FakeChain {
    network: FakeNetwork,
    counterparty: bool,
}

pub struct FakeRelayer {
    network: FakeNetwork,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain hosting the contract.
    pub fn primary(&self) -> FakeChain {
        FakeChain {
            network: self.clone(),
            counterparty: false,
        }
    }

    pub fn counterparty(&self) -> FakeChain {
        FakeChain {
            network: self.clone(),
            counterparty: true,
        }
    }

    pub fn relayer(&self) -> FakeRelayer {
        FakeRelayer {
            network: self.clone(),
        }
    }

    /**
       Make the relayer report each failed submission under a hash that
       none of the sent transfers has.
    */
    pub fn report_stale_hashes(&self) {
        self.state.borrow_mut().stale_hashes = true;
    }

    pub fn height(&self) -> u64 {
        self.state.borrow().height
    }

    pub fn transfers_number(&self) -> usize {
        self.state.borrow().recorded.len()
    }
}

impl ChainClient for FakeChain {
    fn store_code(&self, _sender: &Wallet, _wasm_file: &Path) -> Result<u64, Error> {
        let mut state = self.network.state.borrow_mut();
        state.next_code_id += 1;

        Ok(state.next_code_id)
    }

    fn instantiate_contract(
        &self,
        _sender: &Wallet,
        _code_id: u64,
        _msg: &json::Value,
        _label: &str,
    ) -> Result<String, Error> {
        let mut state = self.network.state.borrow_mut();
        state.contract = Some(CONTRACT_ADDRESS.to_string());

        Ok(CONTRACT_ADDRESS.to_string())
    }

    fn execute_contract(
        &self,
        sender: &Wallet,
        _contract: &str,
        msg: &json::Value,
    ) -> Result<TxResult, Error> {
        let mut state = self.network.state.borrow_mut();
        state.execute(sender, msg)?;

        Ok(state.tx())
    }

    fn send_tokens(&self, sender: &Wallet, recipient: &str, token: &Token) -> Result<TxResult, Error> {
        let mut state = self.network.state.borrow_mut();
        let tx = state.tx();

        if self.counterparty {
            state.sent.push((
                tx.txhash.clone(),
                Transfer {
                    recipient: recipient.to_string(),
                    sender: sender.address.to_string(),
                    denom: token.denom.clone(),
                    amount: token.amount.to_string(),
                },
            ));
            state.pending.push(tx.txhash.clone());
        }

        Ok(tx)
    }

    fn query_contract(&self, _contract: &str, query: &json::Value) -> Result<json::Value, Error> {
        self.network.state.borrow().query(query)
    }

    fn wait_blocks(&self, count: u64) -> Result<(), Error> {
        let mut state = self.network.state.borrow_mut();
        for _ in 0..count {
            state.produce_block();
        }

        Ok(())
    }
}

impl IcqRelayerApi for FakeRelayer {
    fn unsuccessful_txs(&self) -> Result<Vec<UnsuccessfulTx>, Error> {
        Ok(self.network.state.borrow().unsuccessful.clone())
    }

    fn resubmit_txs(&self, txs: &[ResubmitTx]) -> Result<(), Error> {
        let mut state = self.network.state.borrow_mut();

        if let Some(unknown) = txs.iter().find(|tx| !state.is_unsuccessful(tx)) {
            return Err(Error::resubmit_rejected(
                400,
                format!(
                    "no tx found with queryID={} and hash={}",
                    unknown.query_id, unknown.hash
                ),
            ));
        }

        state.resubmitted.extend(txs.iter().cloned());

        Ok(())
    }
}
