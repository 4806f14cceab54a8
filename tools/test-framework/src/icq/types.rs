/*!
   Data types of the interchain-queries contract and of the ICQ relayer.
*/

use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// A query over the transactions of the remote chain.
    Tx,
    /// A query over key/value pairs of the remote chain's store.
    Kv,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Tx => "tx",
            QueryType::Kv => "kv",
        }
    }
}

impl Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvKey {
    pub path: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    pub field: String,
    pub op: String,
    pub value: String,
}

/**
   A predicate over transaction events, as serialized in the
   `transactions_filter` of a registered query.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionFilter(pub Vec<FilterItem>);

impl TransactionFilter {
    /**
       The filter matching the transfers received by `recipient`.
    */
    pub fn transfers_to(recipient: &str) -> Self {
        Self(vec![FilterItem {
            field: "transfer.recipient".to_string(),
            op: "Eq".to_string(),
            value: recipient.to_string(),
        }])
    }

    /**
       The compact JSON form stored on chain.
    */
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl From<&TransactionFilter> for serde_json::Value {
    fn from(filter: &TransactionFilter) -> Self {
        serde_json::Value::Array(
            filter
                .0
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "field": item.field,
                        "op": item.op,
                        "value": item.value,
                    })
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredQuery {
    pub id: u64,
    pub owner: String,
    pub query_type: QueryType,
    #[serde(default)]
    pub keys: Vec<KvKey>,
    #[serde(default)]
    pub transactions_filter: String,
    pub connection_id: String,
    pub update_period: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submitted_result_local_height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submitted_result_remote_height: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at_height: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredQueryResponse {
    pub registered_query: RegisteredQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransfersNumberResponse {
    pub transfers_number: u64,
}

/**
   A transfer recorded by the contract from a query result.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub recipient: String,
    pub sender: String,
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientTxsResponse {
    pub transfers: Vec<Transfer>,
}

/**
   A query result that the ICQ relayer failed to submit.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsuccessfulTx {
    pub query_id: u64,

    /// Hash of the remote transaction whose proof was submitted.
    pub submitted_tx_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutron_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/**
   A reference to an [`UnsuccessfulTx`] to be submitted again.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResubmitTx {
    pub query_id: u64,
    pub hash: String,
}

impl From<&UnsuccessfulTx> for ResubmitTx {
    fn from(tx: &UnsuccessfulTx) -> Self {
        Self {
            query_id: tx.query_id,
            hash: tx.submitted_tx_hash.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResubmitRequest {
    pub txs: Vec<ResubmitTx>,
}
