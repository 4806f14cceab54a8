/*!
   The result of a transaction broadcast through the chain CLI.
*/

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TxEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

/**
   The subset of a `TxResponse` that the tests look at.

   `code` is 0 for a successful transaction.
*/
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TxResult {
    #[serde(default)]
    pub code: u32,
    pub txhash: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub events: Vec<TxEvent>,
}

impl TxResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /**
       Return `self` if the transaction succeeded, otherwise an error
       carrying the code and the raw log.
    */
    pub fn ensure_success(self) -> Result<Self, Error> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::tx_failed(self.txhash, self.code, self.raw_log))
        }
    }

    /**
       Find the value of the first attribute `key` of an event of type
       `event_type`.
    */
    pub fn find_attribute(&self, event_type: &str, key: &str) -> Option<&str> {
        self.events
            .iter()
            .filter(|event| event.kind == event_type)
            .flat_map(|event| event.attributes.iter())
            .find(|attribute| attribute.key == key)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn require_attribute(&self, event_type: &str, key: &str) -> Result<&str, Error> {
        self.find_attribute(event_type, key).ok_or_else(|| {
            Error::missing_event(self.txhash.clone(), event_type.to_string(), key.to_string())
        })
    }
}
