/*!
   Types for information about a chain wallet.
*/

use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/**
   The ID of a wallet, i.e. the name of its key in the test keyring.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletId(pub String);

/**
   The bech32 address of a wallet.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub id: WalletId,
    pub address: WalletAddress,
}

impl Wallet {
    pub fn new(id: String, address: String) -> Self {
        Self {
            id: WalletId(id),
            address: WalletAddress(address),
        }
    }
}

impl WalletId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
