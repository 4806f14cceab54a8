use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/**
   An amount of a native denomination, as accepted by the chain CLI.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub denom: String,
    pub amount: u128,
}

impl Token {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
