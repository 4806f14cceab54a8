//! Re-export of common constructs that are used by test cases.

pub use core::time::Duration;
pub use eyre::eyre;
pub use std::path::{Path, PathBuf};
pub use tracing::{debug, error, info, warn};

pub use crate::bootstrap::environment::{Environment, SetupState};
pub use crate::bootstrap::infra::{ComposeInfra, Infrastructure};
pub use crate::bootstrap::init::init_test;
pub use crate::bootstrap::readiness::{
    wait_for_channel, wait_for_http, wait_for_network, ReadinessConfig,
};
pub use crate::chain::client::ChainClient;
pub use crate::chain::driver::ChainDriver;
pub use crate::error::{handle_generic_error, Error, ErrorDetail};
pub use crate::framework::base::{run_icq_test, run_icq_test_with_environment, IcqTest};
pub use crate::framework::chains::TestChains;
pub use crate::icq::contract::{InterchainQueriesContract, CONTRACT_WASM};
pub use crate::icq::relayer::{IcqRelayerApi, IcqWebClient};
pub use crate::icq::resubmit::{
    failed_batch, resubmit, resubmit_nonexistent, ResubmitContext, ResubmitScenario,
};
pub use crate::icq::types::{ResubmitTx, UnsuccessfulTx};
pub use crate::types::config::TestConfig;
pub use crate::types::token::Token;
pub use crate::types::wallet::Wallet;
pub use crate::util::assert::*;
pub use crate::util::retry::{assert_eventually_succeed, wait_until, WaitConfig};
pub use crate::util::suspend::suspend;
