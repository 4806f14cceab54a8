/*!
   Definition for the test configuration.
*/

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::readiness::ReadinessConfig;
use crate::error::Error;
use crate::types::wallet::Wallet;
use crate::util::retry::WaitConfig;

/**
   The test configuration loaded by
   [`init_test`](crate::bootstrap::init::init_test).

   Every field has a default matching the local network started by
   `make start-cosmopark`, so an empty configuration file is valid. A
   chain table present in the file must however be complete.
*/
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /**
       The network is managed outside of the test process, so it is
       never started nor stopped. Set with `NO_DOCKER`.
    */
    pub no_docker: bool,

    /**
       Minimum height the primary chain must reach before the tests
       start. Set with `BLOCKS_COUNT_BEFORE_START`.
    */
    pub blocks_count_before_start: u64,

    /// Directory containing the `Makefile` and compose file of the network.
    pub setup_dir: PathBuf,

    /// Directory containing the compiled contracts.
    pub contracts_dir: PathBuf,

    /**
       Suspend the test on failure so that the network can be inspected.
       Set with `HANG_ON_FAIL=1`.
    */
    pub hang_on_fail: bool,

    /// Base URL of the ICQ relayer web API. Set with `ICQ_WEB_HOST`.
    pub icq_web_host: String,

    pub readiness: ReadinessTimeouts,

    /// The chain hosting the interchain-queries contract.
    pub neutron: ChainConfig,

    /// The counterparty chain watched by the interchain query.
    pub gaia: ChainConfig,
}

/**
   Timeouts of the readiness checks, in seconds.
*/
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadinessTimeouts {
    pub poll_interval_secs: u64,
    pub http_timeout_secs: u64,
    pub channel_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,

    /// The chain binary, e.g. `neutrond`.
    pub command_path: String,

    /// Home directory holding the test keyring.
    pub home_path: String,

    /// Tendermint RPC address passed as `--node`.
    pub rpc_address: String,

    /// Base URL of the REST API.
    pub rest_address: String,

    pub denom: String,

    pub gas_prices: String,

    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WalletConfig {
    /// Name of the key in the test keyring.
    pub key_name: String,
    pub address: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            no_docker: false,
            blocks_count_before_start: 10,
            setup_dir: PathBuf::from("setup"),
            contracts_dir: PathBuf::from("contracts"),
            hang_on_fail: false,
            icq_web_host: "http://127.0.0.1:9999".to_string(),
            readiness: ReadinessTimeouts::default(),
            neutron: ChainConfig::neutron(),
            gaia: ChainConfig::gaia(),
        }
    }
}

impl Default for ReadinessTimeouts {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            http_timeout_secs: 280,
            channel_timeout_secs: 100,
        }
    }
}

impl ChainConfig {
    pub fn neutron() -> Self {
        Self {
            chain_id: "test-1".to_string(),
            command_path: "neutrond".to_string(),
            home_path: "data/test-1".to_string(),
            rpc_address: "tcp://127.0.0.1:26657".to_string(),
            rest_address: "http://127.0.0.1:1317".to_string(),
            denom: "untrn".to_string(),
            gas_prices: "0.025untrn".to_string(),
            wallet: WalletConfig {
                key_name: "demowallet1".to_string(),
                address: "neutron1m9l358xunhhwds0568za49mzhvuxx9ux8xafx2".to_string(),
            },
        }
    }

    pub fn gaia() -> Self {
        Self {
            chain_id: "test-2".to_string(),
            command_path: "gaiad".to_string(),
            home_path: "data/test-2".to_string(),
            rpc_address: "tcp://127.0.0.1:16657".to_string(),
            rest_address: "http://127.0.0.1:1316".to_string(),
            denom: "uatom".to_string(),
            gas_prices: "0.025uatom".to_string(),
            wallet: WalletConfig {
                key_name: "demowallet1".to_string(),
                address: "cosmos1m9l358xunhhwds0568za49mzhvuxx9uxre5tud".to_string(),
            },
        }
    }

    pub fn wallet(&self) -> Wallet {
        Wallet::new(self.wallet.key_name.clone(), self.wallet.address.clone())
    }
}

impl TestConfig {
    /**
       Load the configuration from a TOML file.
    */
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| Error::toml(source.to_string(), e))
    }

    /**
       Apply the overrides given through environment variables. `lookup`
       returns the value of a variable, if set.
    */
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), Error> {
        // Any non-empty value switches the local network off.
        if let Some(value) = lookup("NO_DOCKER") {
            self.no_docker = !value.is_empty();
        }

        if let Some(value) = lookup("BLOCKS_COUNT_BEFORE_START") {
            self.blocks_count_before_start = value.trim().parse().map_err(|_| {
                Error::config(format!(
                    "BLOCKS_COUNT_BEFORE_START must be a block height, got {:?}",
                    value
                ))
            })?;
        }

        if let Some(value) = lookup("NEUTRON_REST_HOST") {
            self.neutron.rest_address = value;
        }

        if let Some(value) = lookup("ICQ_WEB_HOST") {
            self.icq_web_host = value;
        }

        if let Some(value) = lookup("HANG_ON_FAIL") {
            self.hang_on_fail = value == "1";
        }

        Ok(())
    }

    pub fn readiness(&self) -> Result<ReadinessConfig, Error> {
        let timeouts = &self.readiness;

        Ok(ReadinessConfig {
            min_height: self.blocks_count_before_start,
            http: WaitConfig::from_secs(timeouts.poll_interval_secs, timeouts.http_timeout_secs)?,
            channel: WaitConfig::from_secs(
                timeouts.poll_interval_secs,
                timeouts.channel_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_file_gives_defaults() -> Result<(), Error> {
        let config = TestConfig::parse("", "empty.toml")?;

        assert!(!config.no_docker);
        assert_eq!(config.blocks_count_before_start, 10);
        assert_eq!(config.neutron, ChainConfig::neutron());
        assert_eq!(config.gaia, ChainConfig::gaia());
        assert_eq!(config.readiness, ReadinessTimeouts::default());

        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<(), Error> {
        let config = TestConfig::parse(
            r#"
            blocks_count_before_start = 3
            icq_web_host = "http://relayer:9999"

            [readiness]
            http_timeout_secs = 30
            "#,
            "test.toml",
        )?;

        assert_eq!(config.blocks_count_before_start, 3);
        assert_eq!(config.icq_web_host, "http://relayer:9999");
        assert_eq!(config.readiness.http_timeout_secs, 30);
        assert_eq!(config.readiness.channel_timeout_secs, 100);

        Ok(())
    }

    #[test]
    fn malformed_file_is_reported() {
        let err = TestConfig::parse("blocks_count_before_start = \"ten\"", "bad.toml").unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::Toml(_)));
    }

    #[test]
    fn environment_overrides_are_applied() -> Result<(), Error> {
        let mut config = TestConfig::default();

        config.apply_env_overrides(lookup(&[
            ("NO_DOCKER", "true"),
            ("BLOCKS_COUNT_BEFORE_START", "25"),
            ("NEUTRON_REST_HOST", "http://10.0.0.2:1317"),
            ("HANG_ON_FAIL", "1"),
        ]))?;

        assert!(config.no_docker);
        assert_eq!(config.blocks_count_before_start, 25);
        assert_eq!(config.neutron.rest_address, "http://10.0.0.2:1317");
        assert_eq!(config.icq_web_host, "http://127.0.0.1:9999");
        assert!(config.hang_on_fail);

        Ok(())
    }

    #[test]
    fn invalid_block_count_is_a_config_error() {
        let mut config = TestConfig::default();

        let err = config
            .apply_env_overrides(lookup(&[("BLOCKS_COUNT_BEFORE_START", "soon")]))
            .unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::Config(_)));
    }

    #[test]
    fn readiness_uses_the_configured_timeouts() -> Result<(), Error> {
        let readiness = TestConfig::default().readiness()?;

        assert_eq!(readiness.min_height, 10);
        assert_eq!(readiness.http, WaitConfig::from_secs(10, 280)?);
        assert_eq!(readiness.channel, WaitConfig::from_secs(10, 100)?);

        Ok(())
    }
}
