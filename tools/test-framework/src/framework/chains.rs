/*!
   The chains and relayer handed over to a running test.
*/

use crate::chain::driver::ChainDriver;
use crate::error::Error;
use crate::icq::relayer::IcqWebClient;
use crate::types::config::TestConfig;
use crate::types::env::{prefix_writer, EnvWriter, ExportEnv};
use crate::types::wallet::Wallet;

/**
   The chain hosting the interchain-queries contract, the counterparty
   chain it queries and the web API of the ICQ relayer, together with the
   funded wallet used on each chain.
*/
#[derive(Debug, Clone)]
pub struct TestChains {
    pub neutron: ChainDriver,
    pub neutron_wallet: Wallet,
    pub gaia: ChainDriver,
    pub gaia_wallet: Wallet,
    pub icq: IcqWebClient,
}

impl TestChains {
    pub fn new(config: &TestConfig) -> Result<Self, Error> {
        Ok(Self {
            neutron: ChainDriver::new(&config.neutron)?,
            neutron_wallet: config.neutron.wallet(),
            gaia: ChainDriver::new(&config.gaia)?,
            gaia_wallet: config.gaia.wallet(),
            icq: IcqWebClient::new(&config.icq_web_host)?,
        })
    }
}

impl ExportEnv for TestChains {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        self.neutron
            .export_env(&mut prefix_writer("NEUTRON", writer));
        writer.write_env("NEUTRON_WALLET", self.neutron_wallet.id.as_str());

        self.gaia.export_env(&mut prefix_writer("GAIA", writer));
        writer.write_env("GAIA_WALLET", self.gaia_wallet.id.as_str());

        self.icq.export_env(writer);
    }
}
