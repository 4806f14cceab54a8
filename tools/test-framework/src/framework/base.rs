/*!
    Base infrastructure for the test framework. Includes basic setup for
    initializing the logger, loading the test configuration and starting
    the local network.
*/

use tracing::{info, warn};

use crate::bootstrap::environment::Environment;
use crate::bootstrap::infra::{ComposeInfra, Infrastructure};
use crate::bootstrap::init::init_test;
use crate::error::Error;
use crate::framework::chains::TestChains;
use crate::types::config::TestConfig;
use crate::types::env::{format_env, write_env};
use crate::util::suspend::hang_on_error;

/**
   File written in the setup directory with the environment variables
   exported by [`TestChains`].
*/
pub const ENV_FILE: &str = "test-chains.env";

/**
   A test case running against the local network.
*/
pub trait IcqTest {
    /// Test runner
    fn run(&self, config: &TestConfig, chains: &TestChains) -> Result<(), Error>;
}

/**
   Runs a test case implementing [`IcqTest`] against a network managed by
   the `Makefile` in the configured setup directory.
*/
pub fn run_icq_test<Test: IcqTest>(test: &Test) -> Result<(), Error> {
    let config = init_test()?;

    let mut environment = Environment::new(
        ComposeInfra::new(&config.setup_dir),
        config.no_docker,
        config.readiness()?,
    );

    run_icq_test_with_environment(&mut environment, &config, test)
}

/**
   Runs a test case implementing [`IcqTest`] in an environment that may
   already have been set up by a previous test.
*/
pub fn run_icq_test_with_environment<Infra, Test>(
    environment: &mut Environment<Infra>,
    config: &TestConfig,
    test: &Test,
) -> Result<(), Error>
where
    Infra: Infrastructure,
    Test: IcqTest,
{
    info!("starting test with test config: {:?}", config);

    hang_on_error(config.hang_on_fail, || {
        environment.setup(&config.neutron.rest_address)?;

        let chains = TestChains::new(config)?;

        info!(
            "test chains are ready, with the following environment:\n{}",
            format_env(&chains)
        );

        let env_path = config.setup_dir.join(ENV_FILE);
        match write_env(&env_path, &chains) {
            Ok(()) => info!("written chains environment to {}", env_path.display()),
            Err(e) => warn!("failed to write chains environment to {}: {}", env_path.display(), e),
        }

        test.run(config, &chains)
    })
}
