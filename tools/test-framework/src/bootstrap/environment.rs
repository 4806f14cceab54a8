/*!
   The lifecycle of the local network shared by the test scenarios.
*/

use tracing::{debug, info};

use crate::bootstrap::infra::{show_versions, Infrastructure};
use crate::bootstrap::readiness::{wait_for_network, ReadinessConfig};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    NotStarted,
    /**
       The network has been (re)started but is not known to be ready. A
       failed setup leaves the environment in this state.
    */
    Starting,
    Ready,
}

/**
   The test environment, owning the network infrastructure.

   A single environment is meant to be set up once and then shared by
   reference with every scenario of the test run: [`setup`](Self::setup)
   does nothing once the environment is ready.
*/
pub struct Environment<Infra> {
    infra: Infra,
    no_docker: bool,
    readiness: ReadinessConfig,
    state: SetupState,
}

impl<Infra: Infrastructure> Environment<Infra> {
    /**
       Create an environment that is not started yet. With `no_docker`,
       the network is assumed to be managed outside of the tests and is
       never touched.
    */
    pub fn new(infra: Infra, no_docker: bool, readiness: ReadinessConfig) -> Self {
        Self {
            infra,
            no_docker,
            readiness,
            state: SetupState::NotStarted,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    pub fn infra(&self) -> &Infra {
        &self.infra
    }

    /**
       Restart the network and wait until the REST API at `host` serves
       the minimum height and reports an opened channel.
    */
    pub fn setup(&mut self, host: &str) -> Result<(), Error> {
        if self.state == SetupState::Ready {
            info!("already set up");
            return Ok(());
        }

        if self.no_docker {
            info!("NO_DOCKER is set, using the network as is");
            return Ok(());
        }

        self.state = SetupState::Starting;

        // A network left over by a previous run is expected, and so is
        // the absence of one.
        if let Err(e) = self.infra.stop() {
            debug!("ignoring failure to stop the previous network: {}", e);
        }

        info!("Starting container... it may take long");
        self.infra.start()?;

        show_versions(&self.infra, self.no_docker);

        wait_for_network(host, &self.readiness)?;

        self.state = SetupState::Ready;

        Ok(())
    }
}
