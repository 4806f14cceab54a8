/*!
   Starting and stopping the containers of the local network.
*/

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::chain::exec::{exec_in_dir, simple_exec};
use crate::error::Error;

/**
   The containers running the chains and the relayers.

   [`Environment`](crate::bootstrap::environment::Environment) drives an
   implementation of this trait when setting up the tests.
*/
pub trait Infrastructure {
    /**
       Stop and remove any running network.
    */
    fn stop(&self) -> Result<(), Error>;

    /**
       Start a fresh network, returning once the containers are created.
    */
    fn start(&self) -> Result<(), Error>;

    /**
       The version reported by each component, by component name.
    */
    fn versions(&self) -> Vec<(String, Result<String, Error>)>;
}

/**
   The network defined by the `Makefile` and compose file of a setup
   directory.
*/
#[derive(Debug, Clone)]
pub struct ComposeInfra {
    pub setup_dir: PathBuf,
}

/// Services of the compose file and the command printing their version.
const SERVICE_VERSIONS: &[(&str, &str, &[&str])] = &[
    ("neutrond", "neutron-node", &["/go/bin/neutrond", "version"]),
    ("ICQ relayer", "relayer", &["neutron_query_relayer", "version"]),
    ("gaiad", "gaia-node", &["gaiad", "version"]),
    ("hermes", "hermes", &["hermes", "version"]),
];

impl ComposeInfra {
    pub fn new(setup_dir: impl AsRef<Path>) -> Self {
        Self {
            setup_dir: setup_dir.as_ref().to_path_buf(),
        }
    }

    fn make(&self, target: &str) -> Result<(), Error> {
        exec_in_dir(target, &self.setup_dir, "make", &[target])?;
        Ok(())
    }

    fn service_version(&self, service: &str, command: &[&str]) -> Result<String, Error> {
        let mut args = vec!["compose", "exec", service];
        args.extend_from_slice(command);

        let output = exec_in_dir("version", &self.setup_dir, "docker", &args)?;

        Ok(output.combined())
    }
}

impl Infrastructure for ComposeInfra {
    fn stop(&self) -> Result<(), Error> {
        self.make("stop-cosmopark")
    }

    fn start(&self) -> Result<(), Error> {
        self.make("start-cosmopark")
    }

    fn versions(&self) -> Vec<(String, Result<String, Error>)> {
        let mut versions: Vec<_> = SERVICE_VERSIONS
            .iter()
            .map(|(name, service, command)| {
                (name.to_string(), self.service_version(service, command))
            })
            .collect();

        versions.push((
            "Integration tests".to_string(),
            simple_exec("version", "git", &["log", "-1", "--format=%H"])
                .map(|output| output.combined()),
        ));

        versions
    }
}

/**
   Log the versions of the network components. Failing to get a version
   is only reported.
*/
pub fn show_versions(infra: &impl Infrastructure, no_docker: bool) {
    if no_docker {
        info!("Cannot get versions since NO_DOCKER is set");
        return;
    }

    for (component, version) in infra.versions() {
        match version {
            Ok(version) => info!("{} version:\n{}", component, version),
            Err(e) => warn!("Cannot get {} version:\n{}", component, e),
        }
    }
}
