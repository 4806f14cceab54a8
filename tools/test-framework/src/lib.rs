// #![deny(warnings)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
#![doc = include_str!("../README.md")]

//!
//! ## Overview
//!
//! This test framework drives a local network made of a Neutron chain, a
//! Gaia chain, an IBC relayer and the Neutron ICQ relayer, so that the
//! interchain-queries subsystem can be tested end to end.
//!
//! ## Example Test
//!
//! Here's an example of a simple test that showcases some of the important features that the
//! framework exposes:
//!
//! ```rust,no_run
//! use icq_test_framework::prelude::*;
//!
//! pub struct ExampleTest;
//!
//! pub fn example_test() -> Result<(), Error> {
//!     run_icq_test(&ExampleTest)
//! }
//!
//! impl IcqTest for ExampleTest {
//!     fn run(&self, _config: &TestConfig, _chains: &TestChains) -> Result<(), Error> {
//!         suspend()
//!     }
//! }
//! ```
//!
//! The `example_test` function is the top-most function that drives the test itself.
//! [`run_icq_test`](framework::base::run_icq_test) restarts the network with
//! `make start-cosmopark` in the setup directory, waits until the REST API of the Neutron
//! chain serves the configured minimum height and reports an opened IBC channel, and then
//! calls the `run` method of the test with the [`TestChains`](framework::chains::TestChains)
//! connected to the network.
//!
//! In this example, `run` calls [`suspend`](util::suspend::suspend), which suspends the test
//! indefinitely. We can use this as a starting point to perform _manual testing_ with the
//! running network, using the environment variables that the framework writes to
//! `test-chains.env` in the setup directory:
//!
//! ```bash
//! $ source setup/test-chains.env
//! $ $GAIA_CMD --home "$GAIA_HOME" --node $GAIA_RPC_ADDR query bank balances cosmos1fj6yqrkpw6fmp7f7jhj57dujfpwal4m2sj5tcp
//! ```
//!
//! ## Running Tests
//!
//! The end-to-end tests live in the `icq-integration-test` crate and are run with:
//!
//! ```bash
//! RUST_LOG=info RUST_BACKTRACE=1 \
//!     cargo test -p icq-integration-test --features icq -- --test-threads=1
//! ```
//!
//! Set `NO_DOCKER=1` to run against a network that is already running, and
//! `HANG_ON_FAIL=1` to suspend a failing test so that the network can be inspected. Take a
//! look at the [`TestConfig`](types::config::TestConfig) type for the other settings.

pub mod bootstrap;
pub mod chain;
pub mod error;
pub mod framework;
pub mod icq;
pub mod prelude;
pub mod types;
pub mod util;
