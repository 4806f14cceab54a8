/*!
   Functions for initializing each test at the beginning of a Rust test
   session.
*/

use std::env;
use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{
    self as ts,
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::Error;
use crate::types::config::TestConfig;

static INIT: Once = Once::new();

/**
   Initialize the test with a global logger and error handlers,
   read the configuration and return a [`TestConfig`].
*/
pub fn init_test() -> Result<TestConfig, Error> {
    let no_color_log = env::var("NO_COLOR_LOG")
        .ok()
        .map(|val| val == "1")
        .unwrap_or(false);

    INIT.call_once(|| {
        if !no_color_log {
            // Fails only when another hook was installed first.
            let _ = color_eyre::install();
        }
        install_logger(!no_color_log);
    });

    load_test_config()
}

/**
   Load the configuration file named by `ICQ_TEST_CONFIG`, if any, and
   apply the overrides from the environment variables.
*/
pub fn load_test_config() -> Result<TestConfig, Error> {
    let mut config = match env::var("ICQ_TEST_CONFIG") {
        Ok(path) => {
            debug!("loading test configuration from {}", path);
            TestConfig::load(path)?
        }
        Err(_) => TestConfig::default(),
    };

    config.apply_env_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

/**
   Install the [`tracing_subscriber`] logger handlers so that logs will
   be displayed during test.
*/
pub fn install_logger(with_color: bool) {
    // Use log level INFO by default if RUST_LOG is not set.
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let layer = ts::fmt::layer().with_ansi(with_color);

    ts::registry().with(env_filter).with(layer).init();
}
