/*!
   Checks that block until the local network is ready to be used.

   Any failure of a readiness request, be it a connection error, an
   unexpected status or an unexpected body, only means that the network
   is not ready yet. The checks fail with a
   [`NoPortOpened`](crate::error::ErrorDetail::NoPortOpened) or
   [`NoChannelOpened`](crate::error::ErrorDetail::NoChannelOpened) error
   once their timeout is exhausted.
*/

use core::time::Duration;
use eyre::eyre;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json as json;
use tracing::info;

use crate::error::{Error, ErrorDetail};
use crate::util::retry::{wait_until, WaitConfig};

pub const DEFAULT_HOST: &str = "http://127.0.0.1:1317";

/**
   Timeout of each single readiness request.
*/
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessConfig {
    /**
       The block the REST API must serve before the network is considered
       started.
    */
    pub min_height: u64,

    pub http: WaitConfig,

    pub channel: WaitConfig,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            min_height: 10,
            http: WaitConfig {
                interval: Duration::from_secs(10),
                timeout: Duration::from_secs(280),
            },
            channel: WaitConfig {
                interval: Duration::from_secs(10),
                timeout: Duration::from_secs(100),
            },
        }
    }
}

#[derive(Deserialize)]
struct ChannelsResponse {
    channels: Vec<json::Value>,
}

fn readiness_client(host: &str) -> Result<Client, Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::http(host.to_string(), e))
}

fn get_ok(client: &Client, url: &str) -> Result<String, Error> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::http(url.to_string(), e))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::http_status(url.to_string(), status.as_u16()));
    }

    response.text().map_err(|e| Error::http(url.to_string(), e))
}

/**
   Turn the timeout of a check into the check-specific error built by
   `on_timeout`, leaving any other error untouched.
*/
fn map_timeout(e: Error, on_timeout: impl FnOnce(Duration) -> Error) -> Error {
    let elapsed = match e.detail() {
        ErrorDetail::Timeout(timeout) => Some(timeout.elapsed),
        _ => None,
    };

    match elapsed {
        Some(elapsed) => on_timeout(elapsed),
        None => e,
    }
}

/**
   Wait until `GET {host}/blocks/{min_height}` answers with 200, i.e.
   until the chain has produced at least `min_height` blocks.
*/
pub fn wait_for_http(host: &str, min_height: u64, config: &WaitConfig) -> Result<(), Error> {
    let client = readiness_client(host)?;
    let url = format!("{}/blocks/{}", host.trim_end_matches('/'), min_height);

    wait_until(&format!("{} to answer", url), config, || {
        get_ok(&client, &url).map(|_| ())
    })
    .map_err(|e| map_timeout(e, |elapsed| Error::no_port_opened(url.clone(), elapsed)))?;

    info!("{} is serving block {}", host, min_height);

    Ok(())
}

/**
   Wait until `GET {host}/ibc/core/channel/v1/channels` reports at least
   one channel.
*/
pub fn wait_for_channel(host: &str, config: &WaitConfig) -> Result<(), Error> {
    let client = readiness_client(host)?;
    let url = format!("{}/ibc/core/channel/v1/channels", host.trim_end_matches('/'));

    let count = wait_until(&format!("{} to report a channel", url), config, || {
        let body = get_ok(&client, &url)?;
        let response: ChannelsResponse = json::from_str(&body)?;

        if response.channels.is_empty() {
            Err(Error::generic(eyre!("no channel has been opened yet")))
        } else {
            Ok(response.channels.len())
        }
    })
    .map_err(|e| map_timeout(e, |elapsed| Error::no_channel_opened(url.clone(), elapsed)))?;

    info!("{} reports {} opened channels", host, count);

    Ok(())
}

/**
   Run the HTTP check and then the channel check.
*/
pub fn wait_for_network(host: &str, config: &ReadinessConfig) -> Result<(), Error> {
    wait_for_http(host, config.min_height, &config.http)?;
    wait_for_channel(host, &config.channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(10), Duration::from_millis(100)).unwrap()
    }

    #[test]
    fn http_check_waits_for_the_minimum_height() -> Result<(), Error> {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/blocks/10").with_status(200).create();

        wait_for_http(&server.url(), 10, &fast())?;
        mock.assert();

        Ok(())
    }

    #[test]
    fn http_check_fails_with_no_port_opened() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/blocks/10")
            .with_status(404)
            .expect_at_least(2)
            .create();

        let err = wait_for_http(&server.url(), 10, &fast()).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::NoPortOpened(_)));
        assert!(err.detail().to_string().starts_with("No port opened"));
    }

    #[test]
    fn unreachable_host_fails_with_no_port_opened() {
        let err = wait_for_http("http://127.0.0.1:1", 10, &fast()).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::NoPortOpened(_)));
    }

    #[test]
    fn channel_check_succeeds_with_an_open_channel() -> Result<(), Error> {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/ibc/core/channel/v1/channels")
            .with_status(200)
            .with_body(
                r#"{"channels":[{"state":"STATE_OPEN","port_id":"transfer","channel_id":"channel-0"}],"pagination":{"next_key":null,"total":"1"}}"#,
            )
            .create();

        wait_for_channel(&server.url(), &fast())
    }

    #[test]
    fn empty_channel_list_never_succeeds() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/ibc/core/channel/v1/channels")
            .with_status(200)
            .with_body(r#"{"channels":[],"pagination":{"next_key":null,"total":"0"}}"#)
            .create();

        let err = wait_for_channel(&server.url(), &fast()).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::NoChannelOpened(_)));
        assert!(err.detail().to_string().starts_with("No channel opened"));
    }

    #[test]
    fn malformed_channel_response_is_not_ready() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/ibc/core/channel/v1/channels")
            .with_status(200)
            .with_body("<html>starting</html>")
            .create();

        let err = wait_for_channel(&server.url(), &fast()).unwrap_err();

        assert!(matches!(err.detail(), ErrorDetail::NoChannelOpened(_)));
    }
}
