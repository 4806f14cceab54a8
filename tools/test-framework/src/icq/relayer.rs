/*!
   Client for the web API of the ICQ relayer.
*/

use core::time::Duration;
use reqwest::blocking::Client;
use serde_json as json;
use tracing::debug;

use crate::error::Error;
use crate::icq::types::{ResubmitRequest, ResubmitTx, UnsuccessfulTx};
use crate::types::env::{EnvWriter, ExportEnv};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/**
   The operations of the ICQ relayer used to recover failed submissions.
*/
pub trait IcqRelayerApi {
    /**
       The query results the relayer failed to submit and still keeps
       track of.
    */
    fn unsuccessful_txs(&self) -> Result<Vec<UnsuccessfulTx>, Error>;

    /**
       Submit again the given query results, in a single batch.

       A batch referencing a transaction unknown to the relayer fails with
       a [`ResubmitRejected`](crate::error::ErrorDetail::ResubmitRejected)
       error carrying the relayer's message.
    */
    fn resubmit_txs(&self, txs: &[ResubmitTx]) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct IcqWebClient {
    pub host: String,
    client: Client,
}

impl IcqWebClient {
    pub fn new(host: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(host.to_string(), e))?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }
}

impl ExportEnv for IcqWebClient {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        writer.write_env("ICQ_WEB_HOST", &self.host);
    }
}

impl IcqRelayerApi for IcqWebClient {
    fn unsuccessful_txs(&self) -> Result<Vec<UnsuccessfulTx>, Error> {
        let url = self.url("unsuccessful-txs");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::http(url.clone(), e))?;

        if !response.status().is_success() {
            return Err(Error::http_status(url, response.status().as_u16()));
        }

        let body = response.text().map_err(|e| Error::http(url.clone(), e))?;

        // The relayer answers `null` when it has nothing to report.
        let txs: Option<Vec<UnsuccessfulTx>> = json::from_str(&body)?;

        Ok(txs.unwrap_or_default())
    }

    fn resubmit_txs(&self, txs: &[ResubmitTx]) -> Result<(), Error> {
        let url = self.url("resubmit-txs");
        let request = ResubmitRequest { txs: txs.to_vec() };

        debug!("resubmitting {} transactions to {}", txs.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| Error::http(url.clone(), e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().map_err(|e| Error::http(url.clone(), e))?;

        Err(Error::resubmit_rejected(
            status.as_u16(),
            message.trim().to_string(),
        ))
    }
}
