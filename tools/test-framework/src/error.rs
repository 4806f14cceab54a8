//! Error type used for the tests.

use core::time::Duration;
use eyre::Report;
use flex_error::{define_error, TraceError};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};

define_error! {
    Error {
        Generic
            [ TraceError<Report> ]
            | _ | { "generic error" },

        Assertion
            { message: String }
            | e | { format_args!("assertion failure: {}", e.message) },

        Io
            [ TraceError<IoError> ]
            | _ | { "io error"},

        CommandNotFound
            { command: String }
            [ TraceError<IoError> ]
            | e | { format_args!("failed to execute command: {}. make sure it is available in $PATH", e.command) },

        Config
            { reason: String }
            | e | { format_args!("invalid test configuration: {}", e.reason) },

        Toml
            { path: String }
            [ TraceError<toml::de::Error> ]
            | e | { format_args!("failed to parse test configuration file {}", e.path) },

        Json
            [ TraceError<serde_json::Error> ]
            | _ | { "failed to parse json" },

        Http
            { url: String }
            [ TraceError<reqwest::Error> ]
            | e | { format_args!("error when requesting {}", e.url) },

        HttpStatus
            { url: String, status: u16 }
            | e | { format_args!("incorrect HTTP response status ({}) for {}", e.status, e.url) },

        Timeout
            { description: String, elapsed: Duration, last_error: String }
            | e | {
                format_args!("timed out after {:?} while waiting for {}. last error: {}",
                    e.elapsed, e.description, e.last_error)
            },

        NoPortOpened
            { url: String, elapsed: Duration }
            | e | { format_args!("No port opened: {} did not answer with 200 within {:?}", e.url, e.elapsed) },

        NoChannelOpened
            { url: String, elapsed: Duration }
            | e | { format_args!("No channel opened: {} reported no channel within {:?}", e.url, e.elapsed) },

        TxFailed
            { txhash: String, code: u32, raw_log: String }
            | e | { format_args!("transaction {} failed with code {}: {}", e.txhash, e.code, e.raw_log) },

        MissingEvent
            { txhash: String, event_type: String, key: String }
            | e | {
                format_args!("transaction {} has no event {} with attribute {}",
                    e.txhash, e.event_type, e.key)
            },

        ResubmitRejected
            { status: u16, message: String }
            | e | { format_args!("{}", e.message) },
    }
}

impl Error {
    /**
       Whether the error may go away by trying again later.

       Errors that are not retryable stop any
       [`wait_until`](crate::util::retry::wait_until) loop immediately.
    */
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self.detail(),
            ErrorDetail::Config(_)
                | ErrorDetail::Timeout(_)
                | ErrorDetail::NoPortOpened(_)
                | ErrorDetail::NoChannelOpened(_)
                | ErrorDetail::ResubmitRejected(_)
        )
    }
}

pub fn handle_generic_error(e: impl Into<Report>) -> Error {
    Error::generic(e.into())
}

pub fn handle_exec_error(command: &str) -> impl FnOnce(IoError) -> Error + '_ {
    |e| match e.kind() {
        IoErrorKind::NotFound => Error::command_not_found(command.to_string(), e),
        _ => Error::io(e),
    }
}

impl From<Report> for Error {
    fn from(e: Report) -> Self {
        Error::generic(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::json(e)
    }
}
