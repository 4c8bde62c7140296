// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use reqwest::Method;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured server instance address did not parse as a URL.
    #[error("invalid server URL {url:?}: {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },

    /// A method other than GET or POST was requested. This is a contract
    /// violation in the caller, not a server-side condition.
    #[error("scep: {method} method not supported")]
    UnsupportedMethod { method: Method },

    /// The server answered with an error status. `message` holds at most the
    /// first 4096 bytes of the body, as diagnostic text.
    #[error("http request failed with status {status}, msg: {message}")]
    Status { status: u16, message: String },

    /// A success response body exceeded the payload cap.
    #[error("response body exceeded the {limit}-byte payload cap")]
    PayloadTooLarge { limit: usize },

    /// An I/O fault while reading a success response body.
    #[error("reading response body: {source}")]
    Read {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Building or dispatching the request failed. DNS, connection, and TLS
    /// failures from the underlying client surface here with their source
    /// preserved.
    #[error("while {ctx}: {source}")]
    Request {
        ctx: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The caller's deadline elapsed before the call completed.
    #[error("cancelled after {after:?}")]
    Cancelled { after: Duration },
}
