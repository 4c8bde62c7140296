// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Method;
use tracing::debug;

use scep::types::MAX_PAYLOAD_SIZE;

use crate::codec::{is_failure_status, WireRequest, WireResponse, DIAGNOSTIC_SNIPPET_LEN};
use crate::error::TransportError;
use crate::http_core::HttpCore;

/// The reqwest-backed [`HttpCore`].
#[derive(Debug, Clone)]
pub struct ReqwestCore {
    client: reqwest::Client, // cheaply cloneable (Arc<...> internally), see docs
}

impl ReqwestCore {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::ClientBuilder::new().build().map_err(|e| {
            TransportError::Request {
                ctx: "constructing http client".into(),
                source: Box::new(e),
            }
        })?;
        Ok(Self { client })
    }

    /// Wrap a pre-configured client (custom roots, proxies, timeouts).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpCore for ReqwestCore {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let WireRequest { method, url, body } = request;

        let mut builder = self.client.request(method.clone(), url.clone());
        if method == Method::POST {
            // A contiguous body gives reqwest a known size, so Content-Length
            // is always set and the transfer is never chunked.
            builder = builder.body(body);
        }

        debug!("scep_transport: requesting {url}");

        let response = builder.send().await.map_err(|e| TransportError::Request {
            ctx: format!("requesting {url}"),
            source: Box::new(e),
        })?;

        let status = response.status().as_u16();
        debug!("scep_transport: response from {url}: {status}");

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        // Error bodies are only kept as far as the diagnostic snippet;
        // success bodies must fit the payload cap.
        let body = if is_failure_status(status) {
            read_body(response, DIAGNOSTIC_SNIPPET_LEN, true).await?
        } else {
            read_body(response, MAX_PAYLOAD_SIZE, false).await?
        };

        Ok(WireResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Read a response body up to `limit` bytes. With `truncate`, extra bytes are
/// dropped; without it, exceeding the limit is a [`TransportError::PayloadTooLarge`].
/// The connection is released when the stream is dropped, on every path.
async fn read_body(
    response: reqwest::Response,
    limit: usize,
    truncate: bool,
) -> Result<Bytes, TransportError> {
    let mut stream = response.bytes_stream();
    let mut buf = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TransportError::Read {
            source: Box::new(e),
        })?;
        let remaining = limit - buf.len();
        if chunk.len() > remaining {
            if truncate {
                buf.extend_from_slice(&chunk[..remaining]);
                break;
            }
            return Err(TransportError::PayloadTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}
