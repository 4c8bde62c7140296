// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The SCEP wire codec: pure request-encoding and response-decoding
//! functions, shared by the real reqwest core and the test mock.

use bytes::Bytes;
use reqwest::Method;
use url::Url;

use scep::types::{CERT_CHAIN_CONTENT_TYPE, CERT_CHAIN_SENTINEL, MAX_PAYLOAD_SIZE};
use scep::{base64, ScepRequest, ScepResponse};

use crate::error::TransportError;

/// How much of an error-response body is kept as diagnostic text.
pub const DIAGNOSTIC_SNIPPET_LEN: usize = 4096;

/// An encoded SCEP request, ready for an [`crate::HttpCore`] to send.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    /// Empty for GET; the raw message for POST.
    pub body: Bytes,
}

/// A raw HTTP response, before SCEP interpretation.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// True for statuses the SCEP layer treats as a protocol-level failure.
pub(crate) fn is_failure_status(status: u16) -> bool {
    status != 200 && status >= 400
}

/// Encode a SCEP request against `base_url` for the given method.
///
/// The `operation` query parameter is always set. On GET, a non-empty message
/// travels base64url-encoded in the `message` query parameter; on POST it is
/// the body, verbatim. Any other method is a caller bug.
pub fn encode_request(
    base_url: &Url,
    method: Method,
    request: &ScepRequest,
) -> Result<WireRequest, TransportError> {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("operation", request.operation.query_value());

    if method == Method::GET {
        if !request.message.is_empty() {
            url.query_pairs_mut()
                .append_pair("message", &base64::encode(&request.message));
        }
        Ok(WireRequest {
            method,
            url,
            body: Bytes::new(),
        })
    } else if method == Method::POST {
        Ok(WireRequest {
            method,
            url,
            // carried as contiguous bytes so the core can always set an
            // exact Content-Length; some CA front ends reject chunked bodies
            body: request.message.clone(),
        })
    } else {
        Err(TransportError::UnsupportedMethod { method })
    }
}

/// Decode a raw response into a [`ScepResponse`].
///
/// Error statuses fail with a diagnostic snippet; oversized bodies fail with
/// the payload cap; the chain content type sets the `ca_cert_num` sentinel.
pub fn decode_response(response: WireResponse) -> Result<ScepResponse, TransportError> {
    if is_failure_status(response.status) {
        let snippet_len = response.body.len().min(DIAGNOSTIC_SNIPPET_LEN);
        return Err(TransportError::Status {
            status: response.status,
            message: String::from_utf8_lossy(&response.body[..snippet_len]).into_owned(),
        });
    }

    if response.body.len() > MAX_PAYLOAD_SIZE {
        return Err(TransportError::PayloadTooLarge {
            limit: MAX_PAYLOAD_SIZE,
        });
    }

    let ca_cert_num = match response.content_type.as_deref() {
        Some(CERT_CHAIN_CONTENT_TYPE) => CERT_CHAIN_SENTINEL,
        _ => 0,
    };

    Ok(ScepResponse {
        data: response.body,
        ca_cert_num,
    })
}
