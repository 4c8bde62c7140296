// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-side response encoding.
//!
//! Only the client role does network I/O in this workspace, but the outbound
//! encoding is kept here so both roles agree on one content-type table.

use bytes::Bytes;

use crate::types::{content_type_for, Operation, TEXT_CONTENT_TYPE};

/// A SCEP response as a server would produce it, before HTTP encoding.
///
/// Business errors at the PKI layer are represented as a CertRep message with
/// pkiStatus FAILURE inside `data`; `error` is only for transport-visible
/// failures.
#[derive(Debug)]
pub struct ServerResponse {
    pub operation: Operation,
    pub ca_cert_num: usize,
    pub data: Bytes,
    pub error: Option<String>,
}

/// The HTTP-level rendering of a [`ServerResponse`].
#[derive(Debug, PartialEq, Eq)]
pub struct EncodedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Encode a response for the wire. Errors become a plain-text 500; everything
/// else carries the payload verbatim under the operation's content type.
pub fn encode_server_response(response: &ServerResponse) -> EncodedResponse {
    if let Some(error) = &response.error {
        return EncodedResponse {
            status: 500,
            content_type: TEXT_CONTENT_TYPE,
            body: Bytes::copy_from_slice(error.as_bytes()),
        };
    }
    EncodedResponse {
        status: 200,
        content_type: content_type_for(response.operation, response.ca_cert_num),
        body: response.data.clone(),
    }
}
