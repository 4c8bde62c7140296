// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use bytes::Bytes;

/// Content type a CA sends for a single CA certificate.
pub const CERT_LEAF_CONTENT_TYPE: &str = "application/x-x509-ca-cert";
/// Content type a CA sends for a CA certificate chain with RA intermediates.
pub const CERT_CHAIN_CONTENT_TYPE: &str = "application/x-x509-ca-ra-cert";
/// Content type for PKI operation messages (CMS/PKCS#7, opaque to us).
pub const PKI_MESSAGE_CONTENT_TYPE: &str = "application/x-pki-message";
/// Fallback content type for everything else (capability lists, errors).
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Hard cap on SCEP payload bodies, in bytes.
pub const MAX_PAYLOAD_SIZE: usize = 2 << 20;

/// The sentinel `ca_cert_num` value meaning "certificate chain". The actual
/// number of certificates is only knowable by parsing the payload, which is
/// the PKI message codec's job, not ours.
pub const CERT_CHAIN_SENTINEL: usize = 2;

/// The four SCEP operations (RFC 8894 §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCaCaps,
    GetCaCert,
    PkiOperation,
    GetNextCaCert,
}

impl Operation {
    /// The operation name as it appears in the `operation` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            Operation::GetCaCaps => "GetCACaps",
            Operation::GetCaCert => "GetCACert",
            Operation::PkiOperation => "PKIOperation",
            Operation::GetNextCaCert => "GetNextCACert",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

/// A single SCEP request about to be put on the wire.
#[derive(Debug, Clone)]
pub struct ScepRequest {
    pub operation: Operation,
    /// Opaque message bytes. Empty for the query-only operations.
    pub message: Bytes,
}

impl ScepRequest {
    /// A request with no message body, for the query-only operations.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            message: Bytes::new(),
        }
    }

    /// A request carrying an opaque PKI message.
    pub fn with_message(operation: Operation, message: Bytes) -> Self {
        Self { operation, message }
    }
}

/// A decoded SCEP response, as seen by the client.
#[derive(Debug, Clone)]
pub struct ScepResponse {
    /// The payload, opaque to this layer.
    pub data: Bytes,
    /// 0 for anything that isn't a certificate response, 1 for a single
    /// certificate, [`CERT_CHAIN_SENTINEL`] when the content type declared a
    /// chain.
    pub ca_cert_num: usize,
}

/// Content type for a server response, keyed by operation and certificate
/// count.
pub fn content_type_for(operation: Operation, ca_cert_num: usize) -> &'static str {
    match operation {
        Operation::GetCaCert => {
            if ca_cert_num > 1 {
                CERT_CHAIN_CONTENT_TYPE
            } else {
                CERT_LEAF_CONTENT_TYPE
            }
        }
        Operation::PkiOperation => PKI_MESSAGE_CONTENT_TYPE,
        _ => TEXT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_match_rfc_names() {
        assert_eq!(Operation::GetCaCaps.query_value(), "GetCACaps");
        assert_eq!(Operation::GetCaCert.query_value(), "GetCACert");
        assert_eq!(Operation::PkiOperation.query_value(), "PKIOperation");
        assert_eq!(Operation::GetNextCaCert.query_value(), "GetNextCACert");
    }

    #[test]
    fn content_type_table() {
        assert_eq!(
            content_type_for(Operation::GetCaCert, 2),
            CERT_CHAIN_CONTENT_TYPE
        );
        assert_eq!(
            content_type_for(Operation::GetCaCert, 1),
            CERT_LEAF_CONTENT_TYPE
        );
        assert_eq!(
            content_type_for(Operation::GetCaCert, 0),
            CERT_LEAF_CONTENT_TYPE
        );
        assert_eq!(
            content_type_for(Operation::GetNextCaCert, 3),
            TEXT_CONTENT_TYPE
        );
        assert_eq!(
            content_type_for(Operation::PkiOperation, 0),
            PKI_MESSAGE_CONTENT_TYPE
        );
        assert_eq!(content_type_for(Operation::GetCaCaps, 0), TEXT_CONTENT_TYPE);
    }
}
