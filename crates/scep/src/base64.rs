// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use base64::{engine::general_purpose, Engine};

/// The URL_SAFE (with padding) engine used for SCEP messages carried in GET
/// query parameters. RFC 8894 transports via URL, so the standard alphabet's
/// `+`/`/` are out.
pub const B64: general_purpose::GeneralPurpose = general_purpose::URL_SAFE;

/// Encode to a base64url str with padding
pub fn encode(data: impl AsRef<[u8]>) -> String {
    B64.encode(data)
}

/// Decode a base64url str with padding
pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    B64.decode(s)
}
