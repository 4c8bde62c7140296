// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::codec::{WireRequest, WireResponse};
use crate::error::TransportError;

/// The transport seam: something that can carry an encoded SCEP request to a
/// server and bring back the raw response.
///
/// 99% of the time this is [`crate::ReqwestCore`]; tests swap in
/// [`crate::test_utils::MockCore`].
#[async_trait::async_trait]
pub trait HttpCore {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}
