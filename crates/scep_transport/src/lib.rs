// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for SCEP: the wire codec, the [`HttpCore`] trait, and the
//! reqwest-backed implementation of it.

pub mod codec;
mod deadline;
mod error;
mod http_core;
mod reqwest_core;
pub mod test_utils;

pub use codec::{decode_response, encode_request, WireRequest, WireResponse};
pub use deadline::with_deadline;
pub use error::TransportError;
pub use http_core::HttpCore;
pub use reqwest_core::ReqwestCore;

pub use reqwest::Method;
