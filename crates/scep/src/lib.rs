// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol layer for the Simple Certificate Enrollment Protocol (RFC 8894).
//!
//! This crate holds the pieces of SCEP that are independent of any transport:
//! the operation names, the request/response shapes exchanged with a CA, the
//! content-type table, and the base64url helpers used for GET-carried
//! messages. It performs no I/O; `scep_transport` and `scep_client` build on
//! top of it.

pub mod base64;
pub mod response;
pub mod types;

pub use response::{encode_server_response, EncodedResponse, ServerResponse};
pub use types::{Operation, ScepRequest, ScepResponse};
