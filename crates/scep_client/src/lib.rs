// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SCEP client: the four protocol operations as typed async calls, with
//! capability-negotiated GET/POST selection.

pub mod capabilities;
pub mod client;

pub use capabilities::{CapabilitySet, POST_PKI_OPERATION, SCEP_STANDARD};
pub use client::ScepClient;
pub use scep_transport::{with_deadline, TransportError};
