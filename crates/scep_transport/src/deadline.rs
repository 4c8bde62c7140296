// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use futures::{Future, FutureExt};

use crate::error::TransportError;

/// Add a deadline to a transport future. If the deadline elapses first, the
/// in-flight call is dropped and a distinct [`TransportError::Cancelled`] is
/// returned instead of whatever timeout text the transport would produce.
pub async fn with_deadline<F, Value>(duration: Duration, future: F) -> Result<Value, TransportError>
where
    F: Future<Output = Result<Value, TransportError>>,
{
    let mut future = Box::pin(future).fuse();
    let mut delay = futures_timer::Delay::new(duration).fuse();
    futures::select_biased! {
        res = future => res,
        _ = delay => Err(TransportError::Cancelled { after: duration })
    }
}
