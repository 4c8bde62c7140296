// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use bytes::Bytes;
use tokio::sync::{watch, Mutex};

use scep_transport::TransportError;

/// Capability token a CA advertises when it accepts PKIOperation over POST.
pub const POST_PKI_OPERATION: &str = "POSTPKIOperation";
/// Capability token for full RFC 8894 conformance, which implies POST support.
pub const SCEP_STANDARD: &str = "SCEPStandard";

/// The raw capability list as returned by a GetCACaps query.
///
/// The list is newline-delimited capability tokens, but membership is a plain
/// byte-substring test, so unknown framing never breaks negotiation.
#[derive(Debug, Clone)]
pub struct CapabilitySet(Bytes);

impl CapabilitySet {
    pub fn new(raw: Bytes) -> Self {
        Self(raw)
    }

    pub fn contains(&self, token: &str) -> bool {
        let token = token.as_bytes();
        if token.is_empty() {
            return true;
        }
        self.0.windows(token.len()).any(|window| window == token)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Lazily-populated, concurrency-safe holder for the server's capability set.
///
/// Uses a watch channel for publication plus a fetch guard for single-flight:
/// readers that find the cache empty queue on the guard, the first one
/// fetches, and the rest observe the published value when they get the guard.
/// The guard is never released and reacquired around a nested call, so no
/// reader can observe a half-written value.
#[derive(Debug)]
pub(crate) struct CapabilityCache {
    tx: watch::Sender<Option<CapabilitySet>>,
    rx: watch::Receiver<Option<CapabilitySet>>,
    fetching: Mutex<()>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            tx,
            rx,
            fetching: Mutex::new(()),
        }
    }

    /// Overwrite the cache, e.g. after an explicit GetCACaps query.
    pub fn store(&self, capabilities: CapabilitySet) {
        self.tx.send_replace(Some(capabilities));
    }

    /// Return the cached capability set, calling `populate` to fill the cache
    /// first if it is empty. Concurrent callers during a fetch wait for it to
    /// resolve and then re-check rather than fetching again. A failed fetch
    /// propagates to its caller and leaves the cache empty.
    pub async fn get_or_fetch<F, Fut>(&self, populate: F) -> Result<CapabilitySet, TransportError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<CapabilitySet, TransportError>>,
    {
        if let Some(capabilities) = self.rx.borrow().clone() {
            return Ok(capabilities);
        }

        let _guard = self.fetching.lock().await;
        // the cache may have been filled while we waited for the guard
        if let Some(capabilities) = self.rx.borrow().clone() {
            return Ok(capabilities);
        }

        let capabilities = populate().await?;
        self.tx.send_replace(Some(capabilities.clone()));
        Ok(capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_a_substring_test() {
        let caps = CapabilitySet::new(Bytes::from_static(
            b"Renewal\nPOSTPKIOperation\nSHA-256\nAES",
        ));
        assert!(caps.contains("POSTPKIOperation"));
        assert!(caps.contains("SHA-256"));
        assert!(!caps.contains("SCEPStandard"));
        // substring semantics, same as the membership check servers expect
        assert!(caps.contains("Renew"));
        assert!(caps.contains(""));
    }

    #[tokio::test]
    async fn explicit_store_overwrites() {
        let cache = CapabilityCache::new();
        cache.store(CapabilitySet::new(Bytes::from_static(b"Renewal")));
        cache.store(CapabilitySet::new(Bytes::from_static(b"SCEPStandard")));

        let caps = cache
            .get_or_fetch(|| async { panic!("cache is populated, no fetch expected") })
            .await
            .unwrap();
        assert!(caps.contains("SCEPStandard"));
        assert!(!caps.contains("Renewal"));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_empty() {
        let cache = CapabilityCache::new();
        let err = cache
            .get_or_fetch(|| async {
                Err(TransportError::Status {
                    status: 503,
                    message: "overloaded".into(),
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 503, .. }));

        // a later fetch is attempted again and can succeed
        let caps = cache
            .get_or_fetch(|| async { Ok(CapabilitySet::new(Bytes::from_static(b"AES"))) })
            .await
            .unwrap();
        assert!(caps.contains("AES"));
    }
}
