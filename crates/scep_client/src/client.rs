// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use url::Url;

use scep::{Operation, ScepRequest, ScepResponse};
use scep_transport::{
    decode_response, encode_request, HttpCore, Method, ReqwestCore, TransportError,
};

use crate::capabilities::{CapabilityCache, CapabilitySet, POST_PKI_OPERATION, SCEP_STANDARD};

/// One configured transport invoker: a method and a base URL over the shared
/// core. The client holds a GET-bound and a POST-bound one.
struct Endpoint {
    core: Arc<dyn HttpCore + Send + Sync>,
    method: Method,
    url: Url,
}

impl Endpoint {
    async fn call(&self, request: &ScepRequest) -> Result<ScepResponse, TransportError> {
        let wire = encode_request(&self.url, self.method.clone(), request)?;
        let response = self.core.send(wire).await?;
        decode_response(response)
    }
}

/// A SCEP client bound to one CA server instance.
///
/// All operations are cancellable by dropping their future; wrap calls in
/// [`scep_transport::with_deadline`] for a hard per-call deadline.
pub struct ScepClient {
    get: Endpoint,
    post: Endpoint,
    capabilities: CapabilityCache,
}

impl ScepClient {
    /// Create a client for the given server instance address. A bare
    /// `host:port` gets an `http://` scheme; a malformed address fails here.
    /// No network I/O happens until the first operation call.
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let core = ReqwestCore::new()?;
        Self::with_core(server_url, Arc::new(core))
    }

    /// Like [`ScepClient::new`] with an explicit transport core, for custom
    /// reqwest configuration or test doubles.
    pub fn with_core(
        server_url: &str,
        core: Arc<dyn HttpCore + Send + Sync>,
    ) -> Result<Self, TransportError> {
        let instance = if server_url.starts_with("http") {
            server_url.to_owned()
        } else {
            format!("http://{server_url}")
        };
        let url = Url::parse(&instance).map_err(|source| TransportError::InvalidServerUrl {
            url: server_url.to_owned(),
            source,
        })?;

        Ok(Self {
            get: Endpoint {
                core: core.clone(),
                method: Method::GET,
                url: url.clone(),
            },
            post: Endpoint {
                core,
                method: Method::POST,
                url,
            },
            capabilities: CapabilityCache::new(),
        })
    }

    /// Query the list of options supported by the server (GetCACaps),
    /// replacing the cached capability set with the result.
    pub async fn get_ca_caps(&self) -> Result<Bytes, TransportError> {
        let request = ScepRequest::new(Operation::GetCaCaps);
        let response = self.get.call(&request).await?;

        info!(
            "scep_client: capability cache refreshed ({} bytes)",
            response.data.len()
        );
        self.capabilities
            .store(CapabilitySet::new(response.data.clone()));

        Ok(response.data)
    }

    /// Fetch the CA certificate, or a CA certificate chain with
    /// intermediates in PKCS#7 Degenerate Certificates format (GetCACert).
    /// The second element is the chain hint: 2 when the response declared a
    /// chain, with the exact count left to the PKI message codec.
    pub async fn get_ca_cert(&self) -> Result<(Bytes, usize), TransportError> {
        let request = ScepRequest::new(Operation::GetCaCert);
        let response = self.get.call(&request).await?;
        Ok((response.data, response.ca_cert_num))
    }

    /// Send a SCEP message such as a PKCSReq and return the CertRep payload
    /// (PKIOperation). Routed over POST when the server advertises
    /// `POSTPKIOperation` or `SCEPStandard`, over GET otherwise; an empty
    /// capability cache is filled on demand first.
    pub async fn pki_operation(&self, message: Bytes) -> Result<Bytes, TransportError> {
        let endpoint =
            if self.supports(POST_PKI_OPERATION).await? || self.supports(SCEP_STANDARD).await? {
                &self.post
            } else {
                &self.get
            };

        let request = ScepRequest::with_message(Operation::PkiOperation, message);
        let response = endpoint.call(&request).await?;
        Ok(response.data)
    }

    /// Fetch the replacement certificate or certificate chain for an
    /// expiring CA certificate (GetNextCACert).
    pub async fn get_next_ca_cert(&self) -> Result<Bytes, TransportError> {
        let request = ScepRequest::new(Operation::GetNextCaCert);
        let response = self.get.call(&request).await?;
        Ok(response.data)
    }

    /// Whether the server advertises `token` in its capability list. Fetches
    /// the capabilities first if none are cached; a failed fetch surfaces as
    /// an error rather than defaulting to `false`.
    pub async fn supports(&self, token: &str) -> Result<bool, TransportError> {
        let capabilities = self
            .capabilities
            .get_or_fetch(|| self.fetch_ca_caps())
            .await?;
        Ok(capabilities.contains(token))
    }

    async fn fetch_ca_caps(&self) -> Result<CapabilitySet, TransportError> {
        let request = ScepRequest::new(Operation::GetCaCaps);
        let response = self.get.call(&request).await?;
        Ok(CapabilitySet::new(response.data))
    }
}

impl fmt::Debug for ScepClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScepClient")
            .field("url", &self.get.url.as_str())
            .finish_non_exhaustive()
    }
}
