// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::pin::Pin;

use crate::codec::{WireRequest, WireResponse};
use crate::error::TransportError;
use crate::http_core::HttpCore;

type ResultFuture = dyn futures::Future<Output = Result<WireResponse, TransportError>> + Send;
type Responder = dyn (Fn(WireRequest) -> Pin<Box<ResultFuture>>) + Send + Sync;

/// Mock [`HttpCore`] that holds a closure which answers wire requests with
/// fake responses, or errors.
///
/// ```rust
/// use bytes::Bytes;
/// use futures::FutureExt;
///
/// use scep_transport::test_utils::{ok_response, MockCore};
/// use scep_transport::{HttpCore, TransportError, WireRequest};
///
/// let mock = MockCore::from(|request: WireRequest| {
///     // note the `async { ... }.boxed()`!
///     async move {
///         if request.url.query().unwrap_or("").contains("GetCACaps") {
///             Ok(ok_response(Bytes::from_static(b"POSTPKIOperation"), None))
///         } else {
///             Err(TransportError::Status {
///                 status: 404,
///                 message: "not found".into(),
///             })
///         }
///     }
///     .boxed()
/// });
///
/// let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// rt.block_on(async {
///     let url = url::Url::parse("http://localhost/scep?operation=GetCACaps").unwrap();
///     let request = WireRequest { method: scep_transport::Method::GET, url, body: Bytes::new() };
///     mock.send(request).await.unwrap();
/// });
/// ```
pub struct MockCore {
    responder: Box<Responder>,
}

#[async_trait::async_trait]
impl HttpCore for MockCore {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        (self.responder)(request).await
    }
}

impl<F: Fn(WireRequest) -> Pin<Box<ResultFuture>> + Send + Sync + 'static> From<F> for MockCore {
    fn from(value: F) -> Self {
        Self {
            responder: Box::new(value),
        }
    }
}

/// A 200 response with the given body and content type.
pub fn ok_response(body: bytes::Bytes, content_type: Option<&str>) -> WireResponse {
    WireResponse {
        status: 200,
        content_type: content_type.map(str::to_owned),
        body,
    }
}
