//! Terminal HTTP dispatch.
//!
//! The transport is an external collaborator to the interception core; this
//! module owns only the seam plus a hyper-based default implementation.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::error::ClientError;
use crate::interceptor::BoxFuture;
use crate::request::{ClientRequest, ClientResponse};

/// Sends a fully-resolved request over the wire.
pub trait Transport: Send + Sync {
    /// Perform the exchange and collect the response.
    fn send(&self, request: ClientRequest) -> BoxFuture<'static, Result<ClientResponse, ClientError>>;
}

/// Default transport on hyper-util's legacy pooled client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl HyperTransport {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: ClientRequest) -> BoxFuture<'static, Result<ClientResponse, ClientError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let mut builder = http::Request::builder()
                .method(request.method.clone())
                .uri(request.uri.clone());
            if let Some(headers) = builder.headers_mut() {
                *headers = request.headers.clone();
            }
            let outbound = builder
                .body(Full::new(request.body))
                .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

            let response: http::Response<hyper::body::Incoming> = client
                .request(outbound)
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            let (parts, body) = response.into_parts();
            let body = body
                .collect()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?
                .to_bytes();
            Ok(ClientResponse::new(parts.status, parts.headers, body))
        })
    }
}

/// Shorthand for a shared transport handle.
pub type SharedTransport = Arc<dyn Transport>;
