//! Request and response value types plus the balancer request factory.
//!
//! # Responsibilities
//! - Type-erased request/response carried through the interceptor chain
//! - Apply registered transformers in registration order
//! - Tag a request with its logical service name and rewrite its URI to the
//!   concrete instance chosen by the load balancer

use std::sync::Arc;

use bytes::Bytes;
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderMap, Method, StatusCode, Uri};

use crate::balancer::ServiceInstance;
use crate::error::ClientError;

/// An outbound request addressed to a logical service name.
///
/// The URI host carries the logical name (`http://svc-a/path`) until the
/// interceptor rewrites it to a concrete instance.
#[derive(Debug, Clone)]
pub struct ClientRequest {
    /// HTTP method.
    pub method: Method,
    /// Request URI; host = logical service name before instance assignment.
    pub uri: Uri,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
}

impl ClientRequest {
    /// Create a new request with empty headers.
    pub fn new(method: Method, uri: Uri, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Convenience constructor for a body-less GET.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri, Bytes::new())
    }

    /// Logical service name, taken from the URI host.
    pub fn service_name(&self) -> Option<&str> {
        self.uri.host()
    }

    /// Mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// A response carried back through the interceptor chain.
#[derive(Debug, Clone)]
pub struct ClientResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Collected response body.
    pub body: Bytes,
}

impl ClientResponse {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// A request mutation applied before dispatch.
///
/// Transformers run in registration order and must not depend on running in
/// any other order.
pub trait RequestTransformer: Send + Sync {
    /// Return the transformed request.
    fn transform(&self, request: ClientRequest) -> ClientRequest;
}

/// Transformer that sets a fixed header on every request.
pub struct HeaderTransformer {
    name: http::HeaderName,
    value: http::HeaderValue,
}

impl HeaderTransformer {
    /// Create a transformer from a header name/value pair.
    pub fn new(name: &str, value: &str) -> Result<Self, ClientError> {
        let name = name
            .parse()
            .map_err(|_| ClientError::InvalidRequest(format!("invalid header name: {}", name)))?;
        let value = value
            .parse()
            .map_err(|_| ClientError::InvalidRequest(format!("invalid header value: {}", value)))?;
        Ok(Self { name, value })
    }
}

impl RequestTransformer for HeaderTransformer {
    fn transform(&self, mut request: ClientRequest) -> ClientRequest {
        request
            .headers
            .insert(self.name.clone(), self.value.clone());
        request
    }
}

/// Transformer that stamps each request with a fresh `x-request-id`.
#[derive(Debug, Default)]
pub struct RequestIdTransformer;

impl RequestTransformer for RequestIdTransformer {
    fn transform(&self, mut request: ClientRequest) -> ClientRequest {
        let id = uuid::Uuid::new_v4().to_string();
        if let Ok(value) = id.parse() {
            request.headers.insert("x-request-id", value);
        }
        request
    }
}

/// A request tagged with its logical service name, ready for the balancer.
#[derive(Debug, Clone)]
pub struct BalancedRequest {
    /// Logical service name.
    pub service: String,
    /// The (transformed) request.
    pub request: ClientRequest,
}

impl BalancedRequest {
    /// Rewrite the request URI authority to the chosen instance.
    ///
    /// Path and query are preserved; the scheme is fixed to the instance's.
    pub fn assign_instance(
        mut self,
        instance: &ServiceInstance,
    ) -> Result<ClientRequest, ClientError> {
        let mut parts = self.request.uri.into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(
            Authority::try_from(instance.addr.to_string().as_str())
                .map_err(|e| ClientError::InvalidRequest(format!("bad instance authority: {}", e)))?,
        );
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        self.request.uri = Uri::from_parts(parts)
            .map_err(|e| ClientError::InvalidRequest(format!("bad rewritten uri: {}", e)))?;
        Ok(self.request)
    }
}

/// Builds balancer-ready requests, applying the registered transformer chain.
pub struct RequestFactory {
    transformers: Vec<Arc<dyn RequestTransformer>>,
}

impl RequestFactory {
    /// Create a factory over an ordered transformer chain.
    pub fn new(transformers: Vec<Arc<dyn RequestTransformer>>) -> Self {
        Self { transformers }
    }

    /// Wrap a raw request into a [`BalancedRequest`] for the given service.
    ///
    /// Transformers run in registration order; with an empty chain this is the
    /// identity plus service-name tagging.
    pub fn wrap(&self, request: ClientRequest, service: &str) -> BalancedRequest {
        let mut request = request;
        for transformer in &self.transformers {
            request = transformer.transform(request);
        }
        BalancedRequest {
            service: service.to_string(),
            request,
        }
    }
}

impl Default for RequestFactory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
