//! The client instance: an HTTP client holding an ordered interceptor chain.
//!
//! # Design Decisions
//! - The interceptor sequence is read-mostly shared data; it is replaced via
//!   `ArcSwap` so in-flight requests see either the old or the new list in
//!   full, never a partial one
//! - Interceptors fold around the transport in reverse so the first installed
//!   interceptor acts first

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::ClientError;
use crate::interceptor::{ExecuteFn, Interceptor, Next};
use crate::request::{ClientRequest, ClientResponse};
use crate::transport::Transport;

/// An outbound HTTP client with an interceptor chain installed at startup.
pub struct ServiceClient {
    interceptors: ArcSwap<Vec<Arc<dyn Interceptor>>>,
    transport: Arc<dyn Transport>,
}

impl ServiceClient {
    /// Create a client with an empty interceptor chain.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            interceptors: ArcSwap::from_pointee(Vec::new()),
            transport,
        }
    }

    /// Snapshot of the current interceptor sequence.
    pub fn interceptors(&self) -> Arc<Vec<Arc<dyn Interceptor>>> {
        self.interceptors.load_full()
    }

    /// Atomically publish a new interceptor sequence.
    pub fn set_interceptors(&self, interceptors: Vec<Arc<dyn Interceptor>>) {
        self.interceptors.store(Arc::new(interceptors));
    }

    /// Execute a request through the interceptor chain and the transport.
    pub async fn execute(&self, request: ClientRequest) -> Result<ClientResponse, ClientError> {
        let chain = self.interceptors.load_full();

        let transport = self.transport.clone();
        let terminal: ExecuteFn = Arc::new(move |request: ClientRequest| transport.send(request));
        let mut next = Next::new(terminal);

        for interceptor in chain.iter().rev() {
            let interceptor = interceptor.clone();
            let inner = next.clone();
            next = Next::new(Arc::new(move |request: ClientRequest| {
                interceptor.intercept(request, inner.clone())
            }));
        }

        next.call(request).await
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("interceptor_count", &self.interceptors.load().len())
            .finish_non_exhaustive()
    }
}
