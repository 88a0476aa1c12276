//! Request interceptors.
//!
//! # Data Flow
//! ```text
//! ServiceClient.execute(request)
//!     → interceptor chain (installed once at startup)
//!         - plain.rs: choose instance, rewrite, dispatch
//!         - retry.rs: same, wrapped by a retry policy
//!     → Next (terminal transport dispatch)
//! ```
//!
//! # Design Decisions
//! - One interceptor variant is active per process; selection happens once in
//!   `select.rs` at startup and is never re-evaluated
//! - Interceptors are immutable after construction and never touch a client
//!   during their own construction

pub mod plain;
pub mod retry;
pub mod select;

pub use plain::LoadBalancerInterceptor;
pub use retry::RetryLoadBalancerInterceptor;
pub use select::{build_interceptor, should_use_retry, SelectedInterceptor};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ClientError;
use crate::request::{ClientRequest, ClientResponse};

/// Boxed future returned by chain stages.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The signature of one execution stage.
pub type ExecuteFn =
    Arc<dyn Fn(ClientRequest) -> BoxFuture<'static, Result<ClientResponse, ClientError>> + Send + Sync>;

/// The next stage in the execution chain.
///
/// Calling it proceeds to the next interceptor, or to the transport at the end
/// of the chain.
#[derive(Clone)]
pub struct Next {
    inner: ExecuteFn,
}

impl Next {
    /// Wrap an execution stage.
    pub fn new(inner: ExecuteFn) -> Self {
        Self { inner }
    }

    /// Proceed with the (possibly rewritten) request.
    pub async fn call(self, request: ClientRequest) -> Result<ClientResponse, ClientError> {
        (self.inner)(request).await
    }
}

/// A wrapper around request execution adding cross-cutting behavior.
pub trait Interceptor: Send + Sync {
    /// Intercept `request`, eventually delegating to `next`.
    fn intercept(
        &self,
        request: ClientRequest,
        next: Next,
    ) -> BoxFuture<'static, Result<ClientResponse, ClientError>>;
}
