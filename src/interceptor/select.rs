//! Startup-time interceptor selection.
//!
//! # Design Decisions
//! - The condition is a pure function evaluated exactly once during phase-2
//!   startup; its result is immutable for the process lifetime
//! - Construction is an explicit variant switch, not an implicit
//!   container-managed selection

use std::sync::Arc;

use crate::balancer::LoadBalancerClient;
use crate::interceptor::{Interceptor, LoadBalancerInterceptor, RetryLoadBalancerInterceptor};
use crate::request::RequestFactory;
use crate::resilience::{NoRetryPolicyFactory, RetryPolicyFactory};

/// Decide whether outbound calls go through the retry-capable interceptor.
///
/// Returns `true` only when the retry capability is present in the runtime AND
/// the `retry.enabled` flag is not explicitly `false`. An unset flag defaults
/// to enabled: retry is the preferred path whenever the capability exists.
/// Capability absence always wins over an explicit `enabled = true`.
pub fn should_use_retry(capability_present: bool, enabled_flag: Option<bool>) -> bool {
    capability_present && enabled_flag != Some(false)
}

/// The single interceptor variant active for this process.
pub enum SelectedInterceptor {
    /// Plain load balancing, no retry.
    Plain(LoadBalancerInterceptor),
    /// Load balancing wrapped by a retry policy.
    Retry(RetryLoadBalancerInterceptor),
}

impl SelectedInterceptor {
    /// Whether the retry variant was selected.
    pub fn is_retry(&self) -> bool {
        matches!(self, SelectedInterceptor::Retry(_))
    }

    /// Erase the variant for installation into clients.
    pub fn into_shared(self) -> Arc<dyn Interceptor> {
        match self {
            SelectedInterceptor::Plain(interceptor) => Arc::new(interceptor),
            SelectedInterceptor::Retry(interceptor) => Arc::new(interceptor),
        }
    }
}

/// Construct the interceptor matching the condition result.
///
/// Pure factory: no client instance is touched. When the retry variant is
/// selected without a supplied policy factory, a no-op factory is synthesized
/// so construction never fails.
pub fn build_interceptor(
    use_retry: bool,
    balancer: Arc<dyn LoadBalancerClient>,
    request_factory: Arc<RequestFactory>,
    retry_factory: Option<Arc<dyn RetryPolicyFactory>>,
) -> SelectedInterceptor {
    if use_retry {
        let retry_factory =
            retry_factory.unwrap_or_else(|| Arc::new(NoRetryPolicyFactory) as Arc<dyn RetryPolicyFactory>);
        SelectedInterceptor::Retry(RetryLoadBalancerInterceptor::new(
            balancer,
            request_factory,
            retry_factory,
        ))
    } else {
        SelectedInterceptor::Plain(LoadBalancerInterceptor::new(balancer, request_factory))
    }
}
