//! Retry-capable load-balancing interceptor.

use std::sync::Arc;

use crate::balancer::LoadBalancerClient;
use crate::error::ClientError;
use crate::interceptor::{BoxFuture, Interceptor, Next};
use crate::request::{ClientRequest, ClientResponse, RequestFactory};
use crate::resilience::RetryPolicyFactory;

/// Same selection-and-execution step as the plain interceptor, wrapped by a
/// retry policy obtained per service name.
///
/// The whole step is inside the loop, so each attempt re-chooses an instance.
/// The policy owns attempt count, backoff, and error classification; on
/// exhaustion the last error is surfaced unchanged.
pub struct RetryLoadBalancerInterceptor {
    balancer: Arc<dyn LoadBalancerClient>,
    request_factory: Arc<RequestFactory>,
    retry_factory: Arc<dyn RetryPolicyFactory>,
}

impl RetryLoadBalancerInterceptor {
    pub fn new(
        balancer: Arc<dyn LoadBalancerClient>,
        request_factory: Arc<RequestFactory>,
        retry_factory: Arc<dyn RetryPolicyFactory>,
    ) -> Self {
        Self {
            balancer,
            request_factory,
            retry_factory,
        }
    }
}

impl Interceptor for RetryLoadBalancerInterceptor {
    fn intercept(
        &self,
        request: ClientRequest,
        next: Next,
    ) -> BoxFuture<'static, Result<ClientResponse, ClientError>> {
        let balancer = self.balancer.clone();
        let request_factory = self.request_factory.clone();
        let retry_factory = self.retry_factory.clone();
        Box::pin(async move {
            let service = request
                .service_name()
                .ok_or_else(|| ClientError::InvalidRequest("request uri has no host".into()))?
                .to_string();
            let policy = retry_factory.policy_for(&service);

            let mut attempt = 0u32;
            loop {
                attempt += 1;
                let result = match balancer.choose(&service) {
                    Some(instance) => {
                        let rewritten = request_factory
                            .wrap(request.clone(), &service)
                            .assign_instance(&instance)?;
                        next.clone().call(rewritten).await
                    }
                    None => Err(ClientError::NoInstanceAvailable {
                        service: service.clone(),
                    }),
                };

                match result {
                    Ok(response) => return Ok(response),
                    Err(error) if policy.should_retry(attempt, &error) => {
                        let delay = policy.backoff_delay(attempt);
                        tracing::debug!(
                            service = %service,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "retrying after transient error"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    Err(error) => return Err(error),
                }
            }
        })
    }
}
