//! Plain load-balancing interceptor.

use std::sync::Arc;

use crate::balancer::LoadBalancerClient;
use crate::error::ClientError;
use crate::interceptor::{BoxFuture, Interceptor, Next};
use crate::request::{ClientRequest, ClientResponse, RequestFactory};

/// Resolves the logical service name to a concrete instance and dispatches.
///
/// The result or error of the chosen instance's execution is propagated
/// unchanged; this interceptor never retries.
pub struct LoadBalancerInterceptor {
    balancer: Arc<dyn LoadBalancerClient>,
    request_factory: Arc<RequestFactory>,
}

impl LoadBalancerInterceptor {
    pub fn new(balancer: Arc<dyn LoadBalancerClient>, request_factory: Arc<RequestFactory>) -> Self {
        Self {
            balancer,
            request_factory,
        }
    }
}

impl Interceptor for LoadBalancerInterceptor {
    fn intercept(
        &self,
        request: ClientRequest,
        next: Next,
    ) -> BoxFuture<'static, Result<ClientResponse, ClientError>> {
        let balancer = self.balancer.clone();
        let request_factory = self.request_factory.clone();
        Box::pin(async move {
            let service = request
                .service_name()
                .ok_or_else(|| ClientError::InvalidRequest("request uri has no host".into()))?
                .to_string();

            let instance = balancer
                .choose(&service)
                .ok_or(ClientError::NoInstanceAvailable {
                    service: service.clone(),
                })?;
            tracing::debug!(service = %service, instance = %instance.addr, "instance selected");

            let rewritten = request_factory
                .wrap(request, &service)
                .assign_instance(&instance)?;
            next.call(rewritten).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::ServiceInstance;
    use crate::interceptor::ExecuteFn;
    use http::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedBalancer(Option<Arc<ServiceInstance>>);

    impl LoadBalancerClient for FixedBalancer {
        fn choose(&self, _service: &str) -> Option<Arc<ServiceInstance>> {
            self.0.clone()
        }
    }

    fn counting_next(counter: Arc<AtomicU32>) -> Next {
        let stage: ExecuteFn = Arc::new(move |request: ClientRequest| {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(request.uri.host(), Some("127.0.0.1"));
                Ok(ClientResponse::new(
                    StatusCode::OK,
                    http::HeaderMap::new(),
                    bytes::Bytes::new(),
                ))
            })
        });
        Next::new(stage)
    }

    #[tokio::test]
    async fn dispatches_once_to_chosen_instance() {
        let instance = Arc::new(ServiceInstance::new("svc-b", "127.0.0.1:8080".parse().unwrap()));
        let interceptor = LoadBalancerInterceptor::new(
            Arc::new(FixedBalancer(Some(instance))),
            Arc::new(RequestFactory::default()),
        );
        let attempts = Arc::new(AtomicU32::new(0));

        let response = interceptor
            .intercept(
                ClientRequest::get("http://svc-b/ping".parse().unwrap()),
                counting_next(attempts.clone()),
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fails_when_no_instance_available() {
        let interceptor = LoadBalancerInterceptor::new(
            Arc::new(FixedBalancer(None)),
            Arc::new(RequestFactory::default()),
        );
        let attempts = Arc::new(AtomicU32::new(0));

        let err = interceptor
            .intercept(
                ClientRequest::get("http://svc-b/ping".parse().unwrap()),
                counting_next(attempts.clone()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::NoInstanceAvailable { ref service } if service == "svc-b"));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }
}
