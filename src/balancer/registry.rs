//! Service registry: instance groups keyed by logical service name.
//!
//! # Responsibilities
//! - Group configured instances by service name
//! - Apply the selection strategy when an interceptor asks for an instance

use std::collections::HashMap;
use std::sync::Arc;

use crate::balancer::{LoadBalancer, RoundRobin, ServiceInstance};
use crate::config::ServiceConfig;

/// Selects a concrete instance for a logical service name.
///
/// This is the seam the interceptors depend on; implementations other than
/// [`ServiceRegistry`] (e.g. discovery-backed ones) plug in here.
pub trait LoadBalancerClient: Send + Sync {
    /// Choose an instance for the service, or `None` when none is available.
    fn choose(&self, service: &str) -> Option<Arc<ServiceInstance>>;
}

/// Static registry built from configuration.
#[derive(Debug)]
pub struct ServiceRegistry {
    /// Map of service name -> (instances, selection strategy).
    services: HashMap<String, (Vec<Arc<ServiceInstance>>, Box<dyn LoadBalancer>)>,
}

impl ServiceRegistry {
    /// Build the registry from service configuration.
    ///
    /// Endpoints that fail to parse are skipped with a warning rather than
    /// failing the whole registry.
    pub fn new(configs: &[ServiceConfig]) -> Self {
        let mut services = HashMap::new();
        for config in configs {
            let mut instances = Vec::with_capacity(config.endpoints.len());
            for endpoint in &config.endpoints {
                match endpoint.parse() {
                    Ok(addr) => instances.push(Arc::new(ServiceInstance::new(&config.name, addr))),
                    Err(_) => {
                        tracing::warn!(service = %config.name, endpoint = %endpoint, "skipping invalid endpoint");
                    }
                }
            }
            let strategy: Box<dyn LoadBalancer> = Box::new(RoundRobin::new());
            services.insert(config.name.clone(), (instances, strategy));
        }
        Self { services }
    }

    /// All registered instances, across services.
    pub fn all_instances(&self) -> Vec<Arc<ServiceInstance>> {
        self.services
            .values()
            .flat_map(|(instances, _)| instances.iter())
            .cloned()
            .collect()
    }
}

impl LoadBalancerClient for ServiceRegistry {
    fn choose(&self, service: &str) -> Option<Arc<ServiceInstance>> {
        match self.services.get(service) {
            Some((instances, strategy)) => {
                let chosen = strategy.next_instance(instances);
                if chosen.is_none() {
                    tracing::debug!(service = %service, "service has no usable instances");
                }
                chosen
            }
            None => {
                tracing::debug!(service = %service, "service not present in registry");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, endpoints: &[&str]) -> ServiceConfig {
        ServiceConfig {
            name: name.to_string(),
            endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn chooses_round_robin_within_a_service() {
        let registry = ServiceRegistry::new(&[config(
            "svc-a",
            &["127.0.0.1:8080", "127.0.0.1:8081"],
        )]);

        let first = registry.choose("svc-a").unwrap();
        let second = registry.choose("svc-a").unwrap();
        assert_ne!(first.addr, second.addr);
        assert_eq!(registry.choose("svc-a").unwrap().addr, first.addr);
    }

    #[test]
    fn unknown_service_yields_none() {
        let registry = ServiceRegistry::new(&[]);
        assert!(registry.choose("svc-a").is_none());
    }

    #[test]
    fn invalid_endpoints_are_skipped() {
        let registry = ServiceRegistry::new(&[config("svc-a", &["not-an-addr", "127.0.0.1:8080"])]);
        assert_eq!(registry.all_instances().len(), 1);
        assert!(registry.choose("svc-a").is_some());
    }
}
