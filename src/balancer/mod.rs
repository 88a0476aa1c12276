//! Instance selection for logical service names.
//!
//! # Data Flow
//! ```text
//! Interceptor asks for service "svc-a"
//!     → registry.rs (look up the service's instance group)
//!     → round_robin.rs (rotate through instances)
//!     → Return Arc<ServiceInstance> or None
//! ```
//!
//! # Design Decisions
//! - Selection strategy is stateless over the instance slice; counters live
//!   inside the strategy value
//! - The `LoadBalancerClient` trait is the seam the interceptors depend on;
//!   `ServiceRegistry` is the stock implementation

pub mod instance;
pub mod registry;
pub mod round_robin;

pub use instance::ServiceInstance;
pub use registry::{LoadBalancerClient, ServiceRegistry};
pub use round_robin::RoundRobin;

use std::sync::Arc;

/// A selection strategy over a service's instance group.
pub trait LoadBalancer: Send + Sync + std::fmt::Debug {
    /// Pick the next instance, or `None` if the group is empty.
    fn next_instance(&self, instances: &[Arc<ServiceInstance>]) -> Option<Arc<ServiceInstance>>;
}
