//! One-time client customization.
//!
//! # Responsibilities
//! - Hold the ordered set of customizers registered during phase-1 startup
//! - Apply every customizer to every pre-declared client, exactly once
//!
//! # Design Decisions
//! - The run-once guard lives here: this crate has no surrounding container
//!   lifecycle to enforce single invocation, so a second `run()` is a warned
//!   no-op instead of duplicating interceptors
//! - Each (customizer, client) application is isolated; one failure is logged
//!   and the pass continues, so unrelated clients still get load balancing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::ServiceClient;
use crate::error::ClientError;
use crate::interceptor::Interceptor;

/// A registered mutation applied once to each client instance at startup.
pub trait ClientCustomizer: Send + Sync {
    /// Mutate the client (typically: append an interceptor to its chain).
    fn customize(&self, client: &ServiceClient) -> Result<(), ClientError>;
}

/// Customizer that appends one interceptor to a client's chain.
///
/// The current sequence is copied, extended, and republished; the live
/// sequence is never mutated in place under concurrent readers.
pub struct InterceptorCustomizer {
    interceptor: Arc<dyn Interceptor>,
}

impl InterceptorCustomizer {
    pub fn new(interceptor: Arc<dyn Interceptor>) -> Self {
        Self { interceptor }
    }
}

impl ClientCustomizer for InterceptorCustomizer {
    fn customize(&self, client: &ServiceClient) -> Result<(), ClientError> {
        let current = client.interceptors();
        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.extend(current.iter().cloned());
        updated.push(self.interceptor.clone());
        client.set_interceptors(updated);
        Ok(())
    }
}

/// Ordered collection of customizers.
#[derive(Default)]
pub struct CustomizerRegistry {
    customizers: Vec<Arc<dyn ClientCustomizer>>,
}

impl CustomizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a customizer; application order = registration order.
    pub fn register(&mut self, customizer: Arc<dyn ClientCustomizer>) {
        self.customizers.push(customizer);
    }

    pub fn is_empty(&self) -> bool {
        self.customizers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.customizers.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Arc<dyn ClientCustomizer>> {
        self.customizers.iter()
    }
}

/// Applies every registered customizer to every pre-declared client, once.
pub struct ClientInitializer {
    clients: Vec<Arc<ServiceClient>>,
    registry: CustomizerRegistry,
    initialized: AtomicBool,
}

impl ClientInitializer {
    pub fn new(clients: Vec<Arc<ServiceClient>>, registry: CustomizerRegistry) -> Self {
        Self {
            clients,
            registry,
            initialized: AtomicBool::new(false),
        }
    }

    /// Run the initialization pass.
    ///
    /// An empty registry is a no-op, not an error. A second invocation is a
    /// programming error upstream; it is rejected here with a warning so it
    /// cannot duplicate interceptors.
    pub fn run(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("client initializer invoked more than once, ignoring");
            return;
        }
        if self.registry.is_empty() {
            tracing::debug!("no customizers registered, nothing to initialize");
            return;
        }

        for client in &self.clients {
            for customizer in self.registry.iter() {
                if let Err(error) = customizer.customize(client) {
                    tracing::warn!(error = %error, "customizer failed, continuing with remaining clients");
                }
            }
        }
        tracing::info!(
            clients = self.clients.len(),
            customizers = self.registry.len(),
            "client interceptors installed"
        );
    }

    /// Whether the pass has already run.
    pub fn has_run(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}
