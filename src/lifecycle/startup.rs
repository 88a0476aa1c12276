//! Startup orchestration.
//!
//! # Responsibilities
//! - Collect clients, transformers, customizers and retry support (phase 1)
//! - Evaluate the retry condition once and build the interceptor (phase 2)
//! - Install the interceptor into every client through the initializer
//!
//! # Design Decisions
//! - Subsystems initialize in order, on the startup thread, no races
//! - The condition result is immutable for the process lifetime; config
//!   changes after `finish()` have no effect on interception

use std::sync::Arc;

use crate::balancer::ServiceRegistry;
use crate::client::ServiceClient;
use crate::config::ClientConfig;
use crate::init::{ClientCustomizer, ClientInitializer, CustomizerRegistry, InterceptorCustomizer};
use crate::interceptor::{build_interceptor, should_use_retry};
use crate::request::{RequestFactory, RequestTransformer};
use crate::resilience::{DefaultRetryPolicyFactory, RetryPolicyFactory};

/// Marker that the retry capability is present in this runtime, optionally
/// carrying a policy factory. Handing this to [`Startup`] is the capability
/// probe; it is read once in `finish()`.
pub struct RetrySupport {
    policy_factory: Option<Arc<dyn RetryPolicyFactory>>,
}

impl RetrySupport {
    /// Capability present, but no policy factory supplied; a no-op factory
    /// will be synthesized at interceptor construction.
    pub fn minimal() -> Self {
        Self {
            policy_factory: None,
        }
    }

    /// Capability present with the stock backoff factory built from config.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            policy_factory: Some(Arc::new(DefaultRetryPolicyFactory::new(config.retry.clone()))),
        }
    }

    /// Capability present with a caller-supplied policy factory.
    pub fn with_policy_factory(policy_factory: Arc<dyn RetryPolicyFactory>) -> Self {
        Self {
            policy_factory: Some(policy_factory),
        }
    }
}

/// Phase-1 accumulator for startup.
pub struct Startup {
    config: ClientConfig,
    clients: Vec<Arc<ServiceClient>>,
    transformers: Vec<Arc<dyn RequestTransformer>>,
    customizers: Vec<Arc<dyn ClientCustomizer>>,
    retry_support: Option<RetrySupport>,
}

impl Startup {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            clients: Vec::new(),
            transformers: Vec::new(),
            customizers: Vec::new(),
            retry_support: None,
        }
    }

    /// Declare a client instance to be initialized in phase 2.
    pub fn register_client(&mut self, client: Arc<ServiceClient>) {
        self.clients.push(client);
    }

    /// Register a request transformer; application order = registration order.
    pub fn register_transformer(&mut self, transformer: Arc<dyn RequestTransformer>) {
        self.transformers.push(transformer);
    }

    /// Register an additional customizer, applied after the interceptor one.
    pub fn register_customizer(&mut self, customizer: Arc<dyn ClientCustomizer>) {
        self.customizers.push(customizer);
    }

    /// Declare that the retry capability is present in this runtime.
    pub fn with_retry_support(&mut self, support: RetrySupport) {
        self.retry_support = Some(support);
    }

    /// Phase 2: build everything and run the initializer exactly once.
    pub fn finish(self) -> Runtime {
        let registry = Arc::new(ServiceRegistry::new(&self.config.services));
        let request_factory = Arc::new(RequestFactory::new(self.transformers));

        // The capability probe and the config flag are read once, here.
        let capability_present = self.retry_support.is_some();
        let use_retry = should_use_retry(capability_present, self.config.retry.enabled);
        if capability_present && !use_retry {
            tracing::info!("retry capability present but disabled by configuration");
        }

        let policy_factory = self
            .retry_support
            .and_then(|support| support.policy_factory);
        let selected = build_interceptor(use_retry, registry.clone(), request_factory, policy_factory);
        tracing::info!(
            variant = if selected.is_retry() { "retry" } else { "plain" },
            "load balancer interceptor selected"
        );

        let mut customizer_registry = CustomizerRegistry::new();
        customizer_registry.register(Arc::new(InterceptorCustomizer::new(selected.into_shared())));
        for customizer in self.customizers {
            customizer_registry.register(customizer);
        }

        let initializer = ClientInitializer::new(self.clients, customizer_registry);
        initializer.run();

        Runtime {
            registry,
            initializer,
            retry_active: use_retry,
        }
    }
}

/// The initialized subsystem.
pub struct Runtime {
    registry: Arc<ServiceRegistry>,
    initializer: ClientInitializer,
    retry_active: bool,
}

impl Runtime {
    /// The service registry built from configuration.
    pub fn registry(&self) -> Arc<ServiceRegistry> {
        self.registry.clone()
    }

    /// The initializer; exposed so hosts can assert the run-once guarantee.
    pub fn initializer(&self) -> &ClientInitializer {
        &self.initializer
    }

    /// Whether the retry variant was selected at startup.
    pub fn retry_active(&self) -> bool {
        self.retry_active
    }
}
