//! End-to-end tests for interceptor selection and installation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use balanced_client::config::{ClientConfig, ServiceConfig};
use balanced_client::request::{ClientRequest, RequestTransformer};
use balanced_client::transport::HyperTransport;
use balanced_client::{ClientError, RetrySupport, ServiceClient, Startup};

mod common;

/// Transformer that counts dispatch attempts (it runs once per attempt).
struct CountingTransformer {
    count: Arc<AtomicU32>,
}

impl RequestTransformer for CountingTransformer {
    fn transform(&self, request: ClientRequest) -> ClientRequest {
        self.count.fetch_add(1, Ordering::SeqCst);
        request
    }
}

fn config_with_service(name: &str, endpoints: Vec<String>) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.services.push(ServiceConfig {
        name: name.to_string(),
        endpoints,
    });
    config.retry.max_attempts = 3;
    config.retry.base_delay_ms = 1;
    config.retry.max_delay_ms = 2;
    config
}

#[tokio::test]
async fn retry_variant_retries_transport_failures_then_surfaces_last_error() {
    // Port 1 is never listening; every attempt fails at the transport.
    let config = config_with_service("svc-a", vec!["127.0.0.1:1".into()]);
    let client = Arc::new(ServiceClient::new(Arc::new(HyperTransport::new())));
    let attempts = Arc::new(AtomicU32::new(0));

    let mut startup = Startup::new(config.clone());
    startup.register_client(client.clone());
    startup.register_transformer(Arc::new(CountingTransformer {
        count: attempts.clone(),
    }));
    startup.with_retry_support(RetrySupport::from_config(&config));
    let runtime = startup.finish();
    assert!(runtime.retry_active());

    let err = client
        .execute(ClientRequest::get("http://svc-a/ping".parse().unwrap()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_variant_surfaces_no_instance_available() {
    let config = config_with_service("svc-a", Vec::new());
    let client = Arc::new(ServiceClient::new(Arc::new(HyperTransport::new())));

    let mut startup = Startup::new(config.clone());
    startup.register_client(client.clone());
    startup.with_retry_support(RetrySupport::from_config(&config));
    startup.finish();

    let err = client
        .execute(ClientRequest::get("http://svc-a/ping".parse().unwrap()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NoInstanceAvailable { ref service } if service == "svc-a"));
}

#[tokio::test]
async fn plain_variant_executes_exactly_once_against_a_live_backend() {
    let backend = common::start_mock_backend("hello from backend").await;
    let config = config_with_service("svc-b", vec![backend.to_string()]);
    let client = Arc::new(ServiceClient::new(Arc::new(HyperTransport::new())));
    let attempts = Arc::new(AtomicU32::new(0));

    // No retry support: capability absent, plain interceptor selected even
    // though retry.enabled is not false.
    let mut startup = Startup::new(config);
    startup.register_client(client.clone());
    startup.register_transformer(Arc::new(CountingTransformer {
        count: attempts.clone(),
    }));
    let runtime = startup.finish();
    assert!(!runtime.retry_active());

    let response = client
        .execute(ClientRequest::get("http://svc-b/".parse().unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_ref(), b"hello from backend");
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn double_initialization_does_not_duplicate_interceptors() {
    let config = config_with_service("svc-a", vec!["127.0.0.1:1".into()]);
    let client = Arc::new(ServiceClient::new(Arc::new(HyperTransport::new())));

    let mut startup = Startup::new(config);
    startup.register_client(client.clone());
    let runtime = startup.finish();

    assert_eq!(client.interceptors().len(), 1);
    runtime.initializer().run();
    assert_eq!(client.interceptors().len(), 1);
}

#[tokio::test]
async fn concurrent_readers_never_observe_a_torn_interceptor_sequence() {
    let client = Arc::new(ServiceClient::new(Arc::new(HyperTransport::new())));

    let mut readers = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        readers.push(tokio::task::spawn_blocking(move || {
            for _ in 0..5_000 {
                let snapshot = client.interceptors();
                // Pre-init or fully post-init, never in between.
                assert!(snapshot.len() <= 1);
            }
        }));
    }

    let mut startup = Startup::new(config_with_service("svc-a", vec!["127.0.0.1:1".into()]));
    startup.register_client(client.clone());
    startup.finish();

    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(client.interceptors().len(), 1);
}
