//! Client-side load-balanced request interception.
//!
//! Decides at startup whether outbound calls go through a plain
//! load-balancing interceptor or a retry-capable one, and installs the chosen
//! interceptor into every declared client exactly once.
//!
//! ```text
//! retry condition ──▶ interceptor factory ──▶ customizer ──▶ initializer
//!                                                                │ (once)
//!                      ┌─────────────────────────────────────────┘
//!                      ▼
//!   ServiceClient.execute(request)
//!       → request factory (transformers, service tagging)
//!       → chosen interceptor (instance selection, optional retry)
//!       → transport
//! ```

pub mod balancer;
pub mod client;
pub mod config;
pub mod error;
pub mod init;
pub mod interceptor;
pub mod lifecycle;
pub mod observability;
pub mod request;
pub mod resilience;
pub mod transport;

pub use client::ServiceClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use lifecycle::{RetrySupport, Runtime, Startup};
pub use request::{ClientRequest, ClientResponse};
