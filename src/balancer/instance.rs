//! Concrete service instances.

use std::net::SocketAddr;

use url::Url;

/// A concrete network endpoint backing a logical service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Logical service this instance belongs to.
    pub service: String,
    /// The instance address.
    pub addr: SocketAddr,
    /// Pre-calculated base URL for performance.
    pub base_url: Url,
}

impl ServiceInstance {
    /// Create a new instance for a service.
    pub fn new(service: &str, addr: SocketAddr) -> Self {
        let base_url = Url::parse(&format!("http://{}", addr)).expect("socket addr forms a url");
        Self {
            service: service.to_string(),
            addr,
            base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_matches_addr() {
        let instance = ServiceInstance::new("svc-a", "127.0.0.1:9000".parse().unwrap());
        assert_eq!(instance.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(instance.service, "svc-a");
    }
}
