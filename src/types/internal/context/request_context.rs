use std::net::IpAddr;

use poem::Request;

use super::request_id::RequestId;

/// Request context that flows from the API layer into audited actions
///
/// Carries the facts about the inbound request that end up in an audit entry
/// but are not part of the action's own parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// HTTP method of the request
    pub method: String,
}

impl RequestContext {
    /// Create a context with a fresh request id and no client address
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            ip_address: None,
            method: method.into(),
        }
    }

    /// Set the client address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Build a context from an inbound HTTP request
    pub fn from_request(req: &Request) -> Self {
        Self {
            request_id: RequestId::new(),
            ip_address: Self::extract_ip_address(req),
            method: req.method().as_str().to_string(),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                if let Ok(ip) = ip.trim().parse() {
                    return Some(ip);
                }
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            if let Ok(ip) = real_ip.trim().parse() {
                return Some(ip);
            }
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
