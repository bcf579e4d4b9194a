//! Security middleware: response hardening headers and optional HTTPS
//! enforcement behind trusted proxies.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use lg_shared::Environment;

/// Security middleware factory
#[derive(Debug, Clone, Default)]
pub struct SecurityMiddleware {
    /// Refuse plain HTTP requests
    enforce_https: bool,
    /// Add hardening headers to every response
    add_security_headers: bool,
    /// Peers whose `X-Forwarded-Proto` header is believed
    trusted_proxies: Vec<String>,
}

impl SecurityMiddleware {
    /// Headers outside development; HTTPS enforcement stays opt-in because
    /// TLS usually terminates at the hosting proxy
    pub fn for_environment(environment: Environment) -> Self {
        let add_security_headers = !environment.is_development();
        log::info!(
            "Security middleware configured: environment={}, add_headers={}",
            environment,
            add_security_headers
        );
        Self {
            enforce_https: false,
            add_security_headers,
            trusted_proxies: Vec::new(),
        }
    }

    /// Refuse plain HTTP unless a trusted proxy vouches for HTTPS
    pub fn with_https_enforcement(mut self, trusted_proxies: Vec<String>) -> Self {
        self.enforce_https = true;
        self.trusted_proxies = trusted_proxies;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::new(self.trusted_proxies.clone()),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(ErrorForbidden("HTTPS required"));
            }

            let mut response = service.call(req).await?;
            if add_security_headers {
                add_security_response_headers(&mut response);
            }
            Ok(response)
        })
    }
}

/// Checks if the request is secure (HTTPS or vouched for by a trusted proxy)
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    if let Some(proto) = req.headers().get("x-forwarded-proto").and_then(|v| v.to_str().ok()) {
        let peer_addr = req.peer_addr().map(|a| a.ip().to_string()).unwrap_or_default();
        if proto.eq_ignore_ascii_case("https") && trusted_proxies.iter().any(|p| *p == peer_addr) {
            return true;
        }
    }

    false
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // Uploaded images are embedded by the web client on another origin
    headers.insert(
        header::HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("cross-origin"),
    );
}
