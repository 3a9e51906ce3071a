use std::future::Future;
use std::pin::Pin;

use access_cors_rs::constants::header;
use access_cors_rs::{CorsResponse, Flow, RequestContext};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::http::StatusCode;
use hyper::http::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response};

use super::SharedCors;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type CorsBody = Full<Bytes>;

/// Hyper middleware that mirrors the pattern described in the
/// official "Getting Started with a Server Middleware" guide:
/// https://hyper.rs/guides/1/server/middleware/
#[derive(Clone)]
pub struct AccessCors<S> {
    inner: S,
    cors: SharedCors,
}

impl<S> AccessCors<S> {
    pub fn new(cors: SharedCors, inner: S) -> Self {
        Self { inner, cors }
    }
}

impl<S> Service<Request<Incoming>> for AccessCors<S>
where
    S: Service<Request<Incoming>, Response = Response<CorsBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response<CorsBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let owned_ctx = OwnedRequestContext::from_request(&req);
        let decision = self.cors.evaluate(&owned_ctx.as_request_context());

        if decision.flow() == Flow::Halt {
            let mut response = Response::new(Full::new(Bytes::new()));
            decision.write_to(&mut HyperResponse(&mut response));
            return Box::pin(async move { Ok(response) });
        }

        let inner = self.inner.clone();
        Box::pin(async move {
            let mut response = inner.call(req).await?;
            decision.write_to(&mut HyperResponse(&mut response));
            Ok(response)
        })
    }
}

/// Adapts a hyper response to the evaluator's response seam.
struct HyperResponse<'a>(&'a mut Response<CorsBody>);

impl CorsResponse for HyperResponse<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn set_header(&mut self, name: &str, value: String) {
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.0.headers_mut().insert(header_name, header_value);
        }
    }

    fn set_status(&mut self, status: u16) {
        if let Ok(status) = StatusCode::from_u16(status) {
            *self.0.status_mut() = status;
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request<Incoming>) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
