#![allow(dead_code)]

use access_cors_rs::constants::method;
use access_cors_rs::{
    CorsDecision, CorsResponse, Flow, Method, PolicyBuilder, RequestContext, RequestEvaluator,
};

/// Consuming wrapper over [`PolicyBuilder`] so tests read as one expression.
#[derive(Default)]
pub struct CorsBuilder {
    builder: PolicyBuilder,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults() -> Self {
        Self {
            builder: PolicyBuilder::with_defaults(),
        }
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.origins().allow_all(origins);
        self
    }

    pub fn origin_regex(mut self, pattern: &str) -> Self {
        self.builder.origins().add_regex(pattern);
        self
    }

    pub fn deny_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.origins().deny_all(origins);
        self
    }

    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.builder.methods().allow_all(methods);
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.allowed_headers().allow_all(headers);
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.exposed_headers().allow_all(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.builder.allow_credentials(enabled);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.builder.max_age(seconds);
        self
    }

    pub fn configure(mut self, configure: impl FnOnce(&mut PolicyBuilder)) -> Self {
        configure(&mut self.builder);
        self
    }

    pub fn build(mut self) -> RequestEvaluator {
        RequestEvaluator::new(self.builder.build().expect("valid CORS configuration"))
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn check(self, cors: &RequestEvaluator) -> CorsDecision {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        cors.evaluate(&ctx)
    }

    pub fn apply<R: CorsResponse>(self, cors: &RequestEvaluator, response: &mut R) -> Flow {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        cors.apply(&ctx, response)
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn check(self, cors: &RequestEvaluator) -> CorsDecision {
        let PreflightRequestBuilder {
            origin,
            request_method,
            request_headers,
        } = self;

        let ctx = RequestContext {
            method: method::OPTIONS,
            origin: origin.as_deref(),
            access_control_request_method: request_method.as_deref(),
            access_control_request_headers: request_headers.as_deref(),
        };
        cors.evaluate(&ctx)
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
