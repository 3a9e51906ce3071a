use crate::access_policy::AccessPolicy;
use crate::compiled::CompiledPolicy;
use crate::constants::{defaults, header, method, vary};
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::method::{Method, MethodParserFn};
use crate::result::{CorsDecision, CorsResponse, Flow, PreflightResult, SimpleResult};
use crate::util::join_lower;
use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

/// A policy dimension rendered once, up front, as a header value.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Rendered {
    Any,
    List(String),
    /// Explicitly empty: nothing is allowed, so no header is written.
    Nothing,
}

impl Rendered {
    fn from_policy<V: Display>(policy: &AccessPolicy<V>) -> Self {
        match policy {
            AccessPolicy::Unrestricted => Rendered::Any,
            AccessPolicy::Explicit(values) => {
                join_lower(values).map_or(Rendered::Nothing, Rendered::List)
            }
        }
    }
}

/// Per-request CORS engine over an immutable [`CompiledPolicy`].
///
/// Method and header lists are joined and lower-cased once at construction. The
/// evaluator holds no mutable state and can be shared across threads behind an `Arc`.
#[derive(Clone)]
pub struct RequestEvaluator {
    policy: CompiledPolicy,
    parser: Arc<MethodParserFn>,
    all_methods: Option<String>,
    methods: Rendered,
    headers: Rendered,
    exposed: Rendered,
    max_age: Option<String>,
}

impl RequestEvaluator {
    /// Uses [`Method::parse`] and [`Method::ALL`].
    pub fn new(policy: CompiledPolicy) -> Self {
        Self::with_methods(policy, Method::parse, Method::ALL)
    }

    /// Supplies the method parser and the list of every known method.
    ///
    /// The list is rendered when methods are unrestricted and credentials are
    /// allowed, where a `*` wildcard would not be honoured by browsers.
    pub fn with_methods<P, I>(policy: CompiledPolicy, parser: P, all_methods: I) -> Self
    where
        P: Fn(&str) -> Option<Method> + Send + Sync + 'static,
        I: IntoIterator<Item = Method>,
    {
        let evaluator = Self {
            all_methods: join_lower(all_methods),
            methods: Rendered::from_policy(policy.allowed_methods()),
            headers: Rendered::from_policy(policy.allowed_headers()),
            exposed: Rendered::from_policy(policy.exposed_headers()),
            max_age: policy.max_age().map(|seconds| seconds.to_string()),
            parser: Arc::new(parser),
            policy,
        };

        tracing::debug!(
            all_methods = ?evaluator.all_methods,
            methods = ?evaluator.methods,
            headers = ?evaluator.headers,
            exposed = ?evaluator.exposed,
            max_age = ?evaluator.max_age,
            "prepared CORS request evaluator"
        );

        evaluator
    }

    pub fn policy(&self) -> &CompiledPolicy {
        &self.policy
    }

    pub fn check_origin(&self, origin: &str) -> bool {
        self.policy.allows_origin(origin)
    }

    /// Classifies the request and computes the CORS response headers.
    pub fn evaluate(&self, request: &RequestContext<'_>) -> CorsDecision {
        let Some(origin) = request.origin else {
            return CorsDecision::NotApplicable;
        };

        if request.method.eq_ignore_ascii_case(method::OPTIONS) {
            if let Some(requested_method) = request.access_control_request_method {
                tracing::trace!(origin, requested_method, "evaluating CORS preflight request");
                return CorsDecision::Preflight(self.process_preflight(
                    origin,
                    requested_method,
                    request.access_control_request_headers,
                ));
            }
        }

        tracing::trace!(origin, method = request.method, "evaluating CORS simple request");
        match self.process_simple(origin) {
            Some(result) => CorsDecision::Simple(result),
            None => CorsDecision::OriginRejected,
        }
    }

    /// Evaluates the request and writes the outcome to `response`.
    ///
    /// See [`CorsDecision::write_to`].
    pub fn apply<R>(&self, request: &RequestContext<'_>, response: &mut R) -> Flow
    where
        R: CorsResponse + ?Sized,
    {
        self.evaluate(request).write_to(response)
    }

    fn process_preflight(
        &self,
        origin: &str,
        requested_method: &str,
        requested_headers: Option<&str>,
    ) -> PreflightResult {
        let mut headers = HeaderCollection::new();
        if self.preflight_allowed(origin, requested_method, requested_headers) {
            self.render_preflight(&mut headers, origin, requested_headers);
        }

        PreflightResult {
            headers: headers.into_headers(),
            status: defaults::PREFLIGHT_STATUS,
        }
    }

    fn preflight_allowed(
        &self,
        origin: &str,
        requested_method: &str,
        requested_headers: Option<&str>,
    ) -> bool {
        if !self.policy.allows_origin(origin) {
            return false;
        }

        let Some(method) = (self.parser)(requested_method) else {
            return false;
        };
        if !self.policy.allows_method(&method) {
            return false;
        }

        requested_headers.is_none_or(|requested| self.policy.allows_request_headers(requested))
    }

    fn render_preflight(
        &self,
        headers: &mut HeaderCollection,
        origin: &str,
        requested_headers: Option<&str>,
    ) {
        if let Some(max_age) = &self.max_age {
            headers.push(header::ACCESS_CONTROL_MAX_AGE, max_age.as_str());
        }

        if self.policy.allow_credentials() {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);

            let methods = match &self.methods {
                Rendered::Any => self.all_methods.as_deref(),
                Rendered::List(value) => Some(value.as_str()),
                Rendered::Nothing => None,
            };
            if let Some(methods) = methods {
                headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
            }

            let allowed = match &self.headers {
                Rendered::Any => requested_headers.filter(|value| !value.trim().is_empty()),
                Rendered::List(value) => Some(value.as_str()),
                Rendered::Nothing => None,
            };
            if let Some(allowed) = allowed {
                headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed);
            }

            headers.push(header::VARY, vary::CREDENTIALED_PREFLIGHT);
        } else {
            headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.render_origin(origin));
            if let Some(methods) = wildcard_or_list(&self.methods) {
                headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
            }
            if let Some(allowed) = wildcard_or_list(&self.headers) {
                headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed);
            }
            headers.push(header::VARY, vary::ORIGIN);
        }
    }

    fn process_simple(&self, origin: &str) -> Option<SimpleResult> {
        if !self.policy.allows_origin(origin) {
            return None;
        }

        let mut headers = HeaderCollection::with_estimate(4);
        headers.push(header::VARY, vary::ORIGIN);

        if self.policy.allow_credentials() {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
            headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            if let Rendered::List(exposed) = &self.exposed {
                headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed.as_str());
            }
        } else {
            headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.render_origin(origin));
            if let Some(exposed) = wildcard_or_list(&self.exposed) {
                headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed);
            }
        }

        Some(SimpleResult {
            headers: headers.into_headers(),
        })
    }

    fn render_origin<'a>(&self, origin: &'a str) -> &'a str {
        if self.policy.is_origin_unrestricted() {
            "*"
        } else {
            origin
        }
    }
}

fn wildcard_or_list(rendered: &Rendered) -> Option<&str> {
    match rendered {
        Rendered::Any => Some("*"),
        Rendered::List(value) => Some(value.as_str()),
        Rendered::Nothing => None,
    }
}

impl fmt::Debug for RequestEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEvaluator")
            .field("policy", &self.policy)
            .field("all_methods", &self.all_methods)
            .field("methods", &self.methods)
            .field("headers", &self.headers)
            .field("exposed", &self.exposed)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod evaluator_test;
