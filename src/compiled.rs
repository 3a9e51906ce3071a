use crate::access_policy::AccessPolicy;
use crate::method::Method;
use crate::pattern::OriginPattern;
use crate::util::{normalize_lower, split_header_list};

/// Immutable snapshot of a [`crate::PolicyBuilder`], shared read-only by every request.
///
/// Header sets hold lower-cased names. Origins keep the case they were configured with.
#[derive(Clone, Debug, Default)]
pub struct CompiledPolicy {
    pub(crate) allowed_origins: AccessPolicy<String>,
    pub(crate) origin_patterns: Option<Vec<OriginPattern>>,
    pub(crate) allowed_methods: AccessPolicy<Method>,
    pub(crate) allowed_headers: AccessPolicy<String>,
    pub(crate) exposed_headers: AccessPolicy<String>,
    pub(crate) allow_credentials: bool,
    pub(crate) max_age: Option<u64>,
}

impl CompiledPolicy {
    pub fn allowed_origins(&self) -> &AccessPolicy<String> {
        &self.allowed_origins
    }

    /// Compiled origin patterns, or `None` when no regex rule was configured.
    pub fn origin_patterns(&self) -> Option<&[OriginPattern]> {
        self.origin_patterns.as_deref()
    }

    pub fn allowed_methods(&self) -> &AccessPolicy<Method> {
        &self.allowed_methods
    }

    pub fn allowed_headers(&self) -> &AccessPolicy<String> {
        &self.allowed_headers
    }

    pub fn exposed_headers(&self) -> &AccessPolicy<String> {
        &self.exposed_headers
    }

    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Seconds a browser may cache a preflight result, when configured.
    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    /// True when neither literal origins nor regex patterns were configured.
    pub fn is_origin_unrestricted(&self) -> bool {
        self.allowed_origins.is_unrestricted() && self.origin_patterns.is_none()
    }

    /// Decides whether `origin` may access the resource.
    ///
    /// A listed origin is always accepted. Otherwise a non-empty pattern list is
    /// authoritative, even when the literal set is unrestricted. With no patterns,
    /// only an unrestricted literal set accepts an unlisted origin.
    pub fn allows_origin(&self, origin: &str) -> bool {
        if let AccessPolicy::Explicit(origins) = &self.allowed_origins {
            if origins.contains(origin) {
                return true;
            }
        }

        match self.origin_patterns.as_deref() {
            Some(patterns) if !patterns.is_empty() => {
                patterns.iter().any(|pattern| pattern.matches(origin))
            }
            _ => self.allowed_origins.is_unrestricted(),
        }
    }

    pub fn allows_method(&self, method: &Method) -> bool {
        self.allowed_methods.allows(method)
    }

    /// Checks every name in a comma-separated `Access-Control-Request-Headers` value.
    pub fn allows_request_headers(&self, requested: &str) -> bool {
        match &self.allowed_headers {
            AccessPolicy::Unrestricted => true,
            AccessPolicy::Explicit(allowed) => split_header_list(requested)
                .all(|name| allowed.contains(normalize_lower(name).as_str())),
        }
    }
}

#[cfg(test)]
#[path = "compiled_test.rs"]
mod compiled_test;
