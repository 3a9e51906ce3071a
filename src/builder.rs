use crate::access_policy::AccessPolicy;
use crate::compiled::CompiledPolicy;
use crate::constants::defaults;
use crate::error::ConfigError;
use crate::method::Method;
use crate::origin_policy::OriginPolicy;
use crate::pattern::OriginPattern;
use crate::util::normalize_lower;
use indexmap::IndexSet;

/// Mutable assembly surface for a [`CompiledPolicy`].
///
/// Every dimension starts unrestricted, credentials start disabled and max-age starts
/// unset. [`PolicyBuilder::build`] freezes the current state and resets the builder, so
/// one builder can assemble several independent policies in turn.
///
/// ```
/// use access_cors_rs::{Method, PolicyBuilder};
///
/// let mut builder = PolicyBuilder::new();
/// builder
///     .with_origins(|origins| {
///         origins.allow("https://app.example").add_regex(r"https://.*\.example\.dev");
///     })
///     .with_methods(|methods| {
///         methods.allow_all([Method::Get, Method::Post]);
///     })
///     .allow_credentials(true)
///     .max_age(600);
///
/// let policy = builder.build().expect("valid CORS policy");
/// assert!(policy.allows_origin("https://preview.example.dev"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyBuilder {
    origins: OriginPolicy,
    methods: AccessPolicy<Method>,
    allowed_headers: AccessPolicy<String>,
    exposed_headers: AccessPolicy<String>,
    allow_credentials: bool,
    max_age: i64,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self {
            origins: OriginPolicy::default(),
            methods: AccessPolicy::default(),
            allowed_headers: AccessPolicy::default(),
            exposed_headers: AccessPolicy::default(),
            allow_credentials: defaults::ALLOW_CREDENTIALS,
            max_age: defaults::MAX_AGE_UNSET,
        }
    }
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with the recommended preset: any origin, `GET`/`HEAD`/`POST`
    /// and the CORS-safelisted request headers.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.methods.allow_all(defaults::ALLOWED_METHODS);
        builder.allowed_headers.allow_all(defaults::ALLOWED_HEADERS);
        builder
    }

    pub fn origins(&mut self) -> &mut OriginPolicy {
        &mut self.origins
    }

    pub fn methods(&mut self) -> &mut AccessPolicy<Method> {
        &mut self.methods
    }

    pub fn allowed_headers(&mut self) -> &mut AccessPolicy<String> {
        &mut self.allowed_headers
    }

    pub fn exposed_headers(&mut self) -> &mut AccessPolicy<String> {
        &mut self.exposed_headers
    }

    pub fn with_origins(&mut self, configure: impl FnOnce(&mut OriginPolicy)) -> &mut Self {
        configure(&mut self.origins);
        self
    }

    pub fn with_methods(
        &mut self,
        configure: impl FnOnce(&mut AccessPolicy<Method>),
    ) -> &mut Self {
        configure(&mut self.methods);
        self
    }

    pub fn with_allowed_headers(
        &mut self,
        configure: impl FnOnce(&mut AccessPolicy<String>),
    ) -> &mut Self {
        configure(&mut self.allowed_headers);
        self
    }

    pub fn with_exposed_headers(
        &mut self,
        configure: impl FnOnce(&mut AccessPolicy<String>),
    ) -> &mut Self {
        configure(&mut self.exposed_headers);
        self
    }

    pub fn allow_credentials(&mut self, allow: bool) -> &mut Self {
        self.allow_credentials = allow;
        self
    }

    pub fn credentials_allowed(&self) -> bool {
        self.allow_credentials
    }

    /// Sets `Access-Control-Max-Age` in seconds. Any negative value leaves it unset.
    pub fn max_age(&mut self, seconds: i64) -> &mut Self {
        self.max_age = seconds;
        self
    }

    pub fn max_age_seconds(&self) -> i64 {
        self.max_age
    }

    /// Makes origins, methods, allowed headers and exposed headers unrestricted.
    pub fn allow_any(&mut self) -> &mut Self {
        self.origins.allow_any();
        self.methods.allow_any();
        self.allowed_headers.allow_any();
        self.exposed_headers.allow_any();
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Freezes the current configuration and resets the builder.
    ///
    /// Origin patterns are compiled here. The builder is reset whether or not
    /// compilation succeeds.
    pub fn build(&mut self) -> Result<CompiledPolicy, ConfigError> {
        let Self {
            mut origins,
            methods,
            allowed_headers,
            exposed_headers,
            allow_credentials,
            max_age,
        } = std::mem::take(self);

        let (allowed_origins, regexes) = origins.take();
        let origin_patterns = regexes.map(compile_patterns).transpose()?;

        let policy = CompiledPolicy {
            allowed_origins,
            origin_patterns,
            allowed_methods: methods,
            allowed_headers: lower_case_names(allowed_headers),
            exposed_headers: lower_case_names(exposed_headers),
            allow_credentials,
            max_age: u64::try_from(max_age).ok(),
        };

        tracing::debug!(
            origins = ?policy.allowed_origins.allowed().map(IndexSet::len),
            origin_patterns = ?policy.origin_patterns.as_ref().map(Vec::len),
            methods = ?policy.allowed_methods.allowed().map(IndexSet::len),
            allowed_headers = ?policy.allowed_headers.allowed().map(IndexSet::len),
            exposed_headers = ?policy.exposed_headers.allowed().map(IndexSet::len),
            allow_credentials = policy.allow_credentials,
            max_age = ?policy.max_age,
            "compiled CORS policy"
        );

        Ok(policy)
    }
}

fn compile_patterns(raw: IndexSet<String>) -> Result<Vec<OriginPattern>, ConfigError> {
    raw.into_iter()
        .map(|pattern| match OriginPattern::compile(&pattern) {
            Ok(compiled) => Ok(compiled),
            Err(source) => {
                tracing::warn!(%pattern, error = %source, "rejected CORS origin pattern");
                Err(ConfigError::InvalidOriginPattern { pattern, source })
            }
        })
        .collect()
}

fn lower_case_names(policy: AccessPolicy<String>) -> AccessPolicy<String> {
    match policy {
        AccessPolicy::Unrestricted => AccessPolicy::Unrestricted,
        AccessPolicy::Explicit(names) => {
            AccessPolicy::Explicit(names.iter().map(|name| normalize_lower(name)).collect())
        }
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
