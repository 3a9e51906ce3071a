use crate::builder::PolicyBuilder;
use crate::method::Method;

/// Flat, declarative form of a CORS policy, suited to configuration files.
///
/// Every switch defaults to `false` and every list to absent. Applying an all-default
/// value restricts every dimension to nothing; set `allow_any` (or the per-dimension
/// `allow_any_*` switches) for an open policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CorsSettings {
    pub allow_any: bool,
    pub allow_any_origin: bool,
    pub allow_any_method: bool,
    pub allow_any_header: bool,
    pub expose_any_header: bool,
    pub allow_credentials: bool,
    /// Seconds; a negative value leaves max-age unset.
    pub max_age: Option<i64>,
    pub allowed_origins: Option<Vec<String>>,
    pub origin_regexes: Option<Vec<String>>,
    pub allowed_methods: Option<Vec<Method>>,
    pub allowed_headers: Option<Vec<String>>,
    pub exposed_headers: Option<Vec<String>>,
}

impl CorsSettings {
    /// Writes these settings into `builder`.
    ///
    /// Credentials and max-age are applied first. `allow_any` then opens every
    /// dimension and nothing else is read. Otherwise each dimension is either opened
    /// by its switch or narrowed to its list, where an absent list still narrows the
    /// dimension to nothing.
    pub fn apply(&self, builder: &mut PolicyBuilder) {
        if self.allow_credentials {
            builder.allow_credentials(true);
        }
        if let Some(max_age) = self.max_age {
            builder.max_age(max_age);
        }

        if self.allow_any {
            builder.allow_any();
            return;
        }

        let origins = builder.origins();
        if self.allow_any_origin {
            origins.allow_any();
        } else {
            origins.allow_all(self.allowed_origins.iter().flatten().cloned());
            for regex in self.origin_regexes.iter().flatten() {
                origins.add_regex(regex.as_str());
            }
        }

        let methods = builder.methods();
        if self.allow_any_method {
            methods.allow_any();
        } else {
            methods.allow_all(self.allowed_methods.iter().flatten().copied());
        }

        let allowed_headers = builder.allowed_headers();
        if self.allow_any_header {
            allowed_headers.allow_any();
        } else {
            allowed_headers.allow_all(self.allowed_headers.iter().flatten().cloned());
        }

        let exposed_headers = builder.exposed_headers();
        if self.expose_any_header {
            exposed_headers.allow_any();
        } else {
            exposed_headers.allow_all(self.exposed_headers.iter().flatten().cloned());
        }
    }

    /// Applies the settings to a fresh builder.
    pub fn to_builder(&self) -> PolicyBuilder {
        let mut builder = PolicyBuilder::new();
        self.apply(&mut builder);
        builder
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
