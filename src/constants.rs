pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
}

pub mod method {
    pub const CONNECT: &str = "CONNECT";
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
    pub const TRACE: &str = "TRACE";
}

/// Pre-rendered `Vary` values.
pub mod vary {
    pub const ORIGIN: &str = "Origin";
    /// Written on credentialed preflight responses, whose content depends on
    /// every request header the evaluator inspects.
    pub const CREDENTIALED_PREFLIGHT: &str =
        "Origin, Access-Control-Request-Method, Access-Control-Request-Headers";
}

/// Values used by [`crate::PolicyBuilder::with_defaults`].
pub mod defaults {
    use crate::method::Method;

    pub const ALLOWED_METHODS: [Method; 3] = [Method::Get, Method::Head, Method::Post];
    pub const ALLOWED_HEADERS: [&str; 5] = [
        "Accept",
        "Accept-Language",
        "Content-Language",
        "Content-Type",
        "Range",
    ];
    pub const ALLOW_CREDENTIALS: bool = false;
    /// Sentinel meaning "do not emit `Access-Control-Max-Age`".
    pub const MAX_AGE_UNSET: i64 = -1;
    pub const PREFLIGHT_STATUS: u16 = 204;
}
