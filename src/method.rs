use crate::constants::method;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pluggable parser turning an `Access-Control-Request-Method` value into a [`Method`].
pub type MethodParserFn = dyn Fn(&str) -> Option<Method> + Send + Sync;

/// Standard HTTP request methods a policy can allow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Every known method, in the order they are rendered when methods are unrestricted.
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => method::GET,
            Method::Head => method::HEAD,
            Method::Post => method::POST,
            Method::Put => method::PUT,
            Method::Delete => method::DELETE,
            Method::Connect => method::CONNECT,
            Method::Options => method::OPTIONS,
            Method::Trace => method::TRACE,
            Method::Patch => method::PATCH,
        }
    }

    /// Exact, case-sensitive lookup of a standard method name.
    ///
    /// This is the default [`MethodParserFn`] used by the evaluator.
    pub fn parse(value: &str) -> Option<Method> {
        Method::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown HTTP method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Method::parse(value).ok_or_else(|| UnknownMethod(value.to_owned()))
    }
}

#[cfg(test)]
#[path = "method_test.rs"]
mod method_test;
