pub mod constants;
mod access_policy;
mod builder;
mod compiled;
mod context;
mod error;
mod evaluator;
mod headers;
mod method;
mod origin_policy;
mod pattern;
mod result;
mod settings;
mod util;

pub use access_policy::AccessPolicy;
pub use builder::PolicyBuilder;
pub use compiled::CompiledPolicy;
pub use context::RequestContext;
pub use error::ConfigError;
pub use evaluator::RequestEvaluator;
pub use headers::{Headers, merge_vary};
pub use method::{Method, MethodParserFn, UnknownMethod};
pub use origin_policy::OriginPolicy;
pub use pattern::{OriginPattern, PatternError};
pub use result::{CorsDecision, CorsResponse, Flow, PreflightResult, SimpleResult};
pub use settings::CorsSettings;

#[doc(hidden)]
pub use util::normalize_lower;
