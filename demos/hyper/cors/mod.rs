use std::sync::Arc;

use access_cors_rs::{ConfigError, CorsSettings, Method, PolicyBuilder, RequestEvaluator};

pub type SharedCors = Arc<RequestEvaluator>;
pub type SharedAppState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<SharedAppState, ConfigError> {
    let settings = CorsSettings {
        allowed_origins: Some(vec!["http://api.example.com".into()]),
        origin_regexes: Some(vec![r"http://localhost:\d+".into()]),
        allowed_methods: Some(vec![Method::Get, Method::Post, Method::Options]),
        allowed_headers: Some(vec![
            "Content-Type".into(),
            "X-Requested-With".into(),
            "X-Example-Trace".into(),
        ]),
        exposed_headers: Some(vec!["X-Example-Trace".into()]),
        allow_credentials: true,
        max_age: Some(600),
        ..CorsSettings::default()
    };

    let mut builder = PolicyBuilder::new();
    settings.apply(&mut builder);
    let cors = Arc::new(RequestEvaluator::new(builder.build()?));

    Ok(Arc::new(AppState {
        cors,
        greeting: "Welcome to the Hyper CORS example!",
    }))
}

pub mod middleware;
