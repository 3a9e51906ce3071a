use access_cors_rs::{
    CorsDecision, CorsSettings, Headers, Method, PolicyBuilder, RequestContext, RequestEvaluator,
    merge_vary, normalize_lower,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use once_cell::sync::Lazy;
use pprof::criterion::{Output, PProfProfiler};
use std::env;

static ALLOWED_HEADER_NAMES: Lazy<Vec<String>> =
    Lazy::new(|| (0..256).map(|idx| format!("X-Allow-{idx:03}")).collect());

static LARGE_HEADER_LINE: Lazy<String> = Lazy::new(|| ALLOWED_HEADER_NAMES.join(", "));

static ORIGIN_PATTERNS: Lazy<Vec<String>> = Lazy::new(|| {
    (0..64)
        .map(|idx| format!(r"https://svc{idx:02}\.bench\.allowed"))
        .collect()
});

fn build_evaluator(credentials: bool) -> RequestEvaluator {
    let mut builder = PolicyBuilder::new();
    builder
        .with_origins(|origins| {
            origins
                .allow("https://bench.allowed")
                .add_regex(r"https://.*\.bench\.allowed");
        })
        .with_methods(|methods| {
            methods.allow_all([Method::Get, Method::Post, Method::Options]);
        })
        .with_allowed_headers(|headers| {
            headers.allow_all(["X-Custom-One", "X-Custom-Two", "Content-Type"]);
        })
        .with_exposed_headers(|headers| {
            headers.allow_all(["X-Expose-One", "X-Expose-Two"]);
        })
        .allow_credentials(credentials)
        .max_age(600);
    RequestEvaluator::new(builder.build().expect("valid benchmark configuration"))
}

fn build_unrestricted() -> RequestEvaluator {
    RequestEvaluator::new(PolicyBuilder::new().build().expect("valid benchmark configuration"))
}

fn build_with_patterns(count: usize) -> RequestEvaluator {
    let mut builder = PolicyBuilder::new();
    for pattern in ORIGIN_PATTERNS.iter().take(count) {
        builder.origins().add_regex(pattern.as_str());
    }
    RequestEvaluator::new(builder.build().expect("valid benchmark configuration"))
}

fn preflight(origin: &str) -> RequestContext<'_> {
    RequestContext {
        method: "OPTIONS",
        origin: Some(origin),
        access_control_request_method: Some("POST"),
        access_control_request_headers: Some("X-Custom-One, Content-Type"),
    }
}

fn simple(origin: &str) -> RequestContext<'_> {
    RequestContext {
        method: "GET",
        origin: Some(origin),
        ..RequestContext::default()
    }
}

fn bench_preflight_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preflight_processing");

    for credentials in [false, true] {
        let cors = build_evaluator(credentials);
        let accepted = preflight("https://api.bench.allowed");
        group.bench_with_input(
            BenchmarkId::new("accept_allowed_preflight", credentials),
            &accepted,
            |b, request| {
                b.iter(|| {
                    let decision = cors.evaluate(black_box(request));
                    assert!(matches!(decision, CorsDecision::Preflight(_)));
                    black_box(decision);
                })
            },
        );
    }

    let cors = build_evaluator(true);
    let rejected = preflight("https://evil.example");
    group.bench_function("reject_disallowed_preflight", |b| {
        b.iter(|| black_box(cors.evaluate(black_box(&rejected))))
    });

    group.finish();
}

fn bench_simple_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_processing");
    let cors = build_evaluator(false);
    let unrestricted = build_unrestricted();

    let accepted = simple("https://bench.allowed");
    group.bench_function("accept_listed_origin", |b| {
        b.iter(|| black_box(cors.evaluate(black_box(&accepted))))
    });

    let rejected = simple("https://evil.example");
    group.bench_function("reject_unlisted_origin", |b| {
        b.iter(|| black_box(cors.evaluate(black_box(&rejected))))
    });

    group.bench_function("apply_unrestricted_with_vary", |b| {
        b.iter(|| {
            let mut response = Headers::new();
            response.insert("Vary".into(), "Accept-Encoding".into());
            black_box(unrestricted.apply(black_box(&accepted), &mut response));
            black_box(response);
        })
    });

    group.finish();
}

fn bench_origin_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("origin_matching");

    for count in [1usize, 16, 64] {
        let cors = build_with_patterns(count);
        let last = format!("https://svc{:02}.bench.allowed", count - 1);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("last_pattern_match", count), &last, |b, origin| {
            b.iter(|| black_box(cors.check_origin(black_box(origin))))
        });
    }

    group.finish();
}

fn bench_header_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_evaluation");
    let mut builder = PolicyBuilder::new();
    builder
        .allowed_headers()
        .allow_all(ALLOWED_HEADER_NAMES.iter().cloned());
    let policy = builder.build().expect("valid benchmark configuration");
    let line = LARGE_HEADER_LINE.as_str();

    group.throughput(Throughput::Elements(ALLOWED_HEADER_NAMES.len() as u64));
    group.bench_function("allows_headers_large", |b| {
        b.iter(|| black_box(policy.allows_request_headers(black_box(line))))
    });

    let rejected = format!("{line}, X-Unknown");
    group.bench_function("rejects_headers_large", |b| {
        b.iter(|| black_box(policy.allows_request_headers(black_box(&rejected))))
    });

    group.finish();
}

fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");

    let settings = CorsSettings {
        allowed_origins: Some(vec!["https://bench.allowed".into()]),
        origin_regexes: Some(ORIGIN_PATTERNS.iter().take(8).cloned().collect()),
        allowed_methods: Some(vec![Method::Get, Method::Post]),
        allow_any_header: true,
        expose_any_header: true,
        ..CorsSettings::default()
    };
    group.bench_function("build_from_settings", |b| {
        b.iter(|| {
            let policy = settings.to_builder().build().expect("valid settings");
            black_box(RequestEvaluator::new(policy));
        })
    });

    group.finish();
}

fn bench_string_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_helpers");

    group.bench_function("normalize_lower_ascii", |b| {
        b.iter(|| black_box(normalize_lower(black_box("X-CUSTOM-HEADER"))))
    });
    group.bench_function("normalize_lower_unicode", |b| {
        b.iter(|| black_box(normalize_lower(black_box("X-ÜBER-HEADER"))))
    });
    group.bench_function("merge_vary_existing", |b| {
        b.iter(|| black_box(merge_vary(black_box(Some("Accept-Encoding, Cookie")), "Origin")))
    });

    group.finish();
}

fn bench_cors(c: &mut Criterion) {
    bench_preflight_processing(c);
    bench_simple_processing(c);
    bench_origin_matching(c);
    bench_header_evaluation(c);
    bench_configuration(c);
    bench_string_helpers(c);
}

fn configure_criterion() -> Criterion {
    if env::var_os("ACCESS_CORS_PROFILE_FLAMEGRAPH").is_some() {
        Criterion::default().with_profiler(PProfProfiler::new(1000, Output::Flamegraph(None)))
    } else {
        Criterion::default()
    }
}

criterion_group!(
    name = access_cors_rs_benches;
    config = configure_criterion();
    targets = bench_cors
);
criterion_main!(access_cors_rs_benches);
