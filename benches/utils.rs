//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smartlinker::utils::url_validator::validate_destination_url;
use smartlinker::utils::{escape_html, generate_random_code, is_valid_link_id, sanitize_id, sanitize_platform};

// ============== sanitize 基准测试 ==============

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/sanitize");

    group.bench_function("id_clean", |b| {
        b.iter(|| {
            assert_eq!(sanitize_id("AbCd1234"), "AbCd1234");
        });
    });

    group.bench_function("id_hostile", |b| {
        b.iter(|| {
            assert_eq!(sanitize_id("<script>x</script>"), "scriptxscript");
        });
    });

    group.bench_function("platform_name", |b| {
        b.iter(|| {
            assert_eq!(sanitize_platform("Apple Music"), "Apple Music");
        });
    });

    let long_id = "a".repeat(1000);
    group.bench_function("is_valid_long", |b| {
        b.iter(|| {
            assert!(is_valid_link_id(&long_id));
        });
    });

    group.finish();
}

// ============== escape_html 基准测试 ==============

fn bench_escape_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/escape_html");

    group.bench_function("plain", |b| {
        b.iter(|| escape_html("Bohemian Rhapsody"));
    });

    let hostile = "<img src=x onerror='alert(\"&\")'>".repeat(20);
    group.bench_function("hostile", |b| {
        b.iter(|| escape_html(&hostile));
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== validate_destination_url 基准测试 ==============

fn bench_validate_destination_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_destination_url");

    group.bench_function("valid_https", |b| {
        b.iter(|| {
            assert!(validate_destination_url("Spotify", "https://open.spotify.com/track/1").is_ok());
        });
    });

    group.bench_function("invalid_scheme", |b| {
        b.iter(|| {
            assert!(validate_destination_url("Spotify", "javascript:alert(1)").is_err());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_escape_html,
    bench_generate_random_code,
    bench_validate_destination_url,
);
criterion_main!(benches);
