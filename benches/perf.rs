use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use matchday_forecaster::MatchInput;
use matchday_forecaster::fake_round::random_round;
use matchday_forecaster::forecast::score_match;
use matchday_forecaster::predict_round;
use matchday_forecaster::render::render_round;
use matchday_forecaster::round::classify_round;

fn sample_round(n: usize) -> Vec<MatchInput> {
    random_round(&mut StdRng::seed_from_u64(17), n)
}

fn bench_predict_round(c: &mut Criterion) {
    let round = sample_round(10);
    c.bench_function("predict_round_10", |b| {
        b.iter(|| {
            let out = predict_round(black_box(&round));
            black_box(out.len());
        })
    });
}

fn bench_predict_large_round(c: &mut Criterion) {
    let round = sample_round(2_000);
    c.bench_function("predict_round_2000", |b| {
        b.iter(|| {
            let out = predict_round(black_box(&round));
            black_box(out.len());
        })
    });
}

fn bench_score_match_sequential(c: &mut Criterion) {
    let round = sample_round(2_000);
    let profile = classify_round(&round).profile;
    c.bench_function("score_match_sequential_2000", |b| {
        b.iter(|| {
            let n = round
                .iter()
                .map(|m| score_match(black_box(m), profile))
                .filter(|o| !o.notes.is_empty())
                .count();
            black_box(n);
        })
    });
}

fn bench_parse_round(c: &mut Criterion) {
    let raw = serde_json::to_string(&sample_round(50)).expect("serialize round");
    c.bench_function("parse_round_50", |b| {
        b.iter(|| {
            let round: Vec<MatchInput> = serde_json::from_str(black_box(&raw)).unwrap();
            black_box(round.len());
        })
    });
}

fn bench_render_round(c: &mut Criterion) {
    let out = predict_round(&sample_round(10));
    c.bench_function("render_round_10", |b| {
        b.iter(|| {
            let text = render_round(black_box(&out), 40);
            black_box(text.len());
        })
    });
}

criterion_group!(
    perf,
    bench_predict_round,
    bench_predict_large_round,
    bench_score_match_sequential,
    bench_parse_round,
    bench_render_round
);
criterion_main!(perf);
