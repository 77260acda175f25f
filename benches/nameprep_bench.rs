use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nameprep::lang::{detect, LangConfig};
use nameprep::pipeline::{Engine, EngineConfig, RequestOptions};
use nameprep::unicode::{normalize_text, UnicodeOptions};

fn sample_texts() -> Vec<&'static str> {
    // Mixed scripts, initials, hyphens, homoglyphs: exercises every stage.
    vec![
        "Сашка Пушкин",
        "перевод средств Иванову Ивану Ивановичу",
        "payment to Dr. Bill Gates Jr.",
        "ООО «Рога и Копыта» платеж 1000",
        "P\u{0430}vlov O'Connor Jean-Baptiste",
    ]
}

fn bench_unicode_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("unicode::normalize_text");
    let opts = UnicodeOptions {
        fold_homoglyphs: true,
        ..Default::default()
    };
    for (i, input) in sample_texts().into_iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), input, |b, input| {
            b.iter(|| normalize_text(black_box(input), &opts))
        });
    }
    group.finish();
}

fn bench_language_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("lang::detect");
    let config = LangConfig::default();
    // Throughput target: ≥ 10k short strings per second per core; the
    // detector must stay single-pass.
    for (i, input) in sample_texts().into_iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), input, |b, input| {
            b.iter(|| detect(black_box(input), &config))
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline::process");
    let engine = Engine::new(EngineConfig {
        cache: None,
        ..Default::default()
    });
    let options = RequestOptions::default();
    for (i, input) in sample_texts().into_iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), input, |b, input| {
            b.iter(|| engine.process(black_box(input), &options).unwrap())
        });
    }
    group.finish();
}

fn bench_pattern_generation(c: &mut Criterion) {
    use nameprep::diminutives::DiminutiveDicts;
    use nameprep::patterns::{PatternGenerator, PatternOptions};

    let mut group = c.benchmark_group("patterns::generate");
    let generator = PatternGenerator::new(DiminutiveDicts::builtin());
    let options = PatternOptions::default();
    group.bench_function("watchlist_seed", |b| {
        b.iter(|| {
            generator.generate(
                black_box("Иванов Иван Иванович паспорт AB123456"),
                nameprep::lang::Lang::Ru,
                &options,
            )
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_unicode_normalize,
    bench_language_detect,
    bench_full_pipeline,
    bench_pattern_generation
);
criterion_main!(benches);
