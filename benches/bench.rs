//! Criterion benchmarks for vibescore.
//!
//! Covers the hot paths of scoring a story:
//! - Tokenization
//! - Naive Bayes prediction and explanation
//! - Heuristic scoring
//! - Parallel run annotation

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vibescore::analysis::tokenize;
use vibescore::heuristic::{HeuristicConfig, HeuristicScorer};
use vibescore::nb::{LabeledDocument, NbModel, NbTrainer, explain, predict};
use vibescore::report::{RunAnnotator, RunInput};

const WORDS: &[&str] = &[
    "mitten", "warm", "cozy", "blanket", "cocoa", "steam", "snow", "moon", "screamed", "teeth",
    "crunch", "wobbly", "neighbor", "color", "favorite", "tiny", "giggle", "spoon", "whisper",
    "narrator", "knows", "you're", "reading", "this", "nooks", "crannies", "glaze", "pudding",
];

/// Generate test stories for benchmarking.
fn generate_stories(count: usize) -> Vec<String> {
    let mut stories = Vec::with_capacity(count);
    for i in 0..count {
        let length = 40 + (i % 80);
        let words: Vec<&str> = (0..length)
            .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
            .collect();
        stories.push(words.join(" "));
    }
    stories
}

/// Train a model over three labels from generated stories.
fn trained_model(stories: &[String]) -> NbModel {
    let labels = ["wholesome", "kinda odd", "totally unhinged"];
    let documents: Vec<LabeledDocument> = stories
        .iter()
        .enumerate()
        .map(|(i, story)| LabeledDocument::new(story.as_str(), labels[i % labels.len()]))
        .collect();
    NbTrainer::new().train(&documents)
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let stories = generate_stories(100);

    group.bench_function("tokenize_single_story", |b| {
        b.iter(|| black_box(tokenize(black_box(&stories[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("tokenize_batch", |b| {
        b.iter(|| {
            for story in &stories {
                black_box(tokenize(black_box(story)));
            }
        })
    });

    group.finish();
}

fn bench_naive_bayes(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_bayes");
    let stories = generate_stories(300);
    let model = trained_model(&stories);

    group.bench_function("train_300_stories", |b| {
        b.iter(|| black_box(trained_model(black_box(&stories))))
    });

    group.bench_function("predict", |b| {
        b.iter(|| black_box(predict(black_box(&stories[42]), &model)))
    });

    group.bench_function("explain_top_8", |b| {
        b.iter(|| black_box(explain(black_box(&stories[42]), &model, 8)))
    });

    group.finish();
}

fn bench_heuristic(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic");
    let stories = generate_stories(10);
    let scorer = HeuristicScorer::new(
        HeuristicConfig::default()
            .with_weird_words(vec!["screamed", "teeth", "crunch", "wobbly"])
            .with_cozy_words(vec!["warm", "cozy", "blanket", "cocoa"])
            .with_self_aware_words(vec!["narrator", "you're reading this"]),
    );

    group.bench_function("score", |b| {
        b.iter(|| black_box(scorer.score(black_box(&stories[3]), 2, 5)))
    });

    group.finish();
}

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");
    group.sample_size(20);

    let stories = generate_stories(1000);
    let model = trained_model(&stories[..300]);
    let runs: Vec<RunInput> = stories
        .iter()
        .enumerate()
        .map(|(i, text)| RunInput {
            story_id: Some(format!("story{i}")),
            text: text.clone(),
            correct_count: (i % 4) as u32,
            total_steps: 4,
        })
        .collect();
    let annotator = RunAnnotator::new(&model, HeuristicScorer::default());

    group.throughput(Throughput::Elements(runs.len() as u64));
    group.bench_function("annotate_1000_runs", |b| {
        b.iter(|| black_box(annotator.annotate(black_box(&runs))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_naive_bayes,
    bench_heuristic,
    bench_annotate
);

criterion_main!(benches);
