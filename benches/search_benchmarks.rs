use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cluesmith::board::{Role, TeamWeights};
use cluesmith::engine::legality::LegalityFilter;
use cluesmith::engine::lexicon::Dictionary;
use cluesmith::engine::search::HintSearch;
use cluesmith::oracle::SimilarityOracle;
use cluesmith::oracle::WeightedWord;
use cluesmith::oracle::embedding::WordEmbeddings;

const DIMENSION: usize = 16;

/// Deterministic synthetic embedding: `count` pseudo-words spread over the
/// unit sphere via a trigonometric hash, no I/O.
fn make_oracle(count: usize) -> WordEmbeddings {
    let entries: Vec<(String, Vec<f32>)> = (0..count)
        .map(|i| {
            let word = format!("word{i:04}");
            let vector: Vec<f32> = (0..DIMENSION)
                .map(|d| ((i * 31 + d * 7) as f32 * 0.37).sin())
                .collect();
            (word, vector)
        })
        .collect();
    WordEmbeddings::from_vectors(entries).expect("non-empty synthetic vocabulary")
}

fn board_words(offset: usize, count: usize) -> Vec<String> {
    (offset..offset + count).map(|i| format!("word{i:04}")).collect()
}

fn bench_most_similar(c: &mut Criterion) {
    let oracle = make_oracle(2000);
    let positive = vec![WeightedWord::new("word0001", 30.0)];
    let negative: Vec<WeightedWord> = board_words(100, 17)
        .into_iter()
        .map(|w| WeightedWord::new(&w, -1.0))
        .collect();

    c.bench_function("most_similar (2000-word vocabulary)", |b| {
        b.iter(|| {
            oracle
                .most_similar(black_box(&positive), black_box(&negative), 20)
                .unwrap()
        })
    });
}

fn bench_search_level(c: &mut Criterion) {
    let oracle = make_oracle(2000);
    let legality = LegalityFilter::new(Dictionary::embedded());
    let search = HintSearch::new(&oracle, &legality, TeamWeights::default(), 20, 10);

    let targets = board_words(0, 8);
    let avoid = vec![
        (Role::Opponent, board_words(100, 8)),
        (Role::Bystander, board_words(108, 8)),
        (Role::Assassin, board_words(116, 1)),
    ];

    // C(8, 1) = 8 oracle queries.
    c.bench_function("search_level 1 (8 targets)", |b| {
        b.iter(|| search.search_level(1, black_box(&targets), black_box(&avoid)).unwrap())
    });

    // C(8, 2) = 28 oracle queries.
    c.bench_function("search_level 2 (8 targets)", |b| {
        b.iter(|| search.search_level(2, black_box(&targets), black_box(&avoid)).unwrap())
    });
}

criterion_group!(benches, bench_most_similar, bench_search_level);
criterion_main!(benches);
