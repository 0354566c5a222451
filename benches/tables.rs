#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use primemap::{ChainedMap, OpenAddressingMap, StringMap, find_mode, hash};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn fill<M: StringMap<String>>(map: &mut M, items: &[(String, String)]) {
    for (key, value) in items {
        map.put(key.clone(), value.clone());
    }
}

fn lookup_all<M: StringMap<String>>(map: &M, items: &[(String, String)]) -> usize {
    items.iter().filter(|(key, _)| map.get(key).is_some()).count()
}

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec(any::<(String, String)>(), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("open addressing put", |b| {
        b.iter(|| {
            let mut map = OpenAddressingMap::new();
            fill(&mut map, &items);
            map
        });
    });
    group.bench_function("chained put", |b| {
        b.iter(|| {
            let mut map = ChainedMap::new();
            fill(&mut map, &items);
            map
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in &items {
                map.insert(key.clone(), value.clone());
            }
            map
        });
    });

    let mut open = OpenAddressingMap::new();
    fill(&mut open, &items);
    let mut chained = ChainedMap::with_hasher(11, hash::weighted_char_sum);
    fill(&mut chained, &items);
    let rust_map: HashMap<String, String> = items.iter().cloned().collect();

    group.bench_function("open addressing get", |b| {
        b.iter(|| lookup_all(&open, &items));
    });
    group.bench_function("chained get", |b| {
        b.iter(|| lookup_all(&chained, &items));
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter(|(key, _)| rust_map.contains_key(key)).count());
    });
    group.finish();

    let words: Vec<String> = items.iter().map(|(key, _)| key.chars().take(1).collect()).collect();
    c.bench_function("find mode", |b| b.iter(|| find_mode(&words)));
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
