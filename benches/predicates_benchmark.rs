use criterion::{Criterion, criterion_group, criterion_main};
use octofhir_typeguard::{JsValue, Predicate, Realm, classify, is_plain_object};
use serde_json::json;
use std::hint::black_box;

fn benchmark_plain_object_depth(c: &mut Criterion) {
    let mut realm = Realm::new();
    let mut parent = realm.object();
    for _ in 0..64 {
        parent = realm.object_with_proto(Some(parent)).unwrap();
    }
    let deep = JsValue::Object(parent);
    let literal = JsValue::Object(realm.object());

    let mut group = c.benchmark_group("is_plain_object");
    group.bench_function("literal", |b| {
        b.iter(|| black_box(is_plain_object(&realm.bind(black_box(&literal)))))
    });
    group.bench_function("chain_64", |b| {
        b.iter(|| black_box(is_plain_object(&realm.bind(black_box(&deep)))))
    });
    group.finish();
}

fn benchmark_every_predicate(c: &mut Criterion) {
    let document = json!({"name": "x", "tags": ["a", "b"], "nested": {"ok": true}});

    c.bench_function("classify_json", |b| {
        b.iter(|| black_box(classify(black_box(&document))))
    });

    c.bench_function("registry_dispatch_json", |b| {
        b.iter(|| {
            Predicate::ALL
                .iter()
                .filter(|p| p.evaluate(black_box(&document)))
                .count()
        })
    });
}

criterion_group!(benches, benchmark_plain_object_depth, benchmark_every_predicate);
criterion_main!(benches);
