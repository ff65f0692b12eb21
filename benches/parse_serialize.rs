use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genjson::{Document, DocumentConfig, SerializeOptions};

fn sample_document(entries: usize) -> String {
    let mut out = String::from("{\"entries\":[");
    for i in 0..entries {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            "{{\"id\":{i},\"name\":\"entry-{i}\",\"score\":{}.25,\"tags\":[\"a\",\"b\"],\"live\":{}}}",
            i * 3,
            i % 2 == 0
        ));
    }
    out.push_str("],\"count\":");
    out.push_str(&entries.to_string());
    out.push('}');
    out
}

fn bench_parse(c: &mut Criterion) {
    let input = sample_document(64);

    c.bench_function("parse_64_entries", |b| {
        b.iter(|| {
            let mut doc =
                Document::with_config(DocumentConfig::new().with_max_value_count(4096));
            let root = doc.parse(black_box(&input)).unwrap();
            black_box(root);
        })
    });
}

fn bench_serialize(c: &mut Criterion) {
    let input = sample_document(64);
    let mut doc = Document::with_config(DocumentConfig::new().with_max_value_count(4096));
    let root = doc.parse(&input).unwrap();

    c.bench_function("serialize_minified_64_entries", |b| {
        b.iter(|| black_box(doc.serialize(black_box(root), &SerializeOptions::minified()).unwrap()))
    });

    c.bench_function("serialize_pretty_64_entries", |b| {
        b.iter(|| black_box(doc.serialize(black_box(root), &SerializeOptions::default()).unwrap()))
    });
}

criterion_group!(benches, bench_parse, bench_serialize);
criterion_main!(benches);
