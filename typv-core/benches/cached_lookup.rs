//! Criterion benchmark for the cache hit path (made by FontLab https://www.fontlab.com/)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typv_core::{
    FontDescriptor, ListedFont, VariableAxis, VariableDataResolver, VariableFontData,
};

fn fonts(count: usize) -> Vec<ListedFont> {
    (0..count)
        .map(|i| ListedFont {
            family: "Bench".to_string(),
            full_name: format!("Bench {i}"),
            postscript_name: if i % 2 == 0 { format!("Bench-{i}") } else { String::new() },
            is_variable: true,
            descriptor: FontDescriptor::from_path(format!("/fonts/bench-{i}.ttf")),
            ..ListedFont::default()
        })
        .collect()
}

fn fake_data(_: &FontDescriptor) -> VariableFontData {
    VariableFontData {
        axes: vec![VariableAxis {
            tag: "wght".to_string(),
            minimum: 100.0,
            maximum: 900.0,
            default: 400.0,
            ..VariableAxis::default()
        }],
        ..VariableFontData::default()
    }
}

fn bench_cached_lookup(c: &mut Criterion) {
    let fonts = fonts(512);
    let resolver = VariableDataResolver::new(
        |descriptors: &[FontDescriptor]| -> anyhow::Result<Vec<VariableFontData>> {
            Ok(descriptors.iter().map(fake_data).collect())
        },
    );
    resolver.ensure(&fonts).expect("warm cache");

    c.bench_function("lookup hit", |b| {
        b.iter(|| resolver.lookup(black_box(&fonts[257])))
    });

    c.bench_function("ensure all cached (512 fonts)", |b| {
        b.iter(|| resolver.ensure(black_box(&fonts)).unwrap())
    });
}

criterion_group!(benches, bench_cached_lookup);
criterion_main!(benches);
