//! FILENAME: core/datatable-engine/benches/datatable_calculations.rs
//! Benchmarks for view recomputation over screen-sized collections.

use catalog::Record;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datatable_engine::{DataTableEngine, TableConfig};

fn make_fields(count: usize) -> Vec<Record> {
    let roles = ["measure", "dimension"];
    let types = ["string", "integer", "real", "date", "boolean"];
    (0..count)
        .map(|i| {
            Record::new()
                .with("name", format!("Field {}", i))
                .with("role", roles[i % roles.len()])
                .with("data_type", types[i % types.len()])
                .with("datasource_name", format!("Datasource {}", i % 37))
                .with("usage_count", ((i * 31) % 997) as f64)
        })
        .collect()
}

fn config() -> TableConfig {
    TableConfig::new("fields")
        .with_facets(["role", "data_type", "datasource_name"])
        .with_search(["name", "datasource_name"])
        .with_page_size(50)
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    for size in [1_000usize, 10_000] {
        let mut engine = DataTableEngine::new(make_fields(size), config());
        engine.set_filter("role", ["measure"]);
        engine.set_filter("data_type", ["integer", "real"]);
        engine.set_sort("usage_count");

        group.bench_with_input(BenchmarkId::new("filtered_sorted", size), &engine, |b, engine| {
            b.iter(|| {
                let view = engine.view();
                black_box(view.display_data().len())
            })
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut engine = DataTableEngine::new(make_fields(10_000), config());
    engine.set_search_term("datasource 1");
    c.bench_function("search_10k", |b| b.iter(|| black_box(engine.filtered_count())));
}

criterion_group!(benches, bench_view, bench_search);
criterion_main!(benches);
