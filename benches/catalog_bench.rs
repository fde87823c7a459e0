use catalog::{CatalogConfig, PageRequest, ProductCatalog, ProductDraft, ProductFilter};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

fn populated(size: usize) -> ProductCatalog {
    let catalog = ProductCatalog::new(CatalogConfig::default());
    let categories = ["Electronics", "Kitchen", "Office", "Garden"];
    for i in 0..size {
        let draft = ProductDraft::new(format!("product-{i}"), i as f64, categories[i % 4])
            .with_description(format!("description for item {i}"))
            .with_in_stock(i % 2 == 0);
        catalog.create(draft).expect("create");
    }
    catalog
}

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    for size in [100, 1000, 10_000].iter() {
        let catalog = populated(*size);
        group.throughput(Throughput::Elements(*size as u64));

        let filter = ProductFilter::default().category("kitchen").in_stock(true);
        group.bench_function(format!("list_filtered_{size}"), |b| {
            b.iter(|| {
                catalog
                    .list(black_box(&filter), PageRequest::first(10))
                    .expect("list")
            })
        });

        group.bench_function(format!("search_{size}"), |b| {
            b.iter(|| catalog.search(black_box("item 9")).expect("search"))
        });

        group.bench_function(format!("stats_{size}"), |b| {
            b.iter(|| catalog.stats().expect("stats"))
        });
    }

    group.bench_function("create_single", |b| {
        let catalog = ProductCatalog::new(CatalogConfig::default());
        b.iter(|| {
            catalog
                .create(black_box(ProductDraft::new("bench", 1.0, "Bench")))
                .expect("create")
        })
    });

    group.finish();
}

criterion_group!(benches, bench_catalog);
criterion_main!(benches);
