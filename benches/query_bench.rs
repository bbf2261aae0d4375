//! 查询管道性能基准测试
//!
//! 测试覆盖：
//! - 不同数据量下的全文搜索
//! - 过滤加多键排序
//! - 经过服务层（零延迟）的完整查询

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mock_services::ReadonlyDataService;
use mock_services::generators::{DataGenerator, GeneratorConfig};
use mock_services::models::Product;
use mock_services::network::{NetworkOptions, SimulatorConfig};
use mock_services::query::{QueryOptions, SortSpec, execute};
use mock_services::services::{ProductService, ProductServiceOptions, ServiceOptions};

fn products(count: usize) -> Vec<Product> {
    DataGenerator::new(GeneratorConfig {
        product_count: count,
        ..Default::default()
    })
    .generate_products()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_search");
    let fields = vec!["name".to_string(), "description".to_string()];
    let query = QueryOptions::new().search("pro");

    for size in [100, 1_000, 10_000] {
        let items = products(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| execute(black_box(items.clone()), &query, &fields))
        });
    }

    group.finish();
}

fn bench_filter_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_filter_sort");
    let query = QueryOptions::new()
        .filter("category", "Electronics")
        .sort_by(SortSpec::desc("price"))
        .sort_by(SortSpec::asc("name"))
        .page(1, 20);

    for size in [100, 1_000, 10_000] {
        let items = products(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| execute(black_box(items.clone()), &query, &[]))
        });
    }

    group.finish();
}

fn bench_service_query(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = ProductService::new(ProductServiceOptions {
        service: ServiceOptions::default()
            .with_data(products(1_000))
            .with_network(SimulatorConfig::fixed(Duration::ZERO)),
        use_sample_data: false,
    });
    let query = QueryOptions::new()
        .search("a")
        .sort_by(SortSpec::asc("price"))
        .page(0, 20);
    let network = NetworkOptions::default();

    c.bench_function("service_query_1000", |b| {
        b.iter(|| runtime.block_on(service.query(black_box(&query), &network)))
    });
}

criterion_group!(benches, bench_search, bench_filter_sort, bench_service_query);
criterion_main!(benches);
