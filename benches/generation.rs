use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swingen::Generator;

fn generate_synthetic_modules(count: usize) -> Vec<(String, String)> {
    let mut sources = Vec::with_capacity(count);
    for i in 0..count {
        let mut code = String::from("import Foundation\n");
        code.push_str(&format!("class Module{}: SingletonModule {{\n", i));
        code.push_str(&format!("    var service{}: Service{} {{ Service{}() }}\n", i, i, i));
        if i > 0 {
            code.push_str(&format!(
                "    func provideClient{}(_ dep: Service{}) -> Client{} {{ Client{}(dep) }}\n",
                i,
                i - 1,
                i,
                i
            ));
        }
        code.push_str("}\n");
        sources.push((format!("Module{}.swift", i), code));
    }
    sources
}

fn generate_wide_module(providers: usize) -> Vec<(String, String)> {
    let mut code = String::from("class WideModule: TransientModule {\n");
    for i in 0..providers {
        code.push_str(&format!("    var p{}: P{} {{ P{}() }}\n", i, i, i));
    }
    code.push_str("}\n");
    vec![("WideModule.swift".to_string(), code)]
}

fn bench_module_chains(c: &mut Criterion) {
    let generator = Generator::default();
    let mut group = c.benchmark_group("module_chains");
    for count in [10, 50, 200] {
        let sources = generate_synthetic_modules(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sources, |b, sources| {
            b.iter(|| black_box(generator.generate(sources).unwrap()));
        });
    }
    group.finish();
}

fn bench_wide_module(c: &mut Criterion) {
    let generator = Generator::default();
    let mut group = c.benchmark_group("wide_module");
    for providers in [100, 500] {
        let sources = generate_wide_module(providers);
        group.bench_with_input(
            BenchmarkId::from_parameter(providers),
            &sources,
            |b, sources| {
                b.iter(|| black_box(generator.generate(sources).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_module_chains, bench_wide_module);
criterion_main!(benches);
