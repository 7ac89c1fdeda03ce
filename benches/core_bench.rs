//! Benchmarks for roxci core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roxci::core::directive::{find_directive, Directive};
use roxci::core::parser::parse_recipes;
use roxci::{evaluate, Recipe, RecipeCatalog};

fn catalog(recipes: usize, jobs_per_recipe: usize) -> RecipeCatalog {
    RecipeCatalog::new(
        (0..recipes)
            .map(|r| {
                Recipe::new(
                    &format!("recipe-{r}"),
                    "generated",
                    (0..jobs_per_recipe).map(|j| format!("job-{r}-{j}")),
                )
            })
            .collect(),
    )
}

fn history(len: usize) -> Vec<String> {
    let mut messages: Vec<String> = (0..len).map(|i| format!("commit number {i}")).collect();
    if let Some(mid) = messages.get_mut(len / 2) {
        *mid = "/roxci recipe=recipe-3,recipe-7 include=extra exclude=job-3-1".to_string();
    }
    messages
}

fn bench_find_directive(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_directive");
    for len in [10, 100, 1000] {
        let messages = history(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &messages, |b, messages| {
            b.iter(|| black_box(find_directive(black_box(messages))));
        });
    }
    group.finish();
}

fn bench_directive_parse(c: &mut Criterion) {
    c.bench_function("directive_parse", |b| {
        b.iter(|| {
            Directive::parse(black_box(
                "recipe=one,two recipe=three include=a,b,c exclude=d,e",
            ))
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for recipes in [10, 100] {
        let catalog = catalog(recipes, 20);
        let messages = history(100);
        group.bench_with_input(BenchmarkId::from_parameter(recipes), &catalog, |b, catalog| {
            b.iter(|| evaluate(black_box("job-7-19"), &messages, catalog));
        });
    }
    group.finish();
}

fn bench_yaml_parse(c: &mut Criterion) {
    let yaml: String = (0..50)
        .map(|r| format!("- name: recipe-{r}\n  description: generated\n  jobs: [a-{r}, b-{r}, c-{r}]\n"))
        .collect();
    c.bench_function("yaml_parse", |b| {
        b.iter(|| parse_recipes(black_box(&yaml)));
    });
}

criterion_group!(
    benches,
    bench_find_directive,
    bench_directive_parse,
    bench_evaluate,
    bench_yaml_parse
);
criterion_main!(benches);
