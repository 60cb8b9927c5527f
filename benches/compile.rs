// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use catalog_filter::catalog::filter::{FieldFilter, FilterCompiler, FilterExpression};
use catalog_filter::catalog::{CompilerConfig, PageRequest, SpecificationExecutor};
use catalog_filter_common::example::{deeply_nested, nested_fixture_expression, sample_catalog};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wide_expression(width: usize) -> FilterExpression {
    FilterExpression::or(
        (0..width)
            .map(|i| match i % 3 {
                0 => FieldFilter::bucket_name().eq(format!("bucket{i}")),
                1 => FieldFilter::object_name().like(format!("name{i}%")),
                _ => FieldFilter::metadata("project").eq(format!("p{i}")),
            })
            .collect(),
    )
}

fn bench_compile(c: &mut Criterion) {
    let compiler = FilterCompiler::default();

    let wide = wide_expression(1_000);
    c.bench_function("compile wide or(1000)", |b| {
        b.iter(|| compiler.compile(Some(black_box(&wide))))
    });

    let deep_compiler = FilterCompiler::new(CompilerConfig::builder().max_depth(256).build());
    let deep = deeply_nested(250);
    c.bench_function("compile deep and(250)", |b| {
        b.iter(|| deep_compiler.compile(Some(black_box(&deep))))
    });

    let nested = nested_fixture_expression();
    c.bench_function("compile nested fixture", |b| {
        b.iter(|| compiler.compile(Some(black_box(&nested))))
    });
}

fn bench_find_all(c: &mut Criterion) {
    let catalog = sample_catalog();
    let request = PageRequest::default();
    let filter = match FilterCompiler::default().compile(Some(&nested_fixture_expression())) {
        Ok(filter) => filter,
        Err(e) => panic!("fixture does not compile: {e}"),
    };
    c.bench_function("find_all nested fixture", |b| {
        b.iter(|| catalog.find_all(black_box(&filter), &request))
    });
}

criterion_group!(benches, bench_compile, bench_find_all);
criterion_main!(benches);
