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

use catalog_filter::catalog::SpecificationExecutor;
use catalog_filter::catalog::filter::{
    FieldFilter, FilterCompiler, FilterExpression, JoinGraph, Relation,
};
use catalog_filter_common::test_context::TestContext;

#[test]
fn repeated_relations_join_once() {
    let expr = FilterExpression::or(vec![
        FieldFilter::bucket_name().eq("bucket1"),
        FieldFilter::bucket_id().is_in([1_i64, 2]),
        FilterExpression::and(vec![
            FieldFilter::metadata("project").eq("alpha"),
            FieldFilter::metadata("owner").like("b%"),
            FieldFilter::kind().eq("workflow"),
        ]),
        FieldFilter::metadata("priority").ne("low"),
    ]);
    let compiled = FilterCompiler::default().compile(Some(&expr)).unwrap();
    let graph = compiled.join_graph();

    assert_eq!(graph.len(), Relation::ALL.len());
    for relation in Relation::ALL {
        let count = graph
            .joins()
            .iter()
            .filter(|j| j.relation() == relation)
            .count();
        assert_eq!(count, 1, "{relation}");
    }
    assert!(compiled.needs_distinct());
    assert_eq!(compiled.to_json()["joins"]["joins"].as_array().unwrap().len(), 3);
}

#[test]
fn compile_into_shared_graph() {
    let compiler = FilterCompiler::default();
    let mut graph = JoinGraph::new();
    compiler
        .compile_into(&FieldFilter::object_name().eq("a"), &mut graph)
        .unwrap();
    compiler
        .compile_into(&FieldFilter::bucket_name().eq("b"), &mut graph)
        .unwrap();
    compiler
        .compile_into(&FieldFilter::content_type().eq("c"), &mut graph)
        .unwrap();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get(Relation::CatalogObject).unwrap().id(), 0);
}

#[test]
fn anded_metadata_constraints_match_the_same_entry() {
    let ctx = TestContext::new_from_env();

    // no single metadata entry is both project=alpha and owner=bob
    let expr = FilterExpression::and(vec![
        FieldFilter::metadata("project").eq("alpha"),
        FieldFilter::metadata("owner").eq("bob"),
    ]);
    assert!(ctx.names(Some(&expr)).is_empty());

    // both constraints on the same entry do match
    let expr = FilterExpression::and(vec![
        FieldFilter::metadata("project").eq("alpha"),
        FieldFilter::metadata("project").like("al%"),
    ]);
    assert_eq!(ctx.names(Some(&expr)), vec!["name", "name3"]);
}

#[test]
fn one_to_many_join_does_not_multiply_rows() {
    let ctx = TestContext::new_from_env();

    // revision 4 has two entries matching this filter and is listed once
    let expr = FilterExpression::or(vec![
        FieldFilter::metadata("project").eq("beta"),
        FieldFilter::metadata("owner").eq("bob"),
    ]);
    assert_eq!(ctx.names(Some(&expr)), vec!["name2"]);

    let filter = ctx.compiler.compile(Some(&expr)).unwrap();
    assert!(filter.needs_distinct());
    assert_eq!(ctx.catalog.count(&filter).unwrap(), 1);
}

#[test]
fn metadata_filters_see_latest_revisions_only() {
    let ctx = TestContext::new_from_env();
    let metadata = FieldFilter::metadata("project").eq("alpha");
    // revision 1 of "name" is superseded by revision 2
    assert_eq!(ctx.names(Some(&metadata)), vec!["name", "name3"]);

    let filter = ctx.compiler.compile(Some(&metadata)).unwrap();
    assert!(filter.join_graph().contains(Relation::CatalogObject));

    let expr = FilterExpression::and(vec![metadata, FieldFilter::bucket_name().eq("bucket1")]);
    assert_eq!(ctx.names(Some(&expr)), vec!["name"]);
}

#[test]
fn never_matching_branch_leaves_results_unchanged() {
    let ctx = TestContext::new_from_env();
    let never = FieldFilter::kind().eq("no-such-kind");
    for x in [
        FieldFilter::metadata("project").eq("alpha"),
        FieldFilter::metadata("owner").like("b%"),
        FieldFilter::object_name().eq("name"),
    ] {
        let x_or_false = FilterExpression::or(vec![x.clone(), never.clone()]);
        let x_and_true = FilterExpression::and(vec![x.clone(), FilterExpression::and(vec![])]);
        assert_eq!(ctx.names(Some(&x)), ctx.names(Some(&x_or_false)), "{x:?}");
        assert_eq!(ctx.names(Some(&x)), ctx.names(Some(&x_and_true)), "{x:?}");
    }
}
