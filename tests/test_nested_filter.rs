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

use catalog_filter::catalog::filter::{
    CatalogObjectWhereArgs, FieldId, FilterCompiler, FilterExpression, Relation, Specification,
};
use catalog_filter::catalog::{FilterError, PageRequest};
use catalog_filter_common::example::{NESTED_FIXTURE_JSON, nested_fixture_expression};
use catalog_filter_common::test_context::TestContext;

fn leaf_field(spec: &Specification) -> &FieldId {
    spec.as_leaf().expect("expected a leaf specification").field()
}

#[test]
fn nested_fixture_structure() {
    let expr = nested_fixture_expression();
    let compiled = FilterCompiler::default().compile(Some(&expr)).unwrap();
    let spec = compiled.specification();

    assert!(spec.is_or());
    assert_eq!(spec.children().len(), 2);

    let first = spec.child(0).unwrap();
    assert!(first.is_and());
    assert_eq!(first.children().len(), 2);
    assert_eq!(leaf_field(first.child(0).unwrap()), &FieldId::BucketName);
    assert_eq!(leaf_field(first.child(1).unwrap()), &FieldId::ObjectName);

    let second = spec.child(1).unwrap();
    assert!(second.is_and());
    assert_eq!(second.children().len(), 2);
    assert_eq!(leaf_field(second.child(0).unwrap()), &FieldId::BucketName);

    let inner = second.child(1).unwrap();
    assert!(inner.is_or());
    assert_eq!(inner.children().len(), 2);
    for leaf in inner.children() {
        assert_eq!(leaf_field(leaf), &FieldId::ObjectName);
    }

    // four bucket/name leaves, one join per relation
    let graph = compiled.join_graph();
    assert_eq!(graph.len(), 2);
    assert!(graph.contains(Relation::CatalogObject));
    assert!(graph.contains(Relation::Bucket));
    assert!(!compiled.needs_distinct());
}

#[test]
fn nested_fixture_negative_index() {
    let expr = nested_fixture_expression();
    let compiled = FilterCompiler::default().compile(Some(&expr)).unwrap();
    let spec = compiled.specification();

    match spec.child(-1) {
        Err(FilterError::ChildIndexOutOfBounds { index, len }) => {
            assert_eq!(index, -1);
            assert_eq!(len, 2);
        }
        other => panic!("expected ChildIndexOutOfBounds, got {other:?}"),
    }
    assert!(spec.child(2).is_err());
    assert!(spec.child(1).unwrap().child(1).unwrap().child(-1).is_err());
}

#[test]
fn nested_fixture_search() {
    let ctx = TestContext::new_from_env();
    let expr = nested_fixture_expression();
    // bucket1/name matches only through its latest revision
    assert_eq!(ctx.names(Some(&expr)), vec!["name", "name2", "name3"]);
}

#[test]
fn nested_fixture_from_payload() {
    let ctx = TestContext::new_from_env();
    let args = CatalogObjectWhereArgs::from_json(NESTED_FIXTURE_JSON)
        .unwrap()
        .unwrap();
    let expr = FilterExpression::try_from(&args).unwrap();
    assert_eq!(expr, nested_fixture_expression());

    let page = ctx
        .search_json(NESTED_FIXTURE_JSON, &PageRequest::default())
        .unwrap();
    assert_eq!(page.total_count, 3);
    let names: Vec<&str> = page.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["name", "name2", "name3"]);
}
