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

use catalog_filter::catalog::filter::{CompiledFilter, FieldFilter, FilterExpression};
use catalog_filter::catalog::{OrderBy, PageRequest, SpecificationExecutor};
use catalog_filter_common::example::{REVISION_COUNT, sample_catalog};
use catalog_filter_common::test_context::TestContext;

#[test]
fn absent_filter_matches_every_revision() {
    let ctx = TestContext::new_from_env();
    assert_eq!(
        ctx.names(None),
        vec!["name", "name", "script1", "name2", "name3", "other"]
    );

    let page = ctx.search_json("null", &PageRequest::default()).unwrap();
    assert_eq!(page.total_count, REVISION_COUNT);
    assert_eq!(page.size, 50);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn field_operators() {
    let ctx = TestContext::new_from_env();

    let expr = FieldFilter::kind().like("workflow%");
    assert_eq!(ctx.names(Some(&expr)), vec!["name", "name2", "name3"]);

    let expr = FieldFilter::kind().not_like("work%");
    assert_eq!(ctx.names(Some(&expr)), vec!["script1", "other"]);

    let expr = FieldFilter::object_name().like("name_");
    assert_eq!(ctx.names(Some(&expr)), vec!["name2", "name3"]);

    let expr = FieldFilter::bucket_id().is_in([2_i64]);
    assert_eq!(ctx.names(Some(&expr)), vec!["name2", "name3", "other"]);

    let expr = FieldFilter::bucket_id().not_in([1_i64]);
    assert_eq!(ctx.names(Some(&expr)), vec!["name2", "name3", "other"]);

    let expr = FieldFilter::bucket_id().gte(3_i64);
    assert!(ctx.names(Some(&expr)).is_empty());

    let expr = FieldFilter::content_type().ne("application/xml");
    assert_eq!(ctx.names(Some(&expr)), vec!["script1", "other"]);

    let expr = FieldFilter::object_name().lt("name2");
    assert_eq!(ctx.names(Some(&expr)), vec!["name"]);
}

#[test]
fn empty_groups() {
    let ctx = TestContext::new_from_env();
    assert_eq!(ctx.names(Some(&FilterExpression::and(vec![]))).len(), REVISION_COUNT);
    assert!(ctx.names(Some(&FilterExpression::or(vec![]))).is_empty());
}

#[test]
fn paging() {
    let ctx = TestContext::new_from_env();

    let request = PageRequest::builder().size(4).build();
    let page = ctx.search(None, &request).unwrap();
    assert_eq!(page.rows.len(), 4);
    assert_eq!(page.total_count, REVISION_COUNT);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next);
    assert!(!page.has_previous);

    let request = PageRequest::builder().page(1).size(4).build();
    let page = ctx.search(None, &request).unwrap();
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[1].name, "other");
    assert!(!page.has_next);
    assert!(page.has_previous);

    let request = PageRequest::builder().page(5).size(4).build();
    let page = ctx.search(None, &request).unwrap();
    assert!(page.rows.is_empty());
    assert_eq!(page.total_count, REVISION_COUNT);
}

#[test]
fn ordering() {
    let catalog = sample_catalog();
    let filter = CompiledFilter::pass_through();
    let names = |order_by: OrderBy| -> Vec<String> {
        let request = PageRequest::builder().order_by(order_by).build();
        catalog
            .find_all(&filter, &request)
            .unwrap()
            .rows
            .into_iter()
            .map(|r| r.name)
            .collect()
    };

    assert_eq!(
        names(OrderBy::CatalogObjectKeyDesc),
        vec!["other", "name3", "name2", "script1", "name", "name"]
    );
    assert_eq!(
        names(OrderBy::KindAsc),
        vec!["other", "script1", "name", "name", "name2", "name3"]
    );
    assert_eq!(
        names(OrderBy::KindDesc),
        vec!["name3", "name2", "name", "name", "script1", "other"]
    );
}
