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

use catalog_filter::catalog::MemoryCatalog;
use catalog_filter::catalog::filter::{FieldFilter, FilterExpression};
use catalog_filter::catalog::types::{Commit, MetadataEntry};

pub const BUCKET1: &str = "bucket1";
pub const BUCKET2: &str = "bucket2";
pub const EMPTY_BUCKET: &str = "bucket3";

/// Revisions in [`sample_catalog`]; the first one is superseded by the second.
pub const REVISION_COUNT: usize = 6;

/// Builds the shared fixture:
///
/// | rev | bucket  | object  | kind              | commit | metadata                          |
/// |-----|---------|---------|-------------------|--------|-----------------------------------|
/// | 1   | bucket1 | name    | workflow          | 100    | project=alpha owner=bob           |
/// | 2   | bucket1 | name    | workflow          | 200    | project=alpha owner=alice         |
/// | 3   | bucket1 | script1 | script            | 150    | lang=python                       |
/// | 4   | bucket2 | name2   | workflow          | 110    | project=beta owner=bob            |
/// | 5   | bucket2 | name3   | workflow/standard | 120    | project=alpha priority=high       |
/// | 6   | bucket2 | other   | calendar          | 130    |                                   |
pub fn sample_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    let bucket1 = catalog.create_bucket(BUCKET1, "admin");
    let bucket2 = catalog.create_bucket(BUCKET2, "user");
    catalog.create_bucket(EMPTY_BUCKET, "admin");

    let xml = "application/xml";
    let commits = [
        (bucket1, "name", "workflow", xml, 100, vec![("project", "alpha"), ("owner", "bob")]),
        (bucket1, "name", "workflow", xml, 200, vec![("project", "alpha"), ("owner", "alice")]),
        (bucket1, "script1", "script", "text/plain", 150, vec![("lang", "python")]),
        (bucket2, "name2", "workflow", xml, 110, vec![("project", "beta"), ("owner", "bob")]),
        (bucket2, "name3", "workflow/standard", xml, 120, vec![("project", "alpha"), ("priority", "high")]),
        (bucket2, "other", "calendar", "application/json", 130, vec![]),
    ];
    for (bucket_id, name, kind, content_type, commit_time, metadata) in commits {
        catalog.commit(
            Commit::builder()
                .bucket_id(bucket_id)
                .name(name)
                .kind(kind)
                .content_type(content_type)
                .commit_time(commit_time)
                .commit_message(format!("commit {name} at {commit_time}"))
                .metadata(
                    metadata
                        .into_iter()
                        .map(|(k, v)| MetadataEntry::new(k, v))
                        .collect(),
                )
                .build(),
        );
    }
    catalog
}

/// `(bucket1 AND name) OR (bucket2 AND (name2 OR name3))`
pub fn nested_fixture_expression() -> FilterExpression {
    FilterExpression::or(vec![
        FilterExpression::and(vec![
            FieldFilter::bucket_name().eq(BUCKET1),
            FieldFilter::object_name().eq("name"),
        ]),
        FilterExpression::and(vec![
            FieldFilter::bucket_name().eq(BUCKET2),
            FilterExpression::or(vec![
                FieldFilter::object_name().eq("name2"),
                FieldFilter::object_name().eq("name3"),
            ]),
        ]),
    ])
}

/// The same filter as [`nested_fixture_expression`], as a client payload.
pub const NESTED_FIXTURE_JSON: &str = r#"{
    "orArg": [
        {"andArg": [{"bucketNameArg": {"eq": "bucket1"}}, {"nameArg": {"eq": "name"}}]},
        {"andArg": [
            {"bucketNameArg": {"eq": "bucket2"}},
            {"orArg": [{"nameArg": {"eq": "name2"}}, {"nameArg": {"eq": "name3"}}]}
        ]}
    ]
}"#;

/// An AND group nested `levels` deep around a single leaf.
pub fn deeply_nested(levels: usize) -> FilterExpression {
    let mut expr = FieldFilter::kind().eq("workflow");
    for _ in 0..levels {
        expr = FilterExpression::and(vec![expr]);
    }
    expr
}

/// [`deeply_nested`] as a client payload.
pub fn deeply_nested_json(levels: usize) -> String {
    let mut payload = r#"{"kindArg": {"eq": "workflow"}}"#.to_string();
    for _ in 0..levels {
        payload = format!(r#"{{"andArg": [{payload}]}}"#);
    }
    payload
}
