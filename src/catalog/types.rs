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

//! Catalog entities and an in-memory catalog holding them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use typed_builder::TypedBuilder;

/// Commit times are milliseconds since the Unix epoch.
pub type CommitTime = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: i64,
    pub bucket_name: String,
    pub owner: String,
}

/// An object in a bucket, keyed by `(bucket_id, name)`.
///
/// `kind` and `content_type` follow the latest commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogObject {
    pub bucket_id: i64,
    pub name: String,
    pub kind: String,
    pub content_type: String,
    pub last_commit_time: CommitTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataEntry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One committed version of a catalog object; the query root of filtered
/// searches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogObjectRevision {
    pub id: i64,
    pub bucket_id: i64,
    pub name: String,
    pub commit_time: CommitTime,
    pub commit_message: String,
    pub metadata: Vec<MetadataEntry>,
}

/// A new revision to record with [`MemoryCatalog::commit`].
#[derive(Clone, Debug, TypedBuilder)]
pub struct Commit {
    #[builder(!default)]
    pub bucket_id: i64,
    #[builder(!default, setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub kind: String,
    #[builder(setter(into))]
    pub content_type: String,
    #[builder(!default)]
    pub commit_time: CommitTime,
    #[builder(default, setter(into))]
    pub commit_message: String,
    #[builder(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Buckets, objects and revisions held in memory.
///
/// No referential checks are made on insert; a revision whose object or
/// bucket is missing simply never survives a join.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    buckets: BTreeMap<i64, Bucket>,
    objects: BTreeMap<(i64, String), CatalogObject>,
    revisions: Vec<CatalogObjectRevision>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bucket and returns its id.
    pub fn create_bucket(&mut self, name: impl Into<String>, owner: impl Into<String>) -> i64 {
        let id = self.buckets.keys().next_back().map_or(1, |last| last + 1);
        self.insert_bucket(Bucket {
            id,
            bucket_name: name.into(),
            owner: owner.into(),
        });
        id
    }

    pub fn insert_bucket(&mut self, bucket: Bucket) {
        self.buckets.insert(bucket.id, bucket);
    }

    pub fn insert_object(&mut self, object: CatalogObject) {
        self.objects
            .insert((object.bucket_id, object.name.clone()), object);
    }

    pub fn insert_revision(&mut self, revision: CatalogObjectRevision) {
        self.revisions.push(revision);
    }

    /// Records a revision and upserts its catalog object. Returns the
    /// revision id.
    ///
    /// The object's kind and content type are taken from the commit when it
    /// is the newest one seen for that object.
    pub fn commit(&mut self, commit: Commit) -> i64 {
        let id = self.revisions.last().map_or(1, |r| r.id + 1);
        let key = (commit.bucket_id, commit.name.clone());
        match self.objects.get_mut(&key) {
            Some(object) if object.last_commit_time > commit.commit_time => {}
            Some(object) => {
                object.kind = commit.kind;
                object.content_type = commit.content_type;
                object.last_commit_time = commit.commit_time;
            }
            None => {
                self.objects.insert(
                    key,
                    CatalogObject {
                        bucket_id: commit.bucket_id,
                        name: commit.name.clone(),
                        kind: commit.kind,
                        content_type: commit.content_type,
                        last_commit_time: commit.commit_time,
                    },
                );
            }
        }
        log::debug!(
            "committed revision {id} of {}/{} at {}",
            commit.bucket_id,
            commit.name,
            commit.commit_time
        );
        self.revisions.push(CatalogObjectRevision {
            id,
            bucket_id: commit.bucket_id,
            name: commit.name,
            commit_time: commit.commit_time,
            commit_message: commit.commit_message,
            metadata: commit.metadata,
        });
        id
    }

    pub fn bucket(&self, id: i64) -> Option<&Bucket> {
        self.buckets.get(&id)
    }

    pub fn bucket_by_name(&self, name: &str) -> Option<&Bucket> {
        self.buckets.values().find(|b| b.bucket_name == name)
    }

    pub fn object(&self, bucket_id: i64, name: &str) -> Option<&CatalogObject> {
        self.objects.get(&(bucket_id, name.to_string()))
    }

    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.values()
    }

    pub fn objects(&self) -> impl Iterator<Item = &CatalogObject> {
        self.objects.values()
    }

    /// Revisions in insertion order.
    pub fn revisions(&self) -> &[CatalogObjectRevision] {
        &self.revisions
    }
}
