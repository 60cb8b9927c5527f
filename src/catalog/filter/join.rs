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

//! Join graph manager.
//!
//! A [`JoinGraph`] is created fresh for every compiled query and passed by
//! mutable reference through the whole compile pass. Each relation appears in
//! it at most once; leaf specifications obtain joins through
//! [`JoinGraph::get_or_create_join`] and never construct a [`JoinHandle`]
//! themselves.

use crate::catalog::error::FilterError;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// How many rows of the target a single source row reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    ManyToOne,
    OneToMany,
}

/// A relation of the entity model, reachable from the revision query root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// Revision to its catalog object, restricted to the latest revision
    CatalogObject,
    /// Catalog object to its owning bucket
    Bucket,
    /// Revision to its metadata entries
    MetadataEntries,
}

impl Relation {
    pub const ALL: [Relation; 3] = [
        Relation::CatalogObject,
        Relation::Bucket,
        Relation::MetadataEntries,
    ];

    /// Entity model name of the relation.
    pub fn name(self) -> &'static str {
        match self {
            Relation::CatalogObject => "catalogObject",
            Relation::Bucket => "bucket",
            Relation::MetadataEntries => "keyValueMetadataList",
        }
    }

    /// The relation this one hangs off, or `None` when it starts at the root.
    pub fn parent(self) -> Option<Relation> {
        match self {
            Relation::Bucket => Some(Relation::CatalogObject),
            Relation::CatalogObject | Relation::MetadataEntries => None,
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            Relation::CatalogObject | Relation::Bucket => Cardinality::ManyToOne,
            Relation::MetadataEntries => Cardinality::OneToMany,
        }
    }

    /// Returns true when joining this relation can produce several rows per
    /// root row, either directly or through its parent chain.
    pub fn fans_out(self) -> bool {
        let mut current = Some(self);
        while let Some(relation) = current {
            if relation.cardinality() == Cardinality::OneToMany {
                return true;
            }
            current = relation.parent();
        }
        false
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relation::ALL
            .into_iter()
            .find(|relation| relation.name() == s)
            .ok_or_else(|| FilterError::UnknownRelation(s.to_string()))
    }
}

/// Token for a join created in one [`JoinGraph`].
///
/// Ids are assigned in creation order starting at zero and are only meaningful
/// within the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinHandle {
    id: usize,
    relation: Relation,
}

impl JoinHandle {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Alias under which the join is rendered, e.g. `bucket#1`.
    pub fn alias(&self) -> String {
        format!("{}#{}", self.relation.name(), self.id)
    }
}

/// Per-query memo of created joins.
#[derive(Debug, Clone, Default)]
pub struct JoinGraph {
    joins: Vec<JoinHandle>,
    needs_distinct: bool,
}

impl JoinGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the join for `relation`, creating it (and any missing parent
    /// join) on first use.
    ///
    /// Creating a join whose path fans out from the root sets
    /// [`needs_distinct`](Self::needs_distinct).
    pub fn get_or_create_join(&mut self, relation: Relation) -> JoinHandle {
        if let Some(existing) = self.get(relation) {
            return existing;
        }
        if let Some(parent) = relation.parent() {
            self.get_or_create_join(parent);
        }
        let handle = JoinHandle {
            id: self.joins.len(),
            relation,
        };
        self.joins.push(handle);
        if relation.fans_out() {
            self.needs_distinct = true;
        }
        log::debug!(
            "created join {} (distinct: {})",
            handle.alias(),
            self.needs_distinct
        );
        handle
    }

    /// Like [`get_or_create_join`](Self::get_or_create_join), resolving the
    /// relation by its entity model name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownRelation`] when no relation has that name.
    pub fn get_or_create_join_by_name(&mut self, name: &str) -> Result<JoinHandle, FilterError> {
        let relation: Relation = name.parse()?;
        Ok(self.get_or_create_join(relation))
    }

    pub fn get(&self, relation: Relation) -> Option<JoinHandle> {
        self.joins.iter().copied().find(|j| j.relation == relation)
    }

    /// Returns the join `handle` is attached to, `None` for root joins.
    pub fn parent_of(&self, handle: JoinHandle) -> Option<JoinHandle> {
        handle.relation.parent().and_then(|parent| self.get(parent))
    }

    pub fn contains(&self, relation: Relation) -> bool {
        self.get(relation).is_some()
    }

    /// Joins in creation order. Parents always precede their children.
    pub fn joins(&self) -> &[JoinHandle] {
        &self.joins
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    pub fn needs_distinct(&self) -> bool {
        self.needs_distinct
    }

    pub fn to_json(&self) -> Value {
        let joins: Vec<Value> = self
            .joins
            .iter()
            .map(|j| {
                json!({
                    "alias": j.alias(),
                    "relation": j.relation.name(),
                    "parent": self.parent_of(*j).map(|p| p.alias()),
                })
            })
            .collect();
        json!({
            "joins": joins,
            "distinct": self.needs_distinct,
        })
    }
}
