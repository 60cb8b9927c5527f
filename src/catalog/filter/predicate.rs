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

//! Logical predicates over the revision root and its joins.

use crate::catalog::filter::expression::{ConstraintValue, Scalar};
use crate::catalog::filter::join::{JoinHandle, Relation};
use crate::catalog::filter::operator::Operator;
use serde_json::{Value, json};
use std::fmt;

/// A stored attribute, owned either by the revision root or by one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    RevisionId,
    CommitTime,
    ObjectName,
    Kind,
    ContentType,
    LastCommitTime,
    BucketId,
    BucketName,
    MetadataKey,
    MetadataValue,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::RevisionId => "id",
            Attribute::CommitTime => "commitTime",
            Attribute::ObjectName => "name",
            Attribute::Kind => "kind",
            Attribute::ContentType => "contentType",
            Attribute::LastCommitTime => "lastCommitTime",
            Attribute::BucketId => "id",
            Attribute::BucketName => "bucketName",
            Attribute::MetadataKey => "key",
            Attribute::MetadataValue => "value",
        }
    }

    /// The relation that stores this attribute; `None` for the revision root.
    pub fn owner(self) -> Option<Relation> {
        match self {
            Attribute::RevisionId | Attribute::CommitTime => None,
            Attribute::ObjectName
            | Attribute::Kind
            | Attribute::ContentType
            | Attribute::LastCommitTime => Some(Relation::CatalogObject),
            Attribute::BucketId | Attribute::BucketName => Some(Relation::Bucket),
            Attribute::MetadataKey | Attribute::MetadataValue => Some(Relation::MetadataEntries),
        }
    }
}

/// An attribute read through a specific join (or the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub join: Option<JoinHandle>,
    pub attribute: Attribute,
}

impl Column {
    pub fn root(attribute: Attribute) -> Self {
        Column {
            join: None,
            attribute,
        }
    }

    pub fn joined(join: JoinHandle, attribute: Attribute) -> Self {
        debug_assert_eq!(attribute.owner(), Some(join.relation()));
        Column {
            join: Some(join),
            attribute,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.join {
            Some(join) => write!(f, "{}.{}", join.alias(), self.attribute.name()),
            None => write!(f, "revision.{}", self.attribute.name()),
        }
    }
}

/// Predicate tree produced by compiling a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    True,
    False,
    Compare {
        column: Column,
        operator: Operator,
        value: ConstraintValue,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(column: Column, operator: Operator, value: ConstraintValue) -> Self {
        Predicate::Compare {
            column,
            operator,
            value,
        }
    }

    /// Number of atomic comparisons in the tree.
    pub fn comparison_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(p) = stack.pop() {
            match p {
                Predicate::Compare { .. } => count += 1,
                Predicate::And(children) | Predicate::Or(children) => stack.extend(children),
                Predicate::True | Predicate::False => {}
            }
        }
        count
    }

    /// Renders the predicate as JSON, e.g.
    /// `{"type": "eq", "term": "bucket#1.bucketName", "value": "b1"}`.
    pub fn to_json(&self) -> Value {
        match self {
            Predicate::True => json!({ "type": "true" }),
            Predicate::False => json!({ "type": "false" }),
            Predicate::Compare {
                column,
                operator,
                value,
            } => match value {
                ConstraintValue::Single(scalar) => json!({
                    "type": operator.as_str(),
                    "term": column.to_string(),
                    "value": scalar_json(scalar),
                }),
                ConstraintValue::List(values) => json!({
                    "type": operator.as_str(),
                    "term": column.to_string(),
                    "values": values.iter().map(scalar_json).collect::<Vec<_>>(),
                }),
            },
            Predicate::And(children) => json!({
                "type": "and",
                "children": children.iter().map(Predicate::to_json).collect::<Vec<_>>(),
            }),
            Predicate::Or(children) => json!({
                "type": "or",
                "children": children.iter().map(Predicate::to_json).collect::<Vec<_>>(),
            }),
        }
    }
}

fn scalar_json(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Text(s) => Value::from(s.as_str()),
        Scalar::Id(id) => Value::from(*id),
    }
}
