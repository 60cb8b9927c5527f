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

//! Leaf constraint specifications.
//!
//! A leaf turns one [`FieldConstraint`] into an atomic [`Predicate`] over the
//! join graph. Fields stored on a related entity go through
//! [`JoinGraph::get_or_create_join`], so every leaf that touches the same
//! relation reads the same joined row.

use crate::catalog::error::FilterError;
use crate::catalog::filter::expression::{ConstraintValue, FieldConstraint, FieldId};
use crate::catalog::filter::join::{JoinGraph, Relation};
use crate::catalog::filter::operator::{Operator, check_operator};
use crate::catalog::filter::predicate::{Attribute, Column, Predicate};

/// A compiled field constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafSpecification {
    constraint: FieldConstraint,
    predicate: Predicate,
}

impl LeafSpecification {
    /// Compiles `constraint` against `graph`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::UnsupportedOperator`] if the field does not accept the operator.
    /// - [`FilterError::InvalidConstraint`] if the value disagrees with the
    ///   field type or the operator arity, or the metadata key is empty.
    pub fn compile(constraint: FieldConstraint, graph: &mut JoinGraph) -> Result<Self, FilterError> {
        check_operator(constraint.field.kind(), constraint.operator)?;
        constraint.validate_value()?;

        let predicate = match &constraint.field {
            FieldId::BucketId => joined(graph, Attribute::BucketId, &constraint),
            FieldId::BucketName => joined(graph, Attribute::BucketName, &constraint),
            FieldId::ObjectName => joined(graph, Attribute::ObjectName, &constraint),
            FieldId::Kind => joined(graph, Attribute::Kind, &constraint),
            FieldId::ContentType => joined(graph, Attribute::ContentType, &constraint),
            FieldId::HasMetadata(key) => {
                if key.is_empty() {
                    return Err(FilterError::invalid_constraint(
                        &constraint.field,
                        "metadata key must not be empty",
                    ));
                }
                // restricts to the latest revision like every other field
                graph.get_or_create_join(Relation::CatalogObject);
                // key and value are read from the same metadata row
                let entries = graph.get_or_create_join(Relation::MetadataEntries);
                Predicate::And(vec![
                    Predicate::compare(
                        Column::joined(entries, Attribute::MetadataKey),
                        Operator::Eq,
                        ConstraintValue::from(key.as_str()),
                    ),
                    Predicate::compare(
                        Column::joined(entries, Attribute::MetadataValue),
                        constraint.operator,
                        constraint.value.clone(),
                    ),
                ])
            }
        };

        Ok(LeafSpecification {
            constraint,
            predicate,
        })
    }

    pub fn field(&self) -> &FieldId {
        &self.constraint.field
    }

    pub fn constraint(&self) -> &FieldConstraint {
        &self.constraint
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

fn joined(graph: &mut JoinGraph, attribute: Attribute, constraint: &FieldConstraint) -> Predicate {
    let column = match attribute.owner() {
        Some(relation) => Column::joined(graph.get_or_create_join(relation), attribute),
        None => Column::root(attribute),
    };
    Predicate::compare(column, constraint.operator, constraint.value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::expression::{FieldFilter, FilterExpression};
    use serde_json::json;

    fn leaf(expr: FilterExpression, graph: &mut JoinGraph) -> Result<LeafSpecification, FilterError> {
        match expr {
            FilterExpression::Constraint(c) => LeafSpecification::compile(c, graph),
            other => panic!("expected a constraint, got {other:?}"),
        }
    }

    #[test]
    fn test_bucket_name_joins_through_catalog_object() {
        let mut graph = JoinGraph::new();
        let spec = leaf(FieldFilter::bucket_name().eq("bucket1"), &mut graph).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(Relation::CatalogObject));
        assert!(graph.contains(Relation::Bucket));
        assert!(!graph.needs_distinct());
        assert_eq!(spec.predicate().to_json()["term"], "bucket#1.bucketName");
    }

    #[test]
    fn test_object_fields_share_one_join() {
        let mut graph = JoinGraph::new();
        leaf(FieldFilter::object_name().eq("a"), &mut graph).unwrap();
        leaf(FieldFilter::kind().like("work%"), &mut graph).unwrap();
        leaf(FieldFilter::content_type().ne("text/xml"), &mut graph).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_metadata_matches_key_and_value_on_same_row() {
        let mut graph = JoinGraph::new();
        let spec = leaf(FieldFilter::metadata("project").like("alpha%"), &mut graph).unwrap();
        assert!(graph.needs_distinct());
        assert!(graph.contains(Relation::CatalogObject));
        assert_eq!(graph.len(), 2);
        assert_eq!(
            spec.predicate().to_json(),
            json!({
                "type": "and",
                "children": [
                    {"type": "eq", "term": "keyValueMetadataList#1.key", "value": "project"},
                    {"type": "like", "term": "keyValueMetadataList#1.value", "value": "alpha%"},
                ]
            })
        );

        let err = leaf(FieldFilter::metadata("").eq("x"), &mut graph).unwrap_err();
        assert!(matches!(err, FilterError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_rejected_before_touching_the_graph() {
        let mut graph = JoinGraph::new();
        let err = leaf(FieldFilter::bucket_id().like("1%"), &mut graph).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperator { .. }));
        let err = leaf(FieldFilter::bucket_id().eq("one"), &mut graph).unwrap_err();
        assert!(matches!(err, FilterError::InvalidConstraint { .. }));
        assert!(graph.is_empty());
    }
}
