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

//! Client-facing filter expression tree.
//!
//! A [`FilterExpression`] node is exactly one of a field constraint, an AND
//! group or an OR group. Group children keep insertion order.
//!
//! # Example
//!
//! ```
//! use catalog_filter::catalog::filter::{FieldFilter, FilterExpression};
//!
//! // (bucketName = "bucket1" AND name = "name") OR kind like "workflow%"
//! let filter = FilterExpression::or(vec![
//!     FilterExpression::and(vec![
//!         FieldFilter::bucket_name().eq("bucket1"),
//!         FieldFilter::object_name().eq("name"),
//!     ]),
//!     FieldFilter::kind().like("workflow%"),
//! ]);
//! assert!(filter.is_group());
//! ```

use crate::catalog::error::FilterError;
use crate::catalog::filter::operator::{Operator, ValueType};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// Filterable field, without the metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    BucketId,
    BucketName,
    ObjectName,
    Kind,
    ContentType,
    HasMetadata,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::BucketId,
        FieldKind::BucketName,
        FieldKind::ObjectName,
        FieldKind::Kind,
        FieldKind::ContentType,
        FieldKind::HasMetadata,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::BucketId => "bucketId",
            FieldKind::BucketName => "bucketName",
            FieldKind::ObjectName => "name",
            FieldKind::Kind => "kind",
            FieldKind::ContentType => "contentType",
            FieldKind::HasMetadata => "metadata",
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            FieldKind::BucketId => ValueType::Identifier,
            FieldKind::HasMetadata => ValueType::KeyValue,
            _ => ValueType::String,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FilterError::invalid_constraint(s, "unknown field"))
    }
}

/// A filterable field. `HasMetadata` carries the metadata key it constrains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldId {
    BucketId,
    BucketName,
    ObjectName,
    Kind,
    ContentType,
    HasMetadata(String),
}

impl FieldId {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::BucketId => FieldKind::BucketId,
            FieldId::BucketName => FieldKind::BucketName,
            FieldId::ObjectName => FieldKind::ObjectName,
            FieldId::Kind => FieldKind::Kind,
            FieldId::ContentType => FieldKind::ContentType,
            FieldId::HasMetadata(_) => FieldKind::HasMetadata,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.kind().value_type()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::HasMetadata(key) => write!(f, "metadata[{key}]"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

/// A single literal in a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Text(String),
    Id(i64),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Id(_) => None,
        }
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            Scalar::Id(id) => Some(*id),
            Scalar::Text(_) => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Text(_) => "text",
            Scalar::Id(_) => "identifier",
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Id(value)
    }
}

/// The value side of a constraint: one literal, or a literal set for `in`/`notIn`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintValue {
    Single(Scalar),
    List(Vec<Scalar>),
}

impl From<Scalar> for ConstraintValue {
    fn from(value: Scalar) -> Self {
        ConstraintValue::Single(value)
    }
}

impl From<&str> for ConstraintValue {
    fn from(value: &str) -> Self {
        ConstraintValue::Single(value.into())
    }
}

impl From<String> for ConstraintValue {
    fn from(value: String) -> Self {
        ConstraintValue::Single(value.into())
    }
}

impl From<i64> for ConstraintValue {
    fn from(value: i64) -> Self {
        ConstraintValue::Single(value.into())
    }
}

impl From<Vec<Scalar>> for ConstraintValue {
    fn from(values: Vec<Scalar>) -> Self {
        ConstraintValue::List(values)
    }
}

/// A leaf of the filter tree: `field operator value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldConstraint {
    pub field: FieldId,
    pub operator: Operator,
    pub value: ConstraintValue,
}

impl FieldConstraint {
    pub fn new(field: FieldId, operator: Operator, value: impl Into<ConstraintValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Checks the value against the operator arity and the field's value type.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidConstraint`] on a list given to a single
    /// valued operator (or the reverse), an empty list, or a literal whose kind
    /// disagrees with the field.
    pub fn validate_value(&self) -> Result<(), FilterError> {
        let expected = match self.field.value_type() {
            ValueType::Identifier => "identifier",
            ValueType::String | ValueType::KeyValue => "text",
        };
        let check = |scalar: &Scalar| {
            if scalar.type_name() == expected {
                Ok(())
            } else {
                Err(FilterError::invalid_constraint(
                    &self.field,
                    format!("expected {expected} value, got {}", scalar.type_name()),
                ))
            }
        };
        match (&self.value, self.operator.takes_list()) {
            (ConstraintValue::Single(scalar), false) => check(scalar),
            (ConstraintValue::List(values), true) => {
                if values.is_empty() {
                    return Err(FilterError::invalid_constraint(
                        &self.field,
                        format!("'{}' needs at least one value", self.operator),
                    ));
                }
                values.iter().try_for_each(check)
            }
            (ConstraintValue::Single(_), true) => Err(FilterError::invalid_constraint(
                &self.field,
                format!("'{}' takes a list of values", self.operator),
            )),
            (ConstraintValue::List(_), false) => Err(FilterError::invalid_constraint(
                &self.field,
                format!("'{}' takes a single value", self.operator),
            )),
        }
    }
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.value)
    }
}

/// Client-supplied filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterExpression {
    Constraint(FieldConstraint),
    And(Vec<FilterExpression>),
    Or(Vec<FilterExpression>),
}

impl FilterExpression {
    pub fn and(children: Vec<FilterExpression>) -> Self {
        FilterExpression::And(children)
    }

    pub fn or(children: Vec<FilterExpression>) -> Self {
        FilterExpression::Or(children)
    }

    pub fn is_group(&self) -> bool {
        !matches!(self, FilterExpression::Constraint(_))
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            FilterExpression::Constraint(_) => "constraint",
            FilterExpression::And(_) => "and",
            FilterExpression::Or(_) => "or",
        }
    }
}

impl From<FieldConstraint> for FilterExpression {
    fn from(value: FieldConstraint) -> Self {
        FilterExpression::Constraint(value)
    }
}

/// Fluent builder for field constraints.
///
/// The builder does not validate; operator and value checks happen when the
/// expression is compiled.
pub struct FieldFilter {
    field: FieldId,
}

impl FieldFilter {
    pub fn field(field: FieldId) -> Self {
        FieldFilter { field }
    }

    pub fn bucket_id() -> Self {
        Self::field(FieldId::BucketId)
    }

    pub fn bucket_name() -> Self {
        Self::field(FieldId::BucketName)
    }

    pub fn object_name() -> Self {
        Self::field(FieldId::ObjectName)
    }

    pub fn kind() -> Self {
        Self::field(FieldId::Kind)
    }

    pub fn content_type() -> Self {
        Self::field(FieldId::ContentType)
    }

    /// Starts a constraint on the value stored under metadata `key`.
    pub fn metadata(key: impl Into<String>) -> Self {
        Self::field(FieldId::HasMetadata(key.into()))
    }

    fn build(self, operator: Operator, value: ConstraintValue) -> FilterExpression {
        FilterExpression::Constraint(FieldConstraint {
            field: self.field,
            operator,
            value,
        })
    }

    /// Creates an equality constraint: field = value
    pub fn eq(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Eq, ConstraintValue::Single(value.into()))
    }

    /// Creates a not-equal constraint: field != value
    pub fn ne(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Ne, ConstraintValue::Single(value.into()))
    }

    pub fn gt(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Gt, ConstraintValue::Single(value.into()))
    }

    pub fn gte(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Gte, ConstraintValue::Single(value.into()))
    }

    pub fn lt(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Lt, ConstraintValue::Single(value.into()))
    }

    pub fn lte(self, value: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Lte, ConstraintValue::Single(value.into()))
    }

    /// Creates a pattern constraint using `%` and `_` wildcards.
    pub fn like(self, pattern: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::Like, ConstraintValue::Single(pattern.into()))
    }

    pub fn not_like(self, pattern: impl Into<Scalar>) -> FilterExpression {
        self.build(Operator::NotLike, ConstraintValue::Single(pattern.into()))
    }

    /// Creates a set membership constraint: field IN (values...)
    pub fn is_in<V: Into<Scalar>>(self, values: impl IntoIterator<Item = V>) -> FilterExpression {
        let values = values.into_iter().map(Into::into).collect();
        self.build(Operator::In, ConstraintValue::List(values))
    }

    pub fn not_in<V: Into<Scalar>>(self, values: impl IntoIterator<Item = V>) -> FilterExpression {
        let values = values.into_iter().map(Into::into).collect();
        self.build(Operator::NotIn, ConstraintValue::List(values))
    }
}

// region: arbitrary

#[cfg(test)]
impl Arbitrary for FilterExpression {
    /// Well-formed trees of at most five levels over a small value domain.
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_expression(g, 4)
    }
}

#[cfg(test)]
fn arbitrary_expression(g: &mut Gen, levels: usize) -> FilterExpression {
    if levels == 0 || u8::arbitrary(g) % 3 == 0 {
        return arbitrary_constraint(g);
    }
    let children = (0..usize::arbitrary(g) % 4)
        .map(|_| arbitrary_expression(g, levels - 1))
        .collect();
    if bool::arbitrary(g) {
        FilterExpression::And(children)
    } else {
        FilterExpression::Or(children)
    }
}

#[cfg(test)]
fn arbitrary_constraint(g: &mut Gen) -> FilterExpression {
    match u8::arbitrary(g) % 6 {
        0 => FieldFilter::bucket_id().eq(i64::from(u8::arbitrary(g) % 4)),
        1 => FieldFilter::bucket_name().eq(text(g, &["bucket1", "bucket2", "bucket3"])),
        2 => FieldFilter::object_name().like(text(g, &["name%", "%2", "n_me"])),
        3 => FieldFilter::kind().ne(text(g, &["workflow", "script"])),
        4 => FieldFilter::content_type().eq(text(g, &["application/xml", "text/plain"])),
        _ => FieldFilter::metadata(text(g, &["project", "owner"])).eq(text(g, &["alpha", "bob"])),
    }
}

#[cfg(test)]
fn text(g: &mut Gen, choices: &[&'static str]) -> &'static str {
    g.choose(choices).copied().unwrap_or_default()
}

// endregion: arbitrary
