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

//! Operator catalog: which comparison operators exist and which fields accept them.
//!
//! Every field accepts the ordered comparisons `eq ne gt gte lt lte`. String
//! valued fields additionally accept `like`/`notLike`, whose wildcard syntax is
//! the storage engine's (`%` and `_`). Identifier valued fields additionally
//! accept `in`/`notIn` over a literal list.

use crate::catalog::error::FilterError;
use crate::catalog::filter::expression::FieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison and match operators for field constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Equal to
    Eq,
    /// Not equal to
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal to
    Gte,
    /// Less than
    Lt,
    /// Less than or equal to
    Lte,
    /// Pattern match
    Like,
    /// Negated pattern match
    NotLike,
    /// Value is contained in a literal set
    In,
    /// Value is not contained in a literal set
    NotIn,
}

/// Operators accepted by every field, in catalog order.
pub const ORDERED_OPERATORS: [Operator; 6] = [
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
];

/// Pattern operators, accepted by string valued fields only.
pub const PATTERN_OPERATORS: [Operator; 2] = [Operator::Like, Operator::NotLike];

/// Set membership operators, accepted by identifier valued fields only.
pub const MEMBERSHIP_OPERATORS: [Operator; 2] = [Operator::In, Operator::NotIn];

impl Operator {
    /// Returns the where-argument member name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::NotLike => "notLike",
            Operator::In => "in",
            Operator::NotIn => "notIn",
        }
    }

    /// True for `in` and `notIn`, which take a list of values instead of one.
    pub fn takes_list(self) -> bool {
        MEMBERSHIP_OPERATORS.contains(&self)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "like" => Ok(Operator::Like),
            "notLike" => Ok(Operator::NotLike),
            "in" => Ok(Operator::In),
            "notIn" => Ok(Operator::NotIn),
            _ => Err(FilterError::malformed(format!("unknown operator '{s}'"))),
        }
    }
}

/// Declared value type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Free text
    String,
    /// Numeric identifier
    Identifier,
    /// Metadata key/value pair; the value side is compared as text
    KeyValue,
}

impl ValueType {
    /// Returns the operators a field of this value type accepts, in catalog order.
    pub fn supported_operators(self) -> Vec<Operator> {
        let mut ops = ORDERED_OPERATORS.to_vec();
        match self {
            ValueType::String | ValueType::KeyValue => ops.extend(PATTERN_OPERATORS),
            ValueType::Identifier => ops.extend(MEMBERSHIP_OPERATORS),
        }
        ops
    }

    pub fn supports(self, op: Operator) -> bool {
        match self {
            ValueType::String | ValueType::KeyValue => !op.takes_list(),
            ValueType::Identifier => !PATTERN_OPERATORS.contains(&op),
        }
    }
}

/// Returns the operators accepted by the given field, in catalog order.
pub fn allowed_operators(field: FieldKind) -> Vec<Operator> {
    field.value_type().supported_operators()
}

/// Checks that `op` may be applied to `field`.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedOperator`] when the operator is outside
/// the field's allowed set.
pub fn check_operator(field: FieldKind, op: Operator) -> Result<(), FilterError> {
    if field.value_type().supports(op) {
        Ok(())
    } else {
        Err(FilterError::UnsupportedOperator {
            field,
            operator: op,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_fields_accept_patterns() {
        let ops = allowed_operators(FieldKind::ObjectName);
        assert_eq!(
            ops,
            vec![
                Operator::Eq,
                Operator::Ne,
                Operator::Gt,
                Operator::Gte,
                Operator::Lt,
                Operator::Lte,
                Operator::Like,
                Operator::NotLike,
            ]
        );
        assert!(check_operator(FieldKind::BucketName, Operator::Like).is_ok());
        assert!(check_operator(FieldKind::HasMetadata, Operator::NotLike).is_ok());
    }

    #[test]
    fn test_identifier_fields_accept_membership() {
        let ops = allowed_operators(FieldKind::BucketId);
        assert!(ops.contains(&Operator::In));
        assert!(ops.contains(&Operator::NotIn));
        assert!(!ops.contains(&Operator::Like));
    }

    #[test]
    fn test_rejections() {
        match check_operator(FieldKind::BucketId, Operator::Like) {
            Err(FilterError::UnsupportedOperator { field, operator }) => {
                assert_eq!(field, FieldKind::BucketId);
                assert_eq!(operator, Operator::Like);
            }
            other => panic!("expected UnsupportedOperator, got {other:?}"),
        }
        assert!(check_operator(FieldKind::Kind, Operator::In).is_err());
        assert!(check_operator(FieldKind::ContentType, Operator::NotIn).is_err());
    }

    #[test]
    fn test_operator_names_round_trip() {
        for op in ORDERED_OPERATORS
            .iter()
            .chain(PATTERN_OPERATORS.iter())
            .chain(MEMBERSHIP_OPERATORS.iter())
        {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), *op);
        }
        assert!("between".parse::<Operator>().is_err());
        assert_eq!(
            serde_json::to_string(&Operator::NotLike).unwrap(),
            "\"notLike\""
        );
    }
}
