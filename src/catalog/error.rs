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

//! Error definitions for filter compilation and evaluation

use crate::catalog::filter::expression::FieldKind;
use crate::catalog::filter::operator::Operator;
use thiserror::Error;

/// Errors raised while turning a where-argument into a compiled filter, or
/// while evaluating that filter against a catalog.
///
/// Compilation is a single pass that aborts on the first error; no partial
/// specification is ever returned.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A node does not carry exactly one of {field constraint, AND group, OR group}
    #[error("malformed filter expression: {reason}")]
    MalformedExpression { reason: String },

    /// The operator is not in the allowed set of the field
    #[error("operator '{operator}' is not supported on field '{field}'")]
    UnsupportedOperator { field: FieldKind, operator: Operator },

    /// Unknown field, or a value whose type disagrees with the field
    #[error("invalid constraint on '{field}': {reason}")]
    InvalidConstraint { field: String, reason: String },

    /// The expression nests deeper than the configured limit
    #[error("filter expression nesting depth {depth} exceeds the limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// No registered handler recognises the field; the handler registry is incomplete
    #[error("no filter handler registered for field '{field}'")]
    NoHandler { field: FieldKind },

    /// The entity model has no relation with this name
    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    /// Positional access outside a combinator's child list
    #[error("child index {index} out of bounds for combinator with {len} children")]
    ChildIndexOutOfBounds { index: isize, len: usize },

    #[error("invalid where-argument payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid match pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl FilterError {
    /// Returns true when the error is caused by the client's input rather than
    /// by a defect in the service configuration.
    ///
    /// Client errors are reported back as bad requests and never retried;
    /// the remaining kinds indicate an incomplete handler registry or entity
    /// model and are treated as internal failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            FilterError::NoHandler { .. }
                | FilterError::UnknownRelation(_)
                | FilterError::ChildIndexOutOfBounds { .. }
        )
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FilterError::MalformedExpression {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_constraint(field: impl ToString, reason: impl Into<String>) -> Self {
        FilterError::InvalidConstraint {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
