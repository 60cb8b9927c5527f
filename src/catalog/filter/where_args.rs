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

//! Structured where-argument payload, as sent by clients.
//!
//! Each payload node is a flat object whose members are all optional, e.g.
//!
//! ```json
//! {"orArg": [
//!     {"andArg": [{"bucketNameArg": {"eq": "bucket1"}}, {"nameArg": {"eq": "name"}}]},
//!     {"metadataArg": {"key": "project", "value": {"like": "alpha%"}}}
//! ]}
//! ```
//!
//! Conversion into a [`FilterExpression`] checks that every node sets exactly
//! one member and every operator object exactly one operator.

use crate::catalog::config::CompilerConfig;
use crate::catalog::error::FilterError;
use crate::catalog::filter::expression::{
    ConstraintValue, FieldConstraint, FieldId, FilterExpression, Scalar,
};
use crate::catalog::filter::operator::Operator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Operator object of a field argument, e.g. `{"eq": "bucket1"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorArgs(BTreeMap<String, Value>);

impl OperatorArgs {
    pub fn new(operator: Operator, value: impl Into<Value>) -> Self {
        let mut members = BTreeMap::new();
        members.insert(operator.as_str().to_string(), value.into());
        OperatorArgs(members)
    }

    fn to_constraint(&self, field: FieldId) -> Result<FieldConstraint, FilterError> {
        let mut members = self.0.iter();
        let (name, value) = match (members.next(), members.next()) {
            (Some(only), None) => only,
            _ => {
                return Err(FilterError::malformed(format!(
                    "argument for '{field}' must set exactly one operator, found {}",
                    self.0.len()
                )));
            }
        };
        let operator: Operator = name.parse()?;
        let value = match value {
            Value::Array(items) => ConstraintValue::List(
                items
                    .iter()
                    .map(|item| scalar(&field, item))
                    .collect::<Result<_, _>>()?,
            ),
            other => ConstraintValue::Single(scalar(&field, other)?),
        };
        Ok(FieldConstraint {
            field,
            operator,
            value,
        })
    }
}

fn scalar(field: &FieldId, value: &Value) -> Result<Scalar, FilterError> {
    match value {
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        Value::Number(n) => n.as_i64().map(Scalar::Id).ok_or_else(|| {
            FilterError::invalid_constraint(field, format!("'{n}' is not an identifier"))
        }),
        other => Err(FilterError::invalid_constraint(
            field,
            format!("unsupported value {other}"),
        )),
    }
}

/// `metadataArg`: a key plus a string operator object for its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataWhereArgs {
    pub key: String,
    pub value: OperatorArgs,
}

/// One node of the where-argument payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogObjectWhereArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and_arg: Option<Vec<CatalogObjectWhereArgs>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or_arg: Option<Vec<CatalogObjectWhereArgs>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_id_arg: Option<OperatorArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name_arg: Option<OperatorArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_arg: Option<OperatorArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind_arg: Option<OperatorArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_arg: Option<OperatorArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_arg: Option<MetadataWhereArgs>,
    /// Members this payload version does not know
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub unknown: Map<String, Value>,
}

impl CatalogObjectWhereArgs {
    /// Parses a payload. A JSON `null` means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidJson`] when the text is not a valid payload.
    pub fn from_json(text: &str) -> Result<Option<Self>, FilterError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn and(children: Vec<CatalogObjectWhereArgs>) -> Self {
        CatalogObjectWhereArgs {
            and_arg: Some(children),
            ..Default::default()
        }
    }

    pub fn or(children: Vec<CatalogObjectWhereArgs>) -> Self {
        CatalogObjectWhereArgs {
            or_arg: Some(children),
            ..Default::default()
        }
    }

    /// Converts the payload, rejecting nesting deeper than `max_depth`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidConstraint`] on an unknown member or a bad value.
    /// - [`FilterError::MalformedExpression`] when a node or operator object does
    ///   not set exactly one member.
    /// - [`FilterError::DepthLimitExceeded`] past `max_depth`.
    pub fn to_expression(&self, max_depth: usize) -> Result<FilterExpression, FilterError> {
        self.convert(1, max_depth)
    }

    fn convert(&self, depth: usize, limit: usize) -> Result<FilterExpression, FilterError> {
        if depth > limit {
            return Err(FilterError::DepthLimitExceeded { depth, limit });
        }
        if let Some(name) = self.unknown.keys().next() {
            return Err(FilterError::invalid_constraint(name, "unknown field"));
        }

        let mut found = Vec::with_capacity(1);
        if let Some(children) = &self.and_arg {
            found.push(Node::And(children));
        }
        if let Some(children) = &self.or_arg {
            found.push(Node::Or(children));
        }
        let fields = [
            (FieldId::BucketId, &self.bucket_id_arg),
            (FieldId::BucketName, &self.bucket_name_arg),
            (FieldId::ObjectName, &self.name_arg),
            (FieldId::Kind, &self.kind_arg),
            (FieldId::ContentType, &self.content_type_arg),
        ];
        for (field, args) in fields {
            if let Some(args) = args {
                found.push(Node::Field(field, args));
            }
        }
        if let Some(metadata) = &self.metadata_arg {
            found.push(Node::Field(
                FieldId::HasMetadata(metadata.key.clone()),
                &metadata.value,
            ));
        }

        if found.len() != 1 {
            return Err(FilterError::malformed(format!(
                "expected exactly one of a field argument, andArg or orArg, found {}",
                found.len()
            )));
        }
        match found.remove(0) {
            Node::Field(field, args) => Ok(args.to_constraint(field)?.into()),
            Node::And(children) => Ok(FilterExpression::And(
                children
                    .iter()
                    .map(|c| c.convert(depth + 1, limit))
                    .collect::<Result<_, _>>()?,
            )),
            Node::Or(children) => Ok(FilterExpression::Or(
                children
                    .iter()
                    .map(|c| c.convert(depth + 1, limit))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }
}

enum Node<'a> {
    Field(FieldId, &'a OperatorArgs),
    And(&'a [CatalogObjectWhereArgs]),
    Or(&'a [CatalogObjectWhereArgs]),
}

impl TryFrom<&CatalogObjectWhereArgs> for FilterExpression {
    type Error = FilterError;

    /// Converts with the default depth limit.
    fn try_from(args: &CatalogObjectWhereArgs) -> Result<Self, Self::Error> {
        args.to_expression(CompilerConfig::default().max_depth)
    }
}
