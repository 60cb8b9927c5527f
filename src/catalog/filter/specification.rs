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

//! Compiled specifications: leaves, AND/OR combinators and the pass-through
//! default.
//!
//! Combinators keep their children in the order the expression listed them.
//! An empty AND is always true and an empty OR is always false.

use crate::catalog::error::FilterError;
use crate::catalog::filter::leaf::LeafSpecification;
use crate::catalog::filter::predicate::Predicate;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum Specification {
    Leaf(LeafSpecification),
    And(AndSpecification),
    Or(OrSpecification),
    Default(DefaultSpecification),
}

impl Specification {
    /// Child specifications; empty for leaves and the default.
    pub fn children(&self) -> &[Specification] {
        match self {
            Specification::And(and) => and.children(),
            Specification::Or(or) => or.children(),
            Specification::Leaf(_) | Specification::Default(_) => &[],
        }
    }

    /// Positional child access.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::ChildIndexOutOfBounds`] for a negative index or
    /// an index past the last child. Leaves and the default have no children.
    pub fn child(&self, index: isize) -> Result<&Specification, FilterError> {
        child_at(self.children(), index)
    }

    pub fn as_leaf(&self) -> Option<&LeafSpecification> {
        match self {
            Specification::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Specification::And(_))
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Specification::Or(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Specification::Default(_))
    }

    /// Builds the predicate the storage collaborator evaluates.
    pub fn predicate(&self) -> Predicate {
        match self {
            Specification::Leaf(leaf) => leaf.predicate().clone(),
            Specification::And(and) => and.predicate(),
            Specification::Or(or) => or.predicate(),
            Specification::Default(default) => default.predicate(),
        }
    }

    /// Structural rendering, one object per specification node.
    pub fn to_json(&self) -> Value {
        match self {
            Specification::Leaf(leaf) => json!({
                "type": "leaf",
                "field": leaf.field().to_string(),
                "predicate": leaf.predicate().to_json(),
            }),
            Specification::And(and) => json!({
                "type": "and",
                "children": and.children().iter().map(Specification::to_json).collect::<Vec<_>>(),
            }),
            Specification::Or(or) => json!({
                "type": "or",
                "children": or.children().iter().map(Specification::to_json).collect::<Vec<_>>(),
            }),
            Specification::Default(_) => json!({ "type": "default" }),
        }
    }
}

impl From<LeafSpecification> for Specification {
    fn from(value: LeafSpecification) -> Self {
        Specification::Leaf(value)
    }
}

/// Conjunction of child specifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndSpecification {
    children: Vec<Specification>,
}

impl AndSpecification {
    pub fn new(children: Vec<Specification>) -> Self {
        AndSpecification { children }
    }

    pub fn children(&self) -> &[Specification] {
        &self.children
    }

    pub fn child(&self, index: isize) -> Result<&Specification, FilterError> {
        child_at(&self.children, index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn predicate(&self) -> Predicate {
        if self.children.is_empty() {
            return Predicate::True;
        }
        Predicate::And(self.children.iter().map(Specification::predicate).collect())
    }
}

/// Disjunction of child specifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrSpecification {
    children: Vec<Specification>,
}

impl OrSpecification {
    pub fn new(children: Vec<Specification>) -> Self {
        OrSpecification { children }
    }

    pub fn children(&self) -> &[Specification] {
        &self.children
    }

    pub fn child(&self, index: isize) -> Result<&Specification, FilterError> {
        child_at(&self.children, index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn predicate(&self) -> Predicate {
        if self.children.is_empty() {
            return Predicate::False;
        }
        Predicate::Or(self.children.iter().map(Specification::predicate).collect())
    }
}

/// Matches every row of the query root and adds no joins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultSpecification;

impl DefaultSpecification {
    pub fn predicate(&self) -> Predicate {
        Predicate::True
    }
}

fn child_at(children: &[Specification], index: isize) -> Result<&Specification, FilterError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| children.get(i))
        .ok_or(FilterError::ChildIndexOutOfBounds {
            index,
            len: children.len(),
        })
}
