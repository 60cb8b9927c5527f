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

//! Reference evaluation of compiled filters over a [`MemoryCatalog`].
//!
//! Joins are inner joins materialised in join graph order. The predicate is
//! evaluated once per joined tuple and every matching tuple yields a row, so
//! a one-to-many join multiplies rows unless the filter asks for distinct
//! results.

use crate::catalog::error::FilterError;
use crate::catalog::filter::compiler::CompiledFilter;
use crate::catalog::filter::expression::{ConstraintValue, Scalar};
use crate::catalog::filter::join::Relation;
use crate::catalog::filter::operator::Operator;
use crate::catalog::filter::predicate::{Attribute, Column, Predicate};
use crate::catalog::types::{
    Bucket, CatalogObject, CatalogObjectRevision, MemoryCatalog, MetadataEntry,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use typed_builder::TypedBuilder;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderBy {
    /// Bucket id, then object name, ascending
    #[default]
    CatalogObjectKeyAsc,
    CatalogObjectKeyDesc,
    KindAsc,
    KindDesc,
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct PageRequest {
    /// Zero-based page number
    #[builder(default)]
    pub page: usize,
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub size: usize,
    #[builder(default)]
    pub order_by: OrderBy,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::builder().build()
    }
}

/// One page of matching revisions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub rows: Vec<CatalogObjectRevision>,
    pub page: usize,
    pub size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Storage collaborator that executes compiled filters.
pub trait SpecificationExecutor {
    /// Evaluates `filter` and returns the requested page of matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if a `like` pattern cannot be
    /// compiled.
    fn find_all(&self, filter: &CompiledFilter, request: &PageRequest) -> Result<Page, FilterError>;

    /// Number of rows `filter` matches.
    fn count(&self, filter: &CompiledFilter) -> Result<usize, FilterError>;
}

impl SpecificationExecutor for MemoryCatalog {
    fn find_all(&self, filter: &CompiledFilter, request: &PageRequest) -> Result<Page, FilterError> {
        let mut rows = self.matching_rows(filter)?;
        sort_rows(self, &mut rows, request.order_by);

        let size = request.size.max(1);
        let total_count = rows.len();
        let total_pages = total_count.div_ceil(size);
        let rows: Vec<CatalogObjectRevision> = rows
            .into_iter()
            .skip(request.page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        Ok(Page {
            rows,
            page: request.page,
            size,
            total_count,
            total_pages,
            has_next: request.page.saturating_add(1) < total_pages,
            has_previous: request.page > 0,
        })
    }

    fn count(&self, filter: &CompiledFilter) -> Result<usize, FilterError> {
        Ok(self.matching_rows(filter)?.len())
    }
}

impl MemoryCatalog {
    fn matching_rows(&self, filter: &CompiledFilter) -> Result<Vec<&CatalogObjectRevision>, FilterError> {
        let predicate = filter.predicate();
        let patterns = Patterns::compile(&predicate)?;
        let distinct = filter.needs_distinct();
        let joins = filter.join_graph().joins();

        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        for revision in self.revisions() {
            let mut tuples = vec![Tuple::new(revision)];
            for join in joins {
                tuples = self.join(tuples, join.relation());
                if tuples.is_empty() {
                    break;
                }
            }
            for tuple in &tuples {
                if !patterns.eval(&predicate, tuple) {
                    continue;
                }
                if distinct && !seen.insert(revision.id) {
                    continue;
                }
                rows.push(revision);
            }
        }
        log::debug!(
            "filter matched {} rows over {} revisions (distinct: {distinct})",
            rows.len(),
            self.revisions().len()
        );
        Ok(rows)
    }

    fn join<'a>(&'a self, tuples: Vec<Tuple<'a>>, relation: Relation) -> Vec<Tuple<'a>> {
        match relation {
            Relation::CatalogObject => tuples
                .into_iter()
                .filter_map(|t| {
                    // only the latest revision of an object joins
                    let object = self
                        .object(t.revision.bucket_id, &t.revision.name)
                        .filter(|o| o.last_commit_time == t.revision.commit_time)?;
                    Some(Tuple {
                        object: Some(object),
                        ..t
                    })
                })
                .collect(),
            Relation::Bucket => tuples
                .into_iter()
                .filter_map(|t| {
                    let bucket = self.bucket(t.object?.bucket_id)?;
                    Some(Tuple {
                        bucket: Some(bucket),
                        ..t
                    })
                })
                .collect(),
            Relation::MetadataEntries => tuples
                .into_iter()
                .flat_map(|t| {
                    t.revision.metadata.iter().map(move |entry| Tuple {
                        entry: Some(entry),
                        ..t
                    })
                })
                .collect(),
        }
    }
}

/// A root row together with the rows its joins reached.
#[derive(Clone, Copy)]
struct Tuple<'a> {
    revision: &'a CatalogObjectRevision,
    object: Option<&'a CatalogObject>,
    bucket: Option<&'a Bucket>,
    entry: Option<&'a MetadataEntry>,
}

impl<'a> Tuple<'a> {
    fn new(revision: &'a CatalogObjectRevision) -> Self {
        Tuple {
            revision,
            object: None,
            bucket: None,
            entry: None,
        }
    }

    fn cell(&self, column: &Column) -> Option<Cell<'a>> {
        let cell = match column.attribute {
            Attribute::RevisionId => Cell::Id(self.revision.id),
            Attribute::CommitTime => Cell::Id(self.revision.commit_time),
            Attribute::ObjectName => Cell::Text(&self.object?.name),
            Attribute::Kind => Cell::Text(&self.object?.kind),
            Attribute::ContentType => Cell::Text(&self.object?.content_type),
            Attribute::LastCommitTime => Cell::Id(self.object?.last_commit_time),
            Attribute::BucketId => Cell::Id(self.bucket?.id),
            Attribute::BucketName => Cell::Text(&self.bucket?.bucket_name),
            Attribute::MetadataKey => Cell::Text(&self.entry?.key),
            Attribute::MetadataValue => Cell::Text(&self.entry?.value),
        };
        Some(cell)
    }
}

#[derive(Clone, Copy)]
enum Cell<'a> {
    Text(&'a str),
    Id(i64),
}

impl Cell<'_> {
    fn compare(&self, scalar: &Scalar) -> Option<Ordering> {
        match (self, scalar) {
            (Cell::Text(a), Scalar::Text(b)) => Some((*a).cmp(b.as_str())),
            (Cell::Id(a), Scalar::Id(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// `like` patterns of one predicate, translated to anchored regexes.
struct Patterns(HashMap<String, Regex>);

impl Patterns {
    fn compile(predicate: &Predicate) -> Result<Self, FilterError> {
        let mut patterns = HashMap::new();
        let mut stack = vec![predicate];
        while let Some(p) = stack.pop() {
            match p {
                Predicate::Compare {
                    operator: Operator::Like | Operator::NotLike,
                    value: ConstraintValue::Single(Scalar::Text(pattern)),
                    ..
                } => {
                    if !patterns.contains_key(pattern) {
                        patterns.insert(pattern.clone(), like_to_regex(pattern)?);
                    }
                }
                Predicate::And(children) | Predicate::Or(children) => stack.extend(children),
                _ => {}
            }
        }
        Ok(Patterns(patterns))
    }

    fn eval(&self, predicate: &Predicate, tuple: &Tuple) -> bool {
        match predicate {
            Predicate::True => true,
            Predicate::False => false,
            Predicate::And(children) => children.iter().all(|c| self.eval(c, tuple)),
            Predicate::Or(children) => children.iter().any(|c| self.eval(c, tuple)),
            Predicate::Compare {
                column,
                operator,
                value,
            } => match tuple.cell(column) {
                Some(cell) => self.compare(cell, *operator, value),
                None => false,
            },
        }
    }

    fn compare(&self, cell: Cell, operator: Operator, value: &ConstraintValue) -> bool {
        match (operator, value) {
            (Operator::In, ConstraintValue::List(values)) => {
                values.iter().any(|v| cell.compare(v) == Some(Ordering::Equal))
            }
            (Operator::NotIn, ConstraintValue::List(values)) => values
                .iter()
                .all(|v| matches!(cell.compare(v), Some(o) if o != Ordering::Equal)),
            (Operator::Like | Operator::NotLike, ConstraintValue::Single(Scalar::Text(pattern))) => {
                let Cell::Text(text) = cell else {
                    return false;
                };
                let matched = self.0.get(pattern).is_some_and(|re| re.is_match(text));
                matched != (operator == Operator::NotLike)
            }
            (_, ConstraintValue::Single(scalar)) => match cell.compare(scalar) {
                Some(ordering) => match operator {
                    Operator::Eq => ordering == Ordering::Equal,
                    Operator::Ne => ordering != Ordering::Equal,
                    Operator::Gt => ordering == Ordering::Greater,
                    Operator::Gte => ordering != Ordering::Less,
                    Operator::Lt => ordering == Ordering::Less,
                    Operator::Lte => ordering != Ordering::Greater,
                    _ => false,
                },
                None => false,
            },
            _ => false,
        }
    }
}

/// Translates SQL `like` syntax (`%` any run, `_` any one character) into an
/// anchored regex.
fn like_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push_str("(?s)^");
    for c in pattern.chars() {
        match c {
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re)
}

fn sort_rows(catalog: &MemoryCatalog, rows: &mut [&CatalogObjectRevision], order_by: OrderBy) {
    let key = |r: &CatalogObjectRevision| (r.bucket_id, r.name.clone(), r.id);
    let kind = |r: &CatalogObjectRevision| {
        catalog
            .object(r.bucket_id, &r.name)
            .map(|o| o.kind.clone())
            .unwrap_or_default()
    };
    match order_by {
        OrderBy::CatalogObjectKeyAsc => rows.sort_by_key(|r| key(*r)),
        OrderBy::CatalogObjectKeyDesc => rows.sort_by_key(|r| std::cmp::Reverse(key(*r))),
        OrderBy::KindAsc => rows.sort_by_cached_key(|r| (kind(*r), key(*r))),
        OrderBy::KindDesc => rows.sort_by_cached_key(|r| std::cmp::Reverse((kind(*r), key(*r)))),
    }
}
