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

//! # Catalog filter
//!
//! Compiles client-supplied "where" expressions over a versioned object
//! catalog into executable predicates.
//!
//! A filter is an arbitrarily nested tree of AND/OR groups over field
//! constraints such as `bucketName eq "bucket1"` or
//! `metadata[project] like "alpha%"`. Compilation produces a
//! [`catalog::filter::Specification`] whose leaves share one join per
//! relation, so constraints on the same related entity read the same row and
//! one-to-many joins never multiply results unnoticed.
//!
//! ## Basic Usage
//!
//! ```
//! use catalog_filter::catalog::filter::{CatalogObjectWhereArgs, FilterCompiler, FilterExpression};
//! use catalog_filter::catalog::types::Commit;
//! use catalog_filter::catalog::{MemoryCatalog, PageRequest, SpecificationExecutor};
//!
//! let mut catalog = MemoryCatalog::new();
//! let bucket = catalog.create_bucket("bucket1", "admin");
//! catalog.commit(
//!     Commit::builder()
//!         .bucket_id(bucket)
//!         .name("nightly")
//!         .kind("workflow")
//!         .content_type("application/xml")
//!         .commit_time(1)
//!         .build(),
//! );
//!
//! let args = CatalogObjectWhereArgs::from_json(
//!     r#"{"andArg": [{"bucketNameArg": {"eq": "bucket1"}}, {"kindArg": {"like": "work%"}}]}"#,
//! )
//! .unwrap();
//! let expr = args.as_ref().map(FilterExpression::try_from).transpose().unwrap();
//! let filter = FilterCompiler::default().compile(expr.as_ref()).unwrap();
//!
//! let page = catalog.find_all(&filter, &PageRequest::default()).unwrap();
//! assert_eq!(page.total_count, 1);
//! assert_eq!(page.rows[0].name, "nightly");
//! ```
//!
//! ## Design
//! - [`catalog::filter::FilterCompiler`] walks the tree with an explicit stack and a depth limit
//! - [`catalog::filter::JoinGraph`] memoizes joins per compiled query
//! - [`catalog::filter::HandlerRegistry`] routes each field constraint to its handler
//! - [`catalog::SpecificationExecutor`] is the storage seam; [`catalog::MemoryCatalog`] implements it

#![allow(clippy::result_large_err)]
pub mod catalog;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
