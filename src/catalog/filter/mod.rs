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

//! Filter expression compilation.
//!
//! A client's where-argument is converted into a [`FilterExpression`], which
//! [`FilterCompiler`] turns into a [`CompiledFilter`]: a [`Specification`]
//! tree plus the [`JoinGraph`] its leaves read through.

pub mod compiler;
pub mod expression;
pub mod handler;
pub mod join;
pub mod leaf;
pub mod operator;
pub mod predicate;
pub mod specification;
pub mod where_args;

pub use compiler::{CompiledFilter, FilterCompiler};
pub use expression::{
    ConstraintValue, FieldConstraint, FieldFilter, FieldId, FieldKind, FilterExpression, Scalar,
};
pub use handler::{FieldFilterHandler, HandlerRegistry, LeafFilterHandler};
pub use join::{JoinGraph, JoinHandle, Relation};
pub use leaf::LeafSpecification;
pub use operator::Operator;
pub use predicate::Predicate;
pub use specification::{AndSpecification, DefaultSpecification, OrSpecification, Specification};
pub use where_args::CatalogObjectWhereArgs;
