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

//! Boolean group compiler.
//!
//! Turns a [`FilterExpression`] into a [`Specification`] in one synchronous
//! pass. The tree is walked with an explicit work stack, so client-controlled
//! nesting never grows the call stack; nesting past
//! [`CompilerConfig::max_depth`] is rejected.
//!
//! # Example
//!
//! ```
//! use catalog_filter::catalog::filter::{FieldFilter, FilterCompiler, FilterExpression};
//!
//! let filter = FilterExpression::and(vec![
//!     FieldFilter::bucket_name().eq("bucket1"),
//!     FieldFilter::metadata("project").eq("alpha"),
//! ]);
//! let compiled = FilterCompiler::default().compile(Some(&filter)).unwrap();
//! assert!(compiled.needs_distinct());
//! assert_eq!(compiled.specification().children().len(), 2);
//! ```

use crate::catalog::config::CompilerConfig;
use crate::catalog::error::FilterError;
use crate::catalog::filter::expression::FilterExpression;
use crate::catalog::filter::handler::HandlerRegistry;
use crate::catalog::filter::join::JoinGraph;
use crate::catalog::filter::predicate::Predicate;
use crate::catalog::filter::specification::{
    AndSpecification, DefaultSpecification, OrSpecification, Specification,
};
use serde_json::{Value, json};

/// A compiled query: the specification plus the joins it reads through.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    specification: Specification,
    join_graph: JoinGraph,
}

impl CompiledFilter {
    /// The filter used when the client supplies none.
    pub fn pass_through() -> Self {
        CompiledFilter {
            specification: Specification::Default(DefaultSpecification),
            join_graph: JoinGraph::new(),
        }
    }

    pub fn specification(&self) -> &Specification {
        &self.specification
    }

    pub fn join_graph(&self) -> &JoinGraph {
        &self.join_graph
    }

    pub fn needs_distinct(&self) -> bool {
        self.join_graph.needs_distinct()
    }

    pub fn predicate(&self) -> Predicate {
        self.specification.predicate()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "joins": self.join_graph.to_json(),
            "predicate": self.predicate().to_json(),
        })
    }
}

#[derive(Clone, Copy)]
enum GroupKind {
    And,
    Or,
}

enum Step<'a> {
    Enter(&'a FilterExpression, usize),
    Combine(GroupKind, usize),
}

/// Compiles filter expressions with a fixed handler registry and limits.
#[derive(Debug, Clone)]
pub struct FilterCompiler {
    config: CompilerConfig,
    registry: HandlerRegistry,
}

impl Default for FilterCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl FilterCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self::with_registry(config, HandlerRegistry::with_default_handlers())
    }

    pub fn with_registry(config: CompilerConfig, registry: HandlerRegistry) -> Self {
        FilterCompiler { config, registry }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Compiles `expr` with a fresh join graph. `None` yields the pass-through
    /// filter.
    ///
    /// # Errors
    ///
    /// Aborts on the first error; no partial filter is returned.
    pub fn compile(&self, expr: Option<&FilterExpression>) -> Result<CompiledFilter, FilterError> {
        let Some(expr) = expr else {
            log::debug!("no filter supplied, using the default specification");
            return Ok(CompiledFilter::pass_through());
        };
        let mut join_graph = JoinGraph::new();
        let specification = self.compile_into(expr, &mut join_graph)?;
        let compiled = CompiledFilter {
            specification,
            join_graph,
        };
        log::debug!("compiled filter: {}", compiled.to_json());
        Ok(compiled)
    }

    /// Compiles `expr` against a caller-owned join graph. Every leaf of the
    /// tree shares `graph`.
    pub fn compile_into(
        &self,
        expr: &FilterExpression,
        graph: &mut JoinGraph,
    ) -> Result<Specification, FilterError> {
        let limit = self.config.max_depth;
        let mut steps = vec![Step::Enter(expr, 1)];
        let mut done: Vec<Specification> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node, depth) => {
                    if depth > limit {
                        return Err(FilterError::DepthLimitExceeded { depth, limit });
                    }
                    let (kind, children) = match node {
                        FilterExpression::Constraint(constraint) => {
                            done.push(self.registry.dispatch(constraint, graph)?.into());
                            continue;
                        }
                        FilterExpression::And(children) => (GroupKind::And, children),
                        FilterExpression::Or(children) => (GroupKind::Or, children),
                    };
                    log::trace!(
                        "{} group with {} children at depth {depth}",
                        node.label(),
                        children.len()
                    );
                    steps.push(Step::Combine(kind, children.len()));
                    // reversed so the first child is compiled first
                    steps.extend(children.iter().rev().map(|c| Step::Enter(c, depth + 1)));
                }
                Step::Combine(kind, arity) => {
                    let start = done.len() - arity;
                    let children = done.split_off(start);
                    done.push(match kind {
                        GroupKind::And => Specification::And(AndSpecification::new(children)),
                        GroupKind::Or => Specification::Or(OrSpecification::new(children)),
                    });
                }
            }
        }

        done.pop()
            .ok_or_else(|| FilterError::malformed("expression produced no specification"))
    }
}
