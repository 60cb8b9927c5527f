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

//! Field filter handlers.
//!
//! Every filterable field has one handler that turns its constraints into a
//! [`LeafSpecification`]. Handlers are looked up by [`FieldKind`] in
//! registration order: when two handlers claim the same field, the one
//! registered first is used and the later one is never consulted.

use crate::catalog::error::FilterError;
use crate::catalog::filter::expression::{FieldConstraint, FieldKind};
use crate::catalog::filter::join::JoinGraph;
use crate::catalog::filter::leaf::LeafSpecification;
use std::fmt;
use std::sync::Arc;

/// Compiles constraints on one field.
pub trait FieldFilterHandler: fmt::Debug + Send + Sync {
    /// The field this handler recognises.
    fn field(&self) -> FieldKind;

    /// Compiles a constraint on [`field`](Self::field) against the shared graph.
    fn compile(
        &self,
        constraint: &FieldConstraint,
        graph: &mut JoinGraph,
    ) -> Result<LeafSpecification, FilterError>;
}

/// Handler backed by the built-in leaf specification of its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafFilterHandler {
    field: FieldKind,
}

impl LeafFilterHandler {
    pub fn new(field: FieldKind) -> Self {
        LeafFilterHandler { field }
    }
}

impl FieldFilterHandler for LeafFilterHandler {
    fn field(&self) -> FieldKind {
        self.field
    }

    fn compile(
        &self,
        constraint: &FieldConstraint,
        graph: &mut JoinGraph,
    ) -> Result<LeafSpecification, FilterError> {
        LeafSpecification::compile(constraint.clone(), graph)
    }
}

/// Ordered collection of field handlers.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn FieldFilterHandler>>,
}

impl HandlerRegistry {
    /// Creates a registry with no handlers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in handler of every field.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::empty();
        for field in FieldKind::ALL {
            registry.register(Arc::new(LeafFilterHandler::new(field)));
        }
        registry
    }

    /// Appends `handler`. Returns false when an earlier handler already claims
    /// the same field; the new handler is kept but shadowed.
    pub fn register(&mut self, handler: Arc<dyn FieldFilterHandler>) -> bool {
        let field = handler.field();
        let shadowed = self.handler_for(field).is_some();
        if shadowed {
            log::warn!(
                "handler {handler:?} for field '{field}' is shadowed by an earlier registration"
            );
        }
        self.handlers.push(handler);
        !shadowed
    }

    /// The first registered handler for `field`.
    pub fn handler_for(&self, field: FieldKind) -> Option<&Arc<dyn FieldFilterHandler>> {
        self.handlers.iter().find(|h| h.field() == field)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Routes `constraint` to the handler of its field.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NoHandler`] when no handler claims the field,
    /// otherwise whatever the handler returns.
    pub fn dispatch(
        &self,
        constraint: &FieldConstraint,
        graph: &mut JoinGraph,
    ) -> Result<LeafSpecification, FilterError> {
        let field = constraint.field.kind();
        match self.handler_for(field) {
            Some(handler) => handler.compile(constraint, graph),
            None => {
                log::error!("no filter handler registered for field '{field}'");
                Err(FilterError::NoHandler { field })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::expression::{FieldFilter, FilterExpression};

    fn constraint(expr: FilterExpression) -> FieldConstraint {
        match expr {
            FilterExpression::Constraint(c) => c,
            other => panic!("expected a constraint, got {other:?}"),
        }
    }

    #[derive(Debug)]
    struct RejectAll(FieldKind);

    impl FieldFilterHandler for RejectAll {
        fn field(&self) -> FieldKind {
            self.0
        }

        fn compile(
            &self,
            constraint: &FieldConstraint,
            _graph: &mut JoinGraph,
        ) -> Result<LeafSpecification, FilterError> {
            Err(FilterError::invalid_constraint(&constraint.field, "rejected"))
        }
    }

    #[test]
    fn test_default_registry_covers_every_field() {
        let registry = HandlerRegistry::with_default_handlers();
        assert_eq!(registry.len(), FieldKind::ALL.len());
        for field in FieldKind::ALL {
            assert!(registry.handler_for(field).is_some());
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = HandlerRegistry::empty();
        assert!(registry.register(Arc::new(RejectAll(FieldKind::Kind))));
        assert!(!registry.register(Arc::new(LeafFilterHandler::new(FieldKind::Kind))));
        assert_eq!(registry.len(), 2);

        let mut graph = JoinGraph::new();
        let err = registry
            .dispatch(&constraint(FieldFilter::kind().eq("workflow")), &mut graph)
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_missing_handler() {
        let mut registry = HandlerRegistry::empty();
        registry.register(Arc::new(LeafFilterHandler::new(FieldKind::ObjectName)));

        let mut graph = JoinGraph::new();
        assert!(
            registry
                .dispatch(&constraint(FieldFilter::object_name().eq("a")), &mut graph)
                .is_ok()
        );
        match registry.dispatch(&constraint(FieldFilter::content_type().eq("x")), &mut graph) {
            Err(FilterError::NoHandler { field }) => assert_eq!(field, FieldKind::ContentType),
            other => panic!("expected NoHandler, got {other:?}"),
        }
    }
}
