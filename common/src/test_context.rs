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

use crate::example::sample_catalog;
use catalog_filter::catalog::filter::{CatalogObjectWhereArgs, FilterCompiler, FilterExpression};
use catalog_filter::catalog::{
    CompilerConfig, FilterError, MemoryCatalog, Page, PageRequest, SpecificationExecutor,
};

/// Catalog fixture plus a compiler configured from the environment.
#[derive(Clone)]
pub struct TestContext {
    pub catalog: MemoryCatalog,
    pub compiler: FilterCompiler,
}

impl TestContext {
    pub fn new_from_env() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        TestContext {
            catalog: sample_catalog(),
            compiler: FilterCompiler::new(CompilerConfig::from_env()),
        }
    }

    /// Compiles `expr` and runs it against the fixture catalog.
    pub fn search(
        &self,
        expr: Option<&FilterExpression>,
        request: &PageRequest,
    ) -> Result<Page, FilterError> {
        let filter = self.compiler.compile(expr)?;
        self.catalog.find_all(&filter, request)
    }

    /// Like [`search`](Self::search), starting from a where-argument payload.
    pub fn search_json(&self, payload: &str, request: &PageRequest) -> Result<Page, FilterError> {
        let expr = match CatalogObjectWhereArgs::from_json(payload)? {
            Some(args) => Some(args.to_expression(self.compiler.config().max_depth)?),
            None => None,
        };
        self.search(expr.as_ref(), request)
    }

    /// Object names of every matching row, in default order.
    pub fn names(&self, expr: Option<&FilterExpression>) -> Vec<String> {
        let request = PageRequest::builder().size(usize::MAX).build();
        match self.search(expr, &request) {
            Ok(page) => page.rows.into_iter().map(|r| r.name).collect(),
            Err(e) => panic!("search failed: {e}"),
        }
    }
}
