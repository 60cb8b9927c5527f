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

//! Compiler configuration

use typed_builder::TypedBuilder;

/// Default cap on expression nesting levels.
///
/// Every payload level costs two JSON levels, so caps above 63 are never
/// reached through [`CatalogObjectWhereArgs::from_json`]: `serde_json` stops
/// at 128 JSON levels first and the payload is rejected as invalid JSON.
///
/// [`CatalogObjectWhereArgs::from_json`]: crate::catalog::filter::CatalogObjectWhereArgs::from_json
pub const DEFAULT_MAX_DEPTH: usize = 60;

/// Environment variable overriding [`CompilerConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "CATALOG_FILTER_MAX_DEPTH";

/// Settings shared by the where-argument conversion and the filter compiler.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CompilerConfig {
    /// Maximum nesting level of a filter expression; the root node is level 1
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig::builder().build()
    }
}

impl CompilerConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let max_depth: usize = std::env::var(MAX_DEPTH_ENV)
            .unwrap_or(DEFAULT_MAX_DEPTH.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_DEPTH);
        log::debug!("{MAX_DEPTH_ENV}={max_depth}");
        CompilerConfig { max_depth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CompilerConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(CompilerConfig::builder().max_depth(8).build().max_depth, 8);
    }
}
