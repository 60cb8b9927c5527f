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

//! Versioned object catalog and its where-expression filtering

pub mod config;
pub mod error;
pub mod filter;
pub mod store;
pub mod types;

pub use config::CompilerConfig;
pub use error::FilterError;
pub use store::{OrderBy, Page, PageRequest, SpecificationExecutor};
pub use types::MemoryCatalog;
