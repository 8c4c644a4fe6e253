// Copyright 2025 Muvon Un Limited
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

//! Lazycol - Lazy, memory-mapped numeric column views
//!
//! Indexes a delimited text file once by recording field boundaries, then
//! exposes each column as a lazy vector of doubles: values are parsed from
//! the mapped bytes only when read, and bulk reads materialize the whole
//! column in parallel exactly once.

pub mod config;
pub mod error;
pub mod reader;

pub use config::Config;
pub use error::{LazycolError, Result};
pub use reader::{DelimitedFile, LazyColumn};
