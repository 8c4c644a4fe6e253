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

//! Lazy column views over delimited text files.
//!
//! A file is mapped and indexed once; every column handed out afterwards
//! shares that index and mapping and parses its values on demand.

pub mod column;
pub mod index;
pub mod partition;
pub mod source;

pub use column::{ColumnInfo, LazyColumn};
pub use index::OffsetIndex;
pub use source::MappedSource;

use crate::config::Config;
use crate::error::{LazycolError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// An opened, indexed delimited file handing out lazy column views.
pub struct DelimitedFile {
    index: Arc<OffsetIndex>,
    source: Arc<MappedSource>,
    skip: usize,
    num_threads: usize,
}

impl DelimitedFile {
    /// Map `path` read-only and index it according to `config`.
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let source = MappedSource::open(path.as_ref())?;
        info!(
            "Opened {} ({} bytes)",
            path.as_ref().display(),
            source.len()
        );
        Self::from_source(source, config)
    }

    /// Index an already-available byte source.
    pub fn from_source(source: MappedSource, config: &Config) -> Result<Self> {
        config.validate()?;
        let index = OffsetIndex::scan(source.as_bytes(), config.reader.delimiter_byte()?)?;

        let records = index.records();
        if config.reader.skip_rows > records {
            return Err(LazycolError::Config(format!(
                "skip_rows {} exceeds the {} records in the input",
                config.reader.skip_rows, records
            )));
        }
        info!(
            "Indexed {} records x {} columns ({} data rows)",
            records,
            index.num_columns(),
            records - config.reader.skip_rows
        );

        Ok(Self {
            index: Arc::new(index),
            source: Arc::new(source),
            skip: config.reader.skip_rows,
            num_threads: config.parallel.effective_threads(),
        })
    }

    pub fn num_columns(&self) -> usize {
        self.index.num_columns()
    }

    /// Logical rows, after skipped leading rows.
    pub fn num_rows(&self) -> usize {
        self.index.records() - self.skip
    }

    /// A lazy view of one column. Each view shares the file's index and
    /// mapping but owns its materialization cache.
    pub fn column(&self, column: usize) -> Result<LazyColumn> {
        LazyColumn::new(
            Arc::clone(&self.index),
            Arc::clone(&self.source),
            column,
            self.skip,
            self.num_threads,
        )
    }
}
