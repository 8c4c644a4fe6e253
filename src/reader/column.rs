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

//! Lazy column vector: parses mapped bytes on demand, caches on bulk read.

use crate::error::{LazycolError, Result};
use crate::reader::index::OffsetIndex;
use crate::reader::partition;
use crate::reader::source::MappedSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Diagnostic snapshot of a column's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub length: usize,
    pub materialized: bool,
    /// Fields parsed so far, element reads and materialization combined.
    pub fields_parsed: u64,
}

/// One logical column of doubles over a shared offset index and byte source.
///
/// Values are parsed per element while unmaterialized; `materialize` parses
/// the whole column in parallel exactly once and every later read, element
/// or bulk, comes from that cached array.
pub struct LazyColumn {
    index: Arc<OffsetIndex>,
    source: Arc<MappedSource>,
    column: usize,
    skip: usize,
    num_threads: usize,
    len: usize,
    cache: OnceLock<Vec<f64>>,
    fields_parsed: AtomicU64,
}

impl LazyColumn {
    /// Bind a column selector to an already-built index and source. The
    /// index/source relationship is validated eagerly: an index that points
    /// past the source or a selector outside the stride is rejected here
    /// rather than surfacing later as a bad read.
    pub fn new(
        index: Arc<OffsetIndex>,
        source: Arc<MappedSource>,
        column: usize,
        skip: usize,
        num_threads: usize,
    ) -> Result<Self> {
        if column >= index.num_columns() {
            return Err(LazycolError::Column(format!(
                "Column {} out of range for {} columns",
                column,
                index.num_columns()
            )));
        }
        let records = index.records();
        if skip > records {
            return Err(LazycolError::Column(format!(
                "Cannot skip {} of {} records",
                skip, records
            )));
        }
        // The sentinel may sit one past the end when the input has no
        // trailing separator.
        if index.sentinel() > source.len() + 1 {
            return Err(LazycolError::Index(format!(
                "Offset index ends at byte {} but the source holds {} bytes",
                index.sentinel(),
                source.len()
            )));
        }

        Ok(Self {
            len: records - skip,
            index,
            source,
            column,
            skip,
            num_threads: num_threads.max(1),
            cache: OnceLock::new(),
            fields_parsed: AtomicU64::new(0),
        })
    }

    /// Logical length; constant across the column's lifetime.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read one element. While unmaterialized every call re-parses the
    /// field; sparse random access is the intended use of this path, dense
    /// access belongs on `materialize`.
    pub fn get(&self, i: usize) -> Result<f64> {
        if i >= self.len {
            return Err(LazycolError::IndexOutOfRange {
                index: i,
                len: self.len,
            });
        }
        if let Some(values) = self.cache.get() {
            return Ok(values[i]);
        }
        Ok(self.parse_at(i))
    }

    fn parse_at(&self, i: usize) -> f64 {
        let (start, end) = self.index.field_range(i, self.column, self.skip);
        self.fields_parsed.fetch_add(1, Ordering::Relaxed);
        parse_field(&self.source.as_bytes()[start..end])
    }

    /// Parse the whole column into a dense array, once. Workers fan out
    /// over disjoint slices of the output; the finished array is published
    /// through a once-only slot, so concurrent first callers at worst
    /// duplicate the parse and the losing array is dropped. Every
    /// subsequent call returns the cached array without reparsing.
    pub fn materialize(&self) -> &[f64] {
        if let Some(values) = self.cache.get() {
            return values;
        }

        let mut values = vec![0.0f64; self.len];
        partition::parallel_fill(&mut values, self.num_threads, |i| self.parse_at(i));
        debug!(
            "Materialized column {} ({} values, {} workers)",
            self.column,
            self.len,
            self.num_threads.min(self.len.max(1))
        );

        self.cache.get_or_init(|| values)
    }

    /// Dense view of the column, materializing as a side effect if needed.
    pub fn values(&self) -> &[f64] {
        self.materialize()
    }

    /// Pointer to the dense array. Forces materialization, like `values`;
    /// the pointer stays valid for the column's lifetime because the cache
    /// is never recomputed or dropped while the column is alive.
    pub fn as_ptr(&self) -> *const f64 {
        self.materialize().as_ptr()
    }

    pub fn is_materialized(&self) -> bool {
        self.cache.get().is_some()
    }

    pub fn info(&self) -> ColumnInfo {
        ColumnInfo {
            length: self.len,
            materialized: self.is_materialized(),
            fields_parsed: self.fields_parsed.load(Ordering::Relaxed),
        }
    }
}

/// Locale-independent numeric parse with a NaN sentinel: malformed or
/// non-UTF-8 field text resolves to NaN, never an error.
fn parse_field(bytes: &[u8]) -> f64 {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod column_test;
