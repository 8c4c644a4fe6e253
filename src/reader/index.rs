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

//! Field-boundary offset table for a delimited file.

use crate::error::{LazycolError, Result};
use tracing::debug;

/// Ordered byte offsets marking the start of every field, plus one trailing
/// sentinel, laid out row-major. Entry `(row + skip) * num_columns + column`
/// is the first byte of that cell; the next entry minus one is the byte just
/// past it, since every field is followed by exactly one separator byte.
///
/// Immutable after construction and shared across sibling columns.
#[derive(Debug, Clone)]
pub struct OffsetIndex {
    offsets: Vec<usize>,
    num_columns: usize,
}

impl OffsetIndex {
    /// Build an index by scanning `bytes` once for `delimiter` and newline
    /// bytes. The column count is taken from the first record; a total field
    /// count that does not divide evenly by it is rejected.
    pub fn scan(bytes: &[u8], delimiter: u8) -> Result<Self> {
        if delimiter == b'\n' {
            return Err(LazycolError::Index(
                "Delimiter cannot be a newline".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(LazycolError::Index("Cannot index empty input".to_string()));
        }

        let mut num_columns = 1;
        for &b in bytes {
            if b == b'\n' {
                break;
            }
            if b == delimiter {
                num_columns += 1;
            }
        }

        let mut offsets = Vec::with_capacity(bytes.len() / 4 + 2);
        offsets.push(0);
        for (pos, &b) in bytes.iter().enumerate() {
            if b == delimiter || b == b'\n' {
                offsets.push(pos + 1);
            }
        }
        // A trailing newline already terminated the last field; anything
        // else means the final field has no separator, so a sentinel one
        // past the end stands in for it.
        if bytes[bytes.len() - 1] != b'\n' {
            offsets.push(bytes.len() + 1);
        }

        let fields = offsets.len() - 1;
        if fields % num_columns != 0 {
            return Err(LazycolError::Index(format!(
                "Ragged input: {} fields do not fill rows of {} columns",
                fields, num_columns
            )));
        }

        debug!(
            "Indexed {} fields as {} records x {} columns",
            fields,
            fields / num_columns,
            num_columns
        );

        Ok(Self {
            offsets,
            num_columns,
        })
    }

    /// Wrap an externally built offset table. `offsets` must hold one entry
    /// per field start plus a trailing sentinel, strictly increasing.
    pub fn from_offsets(offsets: Vec<usize>, num_columns: usize) -> Result<Self> {
        if num_columns == 0 {
            return Err(LazycolError::Index(
                "Column count must be greater than 0".to_string(),
            ));
        }
        if offsets.len() < 2 {
            return Err(LazycolError::Index(
                "Offset index needs at least one field and a sentinel".to_string(),
            ));
        }
        if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(LazycolError::Index(
                "Offsets must be strictly increasing".to_string(),
            ));
        }
        if (offsets.len() - 1) % num_columns != 0 {
            return Err(LazycolError::Index(format!(
                "{} fields do not fill rows of {} columns",
                offsets.len() - 1,
                num_columns
            )));
        }
        Ok(Self {
            offsets,
            num_columns,
        })
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Total records in the file, header rows included.
    pub fn records(&self) -> usize {
        (self.offsets.len() - 1) / self.num_columns
    }

    /// One past the last indexed byte.
    pub fn sentinel(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// Byte range `[start, end)` of one cell's raw text, excluding its
    /// trailing separator. `row` is logical (after `skip`); the caller is
    /// responsible for keeping `row + skip` within `records()`.
    pub fn field_range(&self, row: usize, column: usize, skip: usize) -> (usize, usize) {
        let idx = (row + skip) * self.num_columns + column;
        (self.offsets[idx], self.offsets[idx + 1] - 1)
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
