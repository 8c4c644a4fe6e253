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

//! Read-only byte source shared by every column built over one file.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Randomly-addressable view of file contents. Columns over the same file
/// share one source behind an `Arc`; it is never written through.
#[derive(Debug)]
pub enum MappedSource {
    /// Memory-mapped file contents.
    Mmap(Mmap),
    /// Owned buffer, used by tests and already-loaded inputs.
    Memory(Vec<u8>),
}

impl MappedSource {
    /// Open and map a file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the mapping is read-only. The file must not be truncated
        // or rewritten while any column view over it is alive.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(MappedSource::Mmap(mmap))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        MappedSource::Memory(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            MappedSource::Mmap(mmap) => mmap.as_ref(),
            MappedSource::Memory(bytes) => bytes.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
