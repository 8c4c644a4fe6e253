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

use crate::error::{LazycolError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub reader: ReaderConfig,
    pub parallel: ParallelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Field separator, a single byte. Newlines always terminate records.
    pub delimiter: String,
    /// Leading rows excluded from logical indexing (e.g. a header row).
    pub skip_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Worker cap for bulk materialization. 0 means one per CPU.
    pub num_threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reader: ReaderConfig {
                delimiter: ",".to_string(),
                skip_rows: 0,
            },
            parallel: ParallelConfig { num_threads: 0 },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl ReaderConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        let bytes = self.delimiter.as_bytes();
        if bytes.len() != 1 {
            return Err(LazycolError::Config(format!(
                "Delimiter must be a single byte, got '{}'",
                self.delimiter
            )));
        }
        if bytes[0] == b'\n' {
            return Err(LazycolError::Config(
                "Delimiter cannot be a newline".to_string(),
            ));
        }
        Ok(bytes[0])
    }
}

impl ParallelConfig {
    /// Resolved worker cap: configured value, or one per CPU when 0.
    pub fn effective_threads(&self) -> usize {
        if self.num_threads == 0 {
            rayon::current_num_threads()
        } else {
            self.num_threads
        }
    }
}

impl Config {
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            LazycolError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| LazycolError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.reader.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
