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

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.reader.delimiter, ",");
    assert_eq!(config.reader.skip_rows, 0);
    assert_eq!(config.parallel.num_threads, 0);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_validate_valid_config() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_empty_delimiter() {
    let mut config = Config::default();
    config.reader.delimiter = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_multibyte_delimiter() {
    let mut config = Config::default();
    config.reader.delimiter = "||".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_newline_delimiter() {
    let mut config = Config::default();
    config.reader.delimiter = "\n".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_delimiter_byte() {
    let mut config = Config::default();
    assert_eq!(config.reader.delimiter_byte().unwrap(), b',');
    config.reader.delimiter = "\t".to_string();
    assert_eq!(config.reader.delimiter_byte().unwrap(), b'\t');
}

#[test]
fn test_effective_threads_auto() {
    let config = Config::default();
    assert!(config.parallel.effective_threads() >= 1);
}

#[test]
fn test_effective_threads_explicit() {
    let mut config = Config::default();
    config.parallel.num_threads = 3;
    assert_eq!(config.parallel.effective_threads(), 3);
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[reader]
delimiter = ";"
skip_rows = 1

[parallel]
num_threads = 4

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path().to_path_buf()).unwrap();
    assert_eq!(config.reader.delimiter, ";");
    assert_eq!(config.reader.skip_rows, 1);
    assert_eq!(config.parallel.num_threads, 4);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_from_file_invalid_delimiter() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[reader]
delimiter = ",,"
skip_rows = 0

[parallel]
num_threads = 0

[logging]
level = "info"
"#
    )
    .unwrap();

    assert!(Config::from_file(file.path().to_path_buf()).is_err());
}

#[test]
fn test_from_file_missing() {
    let result = Config::from_file(PathBuf::from("/nonexistent/lazycol.toml"));
    assert!(result.is_err());
}
