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

use lazycol::config::Config;
use lazycol::reader::{DelimitedFile, MappedSource};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,price,volume").unwrap();
    for i in 0..rows {
        writeln!(file, "{},{},{}", i, 100.0 + i as f64 * 0.25, i * 10).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_open_and_materialize() {
    let file = write_csv(100);
    let mut config = Config::default();
    config.reader.skip_rows = 1;

    let reader = DelimitedFile::open(file.path(), &config).unwrap();
    assert_eq!(reader.num_columns(), 3);
    assert_eq!(reader.num_rows(), 100);

    let price = reader.column(1).unwrap();
    let values = price.materialize();
    assert_eq!(values.len(), 100);
    assert_eq!(values[0], 100.0);
    assert_eq!(values[99], 100.0 + 99.0 * 0.25);
}

#[test]
fn test_header_row_not_in_logical_indexing() {
    let file = write_csv(5);
    let mut config = Config::default();
    config.reader.skip_rows = 1;

    let reader = DelimitedFile::open(file.path(), &config).unwrap();
    let id = reader.column(0).unwrap();
    // Element 0 is the first data row, not the header.
    assert_eq!(id.get(0).unwrap(), 0.0);
}

#[test]
fn test_header_parses_as_nan_without_skip() {
    let file = write_csv(5);
    let config = Config::default();

    let reader = DelimitedFile::open(file.path(), &config).unwrap();
    assert_eq!(reader.num_rows(), 6);
    let id = reader.column(0).unwrap();
    assert!(id.get(0).unwrap().is_nan());
    assert_eq!(id.get(1).unwrap(), 0.0);
}

#[test]
fn test_every_column_of_shared_file() {
    let file = write_csv(50);
    let mut config = Config::default();
    config.reader.skip_rows = 1;

    let reader = DelimitedFile::open(file.path(), &config).unwrap();
    let columns: Vec<_> = (0..reader.num_columns())
        .map(|c| reader.column(c).unwrap())
        .collect();

    for (c, column) in columns.iter().enumerate() {
        let values = column.materialize();
        assert_eq!(values.len(), 50);
        let expected = match c {
            0 => 7.0,
            1 => 100.0 + 7.0 * 0.25,
            _ => 70.0,
        };
        assert_eq!(values[7], expected);
    }
}

#[test]
fn test_materialize_agrees_across_thread_counts() {
    let file = write_csv(997);
    let mut reference = None;

    for threads in [1, 2, 7, 64] {
        let mut config = Config::default();
        config.reader.skip_rows = 1;
        config.parallel.num_threads = threads;

        let reader = DelimitedFile::open(file.path(), &config).unwrap();
        let values = reader.column(1).unwrap().materialize().to_vec();
        match &reference {
            None => reference = Some(values),
            Some(expected) => assert_eq!(&values, expected, "threads={}", threads),
        }
    }
}

#[test]
fn test_custom_delimiter() {
    let mut config = Config::default();
    config.reader.delimiter = ";".to_string();

    let source = MappedSource::from_bytes(b"1;2\n3;4\n".to_vec());
    let reader = DelimitedFile::from_source(source, &config).unwrap();
    assert_eq!(reader.num_columns(), 2);
    assert_eq!(reader.column(1).unwrap().materialize(), &[2.0, 4.0]);
}

#[test]
fn test_column_out_of_range() {
    let source = MappedSource::from_bytes(b"1,2\n".to_vec());
    let reader = DelimitedFile::from_source(source, &Config::default()).unwrap();
    assert!(reader.column(2).is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = Config::default();
    config.reader.delimiter = String::new();
    let source = MappedSource::from_bytes(b"1,2\n".to_vec());
    assert!(DelimitedFile::from_source(source, &config).is_err());
}
