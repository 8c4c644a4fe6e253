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

use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

mod config;
mod error;
mod reader;

use config::Config;
use error::Result;
use reader::{partition, DelimitedFile};

#[derive(Parser)]
#[command(name = "lazycol")]
#[command(about = "Summarize one numeric column of a delimited text file")]
#[command(version)]
struct Cli {
    /// Delimited text file to read
    file: PathBuf,

    /// 0-based column to summarize
    #[arg(short = 'c', long, default_value_t = 0)]
    column: usize,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leading rows to skip (overrides the config file)
    #[arg(short, long)]
    skip: Option<usize>,

    /// Worker cap for materialization (overrides the config file)
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = match cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(skip) = cli.skip {
        config.reader.skip_rows = skip;
    }
    if let Some(threads) = cli.threads {
        config.parallel.num_threads = threads;
    }

    let file = DelimitedFile::open(&cli.file, &config)?;
    let column = file.column(cli.column)?;
    let values = column.materialize();

    let (min, max, sum, count) = summarize(values, config.parallel.effective_threads());

    println!("file:    {}", cli.file.display());
    println!("column:  {} of {}", cli.column, file.num_columns());
    println!("rows:    {}", values.len());
    println!("numeric: {}", count);
    if count > 0 {
        println!("min:     {}", min);
        println!("max:     {}", max);
        println!("mean:    {}", sum / count as f64);
    }

    Ok(())
}

/// Min/max/sum/count over the non-NaN values, fanned out across workers.
fn summarize(values: &[f64], threads: usize) -> (f64, f64, f64, u64) {
    let totals = Mutex::new((f64::INFINITY, f64::NEG_INFINITY, 0.0f64, 0u64));

    partition::parallel_for(values.len(), threads, |start, end, _worker| {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0u64;
        for &v in &values[start..end] {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        let mut totals = totals.lock().unwrap();
        totals.0 = totals.0.min(min);
        totals.1 = totals.1.max(max);
        totals.2 += sum;
        totals.3 += count;
    });

    totals.into_inner().unwrap()
}
