// Copyright (c) 2023 Jean-Daniel Michaud
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use dcmclean::instance::DiagnosticKind;
use dcmclean::{clean_tags, is_valid, parse_tags, ScanOptions, TagId};

mod config;
mod config_file;

#[derive(Debug, Parser)]
/// Overwrite the sensitive tags of an explicit VR little endian DICOM file
struct Opt {
  /// DICOM input file
  input: PathBuf,
  /// Where to write the anonymized file
  output: PathBuf,
  /// YAML configuration listing the tags to clean
  #[arg(short, long)]
  config: Option<PathBuf>,
  /// Tags to clean, e.g. "(0010,0010)". Overrides the configuration
  #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
  tags: Option<Vec<TagId>>,
  /// Log every step of the scan
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
  let opt = Opt::parse();
  let level = if opt.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
  TermLogger::init(level, simplelog::Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

  let tags = match opt.tags {
    Some(tags) => tags,
    None => {
      let access = config_file::get_config(&opt.config, &config::default_config())?;
      info!("Using configuration from {}", access.provenance);
      access.config.anonymization.tags
    }
  };

  let buffer = std::fs::read(&opt.input)?;
  if !is_valid(&buffer) {
    return Err(format!("error: not a DICOM file: {}", opt.input.display()).into());
  }
  let data_set = parse_tags(&buffer, None, ScanOptions::default());
  if data_set.diagnostics.iter().any(|diagnostic| diagnostic.kind == DiagnosticKind::TruncatedHeader) {
    warn!("{} is truncated, tags after the last complete header are left untouched", opt.input.display());
  }
  for id in &tags {
    if data_set.find(id).is_none() {
      info!("{} not present in {}", id, opt.input.display());
    }
  }
  let cleaned = clean_tags(&buffer, &data_set.tags, &tags);
  std::fs::write(&opt.output, cleaned)?;
  info!("{} tags cleaned, written to {}", tags.len(), opt.output.display());
  Ok(())
}
