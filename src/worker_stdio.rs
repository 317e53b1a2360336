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

//! Runs the worker protocol over stdin/stdout, one JSON message per line.

use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::Parser;
use log::{error, LevelFilter};
use serde_json::json;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use dcmclean::worker::Worker;

#[derive(Debug, Parser)]
/// Answer analyse and clean requests read on stdin
struct Opt {
  /// Log every step of the scan
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
  let opt = Opt::parse();
  let level = if opt.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
  TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

  let mut worker = Worker::new();
  let stdout = io::stdout();
  let mut out = stdout.lock();
  for line in io::stdin().lock().lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    match worker.handle_json(&line) {
      Ok(answers) => {
        for answer in answers {
          writeln!(out, "{}", answer)?;
        }
      },
      Err(e) => {
        error!("Invalid message: {}", e);
        writeln!(out, "{}", json!({ "error": e.to_string() }))?;
      },
    }
    out.flush()?;
  }
  Ok(())
}
