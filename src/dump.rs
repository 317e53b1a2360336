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
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use dcmclean::analyser::report;
use dcmclean::misc::is_dicom_file;
use dcmclean::{parse_tags, DecodedTag, ScanOptions};

#[derive(Debug, Parser)]
/// A dcmdump clone limited to the top level tags of explicit VR little endian files
struct Opt {
  /// DICOM input file to be dumped
  filepath: PathBuf,
  /// Look for items in the values of undefined length
  #[arg(short, long)]
  items: bool,
  /// Print the decoded tags as JSON
  #[arg(short, long)]
  json: bool,
  /// Log every step of the scan
  #[arg(short, long)]
  verbose: bool,
}

fn display_value(buffer: &[u8], tag: &DecodedTag) -> String {
  if tag.data_length == 0 {
    return "(no value available)".to_string();
  }
  match report(buffer, tag) {
    Some(report) => {
      let mut value = report.value.or(report.raw_value).unwrap_or_default();
      if value.len() > 66 {
        // Do not cut a character in half
        let mut end = 66;
        while !value.is_char_boundary(end) {
          end -= 1;
        }
        value.replace_range(end.., "...");
      }
      format!("[{}]", value)
    },
    None => format!("({} bytes of binary data)", tag.data_length),
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  let opt = Opt::parse();
  let level = if opt.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
  TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

  let filepath = opt.filepath.to_string_lossy().to_string();
  if !is_dicom_file(&filepath) {
    return Err(format!("error: not a DICOM file: {}", filepath).into());
  }
  let buffer = std::fs::read(&opt.filepath)?;
  let data_set = parse_tags(&buffer, None, ScanOptions { analyse_raw: opt.items });

  if opt.json {
    println!("{}", serde_json::to_string_pretty(&data_set)?);
    return Ok(());
  }

  println!();
  println!("# Dicom-File-Format");
  println!();
  println!("# Dicom-Meta-Information-Header");
  println!("# Used TransferSyntax: Little Endian Explicit");
  let mut header = true;
  for tag in data_set.iter() {
    if header && tag.id.group > 0x0002 {
      header = false;
      println!();
      println!("# Dicom-Data-Set");
      println!("# Used TransferSyntax: Little Endian Explicit");
    }
    let name = tag.definition().map_or("Unknown Tag & Data", |definition| definition.name);
    let length = if tag.undefined_length {
      "u/l".to_string()
    } else {
      format!("{}", tag.data_length)
    };
    println!("{} {} {: <40} # {: >4} {}", tag.id, tag.vr, display_value(&buffer, tag), length, name);
    for item in tag.items.iter().flatten() {
      println!("  {} na (Item #{} bytes from {:#X})", dcmclean::tags::ITEM, item.stop - item.start, item.start);
    }
  }

  if !data_set.diagnostics.is_empty() {
    println!();
    println!("# Diagnostics");
    for diagnostic in &data_set.diagnostics {
      println!("{:#08X} {:?}: {}", diagnostic.offset, diagnostic.kind, diagnostic.message);
    }
  }
  Ok(())
}
