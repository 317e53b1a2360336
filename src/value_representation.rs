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

//! Value representations and how their payloads are extracted, interpreted,
//! displayed and wiped.
//!
//! Every VR belongs to a [`Category`] which provides the default behavior. A
//! VR definition may shadow any of those defaults with its own function.
//! Dispatch goes to the VR override first, then to the category.

use core::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::error::DicomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  String,
  Date,
  Number,
  Raw,
}

/// Two characters code of a value representation as read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VrCode(pub [u8; 2]);

impl VrCode {
  pub fn new(code: &str) -> Option<VrCode> {
    let bytes: [u8; 2] = code.as_bytes().try_into().ok()?;
    Some(VrCode(bytes))
  }

  pub fn as_str(&self) -> Option<&str> {
    core::str::from_utf8(&self.0).ok()
  }

  /// OB, OW and SQ use 2 reserved bytes followed by a 4 bytes length.
  pub fn has_long_header(&self) -> bool {
    matches!(&self.0, b"OB" | b"OW" | b"SQ")
  }
}

impl fmt::Display for VrCode {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
  }
}

impl Serialize for VrCode {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DicomValue {
  Text(String),
  Date(NaiveDate),
  FD(f64),
  FL(f32),
  SL(i32),
  SS(i16),
  SV(i64),
  UL(u32),
  US(u16),
  UV(u64),
}

impl fmt::Display for DicomValue {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DicomValue::Text(value) => write!(f, "{}", value),
      DicomValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
      DicomValue::FD(value) => write!(f, "{}", value),
      DicomValue::FL(value) => write!(f, "{}", value),
      DicomValue::SL(value) => write!(f, "{}", value),
      DicomValue::SS(value) => write!(f, "{}", value),
      DicomValue::SV(value) => write!(f, "{}", value),
      DicomValue::UL(value) => write!(f, "{}", value),
      DicomValue::US(value) => write!(f, "{}", value),
      DicomValue::UV(value) => write!(f, "{}", value),
    }
  }
}

// (buffer, payload offset, payload length)
pub type ExtractFn = fn(&[u8], usize, usize) -> Result<DicomValue, DicomError>;
pub type ParseFn = fn(DicomValue) -> Result<DicomValue, DicomError>;
pub type FormatFn = fn(&DicomValue) -> String;
// (buffer, header offset, payload offset, payload length)
pub type CleanFn = fn(&mut [u8], usize, usize, usize);

#[derive(Clone, Copy)]
struct Overrides {
  extract: Option<ExtractFn>,
  parse: Option<ParseFn>,
  format: Option<FormatFn>,
  clean: Option<CleanFn>,
}

const DEFAULTS: Overrides = Overrides { extract: None, parse: None, format: None, clean: None };

impl Category {
  fn extract(&self) -> Option<ExtractFn> {
    match self {
      Category::String | Category::Date => Some(extract_text),
      Category::Number | Category::Raw => None,
    }
  }

  fn parse(&self) -> Option<ParseFn> {
    match self {
      Category::String | Category::Number => Some(identity),
      Category::Date | Category::Raw => None,
    }
  }

  fn format(&self) -> Option<FormatFn> {
    match self {
      Category::String | Category::Date | Category::Number => Some(format_value),
      Category::Raw => None,
    }
  }

  fn clean(&self) -> Option<CleanFn> {
    match self {
      Category::String => Some(clean_blank),
      Category::Date | Category::Number | Category::Raw => None,
    }
  }
}

pub struct VrDefinition {
  pub code: &'static str,
  pub category: Category,
  /// Fixed length of a single value in bytes.
  pub length: Option<usize>,
  /// Maximum length of a single value, informational only.
  pub max_length: Option<usize>,
  overrides: Overrides,
}

impl fmt::Debug for VrDefinition {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("VrDefinition")
      .field("code", &self.code)
      .field("category", &self.category)
      .field("length", &self.length)
      .field("max_length", &self.max_length)
      .finish()
  }
}

impl VrDefinition {
  pub fn extract(&self, buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
    let extract = self.overrides.extract.or(self.category.extract())
      .ok_or_else(|| self.missing("extractor"))?;
    extract(buffer, offset, length)
  }

  pub fn parse(&self, value: DicomValue) -> Result<DicomValue, DicomError> {
    let parse = self.overrides.parse.or(self.category.parse())
      .ok_or_else(|| self.missing("parser"))?;
    parse(value)
  }

  pub fn format(&self, value: &DicomValue) -> Result<String, DicomError> {
    let format = self.overrides.format.or(self.category.format())
      .ok_or_else(|| self.missing("formatter"))?;
    Ok(format(value))
  }

  pub fn clean(&self) -> Option<CleanFn> {
    self.overrides.clean.or(self.category.clean())
  }

  /// Extracts, parses and formats the payload for display.
  pub fn render(&self, buffer: &[u8], offset: usize, length: usize) -> Result<String, DicomError> {
    let value = self.extract(buffer, offset, length)?;
    self.format(&self.parse(value)?)
  }

  fn missing(&self, what: &str) -> DicomError {
    DicomError::new(&format!("Value representation {} has no {}", self.code, what))
  }
}

pub fn resolve(code: &str) -> Option<&'static VrDefinition> {
  VALUE_REPRESENTATIONS.iter().find(|definition| definition.code == code)
}

pub fn resolve_code(code: &VrCode) -> Option<&'static VrDefinition> {
  code.as_str().and_then(resolve)
}

fn payload(buffer: &[u8], offset: usize, length: usize) -> Result<&[u8], DicomError> {
  offset.checked_add(length)
    .and_then(|end| buffer.get(offset..end))
    .ok_or_else(|| DicomError::new(&format!(
      "Trying to read out of buffer bound (offset: {:#x}, length: {}, buffer size: {})",
      offset, length, buffer.len())))
}

fn read_array<const N: usize>(buffer: &[u8], offset: usize, length: usize) -> Result<[u8; N], DicomError> {
  if length < N {
    return Err(DicomError::new(&format!(
      "Expected at least {} bytes at {:#x} but the value is {} bytes long", N, offset, length)));
  }
  Ok(payload(buffer, offset, N)?.try_into()?)
}

// One code point per byte
fn extract_text(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::Text(payload(buffer, offset, length)?.iter().map(|&b| b as char).collect()))
}

fn extract_unique_identifier(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  // UIDs are padded to an even length with a single NUL
  let bytes = payload(buffer, offset, length)?;
  let bytes = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
  Ok(DicomValue::Text(bytes.iter().map(|&b| b as char).collect()))
}

fn extract_fl(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::FL(f32::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_fd(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::FD(f64::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_sl(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::SL(i32::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_ss(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::SS(i16::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_sv(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::SV(i64::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_ul(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::UL(u32::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_us(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::US(u16::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn extract_uv(buffer: &[u8], offset: usize, length: usize) -> Result<DicomValue, DicomError> {
  Ok(DicomValue::UV(u64::from_le_bytes(read_array(buffer, offset, length)?)))
}

fn identity(value: DicomValue) -> Result<DicomValue, DicomError> {
  Ok(value)
}

fn parse_date(value: DicomValue) -> Result<DicomValue, DicomError> {
  match value {
    DicomValue::Text(text) => {
      let text = text.trim_matches(char::from(0)).trim();
      if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DicomError::new(&format!("Malformed date: {:?}", text)));
      }
      NaiveDate::parse_from_str(text, "%Y%m%d")
        .map(DicomValue::Date)
        .map_err(|err| DicomError::new(&format!("Invalid date {:?}: {}", text, err)))
    },
    DicomValue::Date(_) => Ok(value),
    _ => Err(DicomError::new(&format!("Expected a date string, got {:?}", value))),
  }
}

fn format_value(value: &DicomValue) -> String {
  value.to_string()
}

fn format_trimmed(value: &DicomValue) -> String {
  value.to_string().trim().to_string()
}

fn period_unit(unit: char) -> Option<&'static str> {
  match unit {
    'D' => Some("day(s)"),
    'W' => Some("week(s)"),
    'M' => Some("month(s)"),
    'Y' => Some("year(s)"),
    _ => None,
  }
}

// nnnU, e.g.: 018M
fn format_age(value: &DicomValue) -> String {
  let text = value.to_string();
  let age = text.trim();
  let mut chars = age.chars();
  let formatted = chars.next_back().and_then(|unit| {
    let amount = chars.as_str().parse::<u32>().ok()?;
    Some(format!("{} {} ago", amount, period_unit(unit)?))
  });
  formatted.unwrap_or_else(|| age.to_string())
}

// HHMMSS.FFFFFF where every component after the hour is optional
fn format_time(value: &DicomValue) -> String {
  let text = value.to_string();
  let chars: Vec<char> = text.trim().chars().collect();
  let component = |from: usize| {
    let part: String = chars[from.min(chars.len())..(from + 2).min(chars.len())].iter().collect();
    format!("{:0>2}", part)
  };
  let hour = component(0);
  if chars.len() > 2 {
    let minute = component(2);
    if chars.len() > 4 {
      return format!("{}:{}:{}", hour, minute, component(4));
    }
    return format!("{}:{}", hour, minute);
  }
  hour
}

fn put_text(buffer: &mut [u8], offset: usize, text: &str) {
  let start = offset.min(buffer.len());
  let end = offset.saturating_add(text.len()).min(buffer.len());
  buffer[start..end].copy_from_slice(&text.as_bytes()[..end - start]);
}

fn clean_blank(buffer: &mut [u8], _offset: usize, data_offset: usize, data_length: usize) {
  put_text(buffer, data_offset, &" ".repeat(data_length));
}

fn clean_number_string(buffer: &mut [u8], _offset: usize, data_offset: usize, data_length: usize) {
  put_text(buffer, data_offset, &"0".repeat(data_length));
}

fn clean_identifying_text(buffer: &mut [u8], _offset: usize, data_offset: usize, data_length: usize) {
  let text: String = "Anonymized".chars().take(data_length).collect();
  put_text(buffer, data_offset, &format!("{:<1$}", text, data_length));
}

fn clean_time(buffer: &mut [u8], _offset: usize, data_offset: usize, data_length: usize) {
  let mut time = "0".repeat(data_length.min(6));
  if time.len() < data_length {
    time.push('.');
    time = format!("{:0<1$}", time, data_length);
  }
  put_text(buffer, data_offset, &time);
}

// Some readers refuse an empty date, so the date is replaced rather than blanked.
fn clean_date(buffer: &mut [u8], offset: usize, data_offset: usize, data_length: usize) {
  clean_date_with(buffer, offset, data_offset, data_length, Utc::now().date_naive());
}

pub(crate) fn clean_date_with(buffer: &mut [u8], _offset: usize, data_offset: usize, data_length: usize,
  today: NaiveDate) {
  if data_length > 0 {
    let date = today.format("%Y%m%d").to_string();
    let date: String = date.chars().take(data_length).collect();
    put_text(buffer, data_offset, &date);
  }
}

const fn string(code: &'static str) -> VrDefinition {
  VrDefinition { code, category: Category::String, length: None, max_length: None, overrides: DEFAULTS }
}

const fn raw(code: &'static str) -> VrDefinition {
  VrDefinition { code, category: Category::Raw, length: None, max_length: None, overrides: DEFAULTS }
}

const fn number(code: &'static str, length: usize, extract: ExtractFn) -> VrDefinition {
  VrDefinition {
    code,
    category: Category::Number,
    length: Some(length),
    max_length: None,
    overrides: Overrides { extract: Some(extract), ..DEFAULTS },
  }
}

// https://dicom.nema.org/medical/dicom/current/output/chtml/part05/sect_6.2.html
static VALUE_REPRESENTATIONS: &[VrDefinition] = &[
  VrDefinition {
    max_length: Some(16),
    overrides: Overrides { format: Some(format_trimmed), ..DEFAULTS },
    ..string("AE")
  },
  VrDefinition {
    length: Some(4),
    overrides: Overrides { format: Some(format_age), ..DEFAULTS },
    ..string("AS")
  },
  VrDefinition {
    length: Some(4),
    overrides: Overrides { format: Some(format_trimmed), ..DEFAULTS },
    ..string("AT")
  },
  VrDefinition { max_length: Some(16), ..string("CS") },
  VrDefinition {
    code: "DA",
    category: Category::Date,
    length: Some(8),
    max_length: None,
    overrides: Overrides { parse: Some(parse_date), clean: Some(clean_date), ..DEFAULTS },
  },
  VrDefinition {
    max_length: Some(16),
    overrides: Overrides { clean: Some(clean_number_string), ..DEFAULTS },
    ..string("DS")
  },
  VrDefinition { max_length: Some(26), ..string("DT") },
  number("FL", 4, extract_fl),
  number("FD", 8, extract_fd),
  VrDefinition { max_length: Some(12), ..string("IS") },
  VrDefinition { overrides: Overrides { clean: Some(clean_identifying_text), ..DEFAULTS }, ..string("LO") },
  VrDefinition { overrides: Overrides { clean: Some(clean_identifying_text), ..DEFAULTS }, ..string("LT") },
  raw("OB"),
  raw("OD"),
  raw("OF"),
  raw("OL"),
  raw("OV"),
  raw("OW"),
  VrDefinition { overrides: Overrides { clean: Some(clean_identifying_text), ..DEFAULTS }, ..string("PN") },
  string("SH"),
  number("SL", 4, extract_sl),
  raw("SQ"),
  number("SS", 2, extract_ss),
  string("ST"),
  number("SV", 8, extract_sv),
  VrDefinition {
    max_length: Some(16),
    overrides: Overrides { format: Some(format_time), clean: Some(clean_time), ..DEFAULTS },
    ..string("TM")
  },
  string("UC"),
  VrDefinition {
    max_length: Some(64),
    overrides: Overrides { extract: Some(extract_unique_identifier), ..DEFAULTS },
    ..string("UI")
  },
  number("UL", 4, extract_ul),
  raw("UN"),
  string("UR"),
  number("US", 2, extract_us),
  string("UT"),
  number("UV", 8, extract_uv),
];

#[cfg(test)]
mod tests {
  use super::*;

  fn vr(code: &str) -> &'static VrDefinition {
    resolve(code).unwrap()
  }

  fn extract_all(code: &str, data: &[u8]) -> DicomValue {
    vr(code).extract(data, 0, data.len()).unwrap()
  }

  #[test]
  fn test_age_string() {
    let value = extract_all("AS", b"018M");
    assert_eq!(value, DicomValue::Text("018M".to_string()));
    assert_eq!(vr("AS").format(&value).unwrap(), "18 month(s) ago");
    assert_eq!(format_age(&DicomValue::Text("003W".to_string())), "3 week(s) ago");
    assert_eq!(format_age(&DicomValue::Text("045Y".to_string())), "45 year(s) ago");
    // Not an age, shown as is
    assert_eq!(format_age(&DicomValue::Text("04XQ".to_string())), "04XQ");
    assert_eq!(format_age(&DicomValue::Text("".to_string())), "");
  }

  #[test]
  fn test_date() {
    let da = vr("DA");
    let value = extract_all("DA", b"19930822");
    assert_eq!(value, DicomValue::Text("19930822".to_string()));
    let date = da.parse(value).unwrap();
    assert_eq!(date, DicomValue::Date(NaiveDate::from_ymd_opt(1993, 8, 22).unwrap()));
    assert_eq!(da.format(&date).unwrap(), "1993-08-22");
  }

  #[test]
  fn test_malformed_date() {
    let da = vr("DA");
    assert!(da.parse(DicomValue::Text("1993082".to_string())).is_err());
    assert!(da.parse(DicomValue::Text("19931322".to_string())).is_err());
    assert!(da.parse(DicomValue::Text("1993-08-2".to_string())).is_err());
  }

  #[test]
  fn test_date_time_is_left_as_is() {
    let dt = vr("DT");
    let value = extract_all("DT", b"195308");
    assert_eq!(value, DicomValue::Text("195308".to_string()));
    assert_eq!(dt.render(b"195308", 0, 6).unwrap(), "195308");
  }

  #[test]
  fn test_time() {
    let tm = vr("TM");
    let value = extract_all("TM", b"094836.21474398");
    assert_eq!(value, DicomValue::Text("094836.21474398".to_string()));
    assert_eq!(tm.format(&value).unwrap(), "09:48:36");
    assert_eq!(tm.render(b"09", 0, 2).unwrap(), "09");
    assert_eq!(tm.render(b"0948", 0, 4).unwrap(), "09:48");
    assert_eq!(tm.render(b"09483", 0, 5).unwrap(), "09:48:03");
    assert_eq!(tm.render(b"9", 0, 1).unwrap(), "09");
  }

  #[test]
  fn test_unsigned_short() {
    let us = vr("US");
    let value = extract_all("US", &[0x00, 0x03]);
    assert_eq!(value, DicomValue::US(768));
    assert_eq!(us.format(&value).unwrap(), "768");
  }

  #[test]
  fn test_numbers_are_little_endian() {
    assert_eq!(extract_all("US", &0xBEEFu16.to_le_bytes()), DicomValue::US(0xBEEF));
    assert_eq!(extract_all("UL", &158u32.to_le_bytes()), DicomValue::UL(158));
    assert_eq!(extract_all("SS", &(-1234i16).to_le_bytes()), DicomValue::SS(-1234));
    assert_eq!(extract_all("SL", &(-70000i32).to_le_bytes()), DicomValue::SL(-70000));
    assert_eq!(extract_all("FL", &1.5f32.to_le_bytes()), DicomValue::FL(1.5));
    assert_eq!(extract_all("FD", &(-2.25f64).to_le_bytes()), DicomValue::FD(-2.25));
    assert_eq!(extract_all("SV", &i64::MIN.to_le_bytes()), DicomValue::SV(i64::MIN));
    assert_eq!(extract_all("UV", &u64::MAX.to_le_bytes()), DicomValue::UV(u64::MAX));
  }

  #[test]
  fn test_fixed_lengths() {
    for (code, length) in [("FL", 4), ("FD", 8), ("SL", 4), ("SS", 2), ("SV", 8), ("UL", 4), ("US", 2), ("UV", 8)] {
      assert_eq!(vr(code).length, Some(length), "{}", code);
      assert_eq!(vr(code).category, Category::Number, "{}", code);
    }
  }

  #[test]
  fn test_only_first_value_is_read() {
    // VM 2: 3\4
    let data = [0x03, 0x00, 0x04, 0x00];
    assert_eq!(vr("US").extract(&data, 0, 4).unwrap(), DicomValue::US(3));
    assert_eq!(vr("US").extract(&data, 2, 2).unwrap(), DicomValue::US(4));
  }

  #[test]
  fn test_number_too_short() {
    assert!(vr("UL").extract(&[0x01, 0x02], 0, 2).is_err());
    assert!(vr("US").extract(&[0x01, 0x02], 1, 2).is_err());
  }

  #[test]
  fn test_unique_identifier_padding() {
    assert_eq!(extract_all("UI", b"1.2.840.10008.1.2.1\0"),
      DicomValue::Text("1.2.840.10008.1.2.1".to_string()));
    assert_eq!(extract_all("UI", b"1.2.3\0\0"), DicomValue::Text("1.2.3\0".to_string()));
    assert_eq!(extract_all("UI", b"1.22"), DicomValue::Text("1.22".to_string()));
    assert_eq!(extract_all("UI", b""), DicomValue::Text("".to_string()));
  }

  #[test]
  fn test_text_is_one_code_point_per_byte() {
    assert_eq!(extract_all("LO", &[b'M', 0xFC, b'l', b'l', b'e', b'r']),
      DicomValue::Text("M\u{fc}ller".to_string()));
  }

  #[test]
  fn test_raw_has_no_display() {
    let ob = vr("OB");
    assert_eq!(ob.category, Category::Raw);
    assert!(ob.extract(&[0, 1], 0, 2).is_err());
    assert!(ob.format(&DicomValue::Text("".to_string())).is_err());
    assert!(ob.clean().is_none());
  }

  #[test]
  fn test_unknown_vr() {
    assert!(resolve("XX").is_none());
    assert!(resolve_code(&VrCode([0xFF, 0x00])).is_none());
    assert_eq!(resolve_code(&VrCode(*b"PN")).unwrap().code, "PN");
  }

  #[test]
  fn test_vr_code() {
    let code = VrCode::new("OW").unwrap();
    assert!(code.has_long_header());
    assert!(VrCode::new("SQ").unwrap().has_long_header());
    assert!(!VrCode::new("UT").unwrap().has_long_header());
    assert!(VrCode::new("O").is_none());
    assert_eq!(code.to_string(), "OW");
    assert_eq!(VrCode([0x00, b'A']).as_str(), Some("\0A"));
  }

  fn clean(code: &str, data: &[u8]) -> Vec<u8> {
    let mut buffer = data.to_vec();
    let clean = vr(code).clean().unwrap();
    let length = buffer.len();
    clean(&mut buffer, 0, 0, length);
    buffer
  }

  #[test]
  fn test_clean_string_with_spaces() {
    assert_eq!(clean("SH", b"ACC12345"), b"        ");
    assert_eq!(clean("CS", b"M "), b"  ");
  }

  #[test]
  fn test_clean_identifying_text() {
    assert_eq!(clean("PN", b"Doe^John^^^     "), b"Anonymized      ");
    assert_eq!(clean("LO", b"ID42"), b"Anon");
    assert_eq!(clean("LT", b"0123456789"), b"Anonymized");
  }

  #[test]
  fn test_clean_decimal_string() {
    assert_eq!(clean("DS", b"72.5"), b"0000");
    assert_eq!(clean("DS", b"1"), b"0");
  }

  #[test]
  fn test_clean_time() {
    assert_eq!(clean("TM", b"0948"), b"0000");
    assert_eq!(clean("TM", b"094836"), b"000000");
    assert_eq!(clean("TM", b"094836."), b"000000.");
    assert_eq!(clean("TM", b"094836.214743"), b"000000.000000");
  }

  #[test]
  fn test_clean_date() {
    let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let mut buffer = b"__19930822__".to_vec();
    clean_date_with(&mut buffer, 0, 2, 8, today);
    assert_eq!(buffer, b"__20240229__");

    let mut buffer = b"1993".to_vec();
    clean_date_with(&mut buffer, 0, 0, 4, today);
    assert_eq!(buffer, b"2024");
  }

  #[test]
  fn test_clean_date_uses_today() {
    let buffer = clean("DA", b"19930822");
    let text = core::str::from_utf8(&buffer).unwrap();
    assert!(NaiveDate::parse_from_str(text, "%Y%m%d").is_ok());
    assert_ne!(text, "19930822");
  }

  #[test]
  fn test_clean_stays_in_the_payload() {
    let mut buffer = b"[PN:Doe^John]".to_vec();
    clean_identifying_text(&mut buffer, 0, 4, 8);
    assert_eq!(buffer, b"[PN:Anonymiz]");
    let mut buffer = b"[TM:09483612]".to_vec();
    clean_time(&mut buffer, 0, 4, 8);
    assert_eq!(buffer, b"[TM:000000.0]");
  }

  #[test]
  fn test_put_text_never_writes_past_the_end() {
    let mut buffer = vec![b'x'; 4];
    put_text(&mut buffer, 2, "abcdef");
    assert_eq!(buffer, b"xxab");
    put_text(&mut buffer, 10, "abcdef");
    assert_eq!(buffer, b"xxab");
  }
}
