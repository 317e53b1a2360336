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

use core::fmt;
use core::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DicomError;

/// A (group, element) pair identifying a data element.
///
/// Its textual form is `(GGGG,EEEE)` in uppercase hexadecimal. In an explicit
/// VR little endian stream it is encoded as two little endian 16 bits words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId {
  pub group: u16,
  pub element: u16,
}

impl TagId {
  pub const fn new(group: u16, element: u16) -> TagId {
    TagId { group, element }
  }

  pub fn from_le_bytes(bytes: [u8; 4]) -> TagId {
    TagId {
      group: u16::from_le_bytes([bytes[0], bytes[1]]),
      element: u16::from_le_bytes([bytes[2], bytes[3]]),
    }
  }

  pub fn to_le_bytes(&self) -> [u8; 4] {
    let group = self.group.to_le_bytes();
    let element = self.element.to_le_bytes();
    [group[0], group[1], element[0], element[1]]
  }
}

impl fmt::Display for TagId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:04X},{:04X})", self.group, self.element)
  }
}

// e.g.: 0x0020000D
impl FromStr for TagId {
  type Err = DicomError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let bytes = s.as_bytes();
    if bytes.len() != 11 || bytes[0] != b'(' || bytes[5] != b',' || bytes[10] != b')' {
      return Err(DicomError::new(&format!("Malformed tag identifier: {:?}", s)));
    }
    let is_hex = |part: &[u8]| part.iter().all(|b| b.is_ascii_hexdigit());
    if !is_hex(&bytes[1..5]) || !is_hex(&bytes[6..10]) {
      return Err(DicomError::new(&format!("Malformed tag identifier: {:?}", s)));
    }
    // Only ASCII from here on
    Ok(TagId::new(u16::from_str_radix(&s[1..5], 16)?, u16::from_str_radix(&s[6..10], 16)?))
  }
}

impl TryFrom<&str> for TagId {
  type Error = DicomError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl Serialize for TagId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for TagId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(|e: DicomError| de::Error::custom(e.details))
  }
}

// https://dicom.nema.org/medical/dicom/current/output/chtml/part05/sect_7.5.html
pub const ITEM: TagId = TagId::new(0xFFFE, 0xE000);
pub const ITEM_DELIMITATION_ITEM: TagId = TagId::new(0xFFFE, 0xE00D);
pub const SEQUENCE_DELIMITATION_ITEM: TagId = TagId::new(0xFFFE, 0xE0DD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
  Item,
  ItemDelimitationItem,
  SequenceDelimitationItem,
}

impl Delimiter {
  /// Recognizes the exact 4 bytes encoding of one of the sequence delimiters.
  pub fn from_bytes(window: &[u8]) -> Option<Delimiter> {
    let window: [u8; 4] = window.try_into().ok()?;
    let id = TagId::from_le_bytes(window);
    [Delimiter::Item, Delimiter::ItemDelimitationItem, Delimiter::SequenceDelimitationItem].into_iter()
      .find(|delimiter| delimiter.tag() == id)
  }

  pub fn tag(&self) -> TagId {
    match self {
      Delimiter::Item => ITEM,
      Delimiter::ItemDelimitationItem => ITEM_DELIMITATION_ITEM,
      Delimiter::SequenceDelimitationItem => SEQUENCE_DELIMITATION_ITEM,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_is_uppercase_and_padded() {
    assert_eq!(TagId::new(0x0020, 0x000D).to_string(), "(0020,000D)");
    assert_eq!(TagId::new(0x7FE0, 0x10).to_string(), "(7FE0,0010)");
  }

  #[test]
  fn test_parse() {
    assert_eq!("(0010,0010)".parse::<TagId>(), Ok(TagId::new(0x0010, 0x0010)));
    assert_eq!(TagId::try_from("(fffe,e0dd)"), Ok(SEQUENCE_DELIMITATION_ITEM));
    assert!("0010,0010".parse::<TagId>().is_err());
    assert!("(0010;0010)".parse::<TagId>().is_err());
    assert!("(001G,0010)".parse::<TagId>().is_err());
    assert!("(+010,0010)".parse::<TagId>().is_err());
    assert!("(00100,010)".parse::<TagId>().is_err());
  }

  #[test]
  fn test_binary_encoding() {
    let tag = TagId::new(0x0002, 0x0010);
    assert_eq!(tag.to_le_bytes(), [0x02, 0x00, 0x10, 0x00]);
    assert_eq!(TagId::from_le_bytes([0xE0, 0x7F, 0x10, 0x00]), TagId::new(0x7FE0, 0x0010));
    assert_eq!(ITEM.to_le_bytes(), [0xFE, 0xFF, 0x00, 0xE0]);
  }

  #[test]
  fn test_text_and_binary_forms_agree() {
    for text in ["(0002,0000)", "(0008,009C)", "(0020,000E)", "(7FE0,0010)", "(FFFE,E00D)"] {
      let tag: TagId = text.parse().unwrap();
      assert_eq!(TagId::from_le_bytes(tag.to_le_bytes()).to_string(), text);
    }
  }

  #[test]
  fn test_delimiters() {
    assert_eq!(Delimiter::from_bytes(&[0xFE, 0xFF, 0x00, 0xE0]), Some(Delimiter::Item));
    assert_eq!(Delimiter::from_bytes(&[0xFE, 0xFF, 0x0D, 0xE0]), Some(Delimiter::ItemDelimitationItem));
    assert_eq!(Delimiter::from_bytes(&[0xFE, 0xFF, 0xDD, 0xE0]), Some(Delimiter::SequenceDelimitationItem));
    assert_eq!(Delimiter::from_bytes(&[0xFE, 0xFF, 0x00]), None);
    assert_eq!(Delimiter::from_bytes(&[0x10, 0x00, 0x10, 0x00]), None);
    assert_eq!(Delimiter::SequenceDelimitationItem.tag(), SEQUENCE_DELIMITATION_ITEM);
  }

  #[test]
  fn test_serde_uses_text_form() {
    let json = serde_json::to_string(&TagId::new(0x0010, 0x0020)).unwrap();
    assert_eq!(json, "\"(0010,0020)\"");
    let tag: TagId = serde_json::from_str("\"(0008,0090)\"").unwrap();
    assert_eq!(tag, TagId::new(0x0008, 0x0090));
    assert!(serde_json::from_str::<TagId>("\"(0008-0090)\"").is_err());
  }
}
