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

use log::{debug, trace, warn};
use serde::Serialize;

use crate::dictionary::{lookup, Tag};
use crate::misc::DATA_SET_OFFSET;
use crate::tags::{Delimiter, TagId};
use crate::value_representation::{resolve_code, VrCode, VrDefinition};

// A 4 bytes length with all bits set means the value lasts until a delimiter.
pub const UNDEFINED_LENGTH: u32 = 0xFFFFFFFF;
// group(u16),element(u16),vr(str[2]),length(u16)
const SHORT_HEADER_LENGTH: usize = 8;
// group(u16),element(u16),vr(str[2]),reserved(u16),length(u32)
const LONG_HEADER_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
  /// Look for item boundaries in values of undefined length.
  pub analyse_raw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemSpan {
  pub start: usize,
  pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTag {
  pub id: TagId,
  // Position of the tag header in the buffer
  pub offset: usize,
  // VR as read from the stream
  pub vr: VrCode,
  // Position of the tag content in the buffer after the VR and length
  pub data_offset: usize,
  // Length of the data field, never past the end of the buffer
  pub data_length: usize,
  // The length read on the file was 0xFFFFFFFF
  pub undefined_length: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Vec<ItemSpan>>,
}

impl DecodedTag {
  pub fn definition(&self) -> Option<&'static Tag> {
    lookup(&self.id)
  }

  pub fn vr_definition(&self) -> Option<&'static VrDefinition> {
    resolve_code(&self.vr)
  }

  pub fn header_length(&self) -> usize {
    self.data_offset - self.offset
  }

  pub fn data<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
    &buffer[self.data_offset..self.data_offset + self.data_length]
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
  UnknownTag,
  UnknownVr,
  InconsistentVr,
  ReservedBytes,
  TruncatedHeader,
}

/// Something odd found while scanning. Never stops the scan except for
/// `TruncatedHeader` which is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub kind: DiagnosticKind,
  pub offset: usize,
  pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataSet {
  pub tags: Vec<DecodedTag>,
  pub diagnostics: Vec<Diagnostic>,
}

impl DataSet {
  /// First tag with this identifier, in file order.
  pub fn find(&self, id: &TagId) -> Option<&DecodedTag> {
    self.tags.iter().find(|tag| tag.id == *id)
  }

  pub fn len(&self) -> usize {
    self.tags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }

  pub fn iter(&self) -> core::slice::Iter<'_, DecodedTag> {
    self.tags.iter()
  }
}

/// Walks the data set one tag header at a time, from the end of the DICOM
/// prefix to the end of the buffer.
pub struct Scanner<'a> {
  buffer: &'a [u8],
  offset: usize,
  options: ScanOptions,
  diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
  pub fn new(buffer: &'a [u8], options: ScanOptions) -> Self {
    Scanner { buffer, offset: DATA_SET_OFFSET, options, diagnostics: vec![] }
  }

  pub fn into_diagnostics(self) -> Vec<Diagnostic> {
    self.diagnostics
  }

  fn report(&mut self, kind: DiagnosticKind, offset: usize, message: String) {
    warn!("{} (at {:#X})", message, offset);
    self.diagnostics.push(Diagnostic { kind, offset, message });
  }

  fn truncated(&mut self, offset: usize, header_length: usize) -> bool {
    let remaining = self.buffer.len() - offset;
    if remaining < header_length {
      self.report(DiagnosticKind::TruncatedHeader, offset, format!(
        "Tag header needs {} bytes but only {} remain", header_length, remaining));
      return true;
    }
    false
  }

  fn read_u16(&self, offset: usize) -> u16 {
    u16::from_le_bytes([self.buffer[offset], self.buffer[offset + 1]])
  }

  fn read_u32(&self, offset: usize) -> u32 {
    u32::from_le_bytes([
      self.buffer[offset], self.buffer[offset + 1], self.buffer[offset + 2], self.buffer[offset + 3],
    ])
  }

  fn next_tag(&mut self, offset: usize) -> Option<DecodedTag> {
    if self.truncated(offset, SHORT_HEADER_LENGTH) {
      return None;
    }
    let buffer = self.buffer;
    let id = TagId::new(self.read_u16(offset), self.read_u16(offset + 2));
    debug!("Found tag {} at offset {:#X}", id, offset);
    let definition = lookup(&id);
    if definition.is_none() {
      self.report(DiagnosticKind::UnknownTag, offset, format!("Unknown tag id {}", id));
    }
    let vr = VrCode([buffer[offset + 4], buffer[offset + 5]]);
    if resolve_code(&vr).is_none() {
      self.report(DiagnosticKind::UnknownVr, offset, format!("Unknown tag type {}", vr));
    }
    if let Some(definition) = definition {
      if !definition.allows(&vr) {
        self.report(DiagnosticKind::InconsistentVr, offset, format!(
          "Inconsistent tag type: expected {}, actual {}", definition.vr.join(","), vr));
      }
    }

    let mut undefined_length = false;
    let mut items = None;
    let (data_offset, declared_length) = if vr.has_long_header() {
      if self.truncated(offset, LONG_HEADER_LENGTH) {
        return None;
      }
      if buffer[offset + 6] != 0 || buffer[offset + 7] != 0 {
        self.report(DiagnosticKind::ReservedBytes, offset,
          "First 2 bytes after type must be set to 0".to_string());
      }
      let data_offset = offset + LONG_HEADER_LENGTH;
      let length = self.read_u32(offset + 8);
      if length == UNDEFINED_LENGTH {
        debug!("Tag value lasts until end of file");
        undefined_length = true;
        let stop = buffer.len();
        if self.options.analyse_raw {
          items = Some(scan_items(buffer, data_offset, stop));
        }
        (data_offset, stop - data_offset)
      } else {
        (data_offset, length as usize)
      }
    } else {
      (offset + SHORT_HEADER_LENGTH, self.read_u16(offset + 6) as usize)
    };

    let data_length = declared_length.min(buffer.len() - data_offset);
    if data_length < declared_length {
      // Truncated files are read as far as they go
      debug!("Tag {} declares {} bytes but only {} remain", id, declared_length, data_length);
    }
    trace!("Tag data starts at {:#X} with a length of {}", data_offset, data_length);
    Some(DecodedTag { id, offset, vr, data_offset, data_length, undefined_length, items })
  }
}

impl<'a> Iterator for Scanner<'a> {
  type Item = DecodedTag;

  fn next(&mut self) -> Option<Self::Item> {
    if self.offset >= self.buffer.len() {
      return None;
    }
    match self.next_tag(self.offset) {
      Some(tag) => {
        self.offset = tag.data_offset + tag.data_length;
        trace!("Jump to {:#X}", self.offset);
        Some(tag)
      },
      None => {
        self.offset = self.buffer.len();
        None
      },
    }
  }
}

/// Decodes every tag of an explicit VR little endian data set.
///
/// `on_tag` is called for each tag, in file order, as soon as its offsets are
/// known.
pub fn scan(buffer: &[u8], options: ScanOptions, mut on_tag: Option<&mut dyn FnMut(&DecodedTag)>)
  -> DataSet {
  debug!("Looking for tags in {} bytes", buffer.len());
  let mut scanner = Scanner::new(buffer, options);
  let mut tags = vec![];
  for tag in scanner.by_ref() {
    if let Some(on_tag) = on_tag.as_deref_mut() {
      on_tag(&tag);
    }
    tags.push(tag);
  }
  DataSet { tags, diagnostics: scanner.into_diagnostics() }
}

/// Recovers the items of a value of undefined length by looking for the item
/// tag (FFFE,E000) in its bytes. Item content is not parsed.
pub fn scan_items(buffer: &[u8], start: usize, stop: usize) -> Vec<ItemSpan> {
  let stop = stop.min(buffer.len());
  let start = start.min(stop);
  debug!("Looking for items in {} bytes", stop - start);
  let mut items = vec![];
  let mut last_bookmark = start;
  for i in start..stop {
    if i < start + 3 {
      continue;
    }
    if Delimiter::from_bytes(&buffer[i - 3..=i]) == Some(Delimiter::Item) {
      let item = ItemSpan { start: last_bookmark, stop: i - 3 };
      // The separator can be found at the beginning of the value
      if item.stop > item.start {
        debug!("Found item from {:#X} to {:#X}", item.start, item.stop);
        items.push(item);
      }
      last_bookmark = i + 1;
    }
  }
  items
}
