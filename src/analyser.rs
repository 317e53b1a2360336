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

use log::warn;
use serde::Serialize;

use crate::instance::DecodedTag;
use crate::tags::TagId;
use crate::value_representation::{Category, VrCode};

/// A tag as shown to a user: named, typed and with a readable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagReport {
  pub id: TagId,
  pub name: &'static str,
  pub vr: VrCode,
  pub sensitive: bool,
  pub offset: usize,
  pub data_offset: usize,
  pub data_length: usize,
  // Value as extracted from the file
  pub raw_value: Option<String>,
  // Value interpreted and formatted
  pub value: Option<String>,
}

/// Tags worth showing: not empty, known by the dictionary and of a known, non
/// raw, value representation.
pub fn is_renderable(tag: &DecodedTag) -> bool {
  tag.data_length > 0
    && tag.definition().is_some()
    && tag.vr_definition().map_or(false, |vr| vr.category != Category::Raw)
}

pub fn report(buffer: &[u8], tag: &DecodedTag) -> Option<TagReport> {
  if !is_renderable(tag) {
    return None;
  }
  let definition = tag.definition()?;
  let vr = tag.vr_definition()?;
  let raw = vr.extract(buffer, tag.data_offset, tag.data_length)
    .map_err(|err| warn!("Could not extract tag {}: {}", tag.id, err))
    .ok();
  let value = raw.clone()
    .and_then(|raw| vr.parse(raw).map_err(|err| warn!("Could not parse tag {}: {}", tag.id, err)).ok())
    .and_then(|value| vr.format(&value).map_err(|err| warn!("Could not format tag {}: {}", tag.id, err)).ok());
  Some(TagReport {
    id: tag.id,
    name: definition.name,
    vr: tag.vr,
    sensitive: definition.sensitive,
    offset: tag.offset,
    data_offset: tag.data_offset,
    data_length: tag.data_length,
    raw_value: raw.map(|raw| raw.to_string()),
    value,
  })
}

pub fn analyse(buffer: &[u8], tags: &[DecodedTag]) -> Vec<TagReport> {
  tags.iter().filter_map(|tag| report(buffer, tag)).collect()
}
