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

use log::{debug, warn};

use crate::instance::DecodedTag;
use crate::tags::TagId;
use crate::value_representation::CleanFn;

// Known tags are cleaned according to their usual VR, the VR found in the file
// only matters for tags missing from the dictionary.
fn cleaner(tag: &DecodedTag) -> Option<CleanFn> {
  match tag.definition() {
    Some(definition) => definition.clean(),
    None => tag.vr_definition().and_then(|vr| vr.clean()),
  }
}

/**
 * Returns a copy of `buffer` where the values of the requested tags are
 * overwritten. The length of the buffer and of every value are preserved.
 *
 * Tags that are not in `tags` or have an empty value are left alone.
 */
pub fn clean_tags(buffer: &[u8], tags: &[DecodedTag], ids: &[TagId]) -> Vec<u8> {
  let mut result = buffer.to_vec();
  for id in ids {
    let tag = match tags.iter().find(|tag| tag.id == *id) {
      Some(tag) if tag.data_length > 0 => tag,
      // Do not clean if the tag does not exist in the file
      _ => {
        debug!("Tag {} is absent or empty, nothing to clean", id);
        continue;
      },
    };
    if tag.data_offset + tag.data_length > result.len() {
      warn!("Tag {} at {:#X} does not belong to this buffer", id, tag.offset);
      continue;
    }
    match cleaner(tag) {
      Some(clean) => {
        debug!("Cleaning tag {} ({} bytes at {:#X})", id, tag.data_length, tag.data_offset);
        clean(&mut result, tag.offset, tag.data_offset, tag.data_length);
      },
      None => warn!("Don't know how to clean tag {} of type {}", id, tag.vr),
    }
  }
  result
}
