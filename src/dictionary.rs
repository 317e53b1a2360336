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

//! The tags this crate knows by name.
//!
//! This is a hand picked subset of the DICOM dictionary: file meta
//! information, patient identity, study and series timing, physicians,
//! image geometry and pixel data. Tags absent from it are still scanned but
//! are not named.

use crate::tags::TagId;
use crate::value_representation::{resolve, CleanFn, VrCode};

#[derive(Debug)]
pub struct Tag {
  pub id: TagId,
  /// Allowed value representations, the first one is the usual one.
  pub vr: &'static [&'static str],
  pub name: &'static str,
  /// Identifies the patient or the people and places involved.
  pub sensitive: bool,
}

impl Tag {
  pub fn allows(&self, vr: &VrCode) -> bool {
    vr.as_str().map_or(false, |vr| self.vr.iter().any(|allowed| *allowed == vr))
  }

  /// How to wipe this tag: the rule of its usual VR, whatever the VR found in
  /// the file.
  pub fn clean(&self) -> Option<CleanFn> {
    self.vr.first().and_then(|vr| resolve(vr)).and_then(|vr| vr.clean())
  }
}

/// First match wins.
pub fn lookup(id: &TagId) -> Option<&'static Tag> {
  TAGS.iter().find(|tag| tag.id == *id)
}

/// Looks a tag up from its little endian encoding as found in a file.
pub fn lookup_by_bytes(bytes: &[u8]) -> Option<&'static Tag> {
  TAGS.iter().find(|tag| tag.id.to_le_bytes()[..] == *bytes)
}

pub fn sensitive_tags() -> impl Iterator<Item = &'static Tag> {
  TAGS.iter().filter(|tag| tag.sensitive)
}

pub fn tags() -> &'static [Tag] {
  TAGS
}

const fn tag(group: u16, element: u16, vr: &'static [&'static str], name: &'static str) -> Tag {
  Tag { id: TagId::new(group, element), vr, name, sensitive: false }
}

const fn sensitive(group: u16, element: u16, vr: &'static [&'static str], name: &'static str) -> Tag {
  Tag { id: TagId::new(group, element), vr, name, sensitive: true }
}

static TAGS: &[Tag] = &[
  tag(0x0002, 0x0000, &["UL"], "File Meta Information Group Length"),
  tag(0x0002, 0x0001, &["OB"], "File Meta Information Version"),
  tag(0x0002, 0x0002, &["UI"], "Media Storage SOP Class UID"),
  tag(0x0002, 0x0003, &["UI"], "Media Storage SOP Instance UID"),
  tag(0x0002, 0x0010, &["UI"], "Transfer Syntax UID"),
  tag(0x0002, 0x0012, &["UI"], "Implementation Class UID"),
  tag(0x0002, 0x0013, &["SH"], "Implementation Version Name"),
  tag(0x0008, 0x0005, &["CS"], "Specific Character Set"),
  tag(0x0008, 0x0008, &["CS"], "Image Type"),
  tag(0x0008, 0x0016, &["UI"], "SOP Class UID"),
  tag(0x0008, 0x0018, &["UI"], "SOP Instance UID"),
  sensitive(0x0008, 0x0020, &["DA"], "Study Date"),
  sensitive(0x0008, 0x0021, &["DA"], "Series Date"),
  sensitive(0x0008, 0x0023, &["DA"], "Content Date"),
  sensitive(0x0008, 0x0030, &["TM"], "Study Time"),
  sensitive(0x0008, 0x0031, &["TM"], "Series Time"),
  sensitive(0x0008, 0x0033, &["TM"], "Content Time"),
  sensitive(0x0008, 0x0050, &["SH"], "Accession Number"),
  sensitive(0x0008, 0x0051, &["SQ"], "Issuer of Accession Number Sequence"),
  tag(0x0008, 0x0060, &["CS"], "Modality"),
  sensitive(0x0008, 0x0070, &["LO"], "Manufacturer"),
  sensitive(0x0008, 0x0080, &["LO"], "Institution Name"),
  sensitive(0x0008, 0x0081, &["ST"], "Institution Address"),
  sensitive(0x0008, 0x0090, &["PN"], "Referring Physician's Name"),
  sensitive(0x0008, 0x0092, &["ST"], "Referring Physician's Address"),
  sensitive(0x0008, 0x0094, &["SH"], "Referring Physician's Telephone Numbers"),
  sensitive(0x0008, 0x0096, &["SQ"], "Referring Physician Identification Sequence"),
  sensitive(0x0008, 0x009C, &["PN"], "Consulting Physician's Name"),
  sensitive(0x0008, 0x009D, &["SQ"], "Consulting Physician Identification Sequence"),
  tag(0x0008, 0x1010, &["SH"], "Station Name"),
  tag(0x0008, 0x1030, &["LO"], "Study Description"),
  sensitive(0x0008, 0x1050, &["PN"], "Performing Physician's Name"),
  sensitive(0x0008, 0x1090, &["LO"], "Manufacturer Model Name"),
  tag(0x0008, 0x2112, &["SQ"], "Source Image Sequence"),
  tag(0x0008, 0x2144, &["IS"], "Recommended Display Frame Rate"),
  sensitive(0x0010, 0x0010, &["PN"], "Patient's Name"),
  sensitive(0x0010, 0x0020, &["LO"], "Patient ID"),
  sensitive(0x0010, 0x0030, &["DA"], "Patient's Birth Date"),
  sensitive(0x0010, 0x0032, &["TM"], "Patient's Birth Time"),
  sensitive(0x0010, 0x0040, &["CS"], "Patient's Sex"),
  sensitive(0x0010, 0x1020, &["DS"], "Patient Size"),
  sensitive(0x0010, 0x1030, &["DS"], "Patient Weight"),
  sensitive(0x0010, 0x4000, &["LT"], "Patient Comments"),
  tag(0x0018, 0x0040, &["IS"], "Cine Rate"),
  tag(0x0018, 0x0072, &["DS"], "Effective Duration"),
  tag(0x0018, 0x1020, &["LO"], "Software Version(s)"),
  tag(0x0018, 0x1063, &["DS"], "Frame Time"),
  tag(0x0018, 0x1063, &["DS"], "Frame Time"),
  tag(0x0018, 0x1244, &["US"], "Preferred Playback Sequencing"),
  sensitive(0x0020, 0x000D, &["UI"], "Study Instance UID"),
  sensitive(0x0020, 0x000E, &["UI"], "Series Instance UID"),
  tag(0x0020, 0x0011, &["IS"], "Series Number"),
  tag(0x0020, 0x0013, &["IS"], "Instance Number"),
  tag(0x0028, 0x0002, &["US"], "Samples per Pixel"),
  tag(0x0028, 0x0004, &["CS"], "Photometric Interpretation"),
  tag(0x0028, 0x0008, &["IS"], "Number of Frames"),
  tag(0x0028, 0x0009, &["AT"], "Frame Increment Pointer"),
  tag(0x0028, 0x0010, &["US"], "Rows"),
  tag(0x0028, 0x0011, &["US"], "Columns"),
  tag(0x0028, 0x0100, &["US"], "Bits Allocated"),
  tag(0x0028, 0x0101, &["US"], "Bits Stored"),
  tag(0x0028, 0x0102, &["US"], "High Bit"),
  tag(0x0028, 0x0103, &["US"], "Pixel Representation"),
  tag(0x7FE0, 0x0008, &["OF"], "Float Pixel Data"),
  tag(0x7FE0, 0x0009, &["OD"], "Double Float Pixel Data"),
  tag(0x7FE0, 0x0010, &["OB", "OW"], "Pixel Data"),
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup() {
    let tag = lookup(&TagId::new(0x0010, 0x0010)).unwrap();
    assert_eq!(tag.name, "Patient's Name");
    assert_eq!(tag.vr, &["PN"]);
    assert!(tag.sensitive);
    assert!(lookup(&TagId::new(0x0009, 0x0010)).is_none());
  }

  #[test]
  fn test_lookup_by_bytes() {
    let tag = lookup_by_bytes(&[0xE0, 0x7F, 0x10, 0x00]).unwrap();
    assert_eq!(tag.name, "Pixel Data");
    assert!(lookup_by_bytes(&[0xE0, 0x7F, 0x10]).is_none());
    assert!(lookup_by_bytes(&[0x00, 0x7F, 0x10, 0x00]).is_none());
  }

  #[test]
  fn test_duplicated_entry_first_match_wins() {
    let frame_time = TagId::new(0x0018, 0x1063);
    assert_eq!(tags().iter().filter(|tag| tag.id == frame_time).count(), 2);
    let first = tags().iter().find(|tag| tag.id == frame_time).unwrap();
    assert!(core::ptr::eq(lookup(&frame_time).unwrap(), first));
  }

  #[test]
  fn test_every_vr_is_registered() {
    for tag in tags() {
      assert!(!tag.vr.is_empty(), "{}", tag.id);
      for vr in tag.vr {
        assert!(resolve(vr).is_some(), "{} {}", tag.id, vr);
      }
    }
  }

  #[test]
  fn test_allows() {
    let pixel_data = lookup(&TagId::new(0x7FE0, 0x0010)).unwrap();
    assert!(pixel_data.allows(&VrCode(*b"OW")));
    assert!(pixel_data.allows(&VrCode(*b"OB")));
    assert!(!pixel_data.allows(&VrCode(*b"UN")));
    assert!(!pixel_data.allows(&VrCode([0xFF, 0xFF])));
  }

  #[test]
  fn test_sensitive_tags() {
    let ids: Vec<String> = sensitive_tags().map(|tag| tag.id.to_string()).collect();
    assert!(ids.contains(&"(0010,0010)".to_string()));
    assert!(ids.contains(&"(0020,000D)".to_string()));
    assert!(!ids.contains(&"(0028,0010)".to_string()));
    assert_eq!(ids.len(), 29);
  }

  #[test]
  fn test_clean_uses_the_usual_vr() {
    let patient_name = lookup(&TagId::new(0x0010, 0x0010)).unwrap();
    let clean = patient_name.clean().unwrap();
    let mut buffer = b"Doe^John    ".to_vec();
    clean(&mut buffer, 0, 0, 12);
    assert_eq!(buffer, b"Anonymized  ");
    // Raw tags have nothing to fall back on
    assert!(lookup(&TagId::new(0x7FE0, 0x0010)).unwrap().clean().is_none());
  }
}
