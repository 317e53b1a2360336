#![allow(dead_code)]

// Synthetic explicit VR little endian file shared by the integration tests.

use dcmclean::TagId;

pub const SAMPLE_TAG_COUNT: usize = 17;
pub const SAMPLE_RENDERABLE_COUNT: usize = 12;

fn header(group: u16, element: u16, vr: &str) -> Vec<u8> {
  let mut bytes = TagId::new(group, element).to_le_bytes().to_vec();
  bytes.extend_from_slice(vr.as_bytes());
  bytes
}

/// Element with an 8 bytes header.
pub fn short(group: u16, element: u16, vr: &str, value: &[u8]) -> Vec<u8> {
  let mut bytes = header(group, element, vr);
  bytes.extend_from_slice(&(value.len() as u16).to_le_bytes());
  bytes.extend_from_slice(value);
  bytes
}

/// Element with a 12 bytes header and an explicit length.
pub fn long(group: u16, element: u16, vr: &str, value: &[u8]) -> Vec<u8> {
  let mut bytes = header(group, element, vr);
  bytes.extend_from_slice(&[0, 0]);
  bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
  bytes.extend_from_slice(value);
  bytes
}

/// Element with a 12 bytes header and an undefined length.
pub fn undefined(group: u16, element: u16, vr: &str, value: &[u8]) -> Vec<u8> {
  let mut bytes = header(group, element, vr);
  bytes.extend_from_slice(&[0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
  bytes.extend_from_slice(value);
  bytes
}

pub fn file(elements: &[Vec<u8>]) -> Vec<u8> {
  let mut buffer = vec![0u8; 128];
  buffer.extend_from_slice(b"DICM");
  for element in elements {
    buffer.extend_from_slice(element);
  }
  buffer
}

pub fn item(content: &[u8]) -> Vec<u8> {
  let mut bytes = vec![0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF];
  bytes.extend_from_slice(content);
  bytes.extend_from_slice(&[0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00]);
  bytes
}

pub fn sequence() -> Vec<u8> {
  let mut value = item(&short(0x0008, 0x1150, "UI", b"1.2.3\0"));
  value.extend(item(&short(0x0008, 0x1155, "UI", b"1.2.4\0")));
  value.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00]);
  value
}

pub fn sample() -> Vec<u8> {
  file(&[
    short(0x0002, 0x0000, "UL", &196u32.to_le_bytes()),
    long(0x0002, 0x0001, "OB", &[0x00, 0x01]),
    short(0x0002, 0x0010, "UI", b"1.2.840.10008.1.2.1\0"),
    short(0x0008, 0x0020, "DA", b"20230115"),
    short(0x0008, 0x0030, "TM", b"101530"),
    short(0x0008, 0x0060, "CS", b"OT"),
    short(0x0008, 0x0090, "PN", b""),
    short(0x0010, 0x0010, "PN", b"Doe^John"),
    short(0x0010, 0x0020, "LO", b"PAT-0042"),
    short(0x0010, 0x0030, "DA", b"19700101"),
    short(0x0010, 0x1030, "DS", b"72.5"),
    short(0x0009, 0x0010, "LO", b"PRIVATE "),
    short(0x0020, 0x000D, "UI", b"1.2.3.4.5.6.7.8\0"),
    short(0x0028, 0x0010, "US", &512u16.to_le_bytes()),
    short(0x0028, 0x0100, "US", &16u16.to_le_bytes()),
    long(0x7FE0, 0x0010, "OB", &[0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80]),
    undefined(0x0008, 0x2112, "SQ", &sequence()),
  ])
}
