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

//! Scanner and anonymizer for explicit VR little endian DICOM files.
//!
//! ```
//! let mut buffer = vec![0u8; 128];
//! buffer.extend_from_slice(b"DICM");
//! buffer.extend_from_slice(&[0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00]);
//! buffer.extend_from_slice(b"Doe^");
//! assert!(dcmclean::is_valid(&buffer));
//!
//! let data_set = dcmclean::parse_tags(&buffer, None, Default::default());
//! let cleaned = dcmclean::clean_tags(&buffer, &data_set.tags, &[data_set.tags[0].id]);
//! assert_eq!(&cleaned[140..], b"Anon");
//! ```

pub mod analyser;
pub mod anonymizer;
pub mod dictionary;
pub mod error;
pub mod instance;
pub mod misc;
pub mod tags;
pub mod value_representation;
pub mod worker;

pub use anonymizer::clean_tags;
pub use error::DicomError;
pub use instance::{DataSet, DecodedTag, ScanOptions};
pub use tags::TagId;

/// Whether the buffer starts with the 128 bytes preamble and the `DICM` prefix.
pub fn is_valid(buffer: &[u8]) -> bool {
  misc::is_dicom(buffer)
}

/// Decodes the top level tags of the buffer. `on_tag` is called on every tag
/// as soon as it is decoded.
pub fn parse_tags(buffer: &[u8], on_tag: Option<&mut dyn FnMut(&DecodedTag)>, options: ScanOptions) -> DataSet {
  instance::scan(buffer, options, on_tag)
}
