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

//! Message based front end to the scanner and the anonymizer, meant to run
//! on its own thread, process or web worker. Buffers travel as base64.
//!
//! A worker keeps the last analysed file so that a later `clean` request
//! only has to name the tags to wipe.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analyser::{report, TagReport};
use crate::anonymizer::clean_tags;
use crate::error::DicomError;
use crate::instance::{scan, DataSet, DecodedTag, ScanOptions};
use crate::misc::is_dicom;
use crate::tags::TagId;

mod base64_buffer {
  use base64::{engine::general_purpose, Engine as _};
  use serde::{de, Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    general_purpose::STANDARD.decode(encoded).map_err(de::Error::custom)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
  Analyse,
  Clean,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum InboundMessage {
  Analyse {
    #[serde(with = "base64_buffer")]
    dicom: Vec<u8>,
  },
  Clean {
    tags: Vec<TagId>,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
  Tags(Vec<DecodedTag>),
  Buffer(#[serde(serialize_with = "base64_buffer::serialize")] Vec<u8>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutboundMessage {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub action: Option<Action>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub begin: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tag: Option<TagReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<Payload>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl OutboundMessage {
  fn begin(action: Action, message: &str) -> Self {
    OutboundMessage { action: Some(action), begin: Some(true), message: Some(message.to_string()), ..Default::default() }
  }

  fn end(action: Action, result: Payload, message: &str) -> Self {
    OutboundMessage {
      action: Some(action),
      end: Some(true),
      result: Some(result),
      message: Some(message.to_string()),
      ..Default::default()
    }
  }

  fn error(action: Option<Action>, error: &str) -> Self {
    OutboundMessage { action, error: Some(error.to_string()), ..Default::default() }
  }
}

struct Analysed {
  dicom: Vec<u8>,
  data_set: DataSet,
}

#[derive(Default)]
pub struct Worker {
  current: Option<Analysed>,
}

impl Worker {
  pub fn new() -> Self {
    Worker { current: None }
  }

  /// The data set of the last file successfully analysed.
  pub fn data_set(&self) -> Option<&DataSet> {
    self.current.as_ref().map(|analysed| &analysed.data_set)
  }

  pub fn handle(&mut self, message: InboundMessage, post: &mut dyn FnMut(OutboundMessage)) {
    match message {
      InboundMessage::Analyse { dicom } => self.analyse(dicom, post),
      InboundMessage::Clean { tags } => self.clean(&tags, post),
    }
  }

  /// Decodes a JSON message and returns the JSON encoded answers.
  pub fn handle_json(&mut self, message: &str) -> Result<Vec<String>, DicomError> {
    let message: InboundMessage = serde_json::from_str(message)?;
    let mut answers = vec![];
    self.handle(message, &mut |answer| answers.push(answer));
    Ok(answers.iter().map(serde_json::to_string).collect::<Result<Vec<String>, serde_json::Error>>()?)
  }

  fn analyse(&mut self, dicom: Vec<u8>, post: &mut dyn FnMut(OutboundMessage)) {
    info!("Analysing {} bytes", dicom.len());
    post(OutboundMessage::begin(Action::Analyse, "Beginning analysis"));
    if !is_dicom(&dicom) {
      post(OutboundMessage::error(Some(Action::Analyse), "Not a DICOM file"));
      return;
    }
    let mut on_tag = |tag: &DecodedTag| {
      // Only named tags with a readable value are sent
      if let Some(report) = report(&dicom, tag) {
        post(OutboundMessage { action: Some(Action::Analyse), tag: Some(report), message: Some("Tag found".to_string()),
          ..Default::default() });
      }
    };
    let data_set = scan(&dicom, ScanOptions { analyse_raw: true }, Some(&mut on_tag));
    debug!("{} tags found, {} diagnostics", data_set.len(), data_set.diagnostics.len());
    post(OutboundMessage::end(Action::Analyse, Payload::Tags(data_set.tags.clone()), "End of analysis"));
    self.current = Some(Analysed { dicom, data_set });
  }

  fn clean(&self, tags: &[TagId], post: &mut dyn FnMut(OutboundMessage)) {
    let Some(analysed) = &self.current else {
      post(OutboundMessage::error(None, "Load a DICOM file first"));
      return;
    };
    info!("Cleaning {} tags", tags.len());
    post(OutboundMessage::begin(Action::Clean, "Beginning to clean"));
    let buffer = clean_tags(&analysed.dicom, &analysed.data_set.tags, tags);
    post(OutboundMessage::end(Action::Clean, Payload::Buffer(buffer), "Tag cleaned"));
  }
}
