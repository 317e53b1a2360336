mod common;

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

use common::*;
use dcmclean::worker::Worker;

fn send(worker: &mut Worker, message: Value) -> Vec<Value> {
  worker.handle_json(&message.to_string()).unwrap().iter()
    .map(|answer| serde_json::from_str(answer).unwrap())
    .collect()
}

#[test]
fn test_analyse_sample() {
  let mut worker = Worker::new();
  let answers = send(&mut worker, json!({"action": "analyse", "dicom": general_purpose::STANDARD.encode(sample())}));
  // begin, one message per renderable tag, end
  assert_eq!(answers.len(), SAMPLE_RENDERABLE_COUNT + 2);
  assert!(answers[1..=SAMPLE_RENDERABLE_COUNT].iter().all(|answer| answer["message"] == "Tag found"));
  let end = answers.last().unwrap();
  assert_eq!(end["message"], "End of analysis");
  let tags = end["result"].as_array().unwrap();
  assert_eq!(tags.len(), SAMPLE_TAG_COUNT);
  // Analysis always looks for items
  assert_eq!(tags[SAMPLE_TAG_COUNT - 1]["items"].as_array().unwrap().len(), 1);
  assert_eq!(tags[0]["id"], "(0002,0000)");
  assert_eq!(tags[0]["vr"], "UL");

  let patient = answers.iter().find(|answer| answer["tag"]["id"] == "(0010,0010)").unwrap();
  assert_eq!(patient["tag"]["sensitive"], true);
  assert_eq!(patient["tag"]["raw_value"], "Doe^John");
  let study_date = answers.iter().find(|answer| answer["tag"]["id"] == "(0008,0020)").unwrap();
  assert_eq!(study_date["tag"]["raw_value"], "20230115");
  assert_eq!(study_date["tag"]["value"], "2023-01-15");
}

#[test]
fn test_clean_sample() {
  let mut worker = Worker::new();
  let buffer = sample();
  send(&mut worker, json!({"action": "analyse", "dicom": general_purpose::STANDARD.encode(&buffer)}));
  let answers = send(&mut worker, json!({"action": "clean", "tags": ["(0010,0020)", "(0010,4000)"]}));
  assert_eq!(answers[1]["end"], true);
  let cleaned = general_purpose::STANDARD.decode(answers[1]["result"].as_str().unwrap()).unwrap();
  assert_eq!(cleaned.len(), buffer.len());
  let patient_id = worker.data_set().unwrap().find(&"(0010,0020)".parse().unwrap()).unwrap();
  assert_eq!(patient_id.data(&cleaned), b"Anonymiz");
}
