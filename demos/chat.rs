//! Answers a free-text message against reference tables.
//!
//! ```text
//! cargo run --example chat -- [--tables tables.json] I have a fever and a cough
//! ```
//!
//! Without `--tables` a small built-in sample is used. Set `RUST_LOG=debug`
//! to see the pipeline counts.

use herbwise::prelude::*;
use std::env;
use std::process;

const SAMPLE_TABLES: &str = r#"{
  "all_unique_symptoms": [
    "fever", "cough", "headache", "nausea", "sore throat", "runny nose",
    "chill", "fatigue", "sneezing", "vomiting", "body ache"
  ],
  "disease_symptom_map": {
    "influenza": ["fever", "cough", "chill", "body ache", "fatigue"],
    "common cold": ["cough", "sneezing", "runny nose", "sore throat"],
    "migraine": ["headache", "nausea", "vomiting"],
    "gastroenteritis": ["nausea", "vomiting", "fever"]
  },
  "herb_symptom_map": {
    "elderberry": ["fever", "cough", "influenza"],
    "ginger": ["nausea", "vomiting", "gastroenteritis"],
    "peppermint": ["headache", "nausea", "migraine"],
    "echinacea": ["sore throat", "runny nose", "common cold"]
  },
  "disease_precautions": {
    "influenza": ["rest", "drink plenty of fluids", "avoid close contact"],
    "common cold": ["rest", "keep warm", "wash hands often"],
    "migraine": ["rest in a dark room", "stay hydrated"],
    "gastroenteritis": ["drink plenty of fluids", "eat bland food"]
  },
  "post_info_map": {
    "101": {
      "Title": "Elderberry syrup got me through the flu",
      "related_disease_id": "influenza",
      "Herb": ["elderberry"],
      "All_Symptoms": ["fever", "cough", "fatigue"]
    },
    "102": {
      "Title": "Ginger tea for an upset stomach",
      "related_disease_id": "gastroenteritis",
      "Herb": ["ginger"],
      "All_Symptoms": ["nausea", "vomiting"]
    }
  }
}"#;

fn load_tables(path: Option<&str>) -> herbwise::error::Result<RawTables> {
  match path {
    Some(path) => RawTables::from_path(path),
    None => RawTables::from_json_str(SAMPLE_TABLES),
  }
}

fn main() {
  env_logger::init();

  let mut args: Vec<String> = env::args().skip(1).collect();
  let mut tables_path = None;
  if args.first().map(String::as_str) == Some("--tables") {
    if args.len() < 2 {
      eprintln!("--tables needs a path");
      process::exit(2);
    }
    tables_path = Some(args.remove(1));
    args.remove(0);
  }

  let text = if args.is_empty() {
    "I have had a fever, chills and a bad cough since yesterday".to_string()
  } else {
    args.join(" ")
  };

  let tables = match load_tables(tables_path.as_deref()) {
    Ok(tables) => tables,
    Err(err) => {
      eprintln!("failed to load tables: {err}");
      process::exit(1);
    }
  };

  let predictor = Predictor::new(tables);
  let response = predictor.chat(&text);

  println!("Message: {text}\n");
  match serde_json::to_string_pretty(&response) {
    Ok(json) => println!("{json}"),
    Err(err) => {
      eprintln!("failed to serialize response: {err}");
      process::exit(1);
    }
  }
}
