use herbwise::prelude::*;
use pretty_assertions::assert_eq;
use std::io::Write;

const TABLES: &str = r#"{
  "all_unique_symptoms": ["Fever", "cough", "fever", "Skin Rash"],
  "disease_symptom_map": {
    "Dengue": ["fever", "skin rash"],
    "Bronchitis": ["cough"],
    "Unknown": []
  },
  "herb_symptom_map": {
    "Papaya leaf": ["Fever", "Dengue"],
    "Licorice": ["cough"]
  },
  "disease_precautions": {
    "Dengue": ["drink fluids", "use mosquito nets"]
  },
  "post_info_map": {
    "7": {
      "Title": "Papaya leaf juice",
      "related_disease_id": "Dengue",
      "Herb": "Papaya leaf",
      "All_Symptoms": { "fever": true, "skin rash": true }
    },
    "8": { "All_Symptoms": "fever" },
    "9": { "all_symptoms": ["Cough", 42, null] }
  }
}"#;

#[test]
fn test_loads_source_shaped_tables() {
  let store = ReferenceStore::new(RawTables::from_json_str(TABLES).unwrap());

  assert_eq!(store.vocabulary(), ["fever", "cough", "skin rash"]);
  let names: Vec<&str> = store.diseases().iter().map(|d| d.name.as_str()).collect();
  assert_eq!(names, vec!["Dengue", "Bronchitis", "Unknown"]);
  assert_eq!(store.total_diseases(), 2);
  assert_eq!(store.herbs()[0].symptoms, vec!["fever", "dengue"]);
  assert_eq!(store.herbs_listing("Dengue"), ["Papaya leaf"]);
}

#[test]
fn test_post_symptom_shapes() {
  let store = ReferenceStore::new(RawTables::from_json_str(TABLES).unwrap());
  let posts = store.posts();

  assert_eq!(posts.len(), 3);
  assert_eq!(posts[0].id, "7");
  assert_eq!(posts[0].related_diseases, vec!["Dengue"]);
  assert_eq!(posts[0].related_herbs, vec!["Papaya leaf"]);
  assert_eq!(posts[0].symptoms.len(), 2);
  // A bare string is not an accepted shape.
  assert!(posts[1].symptoms.is_empty());
  assert_eq!(
    posts[2].symptoms.iter().map(String::as_str).collect::<Vec<_>>(),
    vec!["42", "cough"]
  );
}

#[test]
fn test_loaded_tables_answer_requests() {
  let predictor = Predictor::new(RawTables::from_json_str(TABLES).unwrap());

  let ranked = predictor.predict_diseases(&["Fever", "skin rash"]);
  assert_eq!(ranked[0], DiseaseScore::new("Dengue", 1.0));

  let posts = predictor.retrieve_posts(&["fever", "skin rash"]);
  assert_eq!(posts[0].id, "7");
  assert_eq!(posts[0].title, "Papaya leaf juice");
  assert_eq!(posts[0].score, 1.0);

  assert_eq!(
    predictor.precautions_for_disease("dengue"),
    vec!["drink fluids", "use mosquito nets"]
  );
}

#[test]
fn test_loads_tables_from_a_file() {
  let path = std::env::temp_dir().join(format!("herbwise-tables-{}.json", std::process::id()));
  let mut file = std::fs::File::create(&path).unwrap();
  file.write_all(TABLES.as_bytes()).unwrap();
  drop(file);

  let tables = RawTables::from_path(&path).unwrap();
  std::fs::remove_file(&path).unwrap();
  assert_eq!(tables.disease_symptoms.len(), 3);
}

#[test]
fn test_malformed_tables_are_reported() {
  let err = RawTables::from_json_str(r#"{ "disease_symptom_map": [1, 2] }"#);
  assert!(matches!(err, Err(HerbwiseError::Json(_))));
}

#[test]
fn test_config_from_json() {
  let config = PredictorConfig::from_json_str(
    r#"{ "rank": { "top_k": 2 }, "posts": { "threshold": 0.5 }, "lemmatizer": "identity" }"#,
  )
  .unwrap();

  assert_eq!(config.rank.top_k, 2);
  assert_eq!(config.rank.min_similarity, RankOptions::default().min_similarity);
  assert_eq!(config.posts.threshold, 0.5);
  assert_eq!(config.lemmatizer, LemmatizerKind::Identity);
  assert_eq!(config.extract, ExtractOptions::default());

  let predictor = Predictor::builder()
    .config(config)
    .build(RawTables::from_json_str(TABLES).unwrap());
  assert_eq!(predictor.config().rank.top_k, 2);
}
