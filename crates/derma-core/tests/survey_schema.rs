//! Survey documents exported by the web client must satisfy the derived schema.

use derma_core::survey::{SkinType, SunExposure, SurveyData};
use schemars::schema_for;

const WEB_CLIENT_EXPORT: &str = r#"{
  "username": "maya",
  "medicalHistory": {
    "allergies": ["Fragrances"],
    "chronicConditions": ["Rosacea"],
    "currentMedications": [],
    "cosmeticProcedures": [],
    "previousReactions": ["Redness from retinol"]
  },
  "skinInfo": {
    "hasUsedSkincare": true,
    "skinType": "sensitive",
    "previousReactions": [],
    "cosmeticProcedures": ["Chemical peels"]
  },
  "basicInfo": {
    "age": 38,
    "isPregnant": false,
    "sunExposure": "frequent",
    "familyHistory": [],
    "geneticConditions": ["Hyperpigmentation"]
  },
  "completedAt": "2025-01-14T09:30:00.000Z",
  "version": "1.0"
}"#;

fn validate_against_schema(instance: &serde_json::Value) -> Vec<String> {
    let schema = serde_json::to_value(schema_for!(SurveyData)).expect("schema serializes");
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn web_client_export_parses() {
    let survey: SurveyData = serde_json::from_str(WEB_CLIENT_EXPORT).expect("parse export");
    assert_eq!(survey.username, "maya");
    assert_eq!(survey.skin_info.skin_type, SkinType::Sensitive);
    assert_eq!(survey.basic_info.sun_exposure, SunExposure::Frequent);
    assert_eq!(survey.medical_history.chronic_conditions, vec!["Rosacea"]);
}

#[test]
fn web_client_export_matches_schema() {
    let instance: serde_json::Value = serde_json::from_str(WEB_CLIENT_EXPORT).unwrap();
    let errors = validate_against_schema(&instance);
    assert!(errors.is_empty(), "schema violations: {errors:?}");
}

#[test]
fn reserialized_survey_matches_schema() {
    let survey: SurveyData = serde_json::from_str(WEB_CLIENT_EXPORT).unwrap();
    let instance = serde_json::to_value(&survey).unwrap();
    let errors = validate_against_schema(&instance);
    assert!(errors.is_empty(), "schema violations: {errors:?}");
}
