//! JSON Schema validation of event schema documents.
//!
//! The document shape is described by `schemas/event-schema.schema.json`
//! (Draft 7), embedded at compile time. Validation happens on the raw JSON
//! value so every structural problem is reported at once, before serde
//! stops at the first one.

use once_cell::sync::Lazy;
use serde_json::Value;

static DOCUMENT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/event-schema.schema.json"))
        .expect("Invalid embedded schema")
});

/// Validate `data` against a JSON Schema.
///
/// Returns every violation message on failure.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid JSON Schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an event schema document.
pub fn validate_schema_document(document: &Value) -> Result<(), Vec<String>> {
    validate(&DOCUMENT_SCHEMA, document)
}

/// Quick check of an event schema document.
pub fn is_valid_schema_document(document: &Value) -> bool {
    jsonschema::draft7::is_valid(&DOCUMENT_SCHEMA, document)
}
