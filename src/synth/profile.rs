use tracing::debug;

use super::prompts::PROFILE_EXTRACTION_INSTRUCTIONS;
use crate::generate::{generate_object, GenerationError, StructuredGenerator};
use crate::record::ProfileRecord;

/// Have the model read the raw text into a record, for comparison with the
/// heuristic classifier. `full_text` is left empty.
pub async fn extract_with_model<G>(generator: &G, text: &str) -> Result<ProfileRecord, GenerationError>
where
    G: StructuredGenerator + ?Sized,
{
    let mut record: ProfileRecord =
        generate_object(generator, "profile_record", PROFILE_EXTRACTION_INSTRUCTIONS, text).await?;
    record.full_text.clear();
    debug!(name = %record.name, experience = record.experience.len(), "Model extracted profile");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::generate::stub::StubGenerator;

    #[tokio::test]
    async fn parses_model_record() {
        let stub = StubGenerator::returning(json!({
            "name": "Jane Q. Public",
            "headline": "Manager at Acme",
            "location": "City, State",
            "connections": "500 connections",
            "bio": "Loves building things.",
            "experience": [
                { "title": "Engineer", "company": "Acme", "duration": "2019 - 2021", "location": "City, State" }
            ],
            "fullText": "should be dropped"
        }));
        let record = extract_with_model(&stub, "raw page text").await.unwrap();
        assert_eq!(record.name, "Jane Q. Public");
        assert_eq!(record.experience[0].company, "Acme");
        assert!(record.full_text.is_empty());

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests[0].prompt, "raw page text");
        assert_eq!(requests[0].instructions, PROFILE_EXTRACTION_INSTRUCTIONS);
    }

    #[tokio::test]
    async fn missing_fields_fail_validation() {
        let stub = StubGenerator::returning(json!({ "name": "Jane" }));
        let err = extract_with_model(&stub, "x").await.unwrap_err();
        assert!(matches!(err, GenerationError::SchemaValidation(_)));
    }
}
