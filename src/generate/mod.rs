pub mod openai;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use openai::OpenAiGenerator;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed generation response: {0}")]
    Malformed(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
}

/// One structured-output request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instructions.
    pub instructions: String,
    pub prompt: String,
    /// JSON Schema the returned payload must follow.
    pub schema: Value,
    /// Name reported to the service alongside the schema.
    pub schema_name: String,
}

/// An external text-generation capability that returns JSON.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    async fn generate_structured(&self, request: &GenerationRequest)
        -> Result<Value, GenerationError>;
}

/// Ask `generator` for a `T`, deriving the schema from the type and
/// validating the payload by deserializing it.
pub async fn generate_object<T, G>(
    generator: &G,
    schema_name: &str,
    instructions: &str,
    prompt: &str,
) -> Result<T, GenerationError>
where
    T: DeserializeOwned + JsonSchema,
    G: StructuredGenerator + ?Sized,
{
    let schema = serde_json::to_value(schemars::schema_for!(T))
        .map_err(|e| GenerationError::Malformed(format!("schema serialization: {}", e)))?;
    let request = GenerationRequest {
        instructions: instructions.to_string(),
        prompt: prompt.to_string(),
        schema,
        schema_name: schema_name.to_string(),
    };

    let payload = generator.generate_structured(&request).await?;
    serde_json::from_value(payload).map_err(|e| GenerationError::SchemaValidation(e.to_string()))
}
