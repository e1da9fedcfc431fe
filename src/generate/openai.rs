use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{GenerationError, GenerationRequest, StructuredGenerator};
use crate::config::GeneratorConfig;

/// Chat-completions client with JSON Schema structured output.
pub struct OpenAiGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl StructuredGenerator for OpenAiGenerator {
    async fn generate_structured(
        &self,
        request: &GenerationRequest,
    ) -> Result<Value, GenerationError> {
        let body = request_body(&self.config.model, request);

        let started = Instant::now();
        info!(
            "Requesting {} from {} ({})",
            request.schema_name, self.config.model, self.config.base_url
        );
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            warn!("Generation failed with {} after {}ms", status, started.elapsed().as_millis());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        info!("Received {} in {}ms", request.schema_name, started.elapsed().as_millis());

        let envelope: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Malformed(format!("response body: {}", e)))?;
        extract_payload(&envelope)
    }
}

fn request_body(model: &str, request: &GenerationRequest) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.instructions },
            { "role": "user", "content": request.prompt },
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": request.schema_name,
                "schema": request.schema,
                // Derived schemas carry minItems/maxItems and `definitions`
                // refs, which strict mode rejects.
                "strict": false,
            }
        }
    })
}

/// Pull the JSON payload out of `choices[0].message.content`.
fn extract_payload(envelope: &Value) -> Result<Value, GenerationError> {
    let message = envelope
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("message"))
        .ok_or_else(|| GenerationError::Malformed("no choices in response".into()))?;

    if let Some(refusal) = message.get("refusal").and_then(|r| r.as_str()) {
        return Err(GenerationError::Malformed(format!("model refused: {}", refusal)));
    }

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| GenerationError::Malformed("no message content".into()))?;

    serde_json::from_str(content)
        .map_err(|e| GenerationError::Malformed(format!("content is not JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            instructions: "be brief".into(),
            prompt: "profile".into(),
            schema: json!({ "type": "object" }),
            schema_name: "hooks".into(),
        }
    }

    #[test]
    fn body_shape() {
        let body = request_body("gpt-4o-mini", &request());
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["content"], "profile");
        assert_eq!(body["response_format"]["json_schema"]["name"], "hooks");
        assert_eq!(body["response_format"]["json_schema"]["schema"]["type"], "object");
        assert_eq!(body["response_format"]["json_schema"]["strict"], false);
    }

    #[test]
    fn payload_from_content() {
        let envelope = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"hooks\":[\"a\",\"b\",\"c\"]}" } }]
        });
        let payload = extract_payload(&envelope).unwrap();
        assert_eq!(payload["hooks"][2], "c");
    }

    #[test]
    fn payload_errors() {
        assert!(matches!(
            extract_payload(&json!({ "choices": [] })),
            Err(GenerationError::Malformed(_))
        ));
        let refused = json!({ "choices": [{ "message": { "content": null, "refusal": "no" } }] });
        assert!(matches!(extract_payload(&refused), Err(GenerationError::Malformed(m)) if m.contains("refused")));
        let garbage = json!({ "choices": [{ "message": { "content": "not json" } }] });
        assert!(matches!(extract_payload(&garbage), Err(GenerationError::Malformed(_))));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let generator = OpenAiGenerator::new(GeneratorConfig {
            base_url: "http://localhost:8080/v1/".into(),
            api_key: "k".into(),
            model: "m".into(),
            timeout: None,
        })
        .unwrap();
        assert_eq!(generator.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
