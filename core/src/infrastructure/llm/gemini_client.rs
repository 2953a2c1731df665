use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    recipe::{
        entities::errors::ServiceError,
        ports::GenerativeClient,
        value_objects::{
            FinishReason, ImageCandidate, ImageCandidates, ImageRequest, InlineImage,
            StructuredRequest,
        },
    },
};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    text_model: String,
    image_model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, alias = "prompt_feedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default, alias = "block_reason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
    #[serde(default, alias = "finish_reason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "inline_data")]
    inline_data: Option<InlineDataResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    #[serde(default, alias = "mime_type")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiClient {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build Gemini HTTP client: {}", e);
                CoreError::InternalServerError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: config.gemini_api_key,
            text_model: config.text_model,
            image_model: config.image_model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_gemini_api(
        &self,
        model: &str,
        request: GeminiRequest,
    ) -> Result<GeminiResponse, ServiceError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                ServiceError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(classify_error(status, &error_text));
        }

        response.json::<GeminiResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            ServiceError::InvalidResponse(e.to_string())
        })
    }
}

fn classify_error(status: StatusCode, body: &str) -> ServiceError {
    let (message, api_status) = match serde_json::from_str::<GeminiErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.to_string(), String::new()),
    };

    let credential_rejected = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || matches!(api_status.as_str(), "UNAUTHENTICATED" | "PERMISSION_DENIED")
        || message.contains("API key")
        || message.contains("API_KEY");

    if credential_rejected {
        ServiceError::Unauthenticated(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ServiceError::QuotaExceeded(message)
    } else {
        ServiceError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

fn first_candidate_text(response: &GeminiResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl From<GeminiResponse> for ImageCandidates {
    fn from(response: GeminiResponse) -> Self {
        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| ImageCandidate {
                finish_reason: FinishReason::from_api(candidate.finish_reason.as_deref()),
                images: candidate
                    .content
                    .map(|content| content.parts)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|part| part.inline_data)
                    .map(|inline| InlineImage {
                        mime_type: inline.mime_type,
                        data: inline.data,
                    })
                    .collect(),
            })
            .collect();

        Self {
            candidates,
            prompt_block_reason: response.prompt_feedback.and_then(|f| f.block_reason),
        }
    }
}

impl GenerativeClient for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.text_model))]
    async fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<Option<String>, ServiceError> {
        let gemini_request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            system_instruction: Some(Content {
                parts: vec![Part {
                    text: request.system_instruction,
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.response_schema),
                ..Default::default()
            }),
        };

        let response = self.call_gemini_api(&self.text_model, gemini_request).await?;
        Ok(first_candidate_text(&response))
    }

    #[instrument(skip(self, request), fields(model = %self.image_model, aspect_ratio = %request.aspect_ratio))]
    async fn generate_image(&self, request: ImageRequest) -> Result<ImageCandidates, ServiceError> {
        let gemini_request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: request.aspect_ratio,
                }),
                ..Default::default()
            }),
        };

        let response = self
            .call_gemini_api(&self.image_model, gemini_request)
            .await?;
        Ok(ImageCandidates::from(response))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_classify_invalid_api_key() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })
        .to_string();

        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, &body),
            ServiceError::Unauthenticated(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::FORBIDDEN, "forbidden"),
            ServiceError::Unauthenticated(_)
        ));
    }

    #[test]
    fn test_classify_quota_and_other_statuses() {
        let body = json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        })
        .to_string();
        assert_eq!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, &body),
            ServiceError::QuotaExceeded("Resource has been exhausted".to_string())
        );

        assert_eq!(
            classify_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ServiceError::Status {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_structured_text_is_joined_from_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": { "parts": [{ "text": "{\"recipes\":" }, { "text": " []}" }] },
                    "finishReason": "STOP"
                }
            ]
        }))
        .unwrap();

        assert_eq!(
            first_candidate_text(&response).as_deref(),
            Some("{\"recipes\": []}")
        );

        let empty: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(first_candidate_text(&empty), None);
    }

    #[test]
    fn test_image_response_conversion() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "Here is your dish" },
                            { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                        ]
                    },
                    "finishReason": "STOP"
                }
            ]
        }))
        .unwrap();

        let candidates = ImageCandidates::from(response);
        assert_eq!(candidates.candidates.len(), 1);
        assert_eq!(candidates.candidates[0].finish_reason, FinishReason::Stop);
        assert_eq!(
            candidates.candidates[0].images,
            vec![InlineImage {
                mime_type: Some("image/png".to_string()),
                data: "aGVsbG8=".to_string()
            }]
        );
    }

    #[test]
    fn test_image_response_with_safety_block() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "IMAGE_SAFETY" }]
        }))
        .unwrap();
        let candidates = ImageCandidates::from(response);
        assert!(candidates.candidates[0].finish_reason.is_safety_block());
        assert!(candidates.candidates[0].images.is_empty());

        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let candidates = ImageCandidates::from(response);
        assert!(candidates.candidates.is_empty());
        assert_eq!(candidates.prompt_block_reason.as_deref(), Some("SAFETY"));
    }

    #[test]
    fn test_image_request_serialization() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "dish".to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                image_config: Some(ImageConfig {
                    aspect_ratio: "4:3".to_string(),
                }),
                ..Default::default()
            }),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "parts": [{ "text": "dish" }] }],
                "generation_config": {
                    "response_modalities": ["IMAGE"],
                    "image_config": { "aspect_ratio": "4:3" }
                }
            })
        );
    }
}
