use std::fmt;

/// A prompt asking for JSON output that conforms to `response_schema`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    /// Width:height, e.g. `4:3`.
    pub aspect_ratio: String,
}

/// Raw outcome of an image request, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCandidates {
    pub candidates: Vec<ImageCandidate>,
    /// Set when the service refused the prompt itself and produced no candidate.
    pub prompt_block_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub finish_reason: FinishReason,
    pub images: Vec<InlineImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: Option<String>,
    /// Base64 payload as returned by the service.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    ProhibitedContent,
    Blocklist,
    Recitation,
    Unspecified,
    Other(String),
}

impl FinishReason {
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            None | Some("FINISH_REASON_UNSPECIFIED") => FinishReason::Unspecified,
            Some("STOP") => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::MaxTokens,
            Some("SAFETY") | Some("IMAGE_SAFETY") => FinishReason::Safety,
            Some("PROHIBITED_CONTENT") | Some("IMAGE_PROHIBITED_CONTENT") | Some("SPII") => {
                FinishReason::ProhibitedContent
            }
            Some("BLOCKLIST") => FinishReason::Blocklist,
            Some("RECITATION") | Some("IMAGE_RECITATION") => FinishReason::Recitation,
            Some(other) => FinishReason::Other(other.to_string()),
        }
    }

    pub fn is_safety_block(&self) -> bool {
        matches!(
            self,
            FinishReason::Safety | FinishReason::ProhibitedContent | FinishReason::Blocklist
        )
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Stop => f.write_str("STOP"),
            FinishReason::MaxTokens => f.write_str("MAX_TOKENS"),
            FinishReason::Safety => f.write_str("SAFETY"),
            FinishReason::ProhibitedContent => f.write_str("PROHIBITED_CONTENT"),
            FinishReason::Blocklist => f.write_str("BLOCKLIST"),
            FinishReason::Recitation => f.write_str("RECITATION"),
            FinishReason::Unspecified => f.write_str("UNSPECIFIED"),
            FinishReason::Other(reason) => f.write_str(reason),
        }
    }
}
