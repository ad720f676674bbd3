//! services/planner/src/adapters/plan_llm.rs
//!
//! This module contains the adapter for the lesson-plan LLM.
//! It implements the `PlanGenerationService` port from the `core` crate against
//! any OpenAI-compatible chat completions endpoint (Gemini by default).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrlArgs,
    },
    Client,
};
use async_trait::async_trait;
use lesson_pro_core::{
    ports::{PlanGenerationService, PortError, PortResult},
    prompt::PlanPrompt,
};
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `PlanGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiPlanAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiPlanAdapter {
    /// Creates a new `OpenAiPlanAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client for `api_base` with the given key.
    pub fn connect(api_key: &str, api_base: &str, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self::new(Client::with_config(config), model)
    }

    fn user_message(prompt: &PlanPrompt) -> PortResult<ChatCompletionRequestMessage> {
        let content = match &prompt.image {
            None => ChatCompletionRequestUserMessageContent::Text(prompt.user.clone()),
            Some(image) => {
                let text = ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(prompt.user.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                let image_url = ImageUrlArgs::default()
                    .url(image.data_url())
                    .detail(ImageDetail::Auto)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;

                ChatCompletionRequestUserMessageContent::Array(vec![
                    ChatCompletionRequestUserMessageContentPart::Text(text),
                    ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
                ])
            }
        };

        Ok(ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into())
    }
}

/// Sorts client errors into "refused" and "unreachable".
fn map_openai_error(e: OpenAIError) -> PortError {
    match e {
        OpenAIError::ApiError(api) => PortError::Rejected(api.message),
        OpenAIError::Reqwest(e) => PortError::Unavailable(e.to_string()),
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// `PlanGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlanGenerationService for OpenAiPlanAdapter {
    /// Sends the prompt and returns the model's text untouched.
    async fn request(&self, prompt: &PlanPrompt) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            Self::user_message(prompt)?,
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .temperature(0.7)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(model = %self.model, with_image = prompt.image.is_some(), "Sending plan request");

        // PortError lives in core, so the mapping is a plain function rather than a From impl.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        // An answer without text is left to the decoder to reject.
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        match content {
            Some(text) => Ok(text),
            None => {
                warn!("Plan LLM response contained no text content.");
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    #[test]
    fn api_error_is_a_rejection() {
        let api: ApiError =
            serde_json::from_str(r#"{"message":"Quota exceeded for model"}"#).unwrap();
        let err = map_openai_error(OpenAIError::ApiError(api));
        assert!(matches!(err, PortError::Rejected(msg) if msg == "Quota exceeded for model"));
    }

    #[test]
    fn client_side_errors_are_unexpected() {
        let err = map_openai_error(OpenAIError::InvalidArgument("bad model".to_string()));
        assert!(matches!(err, PortError::Unexpected(_)));
    }
}
