//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::client::{ChatClient, ChatMessage};
use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::presentation::dto::{
    AiAssistRequest, AiAssistResponse, ExplainCodeRequest, ExplainCodeResponse,
};
use crate::prompt::{self, AssistKind};

/// Language echoed back when the client did not name one
const UNKNOWN_LANGUAGE: &str = "unknown";

/// Shared state for assist handlers
#[derive(Clone)]
pub struct AssistAppState {
    /// None when no API key is configured
    pub client: Option<Arc<ChatClient>>,
    pub config: Arc<AssistConfig>,
}

impl AssistAppState {
    pub fn new(config: AssistConfig) -> Self {
        let client = ChatClient::from_config(&config).map(Arc::new);
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn client(&self) -> AssistResult<&ChatClient> {
        self.client
            .as_deref()
            .ok_or(AssistError::NotConfigured)
    }
}

/// POST /api/explain-code
pub async fn explain_code(
    State(state): State<AssistAppState>,
    Json(req): Json<ExplainCodeRequest>,
) -> AssistResult<Json<ExplainCodeResponse>> {
    if req.code.trim().is_empty() {
        return Err(AssistError::Validation("Code is required".to_string()));
    }

    let client = state.client()?;
    let language = req.language.filter(|l| !l.trim().is_empty());

    // The prompt omits the language when unnamed; the response says so
    let messages = [ChatMessage::user(prompt::build_explain_message(
        &req.code,
        language.as_deref().unwrap_or(""),
    ))];

    let explanation = client
        .complete(
            &messages,
            state.config.explain_temperature,
            state.config.explain_max_tokens,
        )
        .await?;

    let language = language.unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
    tracing::info!(language = %language, "Code explained");

    Ok(Json(ExplainCodeResponse {
        success: true,
        explanation,
        language,
    }))
}

/// POST /api/ai-assist
pub async fn ai_assist(
    State(state): State<AssistAppState>,
    Json(req): Json<AiAssistRequest>,
) -> AssistResult<Json<AiAssistResponse>> {
    if req.code.trim().is_empty() || req.challenge.trim().is_empty() {
        return Err(AssistError::Validation(
            "Code and challenge are required".to_string(),
        ));
    }

    let client = state.client()?;
    let use_case = req
        .use_case
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| AssistKind::Hint.as_str().to_string());
    let kind = AssistKind::parse(&use_case);
    let language = req.language.as_deref().unwrap_or("");

    let messages = [
        ChatMessage::system(prompt::system_prompt(language)),
        ChatMessage::user(prompt::build_assist_message(
            kind,
            &req.challenge,
            &req.code,
            language,
        )),
    ];

    let text = client
        .complete(
            &messages,
            state.config.assist_temperature,
            state.config.assist_max_tokens,
        )
        .await?;

    tracing::info!(use_case = %use_case, "AI assist served");

    Ok(Json(AiAssistResponse {
        success: true,
        message: prompt::format_response(&use_case, text.trim()),
        use_case,
        language: req.language,
    }))
}
