//! Assist Configuration

/// Default upstream base URL (OpenAI-compatible)
pub const DEFAULT_BASE_URL: &str = "https://api.studio.nebius.com/v1/";

/// Default model
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Assist application configuration
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Upstream API key; None disables the AI endpoints
    pub api_key: Option<String>,
    /// Upstream base URL, with trailing slash
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature for code explanations
    pub explain_temperature: f32,
    /// Token budget for code explanations
    pub explain_max_tokens: u32,
    /// Sampling temperature for assist (hint/debug) responses
    pub assist_temperature: f32,
    /// Token budget for assist responses
    pub assist_max_tokens: u32,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            explain_temperature: 0.3,
            explain_max_tokens: 800,
            assist_temperature: 0.7,
            assist_max_tokens: 500,
        }
    }
}

impl AssistConfig {
    /// Create config with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Whether the upstream API is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssistConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, "https://api.studio.nebius.com/v1/");
        assert_eq!(config.model, "openai/gpt-oss-120b");
        assert_eq!(config.explain_max_tokens, 800);
        assert_eq!(config.assist_max_tokens, 500);
    }

    #[test]
    fn test_with_api_key() {
        assert!(AssistConfig::with_api_key("key").is_configured());
        assert!(!AssistConfig::with_api_key("").is_configured());
    }
}
