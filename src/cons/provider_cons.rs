use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenRouter,
    Claude,
    OpenAI,
    Gemini,
}

impl Provider {
    /// Every supported provider, in picker order.
    pub const ALL: [Provider; 4] = [
        Provider::OpenRouter,
        Provider::Claude,
        Provider::OpenAI,
        Provider::Gemini,
    ];

    /// Returns the unique identifier used in configuration keys (e.g., "openrouter", "claude")
    pub fn provider_name(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Claude => "claude",
            Provider::OpenAI => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Human-readable label for prompts and messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "OpenRouter",
            Provider::Claude => "Anthropic Claude",
            Provider::OpenAI => "OpenAI",
            Provider::Gemini => "Google Gemini",
        }
    }

    /// Parses a configured provider id. Matching is exact: anything outside
    /// the closed set is unsupported, not coerced.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "openrouter" => Some(Provider::OpenRouter),
            "claude" => Some(Provider::Claude),
            "openai" => Some(Provider::OpenAI),
            "gemini" => Some(Provider::Gemini),
            _ => None,
        }
    }
}

// Ensure Display trait matches provider_name for convenience
impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
