use thiserror::Error;

use crate::cons::provider_cons::Provider;

/// Everything the request adapter can fail with. Callers receive one error
/// channel; the variants exist so hosts can branch without string matching.
#[derive(Debug, Error)]
pub enum AiError {
    /// No credential in either store and the user declined the prompt.
    #[error("No API key configured for {}", .0.display_name())]
    MissingCredential(Provider),

    /// The configured provider id is outside the supported set.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The provider answered with a non-2xx status.
    #[error("{} API error ({status}): {body}", .provider.display_name())]
    Upstream {
        provider: Provider,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the body was not in the documented shape.
    #[error("Invalid response from {} API: {detail}", .provider.display_name())]
    MalformedResponse { provider: Provider, detail: String },

    /// The HTTP exchange itself failed (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Network(String),
}

impl AiError {
    pub(crate) fn malformed(provider: Provider, detail: impl Into<String>) -> Self {
        AiError::MalformedResponse {
            provider,
            detail: detail.into(),
        }
    }
}
