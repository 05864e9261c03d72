// Per-provider wire mapping and the shared response model

pub mod provider_base;
pub mod provider_handle;

pub mod claude;
pub mod gemini;
pub mod openai;
pub mod openrouter;
