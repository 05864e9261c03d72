//! Capabilities the embedding host must supply. The core never reaches for
//! UI or storage directly; everything arrives through these traits at
//! construction time.

pub mod http;
pub mod stores;

use anyhow::Result;
use serde_json::Value;

/// Plain key-value configuration, visible to the user (settings file,
/// workspace config). Values are JSON so hosts can store whatever their
/// settings layer uses.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
    fn unset(&self, key: &str) -> Result<()>;
}

/// Opaque secret storage (keychain, credential manager). String-valued.
pub trait SecretStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// A single free-text request to the user.
#[derive(Debug, Clone)]
pub struct InputRequest {
    /// Prompt label shown next to the input field.
    pub prompt: String,
    /// Mask what the user types (credentials).
    pub masked: bool,
    /// Ghost text shown while the field is empty.
    pub placeholder: Option<String>,
}

/// Interactive prompting. `None` means the user dismissed the dialog.
pub trait UserPrompt: Send + Sync {
    fn input(&self, request: &InputRequest) -> Option<String>;
    fn pick(&self, items: &[String], placeholder: &str) -> Option<String>;
}

/// The file the editor currently has focused.
#[derive(Debug, Clone)]
pub struct ActiveFile {
    pub name: String,
    pub language: String,
}

/// Editor operations the assistant needs: presenting documents, inserting
/// text, reading what the user is looking at, and user-facing notices.
pub trait EditorSurface: Send + Sync {
    /// Opens a new read-only document with the given content and language tag.
    fn open_document(&self, content: &str, language: &str) -> Result<()>;

    /// Inserts text at the cursor of the active editor. Returns `Ok(false)`
    /// when no editor is active, so callers can fall back to a document.
    fn insert_at_cursor(&self, text: &str) -> Result<bool>;

    /// Current selection, if any. Empty selections come back as `Some("")`.
    fn selection_text(&self) -> Option<String>;

    /// Full text of the active document.
    fn document_text(&self) -> Option<String>;

    fn active_file(&self) -> Option<ActiveFile>;

    fn show_info(&self, message: &str);
    fn show_warning(&self, message: &str);
    fn show_error(&self, message: &str);
}
