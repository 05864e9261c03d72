//! SPARC methodology support: the five ordered phases with their markdown
//! templates, and the interactive assistant flow around them.

use std::sync::Arc;

use crate::assistant::CodeAssistant;
use crate::host::{EditorSurface, UserPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparcPhase {
    /// Stable key used in pickers ("specification", "pseudocode", ...).
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub template: &'static str,
    pub next_phase: Option<&'static str>,
}

/// The five phases, in methodology order.
pub const PHASES: [SparcPhase; 5] = [
    SparcPhase {
        key: "specification",
        name: "Specification",
        description: "Define requirements and objectives",
        template: include_str!("templates/specification.md"),
        next_phase: Some("pseudocode"),
    },
    SparcPhase {
        key: "pseudocode",
        name: "Pseudocode",
        description: "Create high-level algorithmic design",
        template: include_str!("templates/pseudocode.md"),
        next_phase: Some("architecture"),
    },
    SparcPhase {
        key: "architecture",
        name: "Architecture",
        description: "Design system architecture and components",
        template: include_str!("templates/architecture.md"),
        next_phase: Some("refinement"),
    },
    SparcPhase {
        key: "refinement",
        name: "Refinement",
        description: "Optimize and improve the design",
        template: include_str!("templates/refinement.md"),
        next_phase: Some("completion"),
    },
    SparcPhase {
        key: "completion",
        name: "Completion",
        description: "Finalize implementation and documentation",
        template: include_str!("templates/completion.md"),
        next_phase: None,
    },
];

pub fn phase(key: &str) -> Option<&'static SparcPhase> {
    PHASES.iter().find(|p| p.key == key)
}

const ACTION_CREATE_TEMPLATE: &str = "Create Template";
const ACTION_AI_ASSISTANCE: &str = "Get AI Assistance";
const ACTION_REVIEW_PHASE: &str = "Review Current Phase";

pub struct SparcMethodology {
    assistant: CodeAssistant,
    editor: Arc<dyn EditorSurface>,
    prompt: Arc<dyn UserPrompt>,
}

impl SparcMethodology {
    pub fn new(
        assistant: CodeAssistant,
        editor: Arc<dyn EditorSurface>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self {
            assistant,
            editor,
            prompt,
        }
    }

    /// Entry point behind the SPARC command: pick a phase, pick an action,
    /// run it. Dismissing either picker is a no-op.
    pub async fn show_sparc_assistant(&self) {
        let phase_keys: Vec<String> = PHASES.iter().map(|p| p.key.to_string()).collect();
        let Some(selected) = self
            .prompt
            .pick(&phase_keys, "Select SPARC methodology phase")
        else {
            return;
        };
        let Some(phase) = phase(&selected) else {
            return;
        };

        let actions = vec![
            ACTION_CREATE_TEMPLATE.to_string(),
            ACTION_AI_ASSISTANCE.to_string(),
            ACTION_REVIEW_PHASE.to_string(),
        ];
        let Some(action) = self.prompt.pick(
            &actions,
            &format!("What would you like to do for the {} phase?", phase.name),
        ) else {
            return;
        };

        match action.as_str() {
            ACTION_CREATE_TEMPLATE => self.create_phase_template(phase),
            ACTION_AI_ASSISTANCE => self.get_ai_assistance(phase).await,
            ACTION_REVIEW_PHASE => self.review_current_phase(phase).await,
            _ => {}
        }
    }

    pub fn create_phase_template(&self, phase: &SparcPhase) {
        if let Err(e) = self.editor.open_document(phase.template, "markdown") {
            log::error!("Failed to open {} template: {}", phase.name, e);
        }
    }

    pub async fn get_ai_assistance(&self, phase: &SparcPhase) {
        let context = self.current_context();
        let prompt = format!(
            "I'm working on the {} phase of the SPARC methodology. {}.\n\n\
Current context:\n{}\n\n\
Please provide specific guidance and suggestions for this phase. Include actionable items and best practices.",
            phase.name, phase.description, context
        );

        let response = self.assistant.send_chat_message(&prompt).await;
        self.show_response(&format!("SPARC {} Assistance", phase.name), &response);
    }

    pub async fn review_current_phase(&self, phase: &SparcPhase) {
        let Some(content) = self.editor.document_text() else {
            self.editor.show_warning("Please open a document to review");
            return;
        };

        let prompt = format!(
            "Please review this {} phase document for completeness and quality:\n\n{}\n\n\
Provide feedback on:\n\
1. Completeness - are all necessary sections covered?\n\
2. Quality - is the content detailed and actionable?\n\
3. SPARC methodology alignment - does it follow best practices?\n\
4. Suggestions for improvement",
            phase.name, content
        );

        let response = self.assistant.send_chat_message(&prompt).await;
        self.show_response(&format!("{} Phase Review", phase.name), &response);
    }

    fn current_context(&self) -> String {
        if let Some(selection) = self.editor.selection_text() {
            if !selection.is_empty() {
                return format!("Selected text:\n{}", selection);
            }
        }
        if let Some(file) = self.editor.active_file() {
            return format!("Current file: {}\nLanguage: {}", file.name, file.language);
        }
        "No active document".to_string()
    }

    fn show_response(&self, title: &str, content: &str) {
        let document = format!("# {}\n\n{}", title, content);
        if let Err(e) = self.editor.open_document(&document, "markdown") {
            log::error!("Failed to open {}: {}", title, e);
        }
    }
}
