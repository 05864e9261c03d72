//! Prompt text. The persona rides along as the system message (or its
//! provider-specific equivalent) on every request; the builders produce the
//! user-facing prompt for each assistant operation.

/// Identity instruction sent with every request, for all providers.
pub const PERSONA: &str = "You are Roo Code, an AI assistant integrated into SPARC IDE. \
You help developers with code generation, explanation, refactoring, and following the SPARC methodology. \
Be concise, helpful, and provide practical solutions.";

/// Probe sent by the connectivity check.
pub const CONNECTION_TEST_PROMPT: &str =
    "Hello, this is a connection test. Please respond with \"Connection successful\".";

/// Phrase the probe reply must contain, compared case-insensitively.
pub const CONNECTION_ACK: &str = "connection successful";

/// Reply shown in chat when a request fails; the real error goes to the
/// host's error channel instead.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error processing your request.";

pub fn explain_prompt(code: &str) -> String {
    format!(
        "Please explain the following code in detail, including what it does, \
how it works, and any potential improvements:\n\n```\n{}\n```",
        code
    )
}

pub fn generate_prompt(request: &str) -> String {
    format!(
        "Generate clean, well-documented code for the following request. \
Include comments and follow best practices:\n\n{}\n\nPlease provide only the code with appropriate comments.",
        request
    )
}

pub fn refactor_prompt(code: &str, instructions: &str) -> String {
    format!(
        "Please refactor the following code according to these instructions: {}\n\n\
Original code:\n```\n{}\n```\n\nPlease provide the refactored code with explanations of the changes made.",
        instructions, code
    )
}

pub fn tests_prompt(code: &str) -> String {
    format!(
        "Generate comprehensive unit tests for the following code. \
Include edge cases and error scenarios:\n\n```\n{}\n```\n\n\
Please provide complete test cases using appropriate testing framework conventions.",
        code
    )
}
