//! LLM domain — prompt construction, the model port, and reply shaping.
//!
//! External code should only use what is exported here:
//!   - prompts.rs — template selection + sentinel constants
//!   - gemini.rs  — the shipped `ModelClient` adapter
//!   - format.rs  — reply normalization + Q/A extraction
//!   - types.rs   — `AnalysisResult`

pub mod format;
mod gemini;
pub mod prompts;
pub mod types;

pub use gemini::GeminiClient;
pub use types::AnalysisResult;

use crate::error::LlmError;

/// Narrow port for the generative model call, so analysis logic is
/// testable without the network.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Run one analysis round over already-cleaned text.
///
/// Empty cleaned text short-circuits to the fixed sentinel without
/// contacting the model. A model failure never reaches the formatter:
/// it becomes an `AnalysisResult` with `error` set, rate limiting with
/// a distinct wait-and-retry message.
pub async fn analyze(model: &dyn ModelClient, cleaned_text: &str) -> AnalysisResult {
    if cleaned_text.is_empty() {
        return AnalysisResult::notice(prompts::NO_MEANINGFUL_TEXT);
    }

    let prompt = prompts::build_prompt(cleaned_text);
    let reply = match model.generate(&prompt).await {
        Ok(reply) => reply,
        Err(LlmError::RateLimited) => {
            return AnalysisResult::failure(
                "Model resource exhausted (HTTP 429) — wait a moment and retry.",
            );
        }
        Err(e) => {
            log::error!("[LLM] analysis failed: {e}");
            return AnalysisResult::failure(format!("Error analyzing text: {e}"));
        }
    };

    let (questions, answers) = format::extract_qa(&reply);
    let formatted = format::format_response(&reply);
    AnalysisResult::ok(formatted, questions, answers)
}
