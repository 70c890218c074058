//! End-to-end analysis flow against a scripted model: raw OCR text in,
//! formatted display block and Q/A sequences out. Exercises the same
//! path the capture loop takes, minus the capture and OCR adapters.

use glimpse::error::LlmError;
use glimpse::llm::{self, ModelClient};
use glimpse::ocr::cleaner;
use std::sync::atomic::{AtomicUsize, Ordering};

struct ScriptedModel {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // The cleaned screen text must arrive embedded in the prompt.
        assert!(prompt.contains("screen"), "prompt missing template text");
        Ok(self.reply.clone())
    }
}

const SCREEN_GRAB: &str = "\
   Quarterly Review Draft   \n\
https://intranet.example.com/q3\n\
Page 1 of 4\n\
..\n\
Revenue grew 12% year over year.\n\
What drove the increase?\n";

const MODEL_REPLY: &str = "\
Executive Summary:\n\
Revenue growth was driven by enterprise renewals.\n\
\n\
Statistical Highlights:\n\
growth was 12 percent\n\
\n\
Key Findings:\n\
• enterprise renewals accelerated\n\
\n\
Questions Found:\n\
Q: What drove the increase?\n\
A: Enterprise renewals and seat expansion.\n";

#[tokio::test]
async fn cleaned_capture_round_trips_into_a_formatted_report() {
    let cleaned = cleaner::clean_text(SCREEN_GRAB);

    // Chrome noise is gone, content lines survive in order.
    assert_eq!(
        cleaned,
        "Quarterly Review Draft\nRevenue grew 12% year over year.\nWhat drove the increase?"
    );

    let model = ScriptedModel::new(MODEL_REPLY);
    let result = llm::analyze(&model, &cleaned).await;

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert!(result.error.is_none());

    let display = result.summary.expect("formatted display text");
    assert!(display.contains("** EXECUTIVE SUMMARY **"));
    assert!(display.contains("Revenue growth was driven by enterprise renewals."));
    assert!(display.contains("📊 growth was 12 percent"));
    assert!(display.contains("• enterprise renewals accelerated"));
    assert!(display.contains("Q: What drove the increase?\nA: Enterprise renewals and seat expansion."));

    assert_eq!(result.questions, vec!["What drove the increase?"]);
    assert_eq!(result.answers, vec!["Enterprise renewals and seat expansion."]);
}

#[tokio::test]
async fn noise_only_capture_never_reaches_the_model() {
    let cleaned = cleaner::clean_text("  ..  \n\nSearch\n42\n");
    assert!(cleaned.is_empty());

    let model = ScriptedModel::new("unused");
    let result = llm::analyze(&model, &cleaned).await;

    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.summary.as_deref(), Some("No meaningful text detected."));
}

#[tokio::test]
async fn question_free_capture_uses_the_summary_prompt() {
    struct PromptProbe;

    #[async_trait::async_trait]
    impl ModelClient for PromptProbe {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            assert!(prompt.contains("EXECUTIVE SUMMARY:"));
            assert!(!prompt.contains("QUESTIONS FOUND:"));
            Ok("Summary:\nnothing remarkable on screen\n".to_string())
        }
    }

    let result = llm::analyze(&PromptProbe, "plain statement of fact").await;
    assert!(result.summary.unwrap().contains("** SUMMARY **"));
}
