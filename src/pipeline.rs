//! One capture → OCR → clean → analyze cycle.
//!
//! Every failure mode folds into an `AnalysisResult` the panel can
//! display; nothing here propagates an error to the caller.

use crate::capture::{CaptureRegion, ScreenSource};
use crate::llm::{self, prompts, AnalysisResult, ModelClient};
use crate::ocr::{cleaner, OcrEngine};
use std::sync::Arc;

pub async fn run_cycle(
    source: Arc<dyn ScreenSource>,
    ocr: Arc<dyn OcrEngine>,
    model: Arc<dyn ModelClient>,
    region: Option<CaptureRegion>,
) -> AnalysisResult {
    let start = std::time::Instant::now();

    // xcap grabs are blocking — keep them off the async workers.
    let png_bytes = match tokio::task::spawn_blocking(move || source.capture(region)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            log::error!("[PIPELINE] capture failed: {e}");
            return AnalysisResult::notice(format!("Screen capture failed: {e}"));
        }
        Err(e) => {
            log::error!("[PIPELINE] capture worker panicked: {e}");
            return AnalysisResult::notice("Screen capture failed: worker crashed");
        }
    };

    let raw_text = match ocr.extract_text(&png_bytes).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("[PIPELINE] OCR failed: {e}");
            return AnalysisResult::notice(format!("Text extraction failed: {e}"));
        }
    };
    if raw_text.is_empty() {
        return AnalysisResult::notice(prompts::NO_TEXT_IN_IMAGE);
    }

    let cleaned = cleaner::clean_text(&raw_text);
    let result = llm::analyze(model.as_ref(), &cleaned).await;

    log::info!(
        "[PIPELINE] cycle complete in {}ms ({} raw chars, {} cleaned)",
        start.elapsed().as_millis(),
        raw_text.len(),
        cleaned.len()
    );
    result
}
