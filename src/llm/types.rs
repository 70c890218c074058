//! Analysis result types.

/// Outcome of one analysis round.
///
/// `questions` and `answers` come from independent line scans over the
/// raw model reply; they are not positionally paired and may differ in
/// length.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub summary: Option<String>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub error: Option<String>,
}

impl AnalysisResult {
    /// A successful analysis with formatted display text.
    pub fn ok(summary: String, questions: Vec<String>, answers: Vec<String>) -> Self {
        Self {
            summary: Some(summary),
            questions,
            answers,
            error: None,
        }
    }

    /// A plain informational result with no Q/A content, used for the
    /// "nothing to analyze" sentinels and capture/OCR failure notices.
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            summary: Some(message.into()),
            questions: Vec::new(),
            answers: Vec::new(),
            error: None,
        }
    }

    /// A failed model call. The formatter is never run in this case.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            summary: None,
            questions: Vec::new(),
            answers: Vec::new(),
            error: Some(message.into()),
        }
    }
}
