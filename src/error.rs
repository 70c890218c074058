//! Error types for each collaborator domain.
//!
//! Adapters convert library failures into these enums at the boundary;
//! the pipeline folds them into display strings so no cycle error is
//! ever fatal to the running process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("no monitor available for capture")]
    NoMonitor,

    #[error("screen grab failed: {0}")]
    Grab(String),

    #[error("capture region {0}x{1} is empty")]
    EmptyRegion(u32, u32),

    #[error("PNG encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("tesseract binary not found — install tesseract or set TESSERACT_PATH")]
    EngineNotFound,

    #[error("tesseract probe failed: {0}")]
    Probe(String),

    #[error("OCR process failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("tesseract exited with {code}: {stderr}")]
    Engine { code: i32, stderr: String },
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key configured — set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no text candidate in API response")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export — history is empty")]
    NothingToExport,

    #[error("could not create export directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("could not write PDF: {0}")]
    Write(#[from] std::io::Error),

    #[error("PDF font setup failed")]
    Font,
}
