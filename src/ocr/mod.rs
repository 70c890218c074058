//! OCR domain — the engine port and the tesseract CLI adapter.
//!
//! External code should only use the items exported here.

pub mod cleaner;

use crate::error::OcrError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

/// Recognition language passed to the engine.
pub const OCR_LANGUAGE: &str = "eng";

/// Narrow port over text recognition: PNG bytes in, raw text out.
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    async fn extract_text(&self, png_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Tesseract invoked as a subprocess, image piped through stdin.
pub struct TesseractOcr {
    binary: PathBuf,
}

impl TesseractOcr {
    /// Locate and probe the tesseract binary.
    ///
    /// Resolution order: the configured path if it exists, then a PATH
    /// lookup. The probe runs `--version` once; a failure here is the
    /// only fatal startup error in the application.
    pub fn init(configured_path: Option<&Path>) -> Result<Self, OcrError> {
        let binary = match configured_path {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => {
                log::warn!(
                    "[OCR] tesseract not found at configured path {} — trying PATH",
                    path.display()
                );
                which::which("tesseract").map_err(|_| OcrError::EngineNotFound)?
            }
            None => which::which("tesseract").map_err(|_| OcrError::EngineNotFound)?,
        };

        let output = std::process::Command::new(&binary)
            .arg("--version")
            .output()
            .map_err(|e| OcrError::Probe(e.to_string()))?;
        if !output.status.success() {
            return Err(OcrError::Probe(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // Version banner goes to stdout on modern builds, stderr on old ones.
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        let version = banner.lines().next().unwrap_or("unknown version");
        log::info!("[OCR] initialized: {} ({})", binary.display(), version);

        Ok(Self { binary })
    }
}

#[async_trait::async_trait]
impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, png_bytes: &[u8]) -> Result<String, OcrError> {
        let start = std::time::Instant::now();

        let mut child = tokio::process::Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", OCR_LANGUAGE, "--psm", "6"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(png_bytes).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(OcrError::Engine {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::info!(
            "[OCR] extracted {} chars in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}
