//! Runtime configuration, resolved from the environment.
//!
//! `.env.local` / `.env` are loaded by the binary before this runs, so
//! everything here is a plain `std::env::var` read with a default.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default delay between capture cycles.
pub const DEFAULT_INTERVAL_MS: u64 = 8_000;

/// Minimum wait between two manual question submissions.
pub const ASK_COOLDOWN: Duration = Duration::from_secs(5);

/// Width of the overlay column excluded from the default capture region.
pub const OVERLAY_WIDTH: u32 = 800;

/// Gap between the capture region and the overlay column.
pub const OVERLAY_MARGIN: u32 = 10;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Generation parameters sent with every Gemini request.
///
/// Serialized verbatim into the request's `generationConfig` object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub interval: Duration,
    pub ask_cooldown: Duration,
    pub export_dir: PathBuf,
    pub tesseract_path: Option<PathBuf>,
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Resolve configuration from environment variables, with defaults
    /// for everything except the API key.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let model =
            std::env::var("GLIMPSE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let interval_ms = std::env::var("GLIMPSE_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_INTERVAL_MS);

        let export_dir = std::env::var("GLIMPSE_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::document_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("Glimpse")
            });

        let tesseract_path = std::env::var("TESSERACT_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            api_key,
            model,
            interval: Duration::from_millis(interval_ms),
            ask_cooldown: ASK_COOLDOWN,
            export_dir,
            tesseract_path,
            generation: GenerationConfig::default(),
        }
    }
}
