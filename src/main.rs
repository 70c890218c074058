//! Glimpse binary — wires the adapters together and drives the session.
//!
//! No business logic lives here: environment loading, logger init, the
//! fatal OCR probe, and a stdin command reader that forwards everything
//! to the controller.

use glimpse::app::{AppCommand, Controller, ResponsePanel};
use glimpse::capture::{CaptureRegion, XcapSource};
use glimpse::config::AppConfig;
use glimpse::export::PdfExporter;
use glimpse::llm::GeminiClient;
use glimpse::ocr::TesseractOcr;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Prints responses and status lines to the terminal. An overlay
/// window would implement the same panel port.
struct StdoutPanel;

impl ResponsePanel for StdoutPanel {
    fn show_response(&self, text: &str) {
        println!("\n{text}\n");
    }

    fn show_status(&self, message: &str) {
        println!("[glimpse] {message}");
    }
}

/// Load .env.local → .env from the project root, first match wins.
fn load_env() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    for env_file in [".env.local", ".env"] {
        let path = manifest_dir.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

#[tokio::main]
async fn main() {
    load_env();
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!(
        "[STARTUP] model={}, interval={}ms, export_dir={}",
        config.model,
        config.interval.as_millis(),
        config.export_dir.display()
    );

    // The OCR engine is the one collaborator we cannot run without.
    let ocr = match TesseractOcr::init(config.tesseract_path.as_deref()) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("[STARTUP] {e}");
            eprintln!("glimpse: {e}");
            std::process::exit(1);
        }
    };

    if config.api_key.is_none() {
        log::warn!("[STARTUP] GEMINI_API_KEY is not set — analysis calls will fail");
    }
    let model = GeminiClient::new(
        config.api_key.clone().unwrap_or_default(),
        config.model.clone(),
        config.generation.clone(),
    );

    let controller = Controller::new(
        &config,
        Arc::new(XcapSource),
        Arc::new(ocr),
        Arc::new(model),
        PdfExporter::new(&config.export_dir),
        Arc::new(StdoutPanel),
    );

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>(16);
    let controller_task = tokio::spawn(controller.run(command_rx));

    println!("glimpse is watching your screen.");
    println!("Type a question to ask, or: /pause (toggle) /prev /next /region X Y W H /fullscreen /note TEXT /export /quit");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                let _ = command_tx.send(AppCommand::Shutdown).await;
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if let Some(command) = parse_command(&line) {
                            let shutdown = matches!(command, AppCommand::Shutdown);
                            if command_tx.send(command).await.is_err() || shutdown {
                                break;
                            }
                        }
                    }
                    // EOF or a read error ends the session.
                    _ => {
                        let _ = command_tx.send(AppCommand::Shutdown).await;
                        break;
                    }
                }
            }
        }
    }

    let _ = controller_task.await;
}

/// Map an input line to a command. Anything that is not a slash
/// command is an ask-question submission.
fn parse_command(line: &str) -> Option<AppCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if !line.starts_with('/') {
        return Some(AppCommand::Ask(line.to_string()));
    }

    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("/pause") => Some(AppCommand::TogglePause),
        Some("/prev") => Some(AppCommand::Previous),
        Some("/next") => Some(AppCommand::Next),
        Some("/fullscreen") => Some(AppCommand::ClearRegion),
        Some("/export") => Some(AppCommand::Export),
        Some("/quit") => Some(AppCommand::Shutdown),
        Some("/note") => {
            let text = line["/note".len()..].trim();
            if text.is_empty() {
                None
            } else {
                Some(AppCommand::Note(text.to_string()))
            }
        }
        Some("/region") => {
            let coords: Vec<u32> = parts.filter_map(|p| p.parse().ok()).collect();
            match coords.as_slice() {
                [x, y, width, height] if *width > 0 && *height > 0 => {
                    Some(AppCommand::SetRegion(CaptureRegion {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                    }))
                }
                _ => {
                    eprintln!("usage: /region X Y WIDTH HEIGHT");
                    None
                }
            }
        }
        _ => {
            eprintln!("unknown command: {line}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_becomes_an_ask() {
        assert!(matches!(
            parse_command("what is this chart?"),
            Some(AppCommand::Ask(_))
        ));
    }

    #[test]
    fn region_requires_four_positive_coords() {
        assert!(matches!(
            parse_command("/region 0 0 800 600"),
            Some(AppCommand::SetRegion(_))
        ));
        assert!(parse_command("/region 0 0").is_none());
        assert!(parse_command("/region 0 0 0 600").is_none());
    }

    #[test]
    fn blank_and_unknown_lines_are_dropped() {
        assert!(parse_command("   ").is_none());
        assert!(parse_command("/bogus").is_none());
    }
}
