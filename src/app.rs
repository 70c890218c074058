//! Application controller — the single writer of all session state.
//!
//! One task owns `AppState` and selects over three inputs: the
//! fixed-delay capture ticker, the user command channel, and the
//! worker-result channel. Capture cycles run as detached tasks; there
//! is deliberately no in-flight guard, so a slow cycle can overlap the
//! next tick. Workers never touch state or the panel directly — their
//! results come back through the channel and are applied here.

use crate::capture::{CaptureRegion, ScreenSource};
use crate::config::AppConfig;
use crate::export::{PdfExporter, MAX_EXPORTED_RESPONSES};
use crate::history::ResponseHistory;
use crate::llm::{self, AnalysisResult, ModelClient};
use crate::ocr::OcrEngine;
use crate::pipeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// User-initiated operations, sent from the input surface.
#[derive(Debug)]
pub enum AppCommand {
    Ask(String),
    TogglePause,
    Previous,
    Next,
    SetRegion(CaptureRegion),
    ClearRegion,
    Note(String),
    Export,
    Shutdown,
}

/// Narrow port over the display surface. The shipped binary prints to
/// stdout; an overlay window would implement the same two calls.
pub trait ResponsePanel: Send + Sync {
    fn show_response(&self, text: &str);
    fn show_status(&self, message: &str);
}

/// Rejects submissions that arrive within the configured window of the
/// previous accepted one.
pub struct CooldownGate {
    window: Duration,
    last: Option<Instant>,
}

impl CooldownGate {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Accept the submission, or return the remaining wait time.
    pub fn try_pass(&mut self) -> Result<(), Duration> {
        self.try_pass_at(Instant::now())
    }

    fn try_pass_at(&mut self, now: Instant) -> Result<(), Duration> {
        if let Some(last) = self.last {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }
        self.last = Some(now);
        Ok(())
    }
}

struct AppState {
    region: Option<CaptureRegion>,
    paused: bool,
    ask_gate: CooldownGate,
    history: ResponseHistory,
    notes: Option<String>,
}

pub struct Controller {
    state: AppState,
    source: Arc<dyn ScreenSource>,
    ocr: Arc<dyn OcrEngine>,
    model: Arc<dyn ModelClient>,
    exporter: PdfExporter,
    panel: Arc<dyn ResponsePanel>,
    interval: Duration,
}

impl Controller {
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn ScreenSource>,
        ocr: Arc<dyn OcrEngine>,
        model: Arc<dyn ModelClient>,
        exporter: PdfExporter,
        panel: Arc<dyn ResponsePanel>,
    ) -> Self {
        Self {
            state: AppState {
                region: None,
                paused: false,
                ask_gate: CooldownGate::new(config.ask_cooldown),
                history: ResponseHistory::new(),
                notes: None,
            },
            source,
            ocr,
            model,
            exporter,
            panel,
            interval: config.interval,
        }
    }

    /// Drive the session until `Shutdown` arrives or the command
    /// channel closes.
    pub async fn run(mut self, mut commands: mpsc::Receiver<AppCommand>) {
        let (result_tx, mut results) = mpsc::channel::<AnalysisResult>(16);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Pause gates new work only; in-flight cycles finish.
                    if !self.state.paused {
                        self.spawn_cycle(&result_tx);
                    }
                }
                Some(result) = results.recv() => {
                    self.apply_result(result);
                }
                command = commands.recv() => {
                    match command {
                        Some(AppCommand::Shutdown) | None => break,
                        Some(command) => self.handle_command(command, &result_tx),
                    }
                }
            }
        }
        log::info!("[APP] controller shut down ({} responses)", self.state.history.len());
    }

    fn spawn_cycle(&self, result_tx: &mpsc::Sender<AnalysisResult>) {
        let source = Arc::clone(&self.source);
        let ocr = Arc::clone(&self.ocr);
        let model = Arc::clone(&self.model);
        let region = self.state.region;
        let tx = result_tx.clone();
        tokio::spawn(async move {
            let result = pipeline::run_cycle(source, ocr, model, region).await;
            let _ = tx.send(result).await;
        });
    }

    fn apply_result(&mut self, result: AnalysisResult) {
        if let Some(summary) = result.summary {
            self.panel.show_response(&summary);
            self.state.history.push(summary);
        } else if let Some(error) = result.error {
            self.panel.show_status(&error);
        }
    }

    fn handle_command(&mut self, command: AppCommand, result_tx: &mpsc::Sender<AnalysisResult>) {
        match command {
            AppCommand::Ask(question) => self.ask(question, result_tx),
            AppCommand::TogglePause => {
                self.state.paused = !self.state.paused;
                self.panel.show_status(if self.state.paused {
                    "Updates paused."
                } else {
                    "Updates resumed."
                });
            }
            AppCommand::Previous => {
                if let Some(entry) = self.state.history.previous() {
                    let entry = entry.to_string();
                    self.panel.show_response(&entry);
                }
            }
            AppCommand::Next => {
                if let Some(entry) = self.state.history.next_entry() {
                    let entry = entry.to_string();
                    self.panel.show_response(&entry);
                }
            }
            AppCommand::SetRegion(region) => {
                self.state.region = Some(region);
                self.panel.show_status(&format!(
                    "Region set: {}x{} at ({},{})",
                    region.width, region.height, region.x, region.y
                ));
                // Analyze the new region right away instead of waiting a tick.
                self.spawn_cycle(result_tx);
            }
            AppCommand::ClearRegion => {
                self.state.region = None;
                self.panel.show_status("Region cleared — capturing full screen.");
            }
            AppCommand::Note(text) => {
                self.state.notes = Some(text);
                self.panel.show_status("Notes saved for the next export.");
            }
            AppCommand::Export => self.export(),
            AppCommand::Shutdown => unreachable!("handled by the run loop"),
        }
    }

    fn ask(&mut self, question: String, result_tx: &mpsc::Sender<AnalysisResult>) {
        let question = question.trim().to_string();
        if question.is_empty() {
            return;
        }
        if let Err(remaining) = self.state.ask_gate.try_pass() {
            self.panel.show_status(&format!(
                "Please wait {:.0}s before asking another question.",
                remaining.as_secs_f64().ceil()
            ));
            return;
        }

        let model = Arc::clone(&self.model);
        let tx = result_tx.clone();
        tokio::spawn(async move {
            let result = llm::analyze(model.as_ref(), &question).await;
            let _ = tx.send(result).await;
        });
    }

    fn export(&mut self) {
        let responses = self.state.history.recent(MAX_EXPORTED_RESPONSES);
        match self
            .exporter
            .export(responses, self.state.notes.as_deref())
        {
            Ok(path) => self
                .panel
                .show_status(&format!("Exported to {}", path.display())),
            Err(e) => self.panel.show_status(&format!("Export failed: {e}")),
        }
    }
}
