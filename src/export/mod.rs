//! PDF report export.
//!
//! Writes a timestamped report: a title page, the most recent analysis
//! responses (each starting a fresh page), and a closing notes page
//! when the user has written notes. Export failures are surfaced as a
//! status string by the caller; they never stop the process.

use crate::error::ExportError;
use printpdf::{
    BuiltinFont, Layer, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem,
    TextMatrix, TextRenderingMode,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// At most this many history entries make it into a report.
pub const MAX_EXPORTED_RESPONSES: usize = 5;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const FONT_SIZE_PT: f32 = 10.0;
const WRAP_COLUMNS: usize = 95;

/// Lines that fit on one page at the configured line height.
const LINES_PER_PAGE: usize = 54;

pub struct PdfExporter {
    output_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the report and return its path.
    ///
    /// `responses` should already be capped to the most recent
    /// [`MAX_EXPORTED_RESPONSES`] entries (see `ResponseHistory::recent`).
    pub fn export(
        &self,
        responses: &[String],
        notes: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        if responses.is_empty() && notes.is_none() {
            return Err(ExportError::NothingToExport);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::CreateDir {
            path: self.output_dir.display().to_string(),
            source,
        })?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut doc = PdfDocument::new("Glimpse Report");
        let layer_id = doc.add_layer(&Layer::new("Layer 1"));

        let font_bytes = BuiltinFont::Helvetica.get_subset_font().bytes;
        let font = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
            .ok_or(ExportError::Font)?;
        let font_id = doc.add_font(&font);

        let emit_pages = |lines: Vec<String>, doc: &mut PdfDocument| {
            for chunk in lines.chunks(LINES_PER_PAGE.max(1)) {
                let mut ops = vec![
                    Op::BeginLayer {
                        layer_id: layer_id.clone(),
                    },
                    Op::SetFontSize {
                        size: Pt(FONT_SIZE_PT),
                        font: font_id.clone(),
                    },
                    Op::StartTextSection,
                    Op::SetTextRenderingMode {
                        mode: TextRenderingMode::Fill,
                    },
                ];
                let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
                for line in chunk {
                    ops.push(Op::SetTextMatrix {
                        matrix: TextMatrix::Translate(Mm(MARGIN_MM).into(), Mm(y).into()),
                    });
                    ops.push(Op::WriteText {
                        items: vec![TextItem::Text(line.clone())],
                        font: font_id.clone(),
                    });
                    y -= LINE_HEIGHT_MM;
                }
                ops.push(Op::EndTextSection);
                ops.push(Op::EndLayer {
                    layer_id: layer_id.clone(),
                });
                doc.pages
                    .push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
            }
        };

        emit_pages(
            vec![
                "Glimpse Report".to_string(),
                String::new(),
                format!("Generated at unix time {timestamp}"),
                format!("Analyses included: {}", responses.len()),
            ],
            &mut doc,
        );

        for (idx, response) in responses.iter().enumerate() {
            let mut lines = vec![format!("Analysis {}:", idx + 1), String::new()];
            lines.extend(layout_lines(response));
            emit_pages(lines, &mut doc);
        }

        if let Some(notes) = notes {
            let mut lines = vec!["Notes:".to_string(), String::new()];
            lines.extend(layout_lines(notes));
            emit_pages(lines, &mut doc);
        }

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::warn!("[EXPORT] PDF generation warnings: {}", warnings.len());
        }

        let path = self
            .output_dir
            .join(format!("glimpse_report_{timestamp}.pdf"));
        std::fs::write(&path, bytes)?;
        log::info!("[EXPORT] wrote {}", path.display());
        Ok(path)
    }
}

/// Sanitize and wrap a block of text into page-width lines.
fn layout_lines(text: &str) -> Vec<String> {
    text.lines().flat_map(|line| wrap_line(&sanitize(line))).collect()
}

/// The built-in Helvetica subset covers latin-1 only; anything outside
/// is replaced, matching how the reports have always been encoded.
fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| if (c as u32) < 256 { c } else { '?' })
        .collect()
}

fn wrap_line(line: &str) -> Vec<String> {
    if line.chars().count() <= WRAP_COLUMNS {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(WRAP_COLUMNS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
