//! Normalizes free-text model replies into a consistent display block.
//!
//! Model output uses ad hoc markers: a line ending in `:` is a section
//! header, `•` starts a bullet, `📊` flags a statistic, `Q`/`A` lines
//! carry question/answer pairs. One line-oriented pass buffers lines
//! under the current header, then each section is re-emitted in a fixed
//! style.
//!
//! Known quirk, kept on purpose: the Q branch pairs every question in a
//! section with that section's FIRST `A` line. With several Q/A pairs
//! in one section the answers can mis-pair. `extract_qa` is the
//! independent scan that keeps the raw sequences intact.

const SEPARATOR_LEN: usize = 60;

/// Text after the first `:`, or the whole line when there is none.
fn after_colon(line: &str) -> &str {
    match line.find(':') {
        Some(idx) => line[idx + 1..].trim(),
        None => line.trim(),
    }
}

fn section_header(title: &str) -> String {
    let separator = "=".repeat(SEPARATOR_LEN);
    format!(
        "\n{separator}\n** {} **\n{separator}\n\n",
        title.to_uppercase()
    )
}

/// Split the reply into `(title, content)` sections.
///
/// A section is flushed only when it has both a non-empty title and at
/// least one content line; preamble lines before the first header and
/// headers with empty bodies are dropped.
fn collect_sections(raw: &str) -> Vec<(String, Vec<String>)> {
    let mut sections = Vec::new();
    let mut title = String::new();
    let mut content: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(heading) = line.strip_suffix(':') {
            if !title.is_empty() && !content.is_empty() {
                sections.push((std::mem::take(&mut title), std::mem::take(&mut content)));
            } else {
                content.clear();
            }
            title = heading.to_string();
        } else {
            content.push(line.to_string());
        }
    }
    if !title.is_empty() && !content.is_empty() {
        sections.push((title, content));
    }
    sections
}

/// Re-emit the model reply with canonical section styling.
pub fn format_response(raw: &str) -> String {
    let mut formatted = String::new();

    for (title, content) in collect_sections(raw) {
        formatted.push_str(&section_header(&title));

        // One scan per section: every Q line below pairs with this.
        let first_answer = content
            .iter()
            .find(|line| line.starts_with('A'))
            .map(|line| after_colon(line))
            .unwrap_or("");

        for line in &content {
            if let Some(rest) = line.strip_prefix('•') {
                formatted.push_str(&format!("• {}\n", rest.trim()));
            } else if line.starts_with('Q') {
                formatted.push_str(&format!("Q: {}\nA: {first_answer}\n\n", after_colon(line)));
            } else if line.starts_with('A') {
                // Consumed by the Q branch above.
                continue;
            } else if line.chars().any(|c| c.is_ascii_digit()) {
                formatted.push_str(&format!("📊 {line}\n"));
            } else {
                formatted.push_str(&format!("{line}\n\n"));
            }
        }
    }

    formatted.trim().to_string()
}

/// Collect `Q`/`A` lines from the raw reply, ignoring sections.
///
/// The two sequences keep encounter order and are not paired or
/// length-matched.
pub fn extract_qa(raw: &str) -> (Vec<String>, Vec<String>) {
    let mut questions = Vec::new();
    let mut answers = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.starts_with('Q') {
            questions.push(after_colon(line).to_string());
        } else if line.starts_with('A') {
            answers.push(after_colon(line).to_string());
        }
    }
    (questions, answers)
}
