//! Prompt templates for the analysis call.
//!
//! Two fixed templates, selected by whether the cleaned screen text
//! contains a question mark. Both ask for the sectioned output style
//! (headers ending in `:`, `•` bullets, `📊` statistic callouts,
//! `Q:`/`A:` pairs) that the formatter normalizes.

/// Returned instead of calling the model when cleaning leaves nothing.
pub const NO_MEANINGFUL_TEXT: &str = "No meaningful text detected.";

/// Shown when OCR produced an empty string for the captured frame.
pub const NO_TEXT_IN_IMAGE: &str = "No text detected in image";

const QUESTION_TEMPLATE: &str = "\
You are a knowledgeable AI assistant. The text below was read from the \
user's screen and contains at least one question (look for question marks \
and interrogative words: who, what, when, where, why, how). First provide \
a detailed summary of the content, then identify every question present \
and answer each one individually.

Format your response as:

MAIN ANSWER:
[Clear, direct answer to the most important question]

KEY FACTS & STATISTICS:
📊 [Important statistic or fact]
📊 [Important statistic or fact]

DETAILED EXPLANATION:
• [Important detail]
• [Important detail]

QUESTIONS FOUND:
Q: [Question from the text]
A: [Clear answer, with data if applicable]

Screen content to analyze:
";

const SUMMARY_TEMPLATE: &str = "\
You are a knowledgeable AI assistant. Analyze and summarize the following \
screen content, with focus on both key information and numerical data.

Format your response as:

EXECUTIVE SUMMARY:
[2-3 sentences capturing the main points]

STATISTICAL HIGHLIGHTS:
📊 [Key statistic or metric]
📊 [Key statistic or metric]

KEY FINDINGS:
• [Major finding]
• [Major finding]

CONCLUSIONS & IMPLICATIONS:
[Key takeaways with relevant metrics]

Screen content to analyze:
";

/// Build the prompt for a non-empty cleaned text.
///
/// The question template is selected iff the text contains a literal
/// `?`; the cleaned text is appended verbatim in either case.
pub fn build_prompt(cleaned_text: &str) -> String {
    let template = if cleaned_text.contains('?') {
        QUESTION_TEMPLATE
    } else {
        SUMMARY_TEMPLATE
    };
    format!("{template}{cleaned_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_mark_selects_question_template() {
        let prompt = build_prompt("What is the airspeed of an unladen swallow?");
        assert!(prompt.contains("QUESTIONS FOUND:"));
        assert!(!prompt.contains("EXECUTIVE SUMMARY:"));
    }

    #[test]
    fn plain_text_selects_summary_template() {
        let prompt = build_prompt("Quarterly revenue grew twelve percent.");
        assert!(prompt.contains("EXECUTIVE SUMMARY:"));
        assert!(!prompt.contains("QUESTIONS FOUND:"));
    }

    #[test]
    fn cleaned_text_is_embedded_verbatim_at_the_end() {
        let text = "line one\nline two?  spaced";
        let prompt = build_prompt(text);
        assert!(prompt.ends_with(text));
    }
}
