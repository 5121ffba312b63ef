//! Plain-text step summary.

use std::fmt::Write;

use crate::definition::Step;

/// Width of the rule under the summary title.
const RULE_WIDTH: usize = 50;

/// Formats a step list as a text block.
///
/// ```
/// # use flowdoc::{definition::Step, summary::SummaryReporter};
/// let text = SummaryReporter::new().render(&[Step::new(1, "Parse", "Read the input")]);
/// assert_eq!(text, "01. Parse\n    Read the input\n\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SummaryReporter {
    title: Option<String>,
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `title` upper-cased above the steps, followed by a rule.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// One block per step, in input order: the index zero-padded to two
    /// digits, the title, an indented description and a blank line.
    pub fn render(&self, steps: &[Step]) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{}", title.to_uppercase());
            let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
            out.push('\n');
        }
        for step in steps {
            let _ = writeln!(out, "{:02}. {}", step.index, step.title);
            let _ = writeln!(out, "    {}", step.description);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_header() {
        let text = SummaryReporter::new()
            .with_title(Some("Release Flow".to_string()))
            .render(&[
                Step::new(1, "Build", "Compile"),
                Step::new(2, "Ship", "Upload"),
            ]);
        let expected = format!(
            "RELEASE FLOW\n{}\n\n01. Build\n    Compile\n\n02. Ship\n    Upload\n\n",
            "=".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_indices_zero_padded_to_two_digits() {
        let steps: Vec<Step> = (1..=14).map(|idx| Step::new(idx, "Step", "")).collect();
        let text = SummaryReporter::new().render(&steps);
        let headings: Vec<&str> = text.lines().filter(|line| line.contains(". Step")).collect();
        assert_eq!(headings.len(), 14);
        assert_eq!(headings[0], "01. Step");
        assert_eq!(headings[8], "09. Step");
        assert_eq!(headings[13], "14. Step");
    }

    #[test]
    fn test_render_keeps_input_order() {
        let text = SummaryReporter::new().render(&[Step::new(2, "B", ""), Step::new(1, "A", "")]);
        assert!(text.find("02. B").unwrap() < text.find("01. A").unwrap());
    }

    #[test]
    fn test_three_digit_index_is_not_truncated() {
        let text = SummaryReporter::new().render(&[Step::new(120, "Late", "")]);
        assert!(text.starts_with("120. Late\n"));
    }

    #[test]
    fn test_empty_steps() {
        assert_eq!(SummaryReporter::new().render(&[]), "");
    }
}
