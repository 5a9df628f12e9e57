//! Countable resume statistics

use crate::processing::normalizer::ResumeText;
use crate::processing::scoring::{count_quantifiable, distinct_action_verbs};
use crate::processing::word_lists::SECTION_HEADER_REGEX;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeMetrics {
    pub word_count: usize,
    pub section_count: usize,
    pub quantifiable_achievements: usize,
    pub action_verbs_used: usize,
}

impl ResumeMetrics {
    pub fn collect(text: &ResumeText) -> Self {
        let original = text.original();
        Self {
            word_count: text.word_count(),
            section_count: count_sections(original),
            quantifiable_achievements: count_quantifiable(original),
            action_verbs_used: distinct_action_verbs(original).len(),
        }
    }
}

/// Distinct standard section headers mentioned anywhere in the text.
pub fn count_sections(original: &str) -> usize {
    SECTION_HEADER_REGEX
        .find_iter(original)
        .map(|m| m.as_str().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let text = ResumeText::new(
            "SUMMARY\nLed teams. Led again, increased revenue 20% and 20%.\nExperience\nEducation\nexperience",
        );
        let metrics = ResumeMetrics::collect(&text);
        assert_eq!(metrics.word_count, 13);
        assert_eq!(metrics.section_count, 3);
        assert_eq!(metrics.quantifiable_achievements, 2);
        assert_eq!(metrics.action_verbs_used, 2);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = ResumeMetrics::collect(&ResumeText::new(""));
        assert_eq!(metrics, ResumeMetrics::default());
    }
}
