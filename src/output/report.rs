//! Report wrapper: an analysis result plus run metadata

use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    pub job_file: Option<String>,
    pub target_role: Option<String>,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, metadata: ReportMetadata) -> Self {
        Self { metadata, result }
    }
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_file: None,
            target_role: None,
            processing_time_ms: 0,
        }
    }
}

/// Score band shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            65..=79 => ScoreBand::Good,
            50..=64 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }

    /// One-line verdict for the overall score.
    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Well optimized for applicant tracking systems",
            ScoreBand::Good => "Likely to pass most ATS filters with minor tweaks",
            ScoreBand::Fair => "May be filtered out; address the high-priority recommendations",
            ScoreBand::Poor => "At risk of being rejected by ATS filters",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }
}
