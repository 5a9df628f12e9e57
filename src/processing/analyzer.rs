//! Analysis entry point: composes normalization, keyword extraction, scoring,
//! metrics and recommendations into one `AnalysisResult`

use crate::config::AnalysisConfig;
use crate::error::{AtsError, Result};
use crate::processing::keywords::{extract_target_keywords, partition_keywords, KeywordSource};
use crate::processing::metrics::ResumeMetrics;
use crate::processing::normalizer::ResumeText;
use crate::processing::recommendations::{detect_issues, generate_recommendations, Issues, Recommendation, RuleContext};
use crate::processing::scoring::{ScoreBundle, SectionScores};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MISSING_KEYWORDS_LIMIT: usize = 15;
pub const DEFAULT_FOUND_KEYWORDS_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub target_role: Option<String>,
}

impl AnalysisInput {
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            ..Self::default()
        }
    }

    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = Some(job_description.into());
        self
    }

    pub fn with_target_role(mut self, target_role: impl Into<String>) -> Self {
        self.target_role = Some(target_role.into());
        self
    }

    /// Build an input from raw bytes, rejecting resume bytes that are not UTF-8.
    pub fn from_bytes(resume: &[u8], job_description: Option<&[u8]>, target_role: Option<&str>) -> Result<Self> {
        let resume_text = std::str::from_utf8(resume)
            .map_err(|e| AtsError::InvalidInput(format!("Resume text is not valid UTF-8: {}", e)))?;
        let job_description = job_description
            .map(|bytes| {
                std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| AtsError::InvalidInput(format!("Job description is not valid UTF-8: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            resume_text: resume_text.to_string(),
            job_description,
            target_role: target_role.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub keyword_match: u8,
    pub format_score: u8,
    pub content_score: u8,
    pub readability_score: u8,
    pub section_scores: SectionScores,
    pub issues: Issues,
    pub missing_keywords: Vec<String>,
    pub found_keywords: Vec<String>,
    /// Matched target keywords before `found_keywords` is truncated.
    pub found_keyword_count: usize,
    pub target_keyword_count: usize,
    pub keyword_source: KeywordSource,
    pub recommendations: Vec<Recommendation>,
    pub metrics: ResumeMetrics,
}

/// Stateless ATS analyzer; only the keyword list limits are configurable.
#[derive(Debug, Clone)]
pub struct AtsAnalyzer {
    missing_keywords_limit: usize,
    found_keywords_limit: usize,
}

impl Default for AtsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsAnalyzer {
    pub fn new() -> Self {
        Self {
            missing_keywords_limit: DEFAULT_MISSING_KEYWORDS_LIMIT,
            found_keywords_limit: DEFAULT_FOUND_KEYWORDS_LIMIT,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            missing_keywords_limit: config.missing_keywords_limit,
            found_keywords_limit: config.found_keywords_limit,
        }
    }

    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let text = ResumeText::new(&input.resume_text);
        debug!(
            "Analyzing resume: {} characters, {} words",
            input.resume_text.chars().count(),
            text.word_count()
        );

        let target = extract_target_keywords(input.job_description.as_deref(), input.target_role.as_deref());
        let partition = partition_keywords(text.normalized(), &target.keywords);
        let scores = ScoreBundle::compute(&text, &target.keywords);
        let metrics = ResumeMetrics::collect(&text);

        let ctx = RuleContext {
            text: &text,
            scores: &scores,
            metrics: &metrics,
            keywords: &partition,
        };
        let issues = detect_issues(&ctx);
        let recommendations = generate_recommendations(&ctx);

        info!(
            "ATS analysis complete: overall {} (keywords {}, format {}, content {}, readability {})",
            scores.overall_score,
            scores.keyword_match,
            scores.format_score,
            scores.content_score,
            scores.readability_score
        );

        AnalysisResult {
            overall_score: scores.overall_score,
            keyword_match: scores.keyword_match,
            format_score: scores.format_score,
            content_score: scores.content_score,
            readability_score: scores.readability_score,
            section_scores: scores.section_scores,
            issues,
            found_keyword_count: partition.found.len(),
            missing_keywords: partition.missing.into_iter().take(self.missing_keywords_limit).collect(),
            found_keywords: partition.found.into_iter().take(self.found_keywords_limit).collect(),
            target_keyword_count: target.keywords.len(),
            keyword_source: target.source,
            recommendations,
            metrics,
        }
    }
}

/// Analyze resume text against an optional job description and target role
/// using the default keyword list limits.
pub fn analyze_resume(resume_text: &str, job_description: Option<&str>, target_role: Option<&str>) -> AnalysisResult {
    let input = AnalysisInput {
        resume_text: resume_text.to_string(),
        job_description: job_description.map(str::to_string),
        target_role: target_role.map(str::to_string),
    };
    AtsAnalyzer::new().analyze(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT_RESUME: &str = "John Doe\njohn@example.com\n555-123-4567\nExperience: Led team, increased revenue by 20%. Skills: JavaScript, React, Leadership.";

    #[test]
    fn test_short_resume_with_fallback_keywords() {
        let result = analyze_resume(SHORT_RESUME, None, None);
        assert!(result.keyword_match > 0);
        assert_eq!(result.format_score, 75);
        assert!(result.metrics.quantifiable_achievements >= 1);
        for keyword in ["javascript", "react", "leadership"] {
            assert!(result.found_keywords.contains(&keyword.to_string()));
        }
        assert_eq!(result.keyword_source, KeywordSource::Fallback);
    }

    #[test]
    fn test_empty_resume_scores_low() {
        let result = analyze_resume("", None, None);
        assert!(result.overall_score < 50);
        assert!(result.issues.critical.iter().any(|i| i.contains("email")));
        assert_eq!(result.metrics.word_count, 0);
        assert!(result.found_keywords.is_empty());
    }

    #[test]
    fn test_job_description_keywords_are_found() {
        let resume = "Built ETL pipelines in Python and SQL on AWS.";
        let job = "Looking for experience with Python, SQL, and AWS.";
        let result = analyze_resume(resume, Some(job), None);
        assert_eq!(result.keyword_source, KeywordSource::JobDescription);
        for keyword in ["python", "sql", "aws"] {
            assert!(result.found_keywords.contains(&keyword.to_string()));
        }
        assert_eq!(result.keyword_match, 100);
    }

    #[test]
    fn test_list_truncation() {
        let result = analyze_resume("", None, None);
        assert_eq!(result.target_keyword_count, 30);
        assert_eq!(result.missing_keywords.len(), DEFAULT_MISSING_KEYWORDS_LIMIT);

        let config = AnalysisConfig {
            missing_keywords_limit: 40,
            ..AnalysisConfig::default()
        };
        let input = AnalysisInput::new("");
        let full = AtsAnalyzer::from_config(&config).analyze(&input);
        assert_eq!(full.missing_keywords.len(), 30);
    }

    #[test]
    fn test_found_count_survives_truncation() {
        let config = AnalysisConfig {
            found_keywords_limit: 2,
            ..AnalysisConfig::default()
        };
        let result = AtsAnalyzer::from_config(&config).analyze(&AnalysisInput::new(SHORT_RESUME));
        assert_eq!(result.found_keywords.len(), 2);
        assert!(result.found_keyword_count >= 3);

        let pct = (result.found_keyword_count as f64 / result.target_keyword_count as f64 * 100.0).round() as u8;
        assert_eq!(pct, result.keyword_match);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = AnalysisInput::from_bytes(&[0xff, 0xfe, 0x00], None, None).unwrap_err();
        assert!(matches!(err, AtsError::InvalidInput(_)));

        let input = AnalysisInput::from_bytes(b"resume", Some(b"job"), Some("sales")).unwrap();
        assert_eq!(input.job_description.as_deref(), Some("job"));
        assert_eq!(input.target_role.as_deref(), Some("sales"));
    }

    #[test]
    fn test_builder_matches_free_function() {
        let input = AnalysisInput::new(SHORT_RESUME).with_target_role("marketing");
        let from_builder = AtsAnalyzer::new().analyze(&input);
        let from_fn = analyze_resume(SHORT_RESUME, None, Some("marketing"));
        assert_eq!(from_builder, from_fn);
        assert_eq!(from_fn.keyword_source, KeywordSource::Role);
    }
}
