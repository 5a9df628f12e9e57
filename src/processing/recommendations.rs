//! Issue detection and ranked improvement recommendations

use crate::processing::keywords::KeywordPartition;
use crate::processing::metrics::ResumeMetrics;
use crate::processing::normalizer::ResumeText;
use crate::processing::scoring::{count_weak_phrases, has_email, has_linkedin, has_phone, has_portfolio, ScoreBundle};
use crate::processing::word_lists::SUMMARY_HEADER_REGEX;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

/// Issues grouped by severity, each bucket in rule-evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Issues {
    pub critical: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Issues {
    pub fn push(&mut self, severity: Severity, description: impl Into<String>) {
        let bucket = match severity {
            Severity::Critical => &mut self.critical,
            Severity::Warning => &mut self.warnings,
            Severity::Suggestion => &mut self.suggestions,
        };
        bucket.push(description.into());
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.warnings.len() + self.suggestions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Format,
    Content,
    Keywords,
    Structure,
    Optimization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSection {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: Category,
    pub section: Option<ResumeSection>,
    pub priority: u32,
}

macro_rules! display_lowercase {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = format!("{:?}", self).to_lowercase();
                f.write_str(&name)
            }
        }
    )*};
}

display_lowercase!(Severity, Impact, Category, ResumeSection);

/// Everything the rules look at, computed once per analysis.
pub struct RuleContext<'a> {
    pub text: &'a ResumeText,
    pub scores: &'a ScoreBundle,
    pub metrics: &'a ResumeMetrics,
    pub keywords: &'a KeywordPartition,
}

impl RuleContext<'_> {
    fn has_email(&self) -> bool {
        has_email(self.text.original())
    }

    fn has_phone(&self) -> bool {
        has_phone(self.text.original())
    }

    fn has_linkedin(&self) -> bool {
        has_linkedin(self.text.original())
    }

    fn has_portfolio(&self) -> bool {
        has_portfolio(self.text.original())
    }
}

pub fn detect_issues(ctx: &RuleContext<'_>) -> Issues {
    let mut issues = Issues::default();
    let scores = ctx.scores;

    if scores.overall_score < 50 {
        issues.push(
            Severity::Critical,
            "Overall ATS compatibility is low; the resume may be filtered out before a recruiter sees it",
        );
    }
    if !ctx.has_email() {
        issues.push(Severity::Critical, "No email address found in the contact information");
    }
    if scores.keyword_match < 20 {
        issues.push(
            Severity::Critical,
            format!("Very low keyword match ({}%) against the target keywords", scores.keyword_match),
        );
    }

    if !ctx.has_phone() {
        issues.push(Severity::Warning, "No phone number found in the contact information");
    }
    if scores.format_score < 70 {
        issues.push(
            Severity::Warning,
            format!("Formatting may confuse ATS parsers (format score {})", scores.format_score),
        );
    }
    if ctx.metrics.word_count > 800 {
        issues.push(
            Severity::Warning,
            format!("Resume is long ({} words); aim for 400-800 words", ctx.metrics.word_count),
        );
    }
    if !ctx.has_linkedin() {
        issues.push(Severity::Warning, "No LinkedIn profile mentioned");
    }

    if scores.keyword_match < 60 {
        issues.push(
            Severity::Suggestion,
            "Work more of the target keywords into your experience and skills sections",
        );
    }
    if scores.content_score < 70 {
        issues.push(
            Severity::Suggestion,
            "Strengthen content with clear sections, action verbs and measurable results",
        );
    }
    if !ctx.has_portfolio() {
        issues.push(Severity::Suggestion, "Consider adding a portfolio, GitHub or personal website link");
    }

    issues
}

struct RecommendationBuilder {
    recommendations: Vec<Recommendation>,
}

impl RecommendationBuilder {
    fn new() -> Self {
        Self { recommendations: Vec::new() }
    }

    fn add(
        &mut self,
        priority: u32,
        impact: Impact,
        category: Category,
        section: Option<ResumeSection>,
        title: &str,
        description: String,
    ) {
        let id = format!("rec-{}", self.recommendations.len() + 1);
        self.recommendations.push(Recommendation {
            id,
            title: title.to_string(),
            description,
            impact,
            category,
            section,
            priority,
        });
    }

    /// Highest priority first; ties keep generation order.
    fn finish(mut self) -> Vec<Recommendation> {
        self.recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        self.recommendations
    }
}

pub fn generate_recommendations(ctx: &RuleContext<'_>) -> Vec<Recommendation> {
    let mut recs = RecommendationBuilder::new();
    let scores = ctx.scores;
    let metrics = ctx.metrics;

    if !ctx.has_email() || !ctx.has_phone() {
        let missing: Vec<&str> = [(!ctx.has_email(), "email address"), (!ctx.has_phone(), "phone number")]
            .into_iter()
            .filter_map(|(absent, label)| absent.then_some(label))
            .collect();
        recs.add(
            95,
            Impact::Critical,
            Category::Structure,
            Some(ResumeSection::Contact),
            "Complete your contact information",
            format!("Add a {} so recruiters can reach you.", missing.join(" and ")),
        );
    }

    if scores.keyword_match < 60 {
        let impact = if scores.keyword_match < 20 { Impact::Critical } else { Impact::High };
        let examples: Vec<&str> = ctx.keywords.missing.iter().take(5).map(String::as_str).collect();
        let mut description = format!(
            "Only {}% of the target keywords appear in your resume.",
            scores.keyword_match
        );
        if !examples.is_empty() {
            description.push_str(&format!(" Consider adding: {}.", examples.join(", ")));
        }
        recs.add(100, impact, Category::Keywords, Some(ResumeSection::Skills), "Optimize keywords", description);
    }

    if scores.format_score < 80 {
        recs.add(
            90,
            Impact::High,
            Category::Format,
            None,
            "Improve ATS-friendly formatting",
            "Use a simple single-column layout, avoid tabs and decorative symbols, and keep bullets consistent."
                .to_string(),
        );
    }

    if metrics.quantifiable_achievements < 3 {
        recs.add(
            85,
            Impact::High,
            Category::Content,
            Some(ResumeSection::Experience),
            "Quantify your achievements",
            format!(
                "Found {} measurable results. Add numbers such as percentages, revenue, team size or time saved.",
                metrics.quantifiable_achievements
            ),
        );
    }

    let weak_phrases = count_weak_phrases(ctx.text.normalized());
    if weak_phrases > 0 {
        recs.add(
            80,
            Impact::Medium,
            Category::Content,
            Some(ResumeSection::Experience),
            "Replace weak phrasing",
            format!(
                "Found {} passive phrases like \"responsible for\" or \"worked on\". Lead with what you achieved.",
                weak_phrases
            ),
        );
    }

    if metrics.action_verbs_used < 5 {
        recs.add(
            75,
            Impact::Medium,
            Category::Content,
            Some(ResumeSection::Experience),
            "Use stronger action verbs",
            format!(
                "Only {} distinct action verbs found. Start bullets with verbs like led, built, increased or streamlined.",
                metrics.action_verbs_used
            ),
        );
    }

    if !SUMMARY_HEADER_REGEX.is_match(ctx.text.original()) {
        recs.add(
            70,
            Impact::Medium,
            Category::Structure,
            Some(ResumeSection::Summary),
            "Add a professional summary",
            "Open with a two or three line summary that states your role, experience and strongest skills."
                .to_string(),
        );
    }

    if scores.section_scores.education < 50 {
        recs.add(
            65,
            Impact::Medium,
            Category::Structure,
            Some(ResumeSection::Education),
            "Detail your education",
            "List degree, institution and graduation year so parsers can pick them up.".to_string(),
        );
    }

    if scores.section_scores.skills < 50 {
        recs.add(
            60,
            Impact::Medium,
            Category::Keywords,
            Some(ResumeSection::Skills),
            "Expand your skills section",
            "Add a dedicated skills section mixing technical tools, soft skills and certifications.".to_string(),
        );
    }

    if metrics.word_count < 200 || metrics.word_count > 800 {
        let advice = if metrics.word_count < 200 {
            "is too short to rank well; expand on your experience"
        } else {
            "is long; trim older or less relevant roles"
        };
        recs.add(
            50,
            Impact::Low,
            Category::Optimization,
            None,
            "Adjust resume length",
            format!("At {} words the resume {}.", metrics.word_count, advice),
        );
    }

    if !ctx.has_linkedin() || !ctx.has_portfolio() {
        recs.add(
            40,
            Impact::Low,
            Category::Optimization,
            Some(ResumeSection::Contact),
            "Strengthen your online presence",
            "Link your LinkedIn profile and a portfolio or GitHub page.".to_string(),
        );
    }

    recs.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords::{extract_target_keywords, partition_keywords};

    fn run(text: &str) -> (Issues, Vec<Recommendation>) {
        let text = ResumeText::new(text);
        let target = extract_target_keywords(None, None);
        let partition = partition_keywords(text.normalized(), &target.keywords);
        let scores = ScoreBundle::compute(&text, &target.keywords);
        let metrics = ResumeMetrics::collect(&text);
        let ctx = RuleContext { text: &text, scores: &scores, metrics: &metrics, keywords: &partition };
        (detect_issues(&ctx), generate_recommendations(&ctx))
    }

    #[test]
    fn test_empty_resume_issues() {
        let (issues, _) = run("");
        assert_eq!(issues.critical.len(), 3);
        assert!(issues.critical[1].contains("email"));
        assert!(issues.warnings.iter().any(|w| w.contains("phone")));
        assert!(issues.warnings.iter().any(|w| w.contains("LinkedIn")));
        assert_eq!(issues.suggestions.len(), 3);
    }

    #[test]
    fn test_recommendations_sorted_and_numbered() {
        let (_, recs) = run("");
        assert!(!recs.is_empty());
        assert!(recs.windows(2).all(|w| w[0].priority >= w[1].priority));
        assert_eq!(recs[0].priority, 100);
        assert_eq!(recs[0].impact, Impact::Critical);

        let mut ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), recs.len());
    }

    #[test]
    fn test_ids_follow_generation_order() {
        let (_, recs) = run("");
        assert_eq!((recs[0].id.as_str(), recs[0].priority), ("rec-2", 100));
        assert_eq!((recs[1].id.as_str(), recs[1].priority), ("rec-1", 95));
        assert_eq!(recs[2].id, "rec-3");
    }

    #[test]
    fn test_long_resume_warning() {
        let contact = "jane@example.com 555-123-4567 ";
        let (issues, _) = run(&format!("{}{}", contact, "word ".repeat(801)));
        assert!(issues.warnings.iter().any(|w| w.contains("Resume is long")));

        let (issues, _) = run(&format!("{}{}", contact, "word ".repeat(300)));
        assert!(!issues.warnings.iter().any(|w| w.contains("Resume is long")));
    }

    #[test]
    fn test_formatting_warning_below_seventy() {
        let (issues, _) = run("jane@example.com 555-123-4567 | short\tresume");
        assert!(issues.warnings.iter().any(|w| w.contains("format score 60")));

        let (issues, _) = run("jane@example.com 555-123-4567 | short resume");
        assert!(!issues.warnings.iter().any(|w| w.contains("Formatting may confuse")));
    }

    #[test]
    fn test_issue_total_counts_every_bucket() {
        let (issues, _) = run("");
        assert_eq!(
            issues.total(),
            issues.critical.len() + issues.warnings.len() + issues.suggestions.len()
        );
        assert_eq!(issues.total(), 3 + issues.warnings.len() + 3);
    }

    #[test]
    fn test_contact_recommendation_lists_missing_parts() {
        let (_, recs) = run("jane@example.com");
        let contact = recs.iter().find(|r| r.priority == 95).expect("contact recommendation");
        assert!(contact.description.contains("phone number"));
        assert!(!contact.description.contains("email address"));
        assert_eq!(contact.section, Some(ResumeSection::Contact));
    }

    #[test]
    fn test_summary_recommendation_skipped_when_present() {
        let (_, recs) = run("Professional Summary\nBackend engineer.");
        assert!(recs.iter().all(|r| r.priority != 70));
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Impact::High.to_string(), "high");
        assert_eq!(Category::Optimization.to_string(), "optimization");
        assert_eq!(ResumeSection::Skills.to_string(), "skills");
        assert_eq!(Severity::Suggestion.to_string(), "suggestion");
    }
}
