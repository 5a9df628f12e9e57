//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{AtsError, Result};
use crate::output::report::{AnalysisReport, ScoreBand};
use crate::processing::recommendations::{Impact, Recommendation};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Compatibility Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .score-breakdown { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 15px; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .keyword { display: inline-block; padding: 2px 10px; margin: 3px; border-radius: 12px; font-size: 0.9em; }
        .found { background: #d4edda; }
        .missing { background: #f8d7da; }
        .recommendation { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .impact-critical { border-left-color: #dc3545; }
        .impact-high { border-left-color: #ffc107; }
        .impact-medium { border-left-color: #17a2b8; }
        .impact-low { border-left-color: #28a745; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Compatibility Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Overall Score: {{ overall_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <div class="score-breakdown">
                {% for item in scores %}
                <div class="score-item"><h4>{{ item.label }}</h4><p><strong>{{ item.value }}%</strong></p></div>
                {% endfor %}
            </div>
        </div>

        <div class="section">
            <h2>Section Scores</h2>
            <div class="score-breakdown">
                {% for item in sections %}
                <div class="score-item"><h4>{{ item.label }}</h4><p><strong>{{ item.value }}%</strong></p></div>
                {% endfor %}
            </div>
        </div>

        {% for bucket in issue_buckets %}
        {% if !bucket.items.is_empty() %}
        <div class="section">
            <h2>{{ bucket.title }}</h2>
            <ul>
                {% for issue in bucket.items %}<li>{{ issue }}</li>{% endfor %}
            </ul>
        </div>
        {% endif %}
        {% endfor %}

        <div class="section">
            <h2>Keywords ({{ found_count }} of {{ target_count }} found)</h2>
            <p>{% for keyword in found_keywords %}<span class="keyword found">{{ keyword }}</span>{% endfor %}</p>
            <p>{% for keyword in missing_keywords %}<span class="keyword missing">{{ keyword }}</span>{% endfor %}</p>
        </div>

        <div class="section">
            <h2>Recommendations</h2>
            {% for rec in recommendations %}
            <div class="recommendation impact-{{ rec.impact }}">
                <h4>{{ rec.title }} <small>({{ rec.impact }} impact, {{ rec.category }}{% if !rec.section.is_empty() %}, {{ rec.section }}{% endif %})</small></h4>
                <p>{{ rec.description }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Metrics</h2>
            <ul>
                <li>Word count: {{ word_count }}</li>
                <li>Sections detected: {{ section_count }}</li>
                <li>Quantifiable achievements: {{ quantifiable_achievements }}</li>
                <li>Action verbs used: {{ action_verbs_used }}</li>
            </ul>
        </div>

        <div class="metadata">
            <p><strong>Generated by ATS Analyzer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }} | <strong>Role:</strong> {{ target_role }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    overall_score: u8,
    score_class: &'static str,
    score_label: &'static str,
    verdict: &'static str,
    scores: Vec<HtmlScore>,
    sections: Vec<HtmlScore>,
    issue_buckets: Vec<HtmlIssueBucket>,
    found_count: usize,
    target_count: usize,
    found_keywords: Vec<String>,
    missing_keywords: Vec<String>,
    recommendations: Vec<HtmlRecommendation>,
    word_count: usize,
    section_count: usize,
    quantifiable_achievements: usize,
    action_verbs_used: usize,
    version: String,
    resume_file: String,
    job_file: String,
    target_role: String,
}

struct HtmlScore {
    label: &'static str,
    value: u8,
}

struct HtmlIssueBucket {
    title: &'static str,
    items: Vec<String>,
}

struct HtmlRecommendation {
    title: String,
    description: String,
    impact: String,
    category: String,
    section: String,
}

fn primary_scores(report: &AnalysisReport) -> Vec<(&'static str, u8)> {
    let r = &report.result;
    vec![
        ("Keyword Match", r.keyword_match),
        ("Format", r.format_score),
        ("Content", r.content_score),
        ("Readability", r.readability_score),
    ]
}

fn section_scores(report: &AnalysisReport) -> Vec<(&'static str, u8)> {
    let s = &report.result.section_scores;
    vec![
        ("Contact", s.contact),
        ("Experience", s.experience),
        ("Education", s.education),
        ("Skills", s.skills),
    ]
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_impact_icon(&self, impact: Impact) -> &'static str {
        match (self.use_colors, impact) {
            (true, Impact::Critical) => "🚨",
            (true, Impact::High) => "⚠️",
            (true, Impact::Medium) => "📋",
            (true, Impact::Low) => "💡",
            (false, Impact::Critical) => "[!]",
            (false, Impact::High) => "[*]",
            (false, Impact::Medium) => "[-]",
            (false, Impact::Low) => "[+]",
        }
    }

    fn format_recommendation(&self, index: usize, rec: &Recommendation) -> String {
        let mut scope = rec.category.to_string();
        if let Some(section) = rec.section {
            scope.push_str(&format!(", {}", section));
        }
        format!(
            "{}. {} {} {}\n   {}\n",
            index,
            self.format_impact_icon(rec.impact),
            self.colorize(&rec.title, Color::White),
            self.colorize(&format!("({})", scope), Color::BrightBlack),
            rec.description
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall", 2));
        let band = ScoreBand::from_score(result.overall_score);
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            result.overall_score,
            self.format_score_badge(result.overall_score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(band.verdict(), Color::Cyan)));
        output.push_str(&format!(
            "Issues: {} ({} critical, {} warnings, {} suggestions)\n",
            result.issues.total(),
            result.issues.critical.len(),
            result.issues.warnings.len(),
            result.issues.suggestions.len()
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (label, score) in primary_scores(report) {
            output.push_str(&format!("  {:<14} {:>3}%\n", label, score));
        }

        if self.detailed {
            output.push_str(&self.format_header("Section Scores", 3));
            for (label, score) in section_scores(report) {
                output.push_str(&format!("  {:<14} {:>3}%\n", label, score));
            }
        }

        let buckets = [
            ("Critical Issues", &result.issues.critical, Color::Red),
            ("Warnings", &result.issues.warnings, Color::Yellow),
            ("Suggestions", &result.issues.suggestions, Color::Cyan),
        ];
        for (title, items, color) in buckets {
            if items.is_empty() {
                continue;
            }
            output.push_str(&self.format_header(title, 2));
            for item in items {
                output.push_str(&format!("  • {}\n", self.colorize(item, color)));
            }
        }

        output.push_str(&self.format_header("Keywords", 2));
        output.push_str(&format!(
            "Matched {} of {} target keywords ({:?})\n",
            result.found_keyword_count,
            result.target_keyword_count,
            result.keyword_source
        ));
        if !result.found_keywords.is_empty() {
            output.push_str(&format!(
                "  Found:   {}\n",
                self.colorize(&result.found_keywords.join(", "), Color::Green)
            ));
        }
        if !result.missing_keywords.is_empty() {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&result.missing_keywords.join(", "), Color::Red)
            ));
        }

        output.push_str(&self.format_header("Top Recommendations", 2));
        let shown = if self.detailed { result.recommendations.len() } else { 5 };
        for (i, rec) in result.recommendations.iter().take(shown).enumerate() {
            output.push_str(&self.format_recommendation(i + 1, rec));
        }
        if result.recommendations.len() > shown {
            output.push_str(&format!(
                "   ... {} more (use --detailed)\n",
                result.recommendations.len() - shown
            ));
        }

        output.push_str(&self.format_header("Metrics", 3));
        output.push_str(&format!(
            "  Words: {} | Sections: {} | Achievements: {} | Action verbs: {}\n",
            result.metrics.word_count,
            result.metrics.section_count,
            result.metrics.quantifiable_achievements,
            result.metrics.action_verbs_used
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => "🟢",
            ScoreBand::Good => "🔵",
            ScoreBand::Fair => "🟡",
            ScoreBand::Poor => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# ATS Compatibility Report\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}% {} ({})\n\n",
            result.overall_score,
            Self::markdown_score_badge(result.overall_score),
            ScoreBand::from_score(result.overall_score).verdict()
        ));

        output.push_str("## Scores\n\n| Component | Score |\n|---|---|\n");
        for (label, score) in primary_scores(report).into_iter().chain(section_scores(report)) {
            output.push_str(&format!("| {} | {}% |\n", label, score));
        }
        output.push('\n');

        let buckets = [
            ("🚨 Critical Issues", &result.issues.critical),
            ("⚠️ Warnings", &result.issues.warnings),
            ("💡 Suggestions", &result.issues.suggestions),
        ];
        for (title, items) in buckets {
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        output.push_str("## Keywords\n\n");
        output.push_str(&format!("**Found:** {}\n\n", join_or_none(&result.found_keywords)));
        output.push_str(&format!("**Missing:** {}\n\n", join_or_none(&result.missing_keywords)));

        output.push_str("## 📋 Recommendations\n\n");
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "{}. **{}** _({} impact, {})_\n   {}\n\n",
                i + 1,
                rec.title,
                rec.impact,
                rec.category,
                rec.description
            ));
        }

        output.push_str("## Metrics\n\n");
        output.push_str(&format!(
            "- Word count: {}\n- Sections detected: {}\n- Quantifiable achievements: {}\n- Action verbs used: {}\n\n",
            result.metrics.word_count,
            result.metrics.section_count,
            result.metrics.quantifiable_achievements,
            result.metrics.action_verbs_used
        ));

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by ATS Analyzer v{} on {} for {}*\n",
                report.metadata.analyzer_version,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
                report.metadata.resume_file
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "_none_".to_string()
    } else {
        items.join(", ")
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let result = &report.result;
        let band = ScoreBand::from_score(result.overall_score);

        let recommendations = result
            .recommendations
            .iter()
            .map(|rec| HtmlRecommendation {
                title: rec.title.clone(),
                description: rec.description.clone(),
                impact: rec.impact.to_string(),
                category: rec.category.to_string(),
                section: rec.section.map(|s| s.to_string()).unwrap_or_default(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            overall_score: result.overall_score,
            score_class: band.css_class(),
            score_label: band.label(),
            verdict: band.verdict(),
            scores: to_html_scores(primary_scores(report)),
            sections: to_html_scores(section_scores(report)),
            issue_buckets: vec![
                HtmlIssueBucket { title: "Critical Issues", items: result.issues.critical.clone() },
                HtmlIssueBucket { title: "Warnings", items: result.issues.warnings.clone() },
                HtmlIssueBucket { title: "Suggestions", items: result.issues.suggestions.clone() },
            ],
            found_count: result.found_keyword_count,
            target_count: result.target_keyword_count,
            found_keywords: result.found_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            recommendations,
            word_count: result.metrics.word_count,
            section_count: result.metrics.section_count,
            quantifiable_achievements: result.metrics.quantifiable_achievements,
            action_verbs_used: result.metrics.action_verbs_used,
            version: report.metadata.analyzer_version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            job_file: report.metadata.job_file.clone().unwrap_or_else(|| "none".to_string()),
            target_role: report.metadata.target_role.clone().unwrap_or_else(|| "none".to_string()),
        }
    }
}

fn to_html_scores(scores: Vec<(&'static str, u8)>) -> Vec<HtmlScore> {
    scores
        .into_iter()
        .map(|(label, value)| HtmlScore { label, value })
        .collect()
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AtsError::OutputFormatting(format!("Failed to render HTML: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::analyze_resume;

    fn sample_report() -> AnalysisReport {
        let result = analyze_resume(
            "Jane Roe\njane@example.com\nSummary: Engineer <script>\nLed and built things, cut costs 30%.",
            Some("Experience with Python, SQL & Terraform."),
            None,
        );
        AnalysisReport::new(result, ReportMetadata::new("resume.txt"))
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, false).format_report(&sample_report()).unwrap();
        assert!(output.contains("ATS COMPATIBILITY ANALYSIS"));
        assert!(output.contains("Overall Score:"));
        assert!(output.contains("[!]"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.result, report.result);
        assert!(json.contains("\"keyword_source\":\"job_description\""));
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        assert!(output.starts_with("# ATS Compatibility Report"));
        assert!(output.contains("## Keywords"));
        assert!(output.contains("Generated by ATS Analyzer"));
    }

    #[test]
    fn test_html_without_styles() {
        let report = sample_report();
        let html = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(html.contains("ATS Compatibility Report"));
        assert!(html.contains("impact-critical") || html.contains("impact-high"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_keyword_count_uses_untruncated_matches() {
        let mut report = sample_report();
        report.result.found_keyword_count = 25;
        report.result.target_keyword_count = 30;

        let console = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(console.contains("Matched 25 of 30 target keywords"));
        assert!(console.contains(&format!("Issues: {} (", report.result.issues.total())));

        let html = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(html.contains("Keywords (25 of 30 found)"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "cv/jane.pdf", false), "jane_ats.json");
        assert_eq!(suggest_filename(OutputFormat::Html, "resume.md", false), "resume_ats.html");
    }
}
