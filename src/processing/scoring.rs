//! Rule-based scoring: primary sub-scores, section scores and the overall blend
//!
//! Every rule is a small pure function over either the original or the
//! normalized resume text; scores are composed by summation and clamping.

use crate::processing::keywords::KeywordSet;
use crate::processing::normalizer::ResumeText;
use crate::processing::word_lists::{
    ACTION_VERB_REGEX, CERTIFICATION_REGEX, COMPANY_SUFFIX_REGEX, CONTENT_SECTION_PATTERNS,
    DATE_RANGE_REGEX, DEGREE_REGEX, EMAIL_REGEX, GPA_REGEX, INSTITUTION_REGEX, LINKEDIN_REGEX,
    LOCATION_REGEX, PHONE_REGEX, PORTFOLIO_REGEX, PROBLEMATIC_GLYPHS, QUANTIFIABLE_REGEX,
    SOFT_SKILL_MATCHER, TECHNICAL_MATCHER, WEAK_PHRASE_MATCHER, YEAR_REGEX,
};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const KEYWORD_WEIGHT: f64 = 0.35;
pub const FORMAT_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.25;
pub const READABILITY_WEIGHT: f64 = 0.15;

/// Returned by `keyword_match` for an empty keyword set.
pub const EMPTY_KEYWORDS_SCORE: u8 = 80;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("Invalid paragraph regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionScores {
    pub contact: u8,
    pub experience: u8,
    pub education: u8,
    pub skills: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub keyword_match: u8,
    pub format_score: u8,
    pub content_score: u8,
    pub readability_score: u8,
    pub section_scores: SectionScores,
    pub overall_score: u8,
}

impl ScoreBundle {
    pub fn compute(text: &ResumeText, keywords: &KeywordSet) -> Self {
        let keyword_match = keyword_match(text.normalized(), keywords);
        let format_score = format_score(text.original());
        let content_score = content_score(text);
        let readability_score = readability_score(text.original());

        Self {
            keyword_match,
            format_score,
            content_score,
            readability_score,
            section_scores: SectionScores {
                contact: evaluate_contact_section(text),
                experience: evaluate_experience_section(text),
                education: evaluate_education_section(text),
                skills: evaluate_skills_section(text),
            },
            overall_score: overall_score(keyword_match, format_score, content_score, readability_score),
        }
    }
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// Percentage of target keywords contained in the normalized text.
pub fn keyword_match(normalized: &str, keywords: &KeywordSet) -> u8 {
    if keywords.is_empty() {
        return EMPTY_KEYWORDS_SCORE;
    }
    let matched = keywords.iter().filter(|k| normalized.contains(k)).count();
    let pct = (matched as f64 / keywords.len() as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// Penalty-based layout score over the original text.
pub fn format_score(original: &str) -> u8 {
    let mut score: i32 = 100;
    let word_count = original.split_whitespace().count();

    if original.contains('\t') {
        score -= 10;
    }
    if original.matches('•').count() > 20 {
        score -= 5;
    }
    if !has_email(original) {
        score -= 20;
    }
    if !has_phone(original) {
        score -= 15;
    }
    score -= 5 * PROBLEMATIC_GLYPHS.iter().filter(|g| original.contains(**g)).count() as i32;
    if word_count < 200 {
        score -= 25;
    }
    if word_count > 1000 {
        score -= 10;
    }

    clamp_score(score)
}

/// Section coverage, achievements and phrasing strength.
pub fn content_score(text: &ResumeText) -> u8 {
    let normalized = text.normalized();
    let mut score: i32 = 40;

    let sections = CONTENT_SECTION_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(normalized))
        .count() as i32;
    score += sections * 8;

    // `%`, `+` and `$` do not survive normalization, so achievements come from the original.
    score += (count_quantifiable(text.original()) as i32 * 3).min(15);
    score += (distinct_action_verbs(normalized).len() as i32 * 2).min(10);
    score -= (count_weak_phrases(normalized) as i32 * 2).min(15);

    clamp_score(score)
}

/// Sentence length and paragraph size score over the original text.
pub fn readability_score(original: &str) -> u8 {
    let mut score: i32 = 80;

    let avg = average_sentence_length(original);
    if avg > 25.0 {
        score -= 20;
    }
    if avg < 8.0 {
        score -= 15;
    }
    if (15.0..=20.0).contains(&avg) {
        score += 10;
    }

    let long_paragraph = PARAGRAPH_BREAK
        .split(original)
        .any(|paragraph| paragraph.split_whitespace().count() > 100);
    if long_paragraph {
        score -= 10;
    }

    clamp_score(score)
}

/// Mean words per `.`/`!`/`?`-delimited sentence; zero when there are none.
pub fn average_sentence_length(original: &str) -> f64 {
    let lengths: Vec<usize> = original
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.split_whitespace().count())
        .collect();

    if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    }
}

pub fn evaluate_contact_section(text: &ResumeText) -> u8 {
    let original = text.original();
    let mut score = 0;
    if has_email(original) {
        score += 30;
    }
    if has_phone(original) {
        score += 25;
    }
    if has_linkedin(original) {
        score += 20;
    }
    if has_portfolio(original) {
        score += 15;
    }
    if LOCATION_REGEX.is_match(original) {
        score += 10;
    }
    clamp_score(score)
}

pub fn evaluate_experience_section(text: &ResumeText) -> u8 {
    let original = text.original();
    let mut score = 0;
    if DATE_RANGE_REGEX.is_match(original) {
        score += 25;
    }
    if COMPANY_SUFFIX_REGEX.is_match(original) {
        score += 20;
    }
    if distinct_action_verbs(original).len() > 3 {
        score += 25;
    }
    if count_quantifiable(original) > 2 {
        score += 30;
    }
    clamp_score(score)
}

pub fn evaluate_education_section(text: &ResumeText) -> u8 {
    let original = text.original();
    let mut score = 0;
    if DEGREE_REGEX.is_match(original) {
        score += 40;
    }
    if INSTITUTION_REGEX.is_match(original) {
        score += 30;
    }
    if YEAR_REGEX.is_match(original) {
        score += 20;
    }
    if GPA_REGEX.is_match(original) {
        score += 10;
    }
    clamp_score(score)
}

pub fn evaluate_skills_section(text: &ResumeText) -> u8 {
    let normalized = text.normalized();
    let mut score = 0;
    if count_table_matches(&TECHNICAL_MATCHER, normalized) > 5 {
        score += 40;
    }
    if count_table_matches(&SOFT_SKILL_MATCHER, normalized) > 3 {
        score += 30;
    }
    if CERTIFICATION_REGEX.is_match(normalized) {
        score += 30;
    }
    clamp_score(score)
}

/// Fixed-weight blend of the four primary sub-scores.
pub fn overall_score(keyword_match: u8, format_score: u8, content_score: u8, readability_score: u8) -> u8 {
    let blended = f64::from(keyword_match.min(100)) * KEYWORD_WEIGHT
        + f64::from(format_score.min(100)) * FORMAT_WEIGHT
        + f64::from(content_score.min(100)) * CONTENT_WEIGHT
        + f64::from(readability_score.min(100)) * READABILITY_WEIGHT;
    clamp_score(blended.round() as i32)
}

pub fn has_email(original: &str) -> bool {
    EMAIL_REGEX.is_match(original)
}

pub fn has_phone(original: &str) -> bool {
    PHONE_REGEX.is_match(original)
}

pub fn has_linkedin(text: &str) -> bool {
    LINKEDIN_REGEX.is_match(text)
}

pub fn has_portfolio(text: &str) -> bool {
    PORTFOLIO_REGEX.is_match(text)
}

/// Every numeric achievement claim, duplicates included.
pub fn count_quantifiable(original: &str) -> usize {
    QUANTIFIABLE_REGEX.find_iter(original).count()
}

/// Distinct action verbs, lower-cased.
pub fn distinct_action_verbs(text: &str) -> HashSet<String> {
    ACTION_VERB_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn count_weak_phrases(normalized: &str) -> usize {
    WEAK_PHRASE_MATCHER.find_iter(normalized).count()
}

/// Number of distinct table entries occurring anywhere in `text`.
fn count_table_matches(matcher: &AhoCorasick, text: &str) -> usize {
    matcher
        .find_overlapping_iter(text)
        .map(|m| m.pattern())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords::KeywordSet;

    fn keyword_set(words: &[&str]) -> KeywordSet {
        let mut set = KeywordSet::new();
        set.extend(words.iter().copied());
        set
    }

    fn filler(words: usize) -> String {
        vec!["word"; words].join(" ")
    }

    #[test]
    fn test_keyword_match_percentage() {
        let set = keyword_set(&["python", "sql", "aws"]);
        assert_eq!(keyword_match("python and sql", &set), 67);
        assert_eq!(keyword_match("nothing here", &set), 0);
        assert_eq!(keyword_match("python sql aws", &set), 100);
    }

    #[test]
    fn test_keyword_match_empty_set_default() {
        assert_eq!(keyword_match("anything", &KeywordSet::new()), EMPTY_KEYWORDS_SCORE);
    }

    #[test]
    fn test_format_score_full_marks() {
        let text = format!("john@example.com 555-123-4567 {}", filler(300));
        assert_eq!(format_score(&text), 100);
    }

    #[test]
    fn test_format_score_tab_penalty() {
        let base = format!("john@example.com 555-123-4567 {}", filler(300));
        let with_tab = base.replacen(' ', "\t", 1);
        assert_eq!(format_score(&base) - format_score(&with_tab), 10);
    }

    #[test]
    fn test_format_score_penalties() {
        let text = format!("{} | ★ {}", "• ".repeat(21), filler(1100));
        // bullets 5, email 20, phone 15, glyphs 10, long 10
        assert_eq!(format_score(&text), 40);
        assert_eq!(format_score(""), 40);
    }

    #[test]
    fn test_format_score_floor() {
        let text = format!("\t|□▪◆★{}", "•".repeat(21));
        assert_eq!(format_score(&text), 0);
    }

    #[test]
    fn test_content_score_sections_and_verbs() {
        let text = ResumeText::new(
            "Summary. Experience: Led and managed teams. Education: BS. Skills: Rust. Email me@x.io. Increased sales 20%.",
        );
        // 40 + 5*8 + 3 (one achievement) + 2*3 verbs
        assert_eq!(content_score(&text), 89);
    }

    #[test]
    fn test_content_score_weak_phrases() {
        let text = ResumeText::new("Responsible for reports. Worked on tickets. Helped with onboarding.");
        assert_eq!(content_score(&text), 34);
    }

    #[test]
    fn test_readability_bands() {
        let optimal = format!("{}.", filler(16));
        assert_eq!(readability_score(&optimal), 90);
        let short = "Short one. Another one.";
        assert_eq!(readability_score(short), 65);
        let long = format!("{}.", filler(30));
        assert_eq!(readability_score(&long), 60);
        assert_eq!(readability_score(""), 65);
    }

    #[test]
    fn test_readability_long_paragraph() {
        let sentence = format!("{}. ", filler(10));
        let paragraph = sentence.repeat(11);
        assert_eq!(readability_score(&paragraph), 70);
        let split = format!("{}\n\n{}", sentence.repeat(6), sentence.repeat(5));
        assert_eq!(readability_score(&split), 80);
    }

    #[test]
    fn test_contact_section() {
        let text = ResumeText::new(
            "Jane Roe, Austin, TX\njane@example.com | (512) 555-0199\nlinkedin.com/in/jane github.com/jane",
        );
        assert_eq!(evaluate_contact_section(&text), 100);
        assert_eq!(evaluate_contact_section(&ResumeText::new("")), 0);
    }

    #[test]
    fn test_experience_section() {
        let text = ResumeText::new(
            "Acme Inc, Jan 2019 - Present. Led, built, launched and improved a platform; \
             grew users 40%, cut costs $200k and saved 3 months.",
        );
        assert_eq!(evaluate_experience_section(&text), 100);
    }

    #[test]
    fn test_education_section() {
        let text = ResumeText::new("B.S. Computer Science, State University, 2016. GPA 3.8");
        assert_eq!(evaluate_education_section(&text), 100);
        assert_eq!(evaluate_education_section(&ResumeText::new("Self taught")), 0);
    }

    #[test]
    fn test_skills_section() {
        let text = ResumeText::new(
            "Python, Docker, SQL, AWS, React, Kubernetes, Linux. Leadership, communication, \
             teamwork, mentoring. AWS Certified Solutions Architect.",
        );
        assert_eq!(evaluate_skills_section(&text), 100);
    }

    #[test]
    fn test_overall_score_weights() {
        assert_eq!(overall_score(100, 100, 100, 100), 100);
        assert_eq!(overall_score(0, 0, 0, 0), 0);
        // 50*0.35 + 80*0.25 + 60*0.25 + 70*0.15 = 63
        assert_eq!(overall_score(50, 80, 60, 70), 63);
    }
}
