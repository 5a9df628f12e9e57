//! Target keyword extraction from job descriptions and role tables

use crate::processing::word_lists::{
    BUSINESS_KEYWORDS, CONTEXT_PHRASE_REGEX, ROLE_KEYWORDS, SOFT_SKILLS, STOP_WORDS,
    TECHNICAL_KEYWORDS, TECH_MARKERS,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Keywords a job description may contribute across both extraction passes.
pub const MAX_JOB_KEYWORDS: usize = 25;

const FALLBACK_PER_TABLE: usize = 10;
const UNKNOWN_ROLE_SLICE: usize = 15;

/// Ordered, deduplicated set of lower-cased keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword, lower-casing it first. Returns false for duplicates and blanks.
    pub fn insert(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || self.seen.contains(&keyword) {
            return false;
        }
        self.seen.insert(keyword.clone());
        self.keywords.push(keyword);
        true
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.seen.contains(&keyword.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

impl<'a> Extend<&'a str> for KeywordSet {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

/// Where the target keywords came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    Role,
    JobDescription,
    RoleAndJobDescription,
    Fallback,
}

/// Target keywords plus their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetKeywords {
    pub keywords: KeywordSet,
    pub source: KeywordSource,
}

/// Found and missing keywords, in keyword-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordPartition {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Build the target keyword set from a role and/or job description.
/// Never returns an empty set.
pub fn extract_target_keywords(job_description: Option<&str>, target_role: Option<&str>) -> TargetKeywords {
    let mut keywords = KeywordSet::new();

    let role = target_role.map(str::trim).filter(|r| !r.is_empty());
    if let Some(role) = role {
        keywords.extend(role_keywords(role));
    }
    let role_count = keywords.len();

    let job = job_description.filter(|j| !j.trim().is_empty());
    if let Some(job) = job {
        keywords.extend(extract_job_keywords(job).iter().map(String::as_str));
    }
    let job_added = keywords.len() > role_count;

    let source = match (role_count > 0, job_added) {
        (true, true) => KeywordSource::RoleAndJobDescription,
        (true, false) => KeywordSource::Role,
        (false, true) => KeywordSource::JobDescription,
        (false, false) => {
            keywords.extend(fallback_keywords());
            KeywordSource::Fallback
        }
    };

    debug!("Extracted {} target keywords ({:?})", keywords.len(), source);
    TargetKeywords { keywords, source }
}

/// Keywords for a target role. Unknown roles get a generic technical slice.
pub fn role_keywords(role: &str) -> Vec<&'static str> {
    let role = role.trim().to_lowercase();
    match ROLE_KEYWORDS.iter().find(|(name, _)| *name == role) {
        Some((_, keywords)) => keywords.to_vec(),
        None => {
            debug!("Unknown target role '{}', using generic technical keywords", role);
            TECHNICAL_KEYWORDS.iter().take(UNKNOWN_ROLE_SLICE).copied().collect()
        }
    }
}

/// Built-in roles with their keyword lists.
pub fn list_roles() -> &'static [(&'static str, &'static [&'static str])] {
    ROLE_KEYWORDS
}

/// Generic cross-domain keywords used when nothing else is available.
pub fn fallback_keywords() -> impl Iterator<Item = &'static str> {
    TECHNICAL_KEYWORDS
        .iter()
        .take(FALLBACK_PER_TABLE)
        .chain(SOFT_SKILLS.iter().take(FALLBACK_PER_TABLE))
        .chain(BUSINESS_KEYWORDS.iter().take(FALLBACK_PER_TABLE))
        .copied()
}

/// Run the context-phrase pass then the technical-token pass over a job
/// description, keeping at most `MAX_JOB_KEYWORDS` distinct keywords.
pub fn extract_job_keywords(job_description: &str) -> Vec<String> {
    let mut extracted = KeywordSet::new();

    for cap in CONTEXT_PHRASE_REGEX.captures_iter(job_description) {
        let Some(phrase) = cap.get(1) else { continue };
        for token in split_context_phrase(phrase.as_str()) {
            if extracted.len() >= MAX_JOB_KEYWORDS {
                break;
            }
            extracted.insert(&token);
        }
    }

    for word in job_description.unicode_words() {
        if extracted.len() >= MAX_JOB_KEYWORDS {
            break;
        }
        let lower = word.to_lowercase();
        if !STOP_WORDS.contains(lower.as_str()) && is_technical(word) {
            extracted.insert(&lower);
        }
    }

    extracted.as_slice().to_vec()
}

/// Tokens of a captured context phrase, cut at the end of its sentence.
fn split_context_phrase(phrase: &str) -> Vec<String> {
    let sentence = match phrase.find(". ") {
        Some(end) => &phrase[..end],
        None => phrase,
    };

    sentence
        .split(|c: char| c == ',' || c == '&' || c == '/' || c.is_whitespace())
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                .to_lowercase()
        })
        .filter(|token| token.chars().count() > 2 && !STOP_WORDS.contains(token.as_str()))
        .collect()
}

/// A token looks technical when it is longer than three characters and
/// carries a tech marker, a digit, or is written in capitals.
pub fn is_technical(token: &str) -> bool {
    if token.chars().count() <= 3 {
        return false;
    }
    let lower = token.to_lowercase();
    let has_marker = TECH_MARKERS.iter().any(|marker| lower.contains(marker));
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let is_upper = token.chars().any(char::is_alphabetic) && token == token.to_uppercase();
    has_marker || has_digit || is_upper
}

/// Split `keywords` into those contained in `normalized_text` and the rest.
pub fn partition_keywords(normalized_text: &str, keywords: &KeywordSet) -> KeywordPartition {
    let mut partition = KeywordPartition::default();
    for keyword in keywords.iter() {
        if normalized_text.contains(keyword) {
            partition.found.push(keyword.to_string());
        } else {
            partition.missing.push(keyword.to_string());
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::normalize;

    #[test]
    fn test_keyword_set_dedup_and_order() {
        let mut set = KeywordSet::new();
        assert!(set.insert("Python"));
        assert!(set.insert("sql"));
        assert!(!set.insert("PYTHON"));
        assert!(!set.insert("  "));
        assert_eq!(set.as_slice(), &["python".to_string(), "sql".to_string()]);
        assert!(set.contains("Python"));
    }

    #[test]
    fn test_role_keywords_need_a_real_match() {
        let target = extract_target_keywords(None, Some("data scientist"));
        let partition = partition_keywords(&normalize("Hello there"), &target.keywords);
        assert!(partition.found.is_empty());

        let partition = partition_keywords(&normalize("Built models in RStudio and Spark"), &target.keywords);
        assert_eq!(partition.found, vec!["rstudio".to_string(), "spark".to_string()]);
    }

    #[test]
    fn test_context_phrase_extraction() {
        let job = "We need someone with experience with Python, SQL, and AWS. Remote friendly.";
        let keywords = extract_job_keywords(job);
        assert!(keywords.contains(&"python".to_string()));
        assert!(keywords.contains(&"sql".to_string()));
        assert!(keywords.contains(&"aws".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
        assert!(!keywords.contains(&"remote".to_string()));
    }

    #[test]
    fn test_technical_token_pass() {
        let job = "Build services with GraphQL APIs, Node.js, PostgreSQL and OAuth2 on AWS.";
        let keywords = extract_job_keywords(job);
        assert!(keywords.contains(&"apis".to_string()));
        assert!(keywords.contains(&"node.js".to_string()));
        assert!(keywords.contains(&"postgresql".to_string()));
        assert!(keywords.contains(&"oauth2".to_string()));
        assert!(!keywords.contains(&"services".to_string()));
    }

    #[test]
    fn test_is_technical() {
        assert!(is_technical("NoSQL"));
        assert!(is_technical("HTML5"));
        assert!(is_technical("GDPR"));
        assert!(!is_technical("AWS"));
        assert!(!is_technical("teamwork"));
    }

    #[test]
    fn test_job_keywords_capped() {
        let job: Vec<String> = (0..60).map(|i| format!("TOOL{}", i)).collect();
        let keywords = extract_job_keywords(&job.join(" "));
        assert_eq!(keywords.len(), MAX_JOB_KEYWORDS);
    }

    #[test]
    fn test_known_role_lookup_is_case_insensitive() {
        let target = extract_target_keywords(None, Some("  Data Scientist "));
        assert_eq!(target.source, KeywordSource::Role);
        assert!(target.keywords.contains("machine learning"));
    }

    #[test]
    fn test_unknown_role_uses_technical_slice() {
        let target = extract_target_keywords(None, Some("astronaut"));
        assert_eq!(target.keywords.len(), 15);
        assert!(target.keywords.contains("javascript"));
    }

    #[test]
    fn test_fallback_when_nothing_extractable() {
        let target = extract_target_keywords(Some("We are a friendly bunch who love people."), None);
        assert_eq!(target.source, KeywordSource::Fallback);
        assert_eq!(target.keywords.len(), 30);
        assert!(target.keywords.contains("leadership"));
    }

    #[test]
    fn test_role_and_job_combined() {
        let target = extract_target_keywords(Some("Knowledge of Snowflake required."), Some("sales"));
        assert_eq!(target.source, KeywordSource::RoleAndJobDescription);
        assert_eq!(target.keywords.as_slice()[0], "quota");
        assert!(target.keywords.contains("snowflake"));
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let target = extract_target_keywords(None, None);
        let partition = partition_keywords("javascript react leadership", &target.keywords);
        assert_eq!(partition.found.len() + partition.missing.len(), target.keywords.len());
        for keyword in &partition.found {
            assert!(!partition.missing.contains(keyword));
        }
        assert!(partition.found.contains(&"react".to_string()));
    }
}
