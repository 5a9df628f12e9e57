//! Static keyword tables, phrase lists and compiled patterns

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Technical keywords. The first entries double as the generic fallback slice.
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "javascript", "python", "java", "react", "sql", "aws", "docker", "typescript",
    "node.js", "html", "css", "kubernetes", "linux", "git", "api",
    "rest api", "graphql", "mongodb", "postgresql", "azure", "machine learning",
    "data analysis", "excel", "tableau", "terraform", "jenkins", "microservices",
    "tensorflow", "pandas", "spark", "agile", "scrum",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "collaboration",
    "time management", "critical thinking", "adaptability", "creativity",
    "attention to detail", "mentoring", "negotiation", "presentation",
    "organization", "decision making",
];

pub const BUSINESS_KEYWORDS: &[&str] = &[
    "project management", "strategy", "budget", "stakeholder", "analytics",
    "revenue", "operations", "process improvement", "business development",
    "forecasting", "compliance", "customer success", "market research", "roi", "kpi",
];

pub const ACTION_VERBS: &[&str] = &[
    "led", "managed", "developed", "created", "implemented", "designed", "built",
    "launched", "increased", "decreased", "reduced", "improved", "achieved",
    "delivered", "coordinated", "established", "optimized", "streamlined",
    "spearheaded", "negotiated", "mentored", "trained", "analyzed", "automated",
    "generated", "organized", "resolved", "drove", "initiated", "transformed",
];

pub const WEAK_PHRASES: &[&str] = &[
    "responsible for", "duties included", "worked on", "helped with",
    "assisted with", "involved in", "participated in", "tasked with",
];

/// Section headers counted by the metrics collector.
pub const SECTION_HEADERS: &[&str] = &[
    "experience", "education", "skills", "summary", "objective", "projects",
    "certifications", "awards",
];

/// Substrings that make a job-description token look technical.
pub const TECH_MARKERS: &[&str] = &["js", "sql", "api", "aws", "css", "html"];

/// Glyphs that tend to confuse ATS parsers.
pub const PROBLEMATIC_GLYPHS: &[char] = &['|', '□', '▪', '◆', '★'];

/// Target role lookup table, keyed by lower-cased role name.
pub const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "software engineer",
        &[
            "javascript", "python", "java", "react", "node.js", "sql", "git", "aws",
            "docker", "api", "microservices", "testing", "agile", "ci cd",
        ],
    ),
    (
        "data scientist",
        &[
            "python", "machine learning", "sql", "statistics", "pandas", "tensorflow",
            "data analysis", "data visualization", "deep learning", "rstudio", "spark",
            "modeling",
        ],
    ),
    (
        "product manager",
        &[
            "product strategy", "roadmap", "stakeholder", "agile", "user research",
            "analytics", "a b testing", "requirements", "prioritization", "kpi",
            "go-to-market", "cross-functional",
        ],
    ),
    (
        "marketing",
        &[
            "seo", "content marketing", "social media", "campaign", "analytics",
            "brand", "email marketing", "google analytics", "conversion", "roi",
            "market research", "copywriting",
        ],
    ),
    (
        "sales",
        &[
            "quota", "pipeline", "crm", "salesforce", "negotiation", "lead generation",
            "account management", "revenue", "closing", "prospecting",
            "client relationships", "b2b",
        ],
    ),
    (
        "designer",
        &[
            "figma", "user experience", "user interface", "prototyping", "wireframes",
            "design systems", "adobe", "usability testing", "typography", "sketch",
        ],
    ),
    (
        "devops engineer",
        &[
            "kubernetes", "docker", "terraform", "aws", "ci cd", "jenkins", "linux",
            "monitoring", "ansible", "infrastructure as code", "bash", "prometheus",
        ],
    ),
];

pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have",
        "in", "is", "it", "its", "of", "on", "or", "that", "the", "this", "to", "was",
        "will", "with", "we", "you", "your", "our", "their", "they", "who", "what",
        "which", "while", "also", "other", "such", "etc", "can", "must", "should",
        "would", "could", "about", "into", "over", "more", "most", "some", "any",
        "all", "each", "both", "than", "then", "them", "these", "those", "there",
        "here", "when", "where", "work", "working", "team", "teams", "strong",
        "ability", "able", "years", "year", "experience", "experienced", "required",
        "requirements", "preferred", "plus", "including", "knowledge", "skills",
        "role", "position", "candidate", "looking", "join", "help", "using", "well",
        "good", "great", "excellent", "new", "like", "job", "company", "per",
    ]
    .into_iter()
    .collect()
});

pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
        .expect("Invalid phone regex")
});

pub static LINKEDIN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin").expect("Invalid linkedin regex"));

pub static PORTFOLIO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:portfolio|website|github|gitlab|behance|dribbble)\b|https?://")
        .expect("Invalid portfolio regex")
});

pub static LOCATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*, ?[A-Z]{2}\b").expect("Invalid location regex")
});

/// Numeric achievement claims: percentages, currency, magnitudes, durations.
pub static QUANTIFIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\$\s?\d[\d,]*(?:\.\d+)?|\b\d[\d,]*(?:\.\d+)?\s?(?:%|\+|k\b|million\b|billion\b|years?\b|months?\b)",
    )
    .expect("Invalid quantifiable regex")
});

pub static ACTION_VERB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", ACTION_VERBS.join("|")))
        .expect("Invalid action verb regex")
});

pub static SECTION_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", SECTION_HEADERS.join("|")))
        .expect("Invalid section header regex")
});

pub static SUMMARY_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:summary|objective|profile)\b").expect("Invalid summary regex")
});

/// Section signals checked by the content scorer, against normalized text.
pub static CONTENT_SECTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("contact", r"@|\b(?:contact|email|phone|linkedin)\b"),
        ("summary", r"\b(?:summary|objective|profile|about me)\b"),
        ("experience", r"\b(?:experience|employment|work history)\b"),
        ("education", r"\b(?:education|university|college|degree)\b"),
        ("skills", r"\b(?:skills|competencies|technologies|proficiencies)\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("Invalid section pattern")))
    .collect()
});

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+";

pub static DATE_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b(?:{m})?(?:19|20)\d{{2}}\s*(?:-|–|—|to)\s*(?:{m})?(?:(?:19|20)\d{{2}}|present|current|now)\b|\b\d{{1,2}}/\d{{4}}\s*(?:-|–|to)\s*(?:\d{{1,2}}/\d{{4}}|present|current)\b",
        m = MONTH
    );
    Regex::new(&pattern).expect("Invalid date range regex")
});

pub static COMPANY_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:inc|llc|ltd|corp|corporation|company|gmbh|plc|technologies|solutions)\b")
        .expect("Invalid company suffix regex")
});

pub static DEGREE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|bachelors|master|masters|ph\.?d|doctorate|mba|b\.?sc?|b\.a|m\.?sc?|m\.a|associate degree|degree|diploma)\b",
    )
    .expect("Invalid degree regex")
});

pub static INSTITUTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
        .expect("Invalid institution regex")
});

pub static YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex"));

pub static GPA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bgpa\b").expect("Invalid GPA regex"));

pub static CERTIFICATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:certified|certification|certifications|certificate|pmp|cissp|comptia|ccna|cpa|itil|six sigma|scrum master)\b",
    )
    .expect("Invalid certification regex")
});

/// Job description context phrases: "experience with X", "proficient in X", ...
pub static CONTEXT_PHRASE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:experience (?:in|with)|proficient(?: in| with)?|proficiency (?:in|with)|familiar(?:ity)? with|knowledge of|expertise in)\s+([^;:!?\n]+)",
    )
    .expect("Invalid context phrase regex")
});

fn substring_matcher(patterns: &[&str]) -> AhoCorasick {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(patterns)
        .expect("Failed to build keyword matcher")
}

pub static TECHNICAL_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| substring_matcher(TECHNICAL_KEYWORDS));

pub static SOFT_SKILL_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| substring_matcher(SOFT_SKILLS));

pub static WEAK_PHRASE_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| substring_matcher(WEAK_PHRASES));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_patterns_compile() {
        Lazy::force(&CONTENT_SECTION_PATTERNS);
        Lazy::force(&DATE_RANGE_REGEX);
        Lazy::force(&QUANTIFIABLE_REGEX);
        Lazy::force(&CONTEXT_PHRASE_REGEX);
        Lazy::force(&TECHNICAL_MATCHER);
        Lazy::force(&WEAK_PHRASE_MATCHER);
    }

    #[test]
    fn test_role_keywords_are_not_single_letters() {
        for (role, keywords) in ROLE_KEYWORDS {
            for keyword in keywords.iter() {
                assert!(keyword.len() >= 3, "{} keyword '{}' is too short", role, keyword);
            }
        }
    }

    #[test]
    fn test_fallback_tables_have_ten_entries() {
        assert!(TECHNICAL_KEYWORDS.len() >= 15);
        assert!(SOFT_SKILLS.len() >= 10);
        assert!(BUSINESS_KEYWORDS.len() >= 10);
    }

    #[test]
    fn test_tables_are_lowercase() {
        let tables = [TECHNICAL_KEYWORDS, SOFT_SKILLS, BUSINESS_KEYWORDS, ACTION_VERBS];
        for table in tables {
            for word in table {
                assert_eq!(*word, word.to_lowercase());
            }
        }
        for (role, keywords) in ROLE_KEYWORDS {
            assert_eq!(*role, role.to_lowercase());
            assert!(!keywords.is_empty());
        }
    }

    #[test]
    fn test_date_range_regex() {
        assert!(DATE_RANGE_REGEX.is_match("Jan 2019 - Present"));
        assert!(DATE_RANGE_REGEX.is_match("2015 to 2018"));
        assert!(DATE_RANGE_REGEX.is_match("03/2020 - 06/2022"));
        assert!(!DATE_RANGE_REGEX.is_match("Graduated 2015"));
    }

    #[test]
    fn test_quantifiable_regex() {
        let text = "Grew revenue 20%, saved $1.2 million, 5+ years, team of 12 people";
        let count = QUANTIFIABLE_REGEX.find_iter(text).count();
        assert_eq!(count, 3);
    }
}
