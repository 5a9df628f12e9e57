//! Text normalization for keyword and content matching

use once_cell::sync::Lazy;
use regex::Regex;

static SYMBOL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s@.\-]").expect("Invalid symbol regex"));

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Lower-case `text`, blank out everything except word characters, whitespace,
/// `@`, `.` and `-`, then collapse whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = SYMBOL_REGEX.replace_all(&lowered, " ");
    WHITESPACE_REGEX.replace_all(&stripped, " ").trim().to_string()
}

/// Resume text in both views: the original for format and structure checks,
/// the normalized form for keyword and content matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText {
    original: String,
    normalized: String,
}

impl ResumeText {
    pub fn new(text: &str) -> Self {
        Self {
            original: text.to_string(),
            normalized: normalize(text),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whitespace-delimited word count of the original text. Empty text has zero words.
    pub fn word_count(&self) -> usize {
        self.original.split_whitespace().count()
    }
}
