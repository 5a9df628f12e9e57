//! Resume text analysis: normalization, keyword extraction, scoring,
//! metrics and recommendations

pub mod word_lists;
pub mod normalizer;
pub mod keywords;
pub mod scoring;
pub mod metrics;
pub mod recommendations;
pub mod analyzer;
