//! ATS analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{AtsError, Result};
pub use processing::analyzer::{analyze_resume, AnalysisInput, AnalysisResult, AtsAnalyzer};
