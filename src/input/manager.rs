//! Input manager for handling different file types

use crate::error::{AtsError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(AtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(AtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            AtsError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Check a path's extension against an allow-list.
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(AtsError::UnsupportedFormat(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        ))),
        None => Err(AtsError::InvalidInput(format!(
            "File has no extension: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(matches!(
            validate_file_extension(Path::new("job.pdf"), JOB_EXTENSIONS),
            Err(AtsError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            validate_file_extension(Path::new("job"), JOB_EXTENSIONS),
            Err(AtsError::InvalidInput(_))
        ));
    }
}
