//! Text extraction from various file formats

use crate::error::{AtsError, Result};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        decode_utf8(bytes, path)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let markdown_content = decode_utf8(bytes, path)?;
        Ok(markdown_to_text(&markdown_content))
    }
}

fn decode_utf8(bytes: Vec<u8>, path: &Path) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        AtsError::InvalidInput(format!("'{}' is not valid UTF-8 text: {}", path.display(), e))
    })
}

/// Render Markdown to HTML, then strip tags, keeping one line per block.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_to_text(&html_output)
}

/// Paragraphs are separated by one blank line; other blocks by a newline.
fn html_to_text(html: &str) -> String {
    let text = html.replace("<br>", "\n").replace("<br />", "\n");

    let blocks: Vec<String> = text
        .split("</p>")
        .map(block_to_text)
        .filter(|block| !block.is_empty())
        .collect();

    blocks.join("\n\n")
}

fn block_to_text(block: &str) -> String {
    // Tags go first so escaped brackets in the text are not taken for tags.
    let decoded = HTML_TAG
        .replace_all(block, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let lines: Vec<&str> = decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let md = "# Jane Roe\n\n## Skills\n\n- **Rust** & Go\n- SQL\n";
        let text = markdown_to_text(md);
        assert_eq!(text, "Jane Roe\nSkills\nRust & Go\nSQL");
    }

    #[test]
    fn test_markdown_keeps_paragraph_breaks() {
        let md = "First paragraph line one\nline two.\n\n\n\nSecond paragraph.\n";
        let text = markdown_to_text(md);
        assert_eq!(text, "First paragraph line one\nline two.\n\nSecond paragraph.");
    }

    #[test]
    fn test_escaped_angle_brackets_survive() {
        let text = markdown_to_text("Compare a < b and `<div>` blocks");
        assert_eq!(text, "Compare a < b and <div> blocks");
    }
}
