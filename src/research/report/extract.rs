use anyhow::{anyhow, Result};

/// Character limit for report text fed into a prompt. Longer documents are
/// cut at this boundary; there is no chunking and no retrieval.
pub const REPORT_CHAR_LIMIT: usize = 4000;

pub fn extract_report_text(pdf_bytes: &[u8]) -> Result<String> {
  let text: String = pdf_extract::extract_text_from_mem(pdf_bytes).map_err(|e| anyhow!("Failed to extract text from the uploaded PDF: {}", e))?;
  log::info!("Extracted {} characters of report text.", text.chars().count());
  return Ok(text);
}

pub fn truncate_for_prompt(text: &str) -> String {
  return text.chars().take(REPORT_CHAR_LIMIT).collect();
}
