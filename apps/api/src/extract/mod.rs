//! Text Extractor — turns uploaded PDF bytes into cleaned resume text.
//!
//! The PDF parser is a black box producing page text in page order; this
//! module owns the cleanup contract and the Experience-section heuristic.

pub mod handlers;

use regex::Regex;
use thiserror::Error;

/// Cleaned text under this many characters is treated as unusable: the
/// source is likely image-only or corrupted.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(
        "Failed to extract text from PDF. Please ensure the file is a valid PDF \
         with selectable text."
    )]
    Parse(#[source] pdf_extract::OutputError),

    #[error(
        "Could not extract meaningful text from PDF. The file might be image-based \
         or corrupted."
    )]
    NoMeaningfulText,
}

/// Parses PDF bytes and returns the cleaned full-document text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(ExtractError::Parse)?;
    finish_extraction(&raw)
}

/// Cleanup and minimum-length gate applied to parser output.
pub fn finish_extraction(raw: &str) -> Result<String, ExtractError> {
    let cleaned = clean_extracted_text(raw);
    if cleaned.chars().count() < MIN_TEXT_CHARS {
        return Err(ExtractError::NoMeaningfulText);
    }
    Ok(cleaned)
}

/// Replaces control characters with spaces, collapses whitespace runs to a
/// single space, and trims the ends.
pub fn clean_extracted_text(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| {
            if matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}') {
                ' '
            } else {
                c
            }
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Narrows cleaned text to its "Experience:" section when one is labeled:
/// everything from the label (matched case-insensitively) up to the next
/// all-caps "LABEL:" heading or the end of the text. Falls back to the
/// full text when no label is present.
pub fn select_analysis_text(text: &str) -> &str {
    let re = Regex::new(r"(?s)(?i:experience:)(.*?)(?:[A-Z][A-Z ]+:|\z)").unwrap();
    match re.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str().trim()).unwrap_or(text),
        None => text,
    }
}
