//! Markdown-ish pre-processing for the AI analysis block.
//!
//! The upstream AI summary arrives as loose markdown. Reports flow it
//! as plain text: header/bold/italic/code markers are stripped, link
//! syntax keeps only the link text, and the remaining lines are
//! classified as paragraphs, bullets, or numbered items.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"(?m)^#{1,6}\s+").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*\n]+)\*").unwrap();
    static ref CODE: Regex = Regex::new(r"`([^`\n]*)`").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref NUMBERED: Regex = Regex::new(r"^\d+[.)]\s+").unwrap();
}

/// Strip markdown markers, keeping the visible text.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADER.replace_all(text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = BLANK_RUN.replace_all(&text, "\n");
    text.trim().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowLine {
    Paragraph(String),
    Bullet(String),
    Numbered(String),
}

/// Split stripped text into flowed lines, one per non-empty source
/// line.
pub fn flow_lines(text: &str) -> Vec<FlowLine> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(rest) = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .or_else(|| line.strip_prefix("• "))
            {
                FlowLine::Bullet(rest.trim().to_string())
            } else if NUMBERED.is_match(line) {
                FlowLine::Numbered(line.to_string())
            } else {
                FlowLine::Paragraph(line.to_string())
            }
        })
        .collect()
}
