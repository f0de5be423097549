//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! # Page Summary
//!
//! ```text
//! Ada Lovelace
//!     Photo: https://img.example/ada.png
//!
//! Sections
//! 001 About me (text, 2 lines)
//!     Mathematician.
//! 002 Find me (links, 2)
//!     001 Notes → https://notes.example/ada
//!     002 Mail → mailto:ada@example.com
//! ```

use crate::types::{PageDescription, Section, SectionBody};

/// Longest text preview shown under a text section.
const PREVIEW_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Section header: positional index, title and a kind-specific detail.
///
/// ```text
/// 001 About me (text, 2 lines)
/// 002 Find me (links, 2)
/// ```
fn section_header(index: usize, section: &Section) -> String {
    let title = if section.title.is_empty() {
        "(untitled)"
    } else {
        section.title.as_str()
    };
    let detail = match &section.body {
        SectionBody::Text(text) => format!("text, {} lines", text.lines().count()),
        SectionBody::Links(links) => format!("links, {}", links.len()),
    };
    format!("{} {} ({})", format_index(index), title, detail)
}

// ============================================================================
// Page summary
// ============================================================================

/// Format a decoded page for humans.
pub fn format_page_summary(page: &PageDescription, unnamed_title: &str) -> Vec<String> {
    let mut lines = Vec::new();

    let name = page
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(unnamed_title);
    lines.push(name.to_string());
    if let Some(url) = page.image_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("{}Photo: {}", indent(1), url));
    }

    lines.push(String::new());
    if page.sections.is_empty() {
        lines.push("No sections".to_string());
        return lines;
    }

    lines.push("Sections".to_string());
    for (i, section) in page.sections.iter().enumerate() {
        lines.push(section_header(i + 1, section));
        match &section.body {
            SectionBody::Text(text) => {
                if let Some(first) = text.lines().find(|l| !l.trim().is_empty()) {
                    lines.push(format!("{}{}", indent(1), truncate_desc(first, PREVIEW_CHARS)));
                }
            }
            SectionBody::Links(links) => {
                for (j, link) in links.iter().enumerate() {
                    lines.push(format!(
                        "{}{} {} → {}",
                        indent(1),
                        format_index(j + 1),
                        link.text,
                        link.href
                    ));
                }
            }
        }
    }
    lines
}

pub fn print_page_summary(page: &PageDescription, unnamed_title: &str) {
    for line in format_page_summary(page, unnamed_title) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the result of validating a page file.
pub fn format_check_output(page: &PageDescription, problems: &[String]) -> Vec<String> {
    let link_count: usize = page.sections.iter().map(|s| s.link_list().len()).sum();
    let mut lines = vec![format!(
        "{} sections, {} links",
        page.sections.len(),
        link_count
    )];
    if problems.is_empty() {
        lines.push("Page is valid".to_string());
    } else {
        lines.push(format!("{} problems", problems.len()));
        lines.extend(problems.iter().map(|p| format!("{}{}", indent(1), p)));
    }
    lines
}

pub fn print_check_output(page: &PageDescription, problems: &[String]) {
    for line in format_check_output(page, problems) {
        println!("{}", line);
    }
}
