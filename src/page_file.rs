//! Page description files.
//!
//! A page can be written by hand and turned into a share URL with
//! `linkpage encode`. JSON files use the same field names as the page type;
//! files ending in `.toml` are read as TOML:
//!
//! ```toml
//! name = "Ada Lovelace"
//! image_url = "https://img.example/ada.png"
//!
//! [[sections]]
//! id = 0
//! title = "About me"
//! type = "text"
//! content = "Mathematician."
//!
//! [[sections]]
//! id = 1
//! title = "Find me"
//! type = "links"
//! content = [{ id = 0, text = "Notes", href = "https://notes.example" }]
//! ```

use crate::types::PageDescription;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid page: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Read a page file, picking the format from the extension.
pub fn load_page(path: &Path) -> Result<PageDescription, PageFileError> {
    let content = fs::read_to_string(path)?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let page = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(page)
}

/// Read a page file and reject it if [`find_problems`] reports anything.
pub fn load_valid_page(path: &Path) -> Result<PageDescription, PageFileError> {
    let page = load_page(path)?;
    let problems = find_problems(&page);
    if problems.is_empty() {
        Ok(page)
    } else {
        Err(PageFileError::Invalid(problems))
    }
}

/// Id-uniqueness violations: duplicate section ids in the page, duplicate
/// link ids within a section.
pub fn find_problems(page: &PageDescription) -> Vec<String> {
    let mut problems = Vec::new();
    let mut section_ids = HashSet::new();
    for section in &page.sections {
        if !section_ids.insert(section.id) {
            problems.push(format!(
                "duplicate section id {} ('{}')",
                section.id, section.title
            ));
        }
        let mut link_ids = HashSet::new();
        for link in section.link_list() {
            if !link_ids.insert(link.id) {
                problems.push(format!(
                    "duplicate link id {} in section '{}'",
                    link.id, section.title
                ));
            }
        }
    }
    problems
}
