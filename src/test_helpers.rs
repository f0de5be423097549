//! Shared fixtures for the linkpage unit tests.
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let page = sample_page();
//! let [a, b, c] = abc_sections();
//! assert_section_ids(&page.sections, &[0, 1]);
//! ```

use crate::types::{Link, PageDescription, Section};

/// A page using every field and both section kinds.
pub fn sample_page() -> PageDescription {
    PageDescription {
        name: Some("Ada Lovelace".to_string()),
        image_url: Some("https://img.example/ada.png".to_string()),
        sections: vec![
            Section::text(0, "About me", "Mathematician.\nWrites notes on engines."),
            Section::links(
                1,
                "Find me",
                vec![
                    Link::new(0, "Notes", "https://notes.example/ada"),
                    Link::new(1, "Mail", "mailto:ada@example.com"),
                ],
            ),
        ],
    }
}

/// Three distinct text sections with ids 0, 1, 2.
pub fn abc_sections() -> [Section; 3] {
    [
        Section::text(0, "A", "first"),
        Section::text(1, "B", "second"),
        Section::text(2, "C", "third"),
    ]
}

/// Assert the section ids, in order. Panics with the full list on mismatch.
pub fn assert_section_ids(sections: &[Section], expected: &[u32]) {
    let ids: Vec<u32> = sections.iter().map(|s| s.id).collect();
    assert_eq!(ids, expected, "section ids (titles: {:?})", titles(sections));
}

/// Assert the link ids of a links section, in order.
pub fn assert_link_ids(section: &Section, expected: &[u32]) {
    let ids: Vec<u32> = section.link_list().iter().map(|l| l.id).collect();
    assert_eq!(ids, expected, "link ids of section '{}'", section.title);
}

fn titles(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|s| s.title.as_str()).collect()
}
