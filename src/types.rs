//! Shared page types.
//!
//! These are the values carried by the share URL. The JSON shape of a
//! section is part of the URL format and must stay stable:
//!
//! ```text
//! {"id":0,"title":"About","type":"text","content":"Hi!"}
//! {"id":1,"title":"Find me","type":"links","content":[{"id":0,"text":"Blog","href":"https://…"}]}
//! ```

use serde::{Deserialize, Serialize};

/// The full shareable state of a bio page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescription {
    /// Display name. `None` renders as the unnamed-page label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Profile photo URL. `None` hides the photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A labeled, navigable URL inside a links section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: u32,
    #[serde(default)]
    pub text: String,
    /// Target URL. The scheme is not validated.
    #[serde(default)]
    pub href: String,
}

/// A titled block of page content.
///
/// The `type` tag and the `content` field live in [`SectionBody`], so a
/// links section can never carry text content or the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum SectionBody {
    /// Free-form text, rendered preformatted.
    Text(String),
    Links(Vec<Link>),
}

/// The discriminant of a [`SectionBody`], without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    Links,
}

impl SectionKind {
    /// Wire name, as used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Text => "text",
            SectionKind::Links => "links",
        }
    }
}

impl SectionBody {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionBody::Text(_) => SectionKind::Text,
            SectionBody::Links(_) => SectionKind::Links,
        }
    }

    /// Empty content of the given kind.
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Text => SectionBody::Text(String::new()),
            SectionKind::Links => SectionBody::Links(Vec::new()),
        }
    }
}

impl Section {
    /// A text section.
    pub fn text(id: u32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: SectionBody::Text(content.into()),
        }
    }

    /// A links section.
    pub fn links(id: u32, title: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            id,
            title: title.into(),
            body: SectionBody::Links(links),
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.body.kind()
    }

    /// The links of a links section; empty for text sections.
    pub fn link_list(&self) -> &[Link] {
        match &self.body {
            SectionBody::Links(links) => links,
            SectionBody::Text(_) => &[],
        }
    }
}

impl Link {
    pub fn new(id: u32, text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Next free id under the max-plus-one rule: `max(ids) + 1`, or `0` when empty.
///
/// # Panics
///
/// If an existing id is already `u32::MAX`; there is no id above it.
pub fn next_id(ids: impl IntoIterator<Item = u32>) -> u32 {
    match ids.into_iter().max() {
        None => 0,
        Some(max) => max
            .checked_add(1)
            .unwrap_or_else(|| panic!("no id left above {max}")),
    }
}
