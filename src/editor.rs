//! Page editing model.
//!
//! Two layers:
//!
//! - Free functions over `&[Section]` ([`add_new_section`],
//!   [`replace_section`], [`remove_section`]) and `Section::with_*` methods
//!   for the links inside a section. None of them mutate their input; each
//!   returns a fresh value and untouched sections keep their order.
//! - [`Editor`], the handle an editing session owns. It holds the page being
//!   built and the draft state machine:
//!
//! ```text
//!              begin_edit(i)                save_edit()
//!   Idle ─────────────────────▶ Editing ──────────────────▶ Idle  (draft committed)
//!                               { index,        close_edit()
//!                                 draft }   ──────────────────▶ Idle  (draft dropped)
//! ```
//!
//! The committed section list is never touched by the draft while it is
//! open. The draft is tied to a position, not to a value: a page may hold
//! two equal sections, and saving writes back to the one that was opened.
//!
//! Misuse (replacing a section that isn't there, saving with no open draft,
//! editing links of a text section) is a bug in the caller and panics.

use crate::codec;
use crate::debounce::{DEFAULT_DELAY, Debounced};
use crate::types::{Link, PageDescription, Section, SectionBody, SectionKind, next_id};
use std::time::{Duration, Instant};

/// Title given to freshly added sections.
pub const DEFAULT_SECTION_TITLE: &str = "Untitled section";

// ============================================================================
// Section sequence operations
// ============================================================================

/// Append an empty text section with the default title.
pub fn add_new_section(sections: &[Section]) -> Vec<Section> {
    add_section_titled(sections, DEFAULT_SECTION_TITLE)
}

/// Append an empty text section with the given title.
///
/// The new id is `max(existing) + 1`, or `0` for an empty list.
pub fn add_section_titled(sections: &[Section], title: &str) -> Vec<Section> {
    let id = next_id(sections.iter().map(|s| s.id));
    let mut next = sections.to_vec();
    next.push(Section::text(id, title, ""));
    next
}

/// Substitute `new` at the position of `old`.
///
/// # Panics
///
/// If `old` is not in `sections`.
pub fn replace_section(sections: &[Section], old: &Section, new: Section) -> Vec<Section> {
    let index = position_of(sections, old, "replace");
    let mut next = sections.to_vec();
    next[index] = new;
    next
}

/// Remove the first occurrence of `section`.
///
/// # Panics
///
/// If `section` is not in `sections`.
pub fn remove_section(sections: &[Section], section: &Section) -> Vec<Section> {
    let index = position_of(sections, section, "remove");
    let mut next = sections.to_vec();
    next.remove(index);
    next
}

fn position_of(sections: &[Section], section: &Section, op: &str) -> usize {
    sections
        .iter()
        .position(|s| s == section)
        .unwrap_or_else(|| {
            panic!(
                "cannot {op} section {} ('{}'): not in the section list",
                section.id, section.title
            )
        })
}

// ============================================================================
// Single-section edits
// ============================================================================

impl Section {
    pub fn with_title(&self, title: impl Into<String>) -> Section {
        Section {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Replace the text of a text section.
    ///
    /// # Panics
    ///
    /// On a links section.
    pub fn with_text(&self, content: impl Into<String>) -> Section {
        match self.body {
            SectionBody::Text(_) => Section {
                body: SectionBody::Text(content.into()),
                ..self.clone()
            },
            SectionBody::Links(_) => panic!(
                "section {} has type \"links\" in the text editor",
                self.id
            ),
        }
    }

    /// Switch the section type. Content is reset to the empty value of the
    /// new type; choosing the current type changes nothing.
    pub fn with_kind(&self, kind: SectionKind) -> Section {
        if self.kind() == kind {
            return self.clone();
        }
        Section {
            body: SectionBody::empty(kind),
            ..self.clone()
        }
    }

    /// Append a blank link. Its id is `max(existing) + 1`, or `0`.
    pub fn with_new_link(&self) -> Section {
        self.map_links("add a link", |links| {
            let id = next_id(links.iter().map(|l| l.id));
            links.push(Link::new(id, "", ""));
        })
    }

    /// Set the display text of the link at `index`.
    pub fn with_link_text(&self, index: usize, text: impl Into<String>) -> Section {
        let text = text.into();
        self.map_links("edit a link", |links| link_at(links, index).text = text)
    }

    /// Set the target URL of the link at `index`.
    pub fn with_link_href(&self, index: usize, href: impl Into<String>) -> Section {
        let href = href.into();
        self.map_links("edit a link", |links| link_at(links, index).href = href)
    }

    /// Remove the link at `index`.
    pub fn without_link(&self, index: usize) -> Section {
        self.map_links("remove a link", |links| {
            link_at(links, index);
            links.remove(index);
        })
    }

    fn map_links(&self, op: &str, f: impl FnOnce(&mut Vec<Link>)) -> Section {
        let mut next = self.clone();
        match &mut next.body {
            SectionBody::Links(links) => f(links),
            SectionBody::Text(_) => panic!(
                "cannot {op}: section {} has type \"text\"",
                self.id
            ),
        }
        next
    }
}

fn link_at(links: &mut [Link], index: usize) -> &mut Link {
    let len = links.len();
    links
        .get_mut(index)
        .unwrap_or_else(|| panic!("link index {index} out of bounds ({len} links)"))
}

// ============================================================================
// Editing session
// ============================================================================

#[derive(Debug, Clone)]
enum EditState {
    Idle,
    Editing { index: usize, draft: Section },
}

/// The state of one page-building session.
///
/// Passed explicitly to whatever needs to read or change the page being
/// built. Starts empty: no name, no photo, no sections.
#[derive(Debug, Clone)]
pub struct Editor {
    name: String,
    image_url: Debounced<String>,
    sections: Vec<Section>,
    section_title: String,
    state: EditState,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_SECTION_TITLE, DEFAULT_DELAY)
    }

    /// An empty editor with a custom new-section title and photo preview delay.
    pub fn with_settings(section_title: &str, preview_delay: Duration) -> Self {
        Self {
            name: String::new(),
            image_url: Debounced::new(String::new(), preview_delay),
            sections: Vec::new(),
            section_title: section_title.to_string(),
            state: EditState::Idle,
        }
    }

    /// Continue editing an existing page.
    pub fn load(&mut self, page: PageDescription) {
        self.name = page.name.unwrap_or_default();
        self.image_url = Debounced::new(page.image_url.unwrap_or_default(), self.image_url.delay());
        self.sections = page.sections;
        self.state = EditState::Idle;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The photo URL as typed, including a value still waiting to settle.
    pub fn image_url(&self) -> &str {
        self.image_url.latest()
    }

    /// Record a keystroke in the photo URL field at time `now`.
    pub fn set_image_url(&mut self, url: impl Into<String>, now: Instant) {
        self.image_url.push(url.into(), now);
    }

    /// The photo URL to preview at time `now`: the last value that stayed
    /// unchanged for the whole debounce delay.
    pub fn photo_preview(&mut self, now: Instant) -> &str {
        self.image_url.poll(now)
    }

    /// The last settled preview value, without advancing time.
    pub fn settled_photo(&self) -> &str {
        self.image_url.settled()
    }

    /// Committed sections, in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn add_new_section(&mut self) {
        self.sections = add_section_titled(&self.sections, &self.section_title);
    }

    /// # Panics
    ///
    /// If `old` is not a committed section.
    pub fn replace_section(&mut self, old: &Section, new: Section) {
        self.sections = replace_section(&self.sections, old, new);
    }

    /// Remove the committed section at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds, or a draft is open (removal would shift
    /// the position the draft saves to).
    pub fn remove_section(&mut self, index: usize) {
        if let EditState::Editing { index: open, .. } = &self.state {
            panic!("cannot remove a section while section {open} is being edited");
        }
        self.committed_at(index);
        let mut next = self.sections.clone();
        next.remove(index);
        self.sections = next;
    }

    // ------------------------------------------------------------------
    // Draft state machine
    // ------------------------------------------------------------------

    /// Start editing the committed section at `index`, on a draft copy.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds or another draft is already open.
    pub fn begin_edit(&mut self, index: usize) -> &mut Section {
        if let EditState::Editing { index: open, .. } = &self.state {
            panic!("section {open} is already being edited");
        }
        let draft = self.committed_at(index).clone();
        self.state = EditState::Editing { index, draft };
        self.draft_mut()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// The open draft, if any.
    pub fn draft(&self) -> Option<&Section> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// # Panics
    ///
    /// If no draft is open.
    pub fn draft_mut(&mut self) -> &mut Section {
        match &mut self.state {
            EditState::Editing { draft, .. } => draft,
            EditState::Idle => panic!("no section is being edited"),
        }
    }

    /// Replace the draft with `f(draft)`. Pairs with the `Section::with_*`
    /// builders: `editor.update_draft(|s| s.with_new_link())`.
    pub fn update_draft(&mut self, f: impl FnOnce(&Section) -> Section) {
        let draft = self.draft_mut();
        let next = f(draft);
        *draft = next;
    }

    /// Commit the draft over the section it was cloned from, by position.
    ///
    /// # Panics
    ///
    /// If no draft is open.
    pub fn save_edit(&mut self) {
        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Editing { index, draft } => {
                self.committed_at(index);
                let mut next = self.sections.clone();
                next[index] = draft;
                self.sections = next;
            }
            EditState::Idle => panic!("current section is unset when saving the edit"),
        }
    }

    /// Abandon the draft. The committed section is unchanged.
    ///
    /// # Panics
    ///
    /// If no draft is open.
    pub fn close_edit(&mut self) {
        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Editing { .. } => {}
            EditState::Idle => panic!("current section is unset when closing the edit"),
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Snapshot the committed state. Empty name and photo URL are omitted;
    /// an open draft is not included.
    pub fn page(&self) -> PageDescription {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PageDescription {
            name: non_empty(&self.name),
            image_url: non_empty(self.image_url.latest()),
            sections: self.sections.clone(),
        }
    }

    /// The share URL for the committed state.
    pub fn share_url(&self, base: &str) -> String {
        codec::share_url(base, &self.page())
    }

    fn committed_at(&self, index: usize) -> &Section {
        let len = self.sections.len();
        self.sections
            .get(index)
            .unwrap_or_else(|| panic!("section index {index} out of bounds ({len} sections)"))
    }
}
