//! HTML rendering.
//!
//! Two pages, picked by the incoming query:
//!
//! - **Viewer** ([`render_bio`]): photo, name and sections of a decoded page.
//! - **Creation form** ([`render_create`]): the state of an [`Editor`]:
//!   photo preview, name, section list, the open draft (if any) as an edit
//!   dialog, and the share link for everything committed so far.
//!
//! The creation form is a `GET` form aimed at `base_url`. Submitting it sends
//! `n`, `i` and (when there are sections) a hidden `s`, which is exactly the
//! query the viewer decodes. The `data-action` buttons (add, edit, remove a
//! section) are hooks for a client script; the HTML alone renders a snapshot
//! of the editor and does not change it.
//!
//! [`render_landing`] decodes a query and returns whichever page applies.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every piece of user text is interpolated, so it is always escaped. Link
//! targets are emitted as given; their scheme is not checked.

use crate::codec;
use crate::config::{self, SiteConfig};
use crate::editor::Editor;
use crate::query::QueryParams;
use crate::types::{Link, PageDescription, Section, SectionBody, SectionKind};
use maud::{DOCTYPE, Markup, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Full stylesheet: color properties from config, then the static rules.
pub fn page_css(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

/// Decode `params` and render the viewer, or the creation form when the
/// query carries no page.
pub fn render_landing(params: &QueryParams, config: &SiteConfig) -> Markup {
    let css = page_css(config);
    match codec::decode(params) {
        Some(page) => render_bio(&page, &config.unnamed_title, &css),
        None => {
            let editor =
                Editor::with_settings(&config.default_section_title, config.preview.delay());
            render_create(&editor, config, &css)
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// A card. Raised cards are for cards nested in other cards.
fn card(raised: bool, content: Markup) -> Markup {
    html! {
        div.card.raised[raised] {
            (content)
        }
    }
}

/// Round profile photo frame. An empty `src` leaves the frame empty.
fn photo(src: &str) -> Markup {
    html! {
        div.photo {
            @if !src.is_empty() {
                img src=(src) alt="Profile photo";
            }
        }
    }
}

/// Renders one section of a bio page.
pub fn render_section(section: &Section) -> Markup {
    html! {
        section.bio-section {
            h2 { (section.title) }
            @match &section.body {
                SectionBody::Text(text) => {
                    pre.section-text { (text) }
                },
                SectionBody::Links(links) => {
                    ul.link-list {
                        @for link in links {
                            li {
                                a.button href=(link.href) target="_blank" rel="noopener" {
                                    (link.text)
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a bio page. Empty or absent names fall back to `unnamed_title`;
/// the photo is only shown when there is a URL.
pub fn render_bio(page: &PageDescription, unnamed_title: &str, css: &str) -> Markup {
    let name = page
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(unnamed_title);
    let image_url = page.image_url.as_deref().unwrap_or_default();

    let content = html! {
        main.bio-page {
            @if !image_url.is_empty() {
                (photo(image_url))
            }
            (card(false, html! {
                div.stack {
                    h1 { (name) }
                    @for section in &page.sections {
                        (render_section(section))
                    }
                }
            }))
        }
    };

    base_document(name, css, content)
}

/// Renders the creation form for the editor's current state.
pub fn render_create(editor: &Editor, config: &SiteConfig, css: &str) -> Markup {
    let share_url = editor.share_url(&config.base_url);
    let sections = editor.sections();

    let content = html! {
        main.create-page {
            h1 { "Create your own page" }
            form #create-form method="get" action=(config.base_url) {
                (card(false, html! {
                    div.stack {
                        div.stack.centered {
                            (photo(editor.settled_photo()))
                            h2 { "Choose your photo" }
                            label {
                                p { "Paste a link to an image" }
                                input type="url" name="i" value=(editor.image_url());
                            }
                        }
                        hr;
                        label {
                            h2 { "What's your name?" }
                            input type="text" name="n" value=(editor.name());
                        }
                        hr;
                        (sections_panel(sections))
                        @if !sections.is_empty() {
                            input type="hidden" name=(codec::SECTIONS_PARAM) value=(codec::encode_sections(sections));
                        }
                    }
                }))
                div.stack.centered {
                    "All set?"
                    button.button type="submit" { "Create link" }
                    a.share-link href=(share_url) { (share_url) }
                }
            }
            @if let Some(draft) = editor.draft() {
                (section_edit_dialog(draft))
            }
        }
    };

    base_document("Create your own page", css, content)
}

/// Section list of the creation form: add button plus one preview per
/// committed section.
fn sections_panel(sections: &[Section]) -> Markup {
    html! {
        div.stack.centered {
            h2 { "Sections" }
            button.button type="button" data-action="add-section" { "Add section" }
            ul.section-list {
                @for (index, section) in sections.iter().enumerate() {
                    li data-section-id=(section.id) {
                        (card(true, html! {
                            div.stack.centered {
                                h3 { (section.title) }
                                div.row {
                                    button.button type="button" data-action="edit" data-index=(index) { "Edit" }
                                    button.button.danger type="button" data-action="remove" data-index=(index) { "Remove" }
                                }
                            }
                        }))
                    }
                }
            }
        }
    }
}

/// Edit dialog for the open draft.
fn section_edit_dialog(draft: &Section) -> Markup {
    let kind = draft.kind();
    html! {
        dialog.edit-dialog open {
            (card(false, html! {
                div.stack {
                    section.stack.centered {
                        h2 { "Section title" }
                        input type="text" name="title" value=(draft.title);
                    }
                    section.stack.centered {
                        h2 { "Section type" }
                        div.row {
                            @for option in [SectionKind::Text, SectionKind::Links] {
                                button.button.weak[kind != option] type="button" data-kind=(option.as_str()) {
                                    (kind_label(option))
                                }
                            }
                        }
                    }
                    section.stack {
                        @match &draft.body {
                            SectionBody::Text(text) => {
                                h2 { "Section text" }
                                textarea name="content" rows="8" { (text) }
                            },
                            SectionBody::Links(links) => {
                                h2 { "Links" }
                                ul.row.link-list {
                                    @for (index, link) in links.iter().enumerate() {
                                        li data-link-id=(link.id) { (link_editor(index, link)) }
                                    }
                                }
                                div.row {
                                    button.button type="button" data-action="add-link" { "Add link" }
                                }
                            },
                        }
                    }
                    div.row {
                        button.button type="submit" data-action="save" { "Save" }
                    }
                }
            }))
        }
    }
}

fn link_editor(index: usize, link: &Link) -> Markup {
    card(
        true,
        html! {
            div.stack.centered {
                input type="text" name={ "link-text-" (index) } placeholder="Display name" value=(link.text);
                p { "↓" }
                input type="url" name={ "link-href-" (index) } placeholder="Destination URL" value=(link.href);
                button.button.danger type="button" data-action="remove-link" data-index=(index) { "Delete" }
            }
        },
    )
}

fn kind_label(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Text => "Text",
        SectionKind::Links => "Links",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::time::Instant;

    fn bio_html(page: &PageDescription) -> String {
        render_bio(page, "Unnamed page", "").into_string()
    }

    #[test]
    fn base_document_includes_doctype() {
        let doc = base_document("Test", "body {}", html! { p { "test" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Test</title>"));
    }

    #[test]
    fn bio_shows_name_photo_and_sections() {
        let html = bio_html(&sample_page());
        assert!(html.contains("<h1>Ada Lovelace</h1>"));
        assert!(html.contains(r#"src="https://img.example/ada.png""#));
        assert!(html.contains("<h2>About me</h2>"));
        assert!(html.contains("<h2>Find me</h2>"));
    }

    #[test]
    fn bio_without_name_uses_unnamed_title() {
        let html = bio_html(&PageDescription::default());
        assert!(html.contains("<h1>Unnamed page</h1>"));

        let empty = PageDescription {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(bio_html(&empty).contains("<h1>Unnamed page</h1>"));
    }

    #[test]
    fn bio_without_photo_has_no_photo_frame() {
        let page = PageDescription {
            name: Some("Ada".to_string()),
            image_url: Some(String::new()),
            sections: vec![],
        };
        let html = bio_html(&page);
        assert!(!html.contains("class=\"photo\""));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn text_section_is_preformatted() {
        let html = render_section(&Section::text(0, "Notes", "line one\nline two")).into_string();
        assert!(html.contains("<pre class=\"section-text\">line one\nline two</pre>"));
    }

    #[test]
    fn links_open_in_new_tab() {
        let html = bio_html(&sample_page());
        assert!(html.contains(r#"href="https://notes.example/ada""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener""#));
        assert!(html.contains(">Notes</a>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let page = PageDescription {
            name: Some("<script>alert('xss')</script>".to_string()),
            image_url: None,
            sections: vec![
                Section::text(0, "<b>t</b>", "<img src=x onerror=alert(1)>"),
                Section::links(1, "l", vec![Link::new(0, "<i>", "\" onclick=\"x")]),
            ],
        };
        let html = bio_html(&page);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>t</b>"));
        assert!(!html.contains("<img src=x"));
        assert!(!html.contains("\" onclick=\"x"));
    }

    #[test]
    fn create_form_for_empty_editor() {
        let config = SiteConfig::default();
        let html = render_create(&Editor::new(), &config, "").into_string();
        assert!(html.contains("Create your own page"));
        assert!(html.contains("Add section"));
        assert!(html.contains(r#"href="https://linkpage.example/""#));
        assert!(!html.contains("<dialog"));
    }

    #[test]
    fn create_form_lists_sections_and_share_link() {
        let config = SiteConfig::default();
        let mut editor = Editor::new();
        editor.set_name("Ada");
        editor.add_new_section();
        editor.add_new_section();

        let html = render_create(&editor, &config, "").into_string();
        assert!(html.contains(r#"data-section-id="0""#));
        assert!(html.contains(r#"data-section-id="1""#));
        assert!(html.contains(r#"value="Ada""#));
        assert!(html.contains("https://linkpage.example/?n=Ada&amp;s="));
    }

    /// Value of the `<input>` named `name`, with maud's attribute escaping
    /// undone.
    fn input_value(html: &str, name: &str) -> Option<String> {
        let marker = format!(r#"name="{name}" value=""#);
        let start = html.find(&marker)? + marker.len();
        let raw = &html[start..start + html[start..].find('"')?];
        Some(
            raw.replace("&quot;", "\"")
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&amp;", "&"),
        )
    }

    #[test]
    fn create_form_submits_the_page_query() {
        let config = SiteConfig::default();
        let mut editor = Editor::new();
        editor.set_name("Ada Lovelace");
        editor.add_new_section();
        editor.begin_edit(0);
        editor.update_draft(|s| s.with_title("About me").with_text("snake_case & \"quotes\""));
        editor.save_edit();

        let html = render_create(&editor, &config, "").into_string();
        assert!(html.contains(r#"id="create-form""#));
        assert!(html.contains(r#"method="get" action="https://linkpage.example/""#));

        let submitted: QueryParams = ["n", "i", "s"]
            .into_iter()
            .filter_map(|key| input_value(&html, key).map(|value| (key.to_string(), value)))
            .collect();
        let page = codec::decode(&submitted).unwrap();
        assert_eq!(page.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(page.sections, editor.sections());
    }

    #[test]
    fn create_form_without_sections_has_no_hidden_sections_field() {
        let html = render_create(&Editor::new(), &SiteConfig::default(), "").into_string();
        assert!(input_value(&html, "n").is_some());
        assert!(input_value(&html, "s").is_none());
    }

    #[test]
    fn create_form_preview_follows_settled_photo() {
        let config = SiteConfig::default();
        let mut editor = Editor::new();
        let t0 = Instant::now();
        editor.set_image_url("https://img.example/me.png", t0);

        let html = render_create(&editor, &config, "").into_string();
        // typed, but not yet previewed
        assert!(html.contains(r#"value="https://img.example/me.png""#));
        assert!(!html.contains(r#"src="https://img.example/me.png""#));

        editor.photo_preview(t0 + editor_delay());
        let html = render_create(&editor, &config, "").into_string();
        assert!(html.contains(r#"src="https://img.example/me.png""#));
    }

    fn editor_delay() -> std::time::Duration {
        crate::debounce::DEFAULT_DELAY
    }

    #[test]
    fn open_draft_renders_edit_dialog() {
        let config = SiteConfig::default();
        let mut editor = Editor::new();
        editor.add_new_section();
        editor.begin_edit(0);
        editor.update_draft(|s| {
            s.with_title("My links")
                .with_kind(SectionKind::Links)
                .with_new_link()
                .with_link_text(0, "Blog")
        });

        let html = render_create(&editor, &config, "").into_string();
        assert!(html.contains("<dialog"));
        assert!(html.contains("edit-dialog"));
        assert!(html.contains(r#"value="My links""#));
        assert!(html.contains(r#"data-link-id="0""#));
        assert!(html.contains(r#"value="Blog""#));
        assert!(html.contains("Add link"));
        assert!(html.contains(r#"data-kind="text""#));
        assert!(html.contains("button weak"));
    }

    #[test]
    fn text_draft_renders_textarea() {
        let config = SiteConfig::default();
        let mut editor = Editor::new();
        editor.add_new_section();
        editor.begin_edit(0);
        editor.update_draft(|s| s.with_text("hello"));

        let html = render_create(&editor, &config, "").into_string();
        assert!(html.contains(r#"<textarea name="content" rows="8">hello</textarea>"#));
    }

    #[test]
    fn landing_without_params_is_creation_form() {
        let html = render_landing(&QueryParams::new(), &SiteConfig::default()).into_string();
        assert!(html.contains("Create your own page"));
    }

    #[test]
    fn landing_with_page_is_viewer() {
        let params = codec::encode(&sample_page());
        let html = render_landing(&params, &SiteConfig::default()).into_string();
        assert!(html.contains("<h1>Ada Lovelace</h1>"));
        assert!(!html.contains("Create your own page"));
    }

    #[test]
    fn landing_injects_color_css() {
        let mut config = SiteConfig::default();
        config.colors.background = "#123456".to_string();
        let html = render_landing(&QueryParams::parse("n=x"), &config).into_string();
        assert!(html.contains("--color-bg: #123456"));
    }
}
