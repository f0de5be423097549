//! # linkpage
//!
//! Link-in-bio pages that live entirely in their URL. A creator fills in a
//! name, a photo URL and a list of sections (free text, or lists of links);
//! the whole page is packed into the query string of a share link. Anyone
//! opening that link gets the page rendered from the URL alone: no server
//! state, no database, no accounts.
//!
//! # Architecture
//!
//! ```text
//! Editor ──page()──▶ PageDescription ──encode──▶ QueryParams ──▶ ?n=…&i=…&s=…
//!                                                                     │
//!   viewer HTML ◀──render_bio── PageDescription ◀──decode── QueryParams
//!   creation form ◀──render_create── (no recognized parameters)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `PageDescription`, `Section`, `Link`: the values carried by the URL |
//! | [`codec`] | Page ⇄ query parameters, tolerant decoding |
//! | [`query`] | Query-string parsing and percent-encoding |
//! | [`editor`] | Section list operations and the draft/commit editing session |
//! | [`debounce`] | Accumulate-latest-then-fire timer for the photo preview |
//! | [`render`] | Viewer page and creation form HTML using Maud |
//! | [`config`] | `config.toml` loading, validation, merging and color CSS |
//! | [`page_file`] | Hand-written page files (JSON/TOML) and id checks |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Decoding Never Fails
//!
//! A share link may be truncated by a chat client or edited by hand. A broken
//! `s` parameter is logged and the page renders without sections, keeping the
//! name and photo. The only "failure" a visitor can see is the creation form,
//! shown when the URL carries none of the page parameters at all.
//!
//! ## Space/Underscore Exchange
//!
//! Section JSON is dominated by spaces inside titles and text. Exchanging
//! spaces and underscores before percent-encoding turns each `%20` into a
//! single `_`. The exchange covers the whole string and is its own inverse,
//! so underscores typed by the user survive the round trip too (as `%20`).
//!
//! ## Tag and Content in One Enum
//!
//! A section's `type` and `content` are a single [`types::SectionBody`]
//! value, serialized adjacently tagged. A links section with text content
//! can't be constructed, and one arriving over the wire fails to decode and
//! is skipped.
//!
//! ## Explicit Editing Session
//!
//! The page under construction and the section being edited live in one
//! [`editor::Editor`] passed to whoever needs it. Edits go to a draft copy;
//! the committed list only changes on save. Using the session wrongly (saving
//! without a draft, replacing a section that isn't there) is a programming
//! error and panics rather than returning an error.

pub mod codec;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod logging;
pub mod output;
pub mod page_file;
pub mod query;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
