//! Page ⇄ query-parameter codec.
//!
//! A page travels in three parameters:
//!
//! | Param | Value |
//! |-------|-------|
//! | `n`   | creator name |
//! | `i`   | photo URL |
//! | `s`   | JSON array of sections, with spaces and underscores exchanged |
//!
//! The exchange makes the common case (spaces inside titles and text) cost
//! one byte in the URL instead of three (`_` vs `%20`). It is applied to the
//! whole serialized string, so literal underscores in user text travel as
//! `%20` and come back as underscores. The transform is its own inverse.
//!
//! Decoding never fails. A broken `s` is logged and the page comes back with
//! no sections; a section element that doesn't parse is logged and skipped.

use crate::query::QueryParams;
use crate::types::{PageDescription, Section};
use serde_json::Value;

pub const NAME_PARAM: &str = "n";
pub const IMAGE_PARAM: &str = "i";
pub const SECTIONS_PARAM: &str = "s";

/// Exchange every space with an underscore and every underscore with a space.
pub fn swap_space_underscore(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '_' => ' ',
            other => other,
        })
        .collect()
}

/// Encode a page into query parameters.
///
/// `n` and `i` are present only when set; `s` only when there is at least
/// one section.
pub fn encode(page: &PageDescription) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(name) = &page.name {
        params.insert(NAME_PARAM, name.as_str());
    }
    if let Some(image_url) = &page.image_url {
        params.insert(IMAGE_PARAM, image_url.as_str());
    }
    if !page.sections.is_empty() {
        params.insert(SECTIONS_PARAM, encode_sections(&page.sections));
    }
    params
}

/// Serialize sections to the `s` parameter value (before percent-encoding).
pub fn encode_sections(sections: &[Section]) -> String {
    // Serializing plain data structs into a String cannot fail.
    let json = serde_json::to_string(sections).unwrap_or_else(|_| "[]".to_string());
    swap_space_underscore(&json)
}

/// Decode query parameters into a page.
///
/// Returns `None` when none of `n`, `i` or `s` is present: the visitor has no
/// page to show and should get the creation form instead.
pub fn decode(params: &QueryParams) -> Option<PageDescription> {
    let recognized = [NAME_PARAM, IMAGE_PARAM, SECTIONS_PARAM]
        .iter()
        .any(|key| params.contains(key));
    if !recognized {
        return None;
    }

    Some(PageDescription {
        name: params.get(NAME_PARAM).map(str::to_string),
        image_url: params.get(IMAGE_PARAM).map(str::to_string),
        sections: params
            .get(SECTIONS_PARAM)
            .map(decode_sections)
            .unwrap_or_default(),
    })
}

/// Decode a full URL, `?query` or bare query string.
pub fn decode_url(url: &str) -> Option<PageDescription> {
    decode(&QueryParams::from_url(url))
}

/// Decode the `s` parameter value (already percent-decoded).
pub fn decode_sections(raw: &str) -> Vec<Section> {
    let json = swap_space_underscore(raw);
    let elements = match serde_json::from_str::<Value>(&json) {
        Ok(Value::Array(elements)) => elements,
        Ok(other) => {
            tracing::warn!(
                kind = json_kind(&other),
                "Failed to parse sections: expected an array"
            );
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to parse sections");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(section) => Some(section),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping malformed section");
                None
            }
        })
        .collect()
}

/// Build the share URL for a page: `base` plus the encoded query.
///
/// Any query or fragment already on `base` is replaced.
pub fn share_url(base: &str, page: &PageDescription) -> String {
    let base = base.split(['?', '#']).next().unwrap_or(base);
    let query = encode(page).to_query_string();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
