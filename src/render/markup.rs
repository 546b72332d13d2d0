// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! List markup for each render state.
//!
//! The output replaces the inner markup of the results list node wholesale,
//! so every state starts from a cleared list. Item text and URLs come from the
//! CMS and are escaped; localized messages come from configuration and are
//! escaped too, since a translator's `<` is still a `<`.

use super::RenderState;
use crate::config::LocaleMessages;
use std::fmt::Write;

const SPINNER_SVG: &str = concat!(
    r#"<svg class="spinner" viewBox="0 0 50 50">"#,
    r#"<circle cx="25" cy="25" r="20" fill="none" stroke-width="5"></circle>"#,
    "</svg>",
);

/// Inner markup of the results list for `state`.
pub fn render_list(state: &RenderState, messages: &LocaleMessages) -> String {
    match state {
        RenderState::Idle => String::new(),
        RenderState::Loading => format!(
            r#"<div class="loading-state">{}<span>{}</span></div>"#,
            SPINNER_SVG,
            escape_html(&messages.searching)
        ),
        RenderState::Populated(items) => {
            let mut out = String::with_capacity(items.len() * 128);
            for item in items {
                // Writing to a String cannot fail
                let _ = write!(
                    out,
                    r#"<li><a href="{}" target="_self"><h3>{}</h3><p>{}</p></a></li>"#,
                    escape_html(&item.url),
                    escape_html(&item.title),
                    escape_html(&item.descriptor()),
                );
            }
            out
        }
        RenderState::Empty => format!(
            r#"<p class="no-results">{}</p>"#,
            escape_html(&messages.no_results)
        ),
        RenderState::Error => format!(
            r#"<p class="error-message">{}</p>"#,
            escape_html(&messages.error)
        ),
    }
}

/// Escape text for an HTML text node or a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }
    result
}
