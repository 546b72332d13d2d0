// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The host page, as far as the widget is concerned.
//!
//! A widget touches very little of its page: three nodes by id, one style
//! element in the head, the document language, and ancestor checks for click
//! targets. `HostPage` is exactly that surface. Anything that can answer those
//! questions can host a widget: a DOM binding, a terminal front end, or
//! `MemoryPage`, the in-memory document the CLI and the tests use.
//!
//! Methods take `&self`; implementations own their interior mutability so a
//! page can be shared between a widget and whoever is inspecting it.

use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

/// Class toggled on the results container while it is shown.
pub const SHOW_CLASS: &str = "show";

/// Element a click landed on, by id. `None` id means an anonymous node that
/// belongs to no tracked element (the page body, say).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget(Option<String>);

impl ClickTarget {
    pub fn element(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// What the widget needs from a page.
pub trait HostPage: Send + Sync + 'static {
    fn has_element(&self, id: &str) -> bool;

    /// Replace the inner markup of element `id`.
    fn set_inner_html(&self, id: &str, html: &str);

    fn set_attribute(&self, id: &str, name: &str, value: &str);

    /// Show or hide a container (class toggle plus inline opacity).
    fn set_visible(&self, id: &str, visible: bool);

    /// Whether a head style element with this id exists.
    fn has_style(&self, marker: &str) -> bool;

    fn inject_style(&self, marker: &str, css: &str);

    /// Whether `target` is `ancestor` or sits somewhere inside it.
    fn contains(&self, ancestor: &str, target: &ClickTarget) -> bool;

    /// Document language (`<html lang>`), if declared.
    fn lang(&self) -> Option<String>;
}

/// One element of a `MemoryPage`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub parent: Option<String>,
    pub inner_html: String,
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub opacity: Option<f32>,
}

#[derive(Debug, Default)]
struct Document {
    lang: Option<String>,
    elements: HashMap<String, Element>,
    styles: Vec<(String, String)>,
}

/// In-memory document.
#[derive(Debug, Default)]
pub struct MemoryPage {
    doc: Mutex<Document>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with the standard widget markup: input and results container as
    /// siblings, list inside the container.
    pub fn with_widget_nodes(input: &str, results: &str, list: &str) -> Self {
        let page = Self::new();
        page.add_element(input, None);
        page.add_element(results, None);
        page.add_element(list, Some(results));
        page
    }

    pub fn with_lang(self, lang: impl Into<String>) -> Self {
        self.doc.lock().lang = Some(lang.into());
        self
    }

    pub fn add_element(&self, id: &str, parent: Option<&str>) {
        self.doc.lock().elements.insert(
            id.to_string(),
            Element {
                parent: parent.map(str::to_string),
                ..Element::default()
            },
        );
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.doc.lock().elements.get(id).cloned()
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.doc.lock().elements.get(id).map(|e| e.inner_html.clone())
    }

    /// Shown per class and opacity, the way the container is toggled.
    pub fn is_shown(&self, id: &str) -> bool {
        self.doc
            .lock()
            .elements
            .get(id)
            .is_some_and(|e| e.classes.contains(SHOW_CLASS) && e.opacity == Some(1.0))
    }

    /// Number of head style elements carrying `marker`.
    pub fn style_count(&self, marker: &str) -> usize {
        self.doc
            .lock()
            .styles
            .iter()
            .filter(|(id, _)| id == marker)
            .count()
    }

    pub fn style(&self, marker: &str) -> Option<String> {
        self.doc
            .lock()
            .styles
            .iter()
            .find(|(id, _)| id == marker)
            .map(|(_, css)| css.clone())
    }
}

impl HostPage for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.doc.lock().elements.contains_key(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(element) = self.doc.lock().elements.get_mut(id) {
            element.inner_html = html.to_string();
        }
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.doc.lock().elements.get_mut(id) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(element) = self.doc.lock().elements.get_mut(id) {
            if visible {
                element.classes.insert(SHOW_CLASS.to_string());
                element.opacity = Some(1.0);
            } else {
                element.classes.remove(SHOW_CLASS);
                element.opacity = Some(0.0);
            }
        }
    }

    fn has_style(&self, marker: &str) -> bool {
        self.doc.lock().styles.iter().any(|(id, _)| id == marker)
    }

    fn inject_style(&self, marker: &str, css: &str) {
        self.doc
            .lock()
            .styles
            .push((marker.to_string(), css.to_string()));
    }

    fn contains(&self, ancestor: &str, target: &ClickTarget) -> bool {
        let Some(mut current) = target.id().map(str::to_string) else {
            return false;
        };
        let doc = self.doc.lock();
        // Bounded walk: a malformed parent cycle must not hang the click handler
        for _ in 0..=doc.elements.len() {
            if current == ancestor {
                return true;
            }
            match doc.elements.get(&current).and_then(|e| e.parent.clone()) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    fn lang(&self) -> Option<String> {
        self.doc.lock().lang.clone()
    }
}
