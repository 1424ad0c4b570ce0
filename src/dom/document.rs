// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::selector::{Compound, Selector};
use super::{Bounds, DomQuery, ElementHandle};

/// Builder-style element description used to populate a [`Document`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    bounds: Bounds,
    label: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    pub fn dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn bounds(mut self, top: f64, left: f64, width: f64, height: f64) -> Self {
        self.bounds = Bounds::new(top, left, width, height);
        self
    }

    /// Human-readable caption the demo shell renders inside the element's box.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<usize>,
}

impl Node {
    fn attr_value(&self, name: &str) -> Option<String> {
        if let Some(value) = self.element.attrs.get(name) {
            return Some(value.clone());
        }
        match name {
            "id" => self.element.dom_id.clone(),
            "class" if !self.element.classes.is_empty() => {
                Some(self.element.classes.join(" "))
            }
            _ => None,
        }
    }

    fn matches(&self, compound: &Compound) -> bool {
        if let Some(tag) = &compound.tag {
            if !self.element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if self.element.dom_id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        for class in &compound.classes {
            if !self.element.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        for attr in &compound.attrs {
            let value = self.attr_value(&attr.name);
            if !attr.op.matches(value.as_deref()) {
                return false;
            }
        }
        true
    }
}

/// In-memory element tree standing in for a mounted page.
///
/// Nodes are stored in document order; queries walk that order so `query_selector`
/// returns the first structural match, like the browser primitive it mirrors.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    highlighted: Option<u64>,
    scrolled_to: Option<u64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element, returning its handle. `parent` of `None` makes it a root.
    pub fn append(&mut self, element: Element, parent: Option<&ElementHandle>) -> ElementHandle {
        let parent_index = parent.map(|handle| handle.raw() as usize);
        let index = self.nodes.len();
        self.nodes.push(Node { element, parent: parent_index });
        ElementHandle::new(index as u64)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn query(&self, selector: &Selector) -> Option<ElementHandle> {
        let parts = selector.parts();
        (0..self.nodes.len())
            .find(|&index| self.matches_chain(index, parts))
            .map(|index| ElementHandle::new(index as u64))
    }

    fn matches_chain(&self, index: usize, parts: &[Compound]) -> bool {
        let (subject, ancestors) = match parts.split_last() {
            Some(split) => split,
            None => return false,
        };
        if !self.nodes[index].matches(subject) {
            return false;
        }

        // Each remaining compound must match some strict ancestor, outermost first.
        let mut remaining = ancestors;
        let mut cursor = self.nodes[index].parent;
        while let (Some(node_index), [.., innermost]) = (cursor, remaining) {
            if self.nodes[node_index].matches(innermost) {
                remaining = &remaining[..remaining.len() - 1];
            }
            cursor = self.nodes[node_index].parent;
        }
        remaining.is_empty()
    }

    pub fn bounds(&self, handle: &ElementHandle) -> Option<Bounds> {
        self.nodes.get(handle.raw() as usize).map(|node| node.element.bounds)
    }

    pub fn label(&self, handle: &ElementHandle) -> Option<&str> {
        self.nodes.get(handle.raw() as usize).and_then(|node| node.element.label.as_deref())
    }

    pub fn set_highlight(&mut self, handle: &ElementHandle) {
        if (handle.raw() as usize) < self.nodes.len() {
            self.highlighted = Some(handle.raw());
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    pub fn highlighted(&self) -> Option<ElementHandle> {
        self.highlighted.map(ElementHandle::new)
    }

    pub fn record_scroll(&mut self, handle: &ElementHandle) {
        if (handle.raw() as usize) < self.nodes.len() {
            self.scrolled_to = Some(handle.raw());
        }
    }

    pub fn scrolled_to(&self) -> Option<ElementHandle> {
        self.scrolled_to.map(ElementHandle::new)
    }

    /// All handles in document order; the demo shell uses this to draw page boxes.
    pub fn handles(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        (0..self.nodes.len()).map(|index| ElementHandle::new(index as u64))
    }
}

/// Cloneable, shared handle over a [`Document`], implementing the [`DomQuery`] seam.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
}

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self { inner: Arc::new(Mutex::new(document)) }
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        let mut document = self.inner.lock().expect("document lock poisoned");
        f(&mut document)
    }
}

impl DomQuery for SharedDocument {
    fn query_selector(&self, selector: &Selector) -> Option<ElementHandle> {
        self.with(|document| document.query(selector))
    }

    fn bounds_of(&self, handle: &ElementHandle) -> Option<Bounds> {
        self.with(|document| document.bounds(handle))
    }

    fn scroll_into_view(&self, handle: &ElementHandle) {
        self.with(|document| document.record_scroll(handle));
    }

    fn apply_highlight(&self, handle: &ElementHandle) {
        self.with(|document| document.set_highlight(handle));
    }

    fn clear_highlight(&self) {
        self.with(Document::clear_highlight);
    }
}
