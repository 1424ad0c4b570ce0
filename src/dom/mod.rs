// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! DOM collaborator seam.
//!
//! The tour engine never talks to a real browser; it talks to anything implementing
//! [`DomQuery`]. The crate ships an in-memory [`Document`] tree with a small CSS-subset
//! selector engine, used by the demo shell and by tests.

pub mod document;
pub mod selector;

pub use document::{Document, Element, SharedDocument};
pub use selector::{Selector, SelectorError};

/// Viewport-relative bounding box of an element, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Opaque reference to an element issued by the backing document.
///
/// Handles stay valid for the lifetime of the document that issued them; geometry is
/// never cached on the handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(u64);

impl ElementHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// `querySelector`/`getBoundingClientRect`-equivalent backing primitive.
///
/// `query_selector` and `bounds_of` only read the document. `apply_highlight` and
/// `clear_highlight` are the only visible mutations and are kept here so the runner's
/// transition logic never touches element styling directly.
pub trait DomQuery {
    fn query_selector(&self, selector: &Selector) -> Option<ElementHandle>;

    fn bounds_of(&self, handle: &ElementHandle) -> Option<Bounds>;

    /// Best-effort; failure to scroll is not an error.
    fn scroll_into_view(&self, handle: &ElementHandle);

    fn apply_highlight(&self, handle: &ElementHandle);

    /// Idempotent; safe to call when nothing is highlighted.
    fn clear_highlight(&self);
}
