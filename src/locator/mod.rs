// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Element location over the [`DomQuery`] seam.
//!
//! Locating is read-only; the visible highlight mutation is isolated in [`Highlighter`]
//! so it can be swapped for a different presentation without touching the runner.

use std::time::Duration;

use tracing::{debug, warn};

use crate::dom::{Bounds, DomQuery, ElementHandle, Selector};

const POLL_INTERVAL: Duration = Duration::from_millis(40);

/// Result of an [`ElementLocator::await_first`] attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    Found(ElementHandle),
    TimedOut,
}

/// Finds step targets by trying candidate selectors in order; first match wins.
#[derive(Debug, Clone)]
pub struct ElementLocator<D: DomQuery> {
    dom: D,
}

impl<D: DomQuery> ElementLocator<D> {
    pub fn new(dom: D) -> Self {
        Self { dom }
    }

    /// Tries each selector in order against the current document and returns the first
    /// structural match. Unparseable selectors are skipped with a diagnostic.
    pub fn find_first(&self, selectors: &[String]) -> Option<ElementHandle> {
        for raw in selectors {
            let selector = match Selector::parse(raw) {
                Ok(selector) => selector,
                Err(err) => {
                    warn!(selector = raw.as_str(), error = %err, "skipping unparseable selector");
                    continue;
                }
            };
            if let Some(handle) = self.dom.query_selector(&selector) {
                debug!(selector = raw.as_str(), "target resolved");
                return Some(handle);
            }
        }
        None
    }

    /// Viewport geometry, recomputed on demand (never cached across frames).
    pub fn bounds_of(&self, handle: &ElementHandle) -> Option<Bounds> {
        self.dom.bounds_of(handle)
    }

    /// Best-effort; failure to scroll is not an error.
    pub fn scroll_into_view(&self, handle: &ElementHandle) {
        self.dom.scroll_into_view(handle);
    }

    /// Polls the document until a candidate matches or the timeout elapses.
    ///
    /// Used after navigation, when step targets may not be mounted yet. Cancellation is
    /// the caller's concern: a stale result is discarded by the runner's transition
    /// token, so this loop never needs to be aborted mid-flight.
    pub async fn await_first(&self, selectors: &[String], timeout: Duration) -> LocateOutcome {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if let Some(handle) = self.find_first(selectors) {
                return LocateOutcome::Found(handle);
            }
            if tokio::time::Instant::now() >= deadline {
                warn!(?selectors, ?timeout, "target did not appear before timeout");
                return LocateOutcome::TimedOut;
            }
            tokio::time::sleep(POLL_INTERVAL.min(timeout)).await;
        }
    }
}

/// Owns the single visible highlight; always clears before (re)applying.
#[derive(Debug, Clone)]
pub struct Highlighter<D: DomQuery> {
    dom: D,
    active: Option<ElementHandle>,
}

impl<D: DomQuery> Highlighter<D> {
    pub fn new(dom: D) -> Self {
        Self { dom, active: None }
    }

    pub fn apply(&mut self, handle: &ElementHandle) {
        self.clear();
        self.dom.apply_highlight(handle);
        self.active = Some(handle.clone());
    }

    /// Idempotent; safe to call when nothing is highlighted.
    pub fn clear(&mut self) {
        self.dom.clear_highlight();
        self.active = None;
    }

    pub fn active(&self) -> Option<&ElementHandle> {
        self.active.as_ref()
    }
}
