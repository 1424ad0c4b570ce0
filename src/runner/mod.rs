// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The tour state machine.
//!
//! The runner owns "which tour, which step, is it visible" and drives every transition.
//! State changes are synchronous; locating a step's target is asynchronous and
//! re-entrancy-safe: transitions that need a (re)locate hand back a [`LocateTicket`]
//! carrying a monotonically increasing token, and a resolution whose token no longer
//! matches the runner's current token is discarded. `cancel` therefore invalidates any
//! in-flight locate synchronously, and no transition ever waits on the DOM.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::dom::DomQuery;
use crate::locator::{ElementLocator, Highlighter, LocateOutcome};
use crate::model::{
    HighlightGeometry, PreferredSide, StepCursor, TourCatalog, TourId, TourRunState,
};
use crate::store::{ProgressStore, StorageBackend};

/// Client-side router collaborator. Any history-style router satisfies this.
pub trait Router {
    fn current_path(&self) -> String;

    fn navigate_to(&mut self, path: &str);
}

/// Externally observable runner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    Idle,
    AwaitingNavigation,
    Active(usize),
    Completed,
}

/// Tunables for timing and the mid-tour navigation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Upper bound on waiting for a step target to mount.
    pub locate_timeout: Duration,
    /// Upper bound on waiting for a route change to settle before proceeding best-effort.
    pub navigation_timeout: Duration,
    /// Mid-tour navigation policy: `true` hides the overlay and resumes the same step
    /// when the user returns to the tour's page; `false` cancels the tour on leaving.
    pub resume_on_return: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            locate_timeout: Duration::from_millis(800),
            navigation_timeout: Duration::from_millis(1200),
            resume_on_return: true,
        }
    }
}

/// A pending locate attempt for one step, guarded by a transition token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateTicket {
    token: u64,
    step_index: usize,
    selectors: Vec<String>,
    timeout: Duration,
}

impl LocateTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Result of a successful `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Already on the tour's page; the ticket (if any) locates step 0.
    Started { ticket: Option<LocateTicket> },
    /// Navigation to the tour's page was issued; the runner waits for `route_changed`
    /// or `navigation_timed_out`.
    AwaitingNavigation { page: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    UnknownTourId { tour_id: TourId },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTourId { tour_id } => {
                write!(f, "cannot start unknown tour '{tour_id}'")
            }
        }
    }
}

impl std::error::Error for StartError {}

/// Display content for the overlay: the active step, or the terminal completion card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCard {
    pub title: String,
    pub body: String,
    pub preferred_side: PreferredSide,
    /// `None` for the completion card.
    pub step_index: Option<usize>,
    pub step_count: usize,
}

/// The consolidated tour runner.
#[derive(Debug)]
pub struct TourRunner<D: DomQuery, R: Router, S: StorageBackend> {
    catalog: Arc<TourCatalog>,
    locator: ElementLocator<D>,
    highlighter: Highlighter<D>,
    progress: ProgressStore<S>,
    router: R,
    config: RunnerConfig,
    session: Option<TourRunState>,
    awaiting_navigation: bool,
    token: u64,
    selection_requested: bool,
}

impl<D, R, S> TourRunner<D, R, S>
where
    D: DomQuery + Clone,
    R: Router,
    S: StorageBackend,
{
    pub fn new(
        catalog: Arc<TourCatalog>,
        dom: D,
        router: R,
        progress: ProgressStore<S>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            catalog,
            locator: ElementLocator::new(dom.clone()),
            highlighter: Highlighter::new(dom),
            progress,
            router,
            config,
            session: None,
            awaiting_navigation: false,
            token: 0,
            selection_requested: false,
        }
    }

    pub fn phase(&self) -> RunnerPhase {
        match &self.session {
            None => RunnerPhase::Idle,
            Some(_) if self.awaiting_navigation => RunnerPhase::AwaitingNavigation,
            Some(session) => match session.cursor() {
                StepCursor::Step(index) => RunnerPhase::Active(index),
                StepCursor::Completed => RunnerPhase::Completed,
            },
        }
    }

    pub fn state(&self) -> Option<&TourRunState> {
        self.session.as_ref()
    }

    pub fn catalog(&self) -> &Arc<TourCatalog> {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Starts a tour, implicitly cancelling any in-flight one (last-writer-wins).
    ///
    /// An unknown id leaves the runner `Idle`; fallback-to-default policies belong to
    /// the selection layer, not here.
    pub fn start(&mut self, tour_id: &TourId) -> Result<StartOutcome, StartError> {
        self.cancel();

        let Some(tour) = self.catalog.get(tour_id) else {
            warn!(%tour_id, "start requested for unknown tour id");
            return Err(StartError::UnknownTourId { tour_id: tour_id.clone() });
        };
        let page = tour.page().to_owned();

        self.session = Some(TourRunState::new(tour_id.clone()));

        if self.router.current_path() != page {
            self.awaiting_navigation = true;
            self.router.navigate_to(&page);
            Ok(StartOutcome::AwaitingNavigation { page })
        } else {
            Ok(StartOutcome::Started { ticket: self.enter_step(0) })
        }
    }

    /// Advances to the next step, or into `Completed` from the last one.
    ///
    /// Completion marks the tour done in the progress store exactly once and keeps the
    /// overlay visible on the terminal completion card; a further `next` is a no-op.
    pub fn next(&mut self) -> Option<LocateTicket> {
        if self.awaiting_navigation {
            return None;
        }
        let session = self.session.as_ref()?;
        let step_count = self.catalog.get(session.tour_id())?.step_count();

        match session.cursor() {
            StepCursor::Completed => None,
            StepCursor::Step(index) if index + 1 >= step_count => {
                self.complete();
                None
            }
            StepCursor::Step(index) => self.enter_step(index + 1),
        }
    }

    /// Steps back; a no-op at step 0 and on the completion card.
    pub fn previous(&mut self) -> Option<LocateTicket> {
        if self.awaiting_navigation {
            return None;
        }
        let session = self.session.as_ref()?;
        match session.cursor() {
            StepCursor::Step(index) if index > 0 => self.enter_step(index - 1),
            _ => None,
        }
    }

    /// Tears down the run: hides the overlay, clears the highlight, and invalidates any
    /// pending locate attempt. Never marks the tour complete.
    pub fn cancel(&mut self) {
        self.bump_token();
        self.highlighter.clear();
        self.session = None;
        self.awaiting_navigation = false;
    }

    /// Cancels the run and asks the host to open the tour selection surface.
    pub fn jump_to_selection(&mut self) {
        self.cancel();
        self.selection_requested = true;
    }

    /// One-shot: `true` when `jump_to_selection` asked for the selection surface.
    pub fn take_selection_request(&mut self) -> bool {
        std::mem::take(&mut self.selection_requested)
    }

    /// Informs the runner that the current route settled on `path`.
    ///
    /// While awaiting navigation this enters step 0 once the expected page arrives.
    /// While active, leaving the tour's page either pauses (overlay hidden, state kept,
    /// resumed on return) or cancels, per [`RunnerConfig::resume_on_return`].
    pub fn route_changed(&mut self, path: &str) -> Option<LocateTicket> {
        let session = self.session.as_ref()?;
        let tour_page = self.catalog.get(session.tour_id())?.page().to_owned();
        let cursor = session.cursor();

        if self.awaiting_navigation {
            if path == tour_page {
                self.awaiting_navigation = false;
                return self.enter_step(0);
            }
            // Some other route settled first; the navigation timeout decides.
            return None;
        }

        match cursor {
            StepCursor::Completed => None,
            StepCursor::Step(index) => {
                if path == tour_page {
                    // Back on (or still on) the tour's page: relocate the current step.
                    self.enter_step(index)
                } else if self.config.resume_on_return {
                    self.bump_token();
                    self.highlighter.clear();
                    let session = self.session.as_mut()?;
                    session.set_visible(false);
                    session.set_highlight(None);
                    None
                } else {
                    self.cancel();
                    None
                }
            }
        }
    }

    /// Proceeds best-effort into step 0 when navigation never settled in time.
    pub fn navigation_timed_out(&mut self) -> Option<LocateTicket> {
        if !self.awaiting_navigation {
            return None;
        }
        warn!("navigation did not settle before timeout; locating best-effort");
        self.awaiting_navigation = false;
        self.enter_step(0)
    }

    /// Applies a finished locate attempt. Results from a superseded transition are
    /// discarded silently; this is the only guard rapid `next` double-clicks need.
    pub fn apply_located(&mut self, ticket: &LocateTicket, outcome: LocateOutcome) {
        if ticket.token != self.token {
            debug!(
                ticket_token = ticket.token,
                current_token = self.token,
                "discarding stale locate result"
            );
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match outcome {
            LocateOutcome::Found(handle) => {
                self.locator.scroll_into_view(&handle);
                let bounds = self.locator.bounds_of(&handle);
                self.highlighter.apply(&handle);
                session.set_highlight(Some(match bounds {
                    Some(bounds) => HighlightGeometry::Resolved(bounds),
                    None => HighlightGeometry::NotFound,
                }));
            }
            LocateOutcome::TimedOut => {
                warn!(
                    step_index = ticket.step_index,
                    "step target not found; rendering unanchored"
                );
                session.set_highlight(Some(HighlightGeometry::NotFound));
            }
        }
    }

    /// Convenience driver: awaits the ticket's locate attempt and applies the result.
    pub async fn resolve(&mut self, ticket: LocateTicket) {
        let outcome = self.locator.await_first(&ticket.selectors, ticket.timeout).await;
        self.apply_located(&ticket, outcome);
    }

    /// Overlay content for the current step or the completion card; `None` when `Idle`
    /// or awaiting navigation.
    pub fn current_card(&self) -> Option<StepCard> {
        if self.awaiting_navigation {
            return None;
        }
        let session = self.session.as_ref()?;
        let tour = self.catalog.get(session.tour_id())?;

        match session.cursor() {
            StepCursor::Step(index) => {
                let step = tour.steps().get(index)?;
                Some(StepCard {
                    title: step.title().to_owned(),
                    body: step.body().to_owned(),
                    preferred_side: step.preferred_side(),
                    step_index: Some(index),
                    step_count: tour.step_count(),
                })
            }
            StepCursor::Completed => Some(StepCard {
                title: "Tour complete!".to_owned(),
                body: format!(
                    "Great job! You finished the {} tour. Browse more tours or keep exploring \
                     the platform.",
                    tour.title()
                ),
                preferred_side: PreferredSide::Center,
                step_index: None,
                step_count: tour.step_count(),
            }),
        }
    }

    /// Enters `Completed`: invalidates any pending locate, drops the highlight, and
    /// records the finished tour. The session stays alive so the completion card renders
    /// until the user dismisses it.
    fn complete(&mut self) {
        self.bump_token();
        self.highlighter.clear();

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.set_cursor(StepCursor::Completed);
        session.set_visible(true);
        session.set_highlight(None);

        let tour_id = session.tour_id().clone();
        if let Err(err) = self.progress.mark_complete(&tour_id) {
            warn!(%tour_id, error = %err, "failed to persist tour completion");
        }
    }

    fn bump_token(&mut self) -> u64 {
        self.token = self.token.wrapping_add(1);
        self.token
    }

    /// Enters `Active(index)`: clears the previous highlight, makes the overlay
    /// visible, and hands back a locate ticket for anchored steps.
    fn enter_step(&mut self, index: usize) -> Option<LocateTicket> {
        let token = self.bump_token();
        self.highlighter.clear();

        let (selectors, anchored) = {
            let session = self.session.as_ref()?;
            let tour = self.catalog.get(session.tour_id())?;
            let step = tour.steps().get(index)?;
            (step.target_selectors().to_vec(), step.is_anchored())
        };

        let session = self.session.as_mut()?;
        session.set_cursor(StepCursor::Step(index));
        session.set_visible(true);
        session.set_highlight(None);

        if !anchored {
            return None;
        }
        Some(LocateTicket {
            token,
            step_index: index,
            selectors,
            timeout: self.config.locate_timeout,
        })
    }
}

#[cfg(test)]
mod tests;
