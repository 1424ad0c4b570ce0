// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::dom::Bounds;

use super::ids::TourId;

/// Position within the active tour: a concrete step, or the terminal completion display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCursor {
    Step(usize),
    Completed,
}

/// Last resolved geometry of the current step's target element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HighlightGeometry {
    Resolved(Bounds),
    NotFound,
}

/// The mutable session object for one tour run.
///
/// Created when a tour starts, mutated only by the runner's transition operations, and
/// dropped on cancel or completion acknowledgement. A run state always carries a concrete
/// tour id and step cursor; there is no partially-initialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRunState {
    tour_id: TourId,
    cursor: StepCursor,
    visible: bool,
    highlight: Option<HighlightGeometry>,
}

impl TourRunState {
    pub fn new(tour_id: TourId) -> Self {
        Self { tour_id, cursor: StepCursor::Step(0), visible: false, highlight: None }
    }

    pub fn tour_id(&self) -> &TourId {
        &self.tour_id
    }

    pub fn cursor(&self) -> StepCursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: StepCursor) {
        self.cursor = cursor;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn highlight(&self) -> Option<HighlightGeometry> {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Option<HighlightGeometry>) {
        self.highlight = highlight;
    }
}

#[cfg(test)]
mod tests {
    use super::{StepCursor, TourRunState};
    use crate::model::TourId;

    #[test]
    fn new_run_state_starts_at_step_zero_hidden() {
        let state = TourRunState::new(TourId::new("dashboard").expect("tour id"));
        assert_eq!(state.cursor(), StepCursor::Step(0));
        assert!(!state.visible());
        assert!(state.highlight().is_none());
    }
}
