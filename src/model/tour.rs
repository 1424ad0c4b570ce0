// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;

use super::ids::TourId;

/// Placement hint for the step overlay relative to the highlighted target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredSide {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Rough difficulty grading shown on selection cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Ordered candidate selectors for one step; the first one that matches wins.
pub type SelectorList = SmallVec<[String; 3]>;

/// One highlighted-element-plus-text unit within a [`Tour`].
///
/// A step may carry several candidate selectors as fallbacks for markup variants. A step
/// without any selector is an informational step and must be center-placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourStep {
    target_selectors: SelectorList,
    title: String,
    body: String,
    preferred_side: PreferredSide,
}

impl TourStep {
    pub fn new(
        target_selectors: impl IntoIterator<Item = String>,
        title: impl Into<String>,
        body: impl Into<String>,
        preferred_side: PreferredSide,
    ) -> Result<Self, TourDefError> {
        let target_selectors: SelectorList = target_selectors.into_iter().collect();
        let title = title.into();
        if target_selectors.is_empty() && preferred_side != PreferredSide::Center {
            return Err(TourDefError::UnanchoredStepNotCentered { step_title: title });
        }
        Ok(Self { target_selectors, title, body: body.into(), preferred_side })
    }

    /// A non-anchored, center-placed step (e.g. an intro or completion card).
    pub fn informational(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            target_selectors: SelectorList::new(),
            title: title.into(),
            body: body.into(),
            preferred_side: PreferredSide::Center,
        }
    }

    pub fn target_selectors(&self) -> &[String] {
        &self.target_selectors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn preferred_side(&self) -> PreferredSide {
        self.preferred_side
    }

    pub fn is_anchored(&self) -> bool {
        !self.target_selectors.is_empty()
    }
}

/// A named, ordered sequence of steps guiding a user through one page or feature area.
///
/// Tours are defined statically at process start as part of the catalog and are immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    id: TourId,
    title: String,
    description: String,
    category: String,
    page: String,
    difficulty: Difficulty,
    estimated_minutes: u32,
    steps: Vec<TourStep>,
}

impl Tour {
    pub fn new(
        id: TourId,
        title: impl Into<String>,
        page: impl Into<String>,
        steps: Vec<TourStep>,
    ) -> Result<Self, TourDefError> {
        if steps.is_empty() {
            return Err(TourDefError::NoSteps { tour_id: id });
        }
        Ok(Self {
            id,
            title: title.into(),
            description: String::new(),
            category: "General".to_owned(),
            page: page.into(),
            difficulty: Difficulty::Beginner,
            estimated_minutes: 3,
            steps,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_estimated_minutes(mut self, estimated_minutes: u32) -> Self {
        self.estimated_minutes = estimated_minutes;
        self
    }

    pub fn id(&self) -> &TourId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The route this tour's steps expect to run on.
    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourDefError {
    NoSteps { tour_id: TourId },
    UnanchoredStepNotCentered { step_title: String },
}

impl fmt::Display for TourDefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSteps { tour_id } => {
                write!(f, "tour '{tour_id}' must have at least one step")
            }
            Self::UnanchoredStepNotCentered { step_title } => {
                write!(f, "step '{step_title}' has no target selector and must be center-placed")
            }
        }
    }
}

impl std::error::Error for TourDefError {}
