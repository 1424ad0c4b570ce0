// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tour selection UI model.
//!
//! Presents the catalog grouped and filtered for a selection surface, annotated with
//! completion state. The mapping from external tour vocabularies (onboarding hand-offs,
//! legacy selection ids) onto catalog ids lives here, not in the catalog, so the catalog
//! stays the single source of truth.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::model::{Difficulty, TourCatalog, TourId};
use crate::store::{ProgressStore, StorageBackend};

/// Category filter for [`SelectionModel::filtered_tours`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter<'a> {
    #[default]
    All,
    Category(&'a str),
}

/// One catalog tour annotated for display on a selection card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSummary {
    pub tour_id: TourId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub step_count: usize,
    pub estimated_minutes: u32,
    pub difficulty: Difficulty,
    pub completed: bool,
}

/// Aggregate completion numbers for the selection header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub percent: u8,
}

/// Exhaustive mapping from an external tour-id vocabulary onto catalog ids.
///
/// Every entry is listed individually and verified against the catalog at construction;
/// ids outside the mapping resolve to the designated default tour. There is no implicit
/// many-to-one collapsing beyond what the entries spell out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTourMap {
    entries: BTreeMap<String, TourId>,
    default_tour: TourId,
}

impl ExternalTourMap {
    pub fn verified(
        entries: impl IntoIterator<Item = (String, TourId)>,
        default_tour: TourId,
        catalog: &TourCatalog,
    ) -> Result<Self, SelectError> {
        if !catalog.contains(&default_tour) {
            return Err(SelectError::UnknownDefaultTour { tour_id: default_tour });
        }

        let mut map = BTreeMap::new();
        for (external_id, tour_id) in entries {
            if !catalog.contains(&tour_id) {
                return Err(SelectError::UnknownMappedTour { external_id, tour_id });
            }
            if map.insert(external_id.clone(), tour_id).is_some() {
                return Err(SelectError::DuplicateExternalId { external_id });
            }
        }
        Ok(Self { entries: map, default_tour })
    }

    /// Resolves an external id, falling back to the default tour for unknown ids.
    pub fn resolve(&self, external_id: &str) -> &TourId {
        match self.entries.get(external_id) {
            Some(tour_id) => tour_id,
            None => {
                warn!(external_id, default = %self.default_tour, "unknown external tour id; using default");
                &self.default_tour
            }
        }
    }

    pub fn default_tour(&self) -> &TourId {
        &self.default_tour
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TourId)> {
        self.entries.iter().map(|(external, tour)| (external.as_str(), tour))
    }
}

/// Read-only view model over the catalog and progress record.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    catalog: Arc<TourCatalog>,
    external: ExternalTourMap,
}

impl SelectionModel {
    pub fn new(catalog: Arc<TourCatalog>, external: ExternalTourMap) -> Self {
        Self { catalog, external }
    }

    pub fn catalog(&self) -> &TourCatalog {
        &self.catalog
    }

    pub fn external(&self) -> &ExternalTourMap {
        &self.external
    }

    /// Catalog tours in stable order, filtered by exact category and case-insensitive
    /// substring search over title and description.
    pub fn filtered_tours<S: StorageBackend>(
        &self,
        progress: &ProgressStore<S>,
        category: CategoryFilter<'_>,
        search_text: &str,
    ) -> Vec<TourSummary> {
        let needle = search_text.trim().to_lowercase();

        self.catalog
            .tours()
            .iter()
            .filter(|tour| match category {
                CategoryFilter::All => true,
                CategoryFilter::Category(name) => tour.category() == name,
            })
            .filter(|tour| {
                needle.is_empty()
                    || tour.title().to_lowercase().contains(&needle)
                    || tour.description().to_lowercase().contains(&needle)
            })
            .map(|tour| TourSummary {
                tour_id: tour.id().clone(),
                title: tour.title().to_owned(),
                description: tour.description().to_owned(),
                category: tour.category().to_owned(),
                step_count: tour.step_count(),
                estimated_minutes: tour.estimated_minutes(),
                difficulty: tour.difficulty(),
                completed: progress.is_complete(tour.id()),
            })
            .collect()
    }

    pub fn completion_stats<S: StorageBackend>(
        &self,
        progress: &ProgressStore<S>,
    ) -> CompletionStats {
        let total = self.catalog.len();
        let completed =
            self.catalog.tours().iter().filter(|tour| progress.is_complete(tour.id())).count();
        let percent = if total == 0 {
            0
        } else {
            ((completed * 100 + total / 2) / total) as u8
        };
        CompletionStats { total, completed, percent }
    }

    /// External-vocabulary entry point (e.g. an onboarding hand-off id).
    pub fn resolve_external(&self, external_id: &str) -> &TourId {
        self.external.resolve(external_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    UnknownDefaultTour { tour_id: TourId },
    UnknownMappedTour { external_id: String, tour_id: TourId },
    DuplicateExternalId { external_id: String },
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDefaultTour { tour_id } => {
                write!(f, "default tour '{tour_id}' is not in the catalog")
            }
            Self::UnknownMappedTour { external_id, tour_id } => {
                write!(f, "external id '{external_id}' maps to unknown tour '{tour_id}'")
            }
            Self::DuplicateExternalId { external_id } => {
                write!(f, "external id '{external_id}' is mapped twice")
            }
        }
    }
}

impl std::error::Error for SelectError {}
