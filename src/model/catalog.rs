// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::ids::TourId;
use super::tour::Tour;

/// The static registry of tours, read-only after construction.
///
/// Tours keep their definition order; external id vocabularies (e.g. the selection UI's)
/// are mapped onto catalog ids elsewhere so the catalog stays the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourCatalog {
    tours: Vec<Tour>,
    index: BTreeMap<TourId, usize>,
}

impl TourCatalog {
    pub fn new(tours: Vec<Tour>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        for (position, tour) in tours.iter().enumerate() {
            if index.insert(tour.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateTourId { tour_id: tour.id().clone() });
            }
        }
        Ok(Self { tours, index })
    }

    pub fn get(&self, tour_id: &TourId) -> Option<&Tour> {
        self.index.get(tour_id).map(|&position| &self.tours[position])
    }

    pub fn contains(&self, tour_id: &TourId) -> bool {
        self.index.contains_key(tour_id)
    }

    /// All tours in stable definition order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Category names in first-appearance order, de-duplicated.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for tour in &self.tours {
            if !categories.contains(&tour.category()) {
                categories.push(tour.category());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateTourId { tour_id: TourId },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTourId { tour_id } => {
                write!(f, "duplicate tour id '{tour_id}' in catalog")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::{CatalogError, TourCatalog};
    use crate::model::fixtures;
    use crate::model::TourId;

    fn tid(value: &str) -> TourId {
        TourId::new(value).expect("tour id")
    }

    #[test]
    fn get_finds_tours_by_id() {
        let catalog = fixtures::two_tour_catalog();
        assert!(catalog.get(&tid("dashboard")).is_some());
        assert!(catalog.get(&tid("analytics")).is_some());
        assert!(catalog.get(&tid("bogus")).is_none());
    }

    #[test]
    fn tours_keep_definition_order() {
        let catalog = fixtures::two_tour_catalog();
        let ids: Vec<&str> = catalog.tours().iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["dashboard", "analytics"]);
    }

    #[test]
    fn categories_are_deduplicated_in_first_appearance_order() {
        let catalog = fixtures::two_tour_catalog();
        assert_eq!(catalog.categories(), vec!["Getting Started", "Analytics"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tour = fixtures::minimal_tour("twice");
        let result = TourCatalog::new(vec![tour.clone(), tour]);
        assert_eq!(result, Err(CatalogError::DuplicateTourId { tour_id: tid("twice") }));
    }

    #[test]
    fn every_fixture_step_is_anchored_or_centered() {
        let catalog = fixtures::two_tour_catalog();
        for tour in catalog.tours() {
            assert!(!tour.steps().is_empty());
            for step in tour.steps() {
                assert!(
                    step.is_anchored()
                        || step.preferred_side() == crate::model::PreferredSide::Center
                );
            }
        }
    }
}
