// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: tours, the static catalog, and the per-run session state.

mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
mod ids;
mod run_state;
mod tour;

pub use catalog::{CatalogError, TourCatalog};
pub use ids::{ChecklistItemId, Id, IdError, TourId};
pub use run_state::{HighlightGeometry, StepCursor, TourRunState};
pub use tour::{Difficulty, PreferredSide, SelectorList, Tour, TourDefError, TourStep};
