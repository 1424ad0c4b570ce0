// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::TourCatalog;
use super::ids::TourId;
use super::tour::{PreferredSide, Tour, TourStep};

fn tid(value: &str) -> TourId {
    TourId::new(value).expect("tour id")
}

fn step(selector: &str, title: &str, side: PreferredSide) -> TourStep {
    TourStep::new([selector.to_owned()], title, format!("{title} body"), side)
        .expect("valid step")
}

pub(crate) fn minimal_tour(id: &str) -> Tour {
    Tour::new(
        tid(id),
        "Minimal",
        "/dashboard",
        vec![TourStep::informational("Welcome", "A single informational step")],
    )
    .expect("valid tour")
}

/// A four-step dashboard tour plus a one-step analytics tour on a different page.
pub(crate) fn two_tour_catalog() -> TourCatalog {
    let dashboard = Tour::new(
        tid("dashboard"),
        "Dashboard Overview",
        "/dashboard",
        vec![
            step("[data-testid='stats-cards']", "Overview Cards", PreferredSide::Bottom),
            step(".revenue-card", "Revenue Tracking", PreferredSide::Bottom),
            step(".visitors-card", "Visitor Analytics", PreferredSide::Left),
            step(".recent-activity", "Recent Activity", PreferredSide::Top),
        ],
    )
    .expect("valid tour")
    .with_description("Learn how to navigate your dashboard and understand key metrics")
    .with_category("Getting Started");

    let analytics = Tour::new(
        tid("analytics"),
        "Conversion Funnel",
        "/dashboard/analytics",
        vec![step(".conversion-funnel", "Conversion Funnel", PreferredSide::Left)],
    )
    .expect("valid tour")
    .with_description("Analyze your customer journey from first click to final conversion")
    .with_category("Analytics");

    TourCatalog::new(vec![dashboard, analytics]).expect("valid catalog")
}
