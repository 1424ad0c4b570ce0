// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cicerone — a guided product-tour engine with a terminal demo shell.
//!
//! The core is UI-agnostic: a static tour catalog, an element locator over a
//! `querySelector`-style seam, a tour runner state machine, and a durable progress
//! store. The `tui` module wires it all into a ratatui demo application.

pub mod dom;
pub mod locator;
pub mod model;
pub mod onboarding;
pub mod runner;
pub mod select;
pub mod store;
pub mod tui;
