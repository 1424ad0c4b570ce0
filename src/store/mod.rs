// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable client-side persistence.
//!
//! The store module provides the key-value storage seam shared with the host shell plus
//! the progress record tracking which tours a user has finished.

pub mod progress;

pub use progress::{
    FileStorage, MemoryStorage, ProgressStore, StorageBackend, StoreError, WriteDurability,
    COMPLETED_TOURS_KEY,
};
