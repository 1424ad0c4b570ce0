// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! First-run setup checklist, independent of the guided tours.
//!
//! The checklist does not start tours itself; on reaching 100% it exposes a one-shot
//! completion event that the host wires to `TourRunner::start` with the default tour.

use std::fmt;

use crate::model::ChecklistItemId;

/// One setup task on the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    id: ChecklistItemId,
    title: String,
    description: String,
    action_label: String,
    done: bool,
}

impl ChecklistItem {
    pub fn new(
        id: ChecklistItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        action_label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            action_label: action_label.into(),
            done: false,
        }
    }

    pub fn id(&self) -> &ChecklistItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action_label(&self) -> &str {
        &self.action_label
    }

    pub fn done(&self) -> bool {
        self.done
    }
}

/// Small independent state machine: toggleable items plus a derived completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingChecklist {
    items: Vec<ChecklistItem>,
    completion_emitted: bool,
}

impl OnboardingChecklist {
    pub fn new(items: Vec<ChecklistItem>) -> Result<Self, ChecklistError> {
        for (position, item) in items.iter().enumerate() {
            if items[..position].iter().any(|other| other.id() == item.id()) {
                return Err(ChecklistError::DuplicateItemId { item_id: item.id().clone() });
            }
        }
        Ok(Self { items, completion_emitted: false })
    }

    /// The stock five-task setup list shown on first run.
    pub fn with_default_items() -> Self {
        let iid = |value: &str| ChecklistItemId::new(value).expect("checklist item id");
        Self::new(vec![
            ChecklistItem::new(
                iid("profile"),
                "Complete Your Profile",
                "Add your name, email, and profile picture",
                "Go to Profile",
            ),
            ChecklistItem::new(
                iid("connect-accounts"),
                "Connect Social Media Accounts",
                "Link your social media platforms for automated posting",
                "Connect Accounts",
            ),
            ChecklistItem::new(
                iid("first-content"),
                "Generate Your First Content",
                "Create AI-powered affiliate content",
                "Create Content",
            ),
            ChecklistItem::new(
                iid("affiliate-links"),
                "Add Affiliate Links",
                "Set up tracking for your affiliate programs",
                "Add Links",
            ),
            ChecklistItem::new(
                iid("first-post"),
                "Schedule Your First Post",
                "Share content across your social media platforms",
                "Schedule Post",
            ),
        ])
        .expect("default checklist ids are unique")
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Flips an item's done flag; unknown ids are ignored.
    pub fn toggle(&mut self, item_id: &ChecklistItemId) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == item_id) {
            item.done = !item.done;
        }
        if !self.is_complete() {
            // Re-arm the completion event if the user un-checks an item.
            self.completion_emitted = false;
        }
    }

    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    pub fn completion_percentage(&self) -> u8 {
        if self.items.is_empty() {
            return 100;
        }
        ((self.done_count() * 100 + self.items.len() / 2) / self.items.len()) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|item| item.done)
    }

    /// One-shot: returns `true` the first time it is polled after the checklist reaches
    /// 100%, then `false` until completion is re-entered.
    pub fn take_completed_event(&mut self) -> bool {
        if self.is_complete() && !self.completion_emitted {
            self.completion_emitted = true;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistError {
    DuplicateItemId { item_id: ChecklistItemId },
}

impl fmt::Display for ChecklistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateItemId { item_id } => {
                write!(f, "duplicate checklist item id '{item_id}'")
            }
        }
    }
}

impl std::error::Error for ChecklistError {}
