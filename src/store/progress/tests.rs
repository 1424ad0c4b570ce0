// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{
    FileStorage, MemoryStorage, ProgressStore, StorageBackend, StoreError, WriteDurability,
    COMPLETED_TOURS_KEY,
};
use crate::model::TourId;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("cicerone-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct FileStoreCtx {
    tmp: TempDir,
    storage: FileStorage,
}

impl FileStoreCtx {
    fn new() -> Self {
        let tmp = TempDir::new("progress");
        let storage = FileStorage::new(tmp.path());
        Self { tmp, storage }
    }
}

#[fixture]
fn ctx() -> FileStoreCtx {
    FileStoreCtx::new()
}

fn tid(value: &str) -> TourId {
    TourId::new(value).unwrap()
}

#[test]
fn mark_complete_is_idempotent_set_semantics() {
    let mut store = ProgressStore::new(MemoryStorage::new());
    let dashboard = tid("dashboard");

    assert!(!store.is_complete(&dashboard));
    store.mark_complete(&dashboard).unwrap();
    store.mark_complete(&dashboard).unwrap();

    assert!(store.is_complete(&dashboard));
    assert_eq!(store.all_completed().len(), 1);
}

#[test]
fn unknown_tour_is_not_complete() {
    let store = ProgressStore::new(MemoryStorage::new());
    assert!(!store.is_complete(&tid("anything")));
    assert!(store.all_completed().is_empty());
}

#[test]
fn corrupt_stored_value_degrades_to_empty() {
    let mut storage = MemoryStorage::new();
    storage.set(COMPLETED_TOURS_KEY, "not json at all").unwrap();

    let store = ProgressStore::new(storage);
    assert!(store.all_completed().is_empty());
    assert!(!store.is_complete(&tid("dashboard")));
}

#[test]
fn invalid_ids_in_stored_array_are_skipped() {
    let mut storage = MemoryStorage::new();
    storage.set(COMPLETED_TOURS_KEY, r#"["dashboard", "", "a/b", "analytics"]"#).unwrap();

    let store = ProgressStore::new(storage);
    let completed = store.all_completed();
    assert_eq!(completed.len(), 2);
    assert!(completed.contains(&tid("dashboard")));
    assert!(completed.contains(&tid("analytics")));
}

#[rstest]
fn file_storage_round_trips_across_instances(ctx: FileStoreCtx) {
    let mut store = ProgressStore::new(ctx.storage.clone());
    store.mark_complete(&tid("dashboard")).unwrap();
    store.mark_complete(&tid("analytics")).unwrap();

    // Simulated reload: a fresh store over the same directory.
    let reloaded = ProgressStore::new(FileStorage::new(ctx.tmp.path()));
    assert!(reloaded.is_complete(&tid("dashboard")));
    assert!(reloaded.is_complete(&tid("analytics")));
    assert!(!reloaded.is_complete(&tid("social-media")));
}

#[rstest]
fn file_storage_preserves_foreign_keys(ctx: FileStoreCtx) {
    let mut storage = ctx.storage.clone();
    storage.set("user", "demo@example.com").unwrap();
    storage.set("onboarding_completed", "true").unwrap();

    let mut store = ProgressStore::new(storage);
    store.mark_complete(&tid("dashboard")).unwrap();

    let reread = FileStorage::new(ctx.tmp.path());
    assert_eq!(reread.get("user").unwrap().as_deref(), Some("demo@example.com"));
    assert_eq!(reread.get("onboarding_completed").unwrap().as_deref(), Some("true"));
    assert!(reread.get(COMPLETED_TOURS_KEY).unwrap().is_some());
}

#[rstest]
fn file_storage_missing_file_reads_as_absent(ctx: FileStoreCtx) {
    assert!(ctx.storage.get(COMPLETED_TOURS_KEY).unwrap().is_none());
}

#[rstest]
fn file_storage_rejects_corrupt_backing_file_without_clobbering(ctx: FileStoreCtx) {
    std::fs::write(ctx.storage.storage_path(), "{ definitely not json").unwrap();

    let mut storage = ctx.storage.clone();
    assert!(matches!(storage.get("user"), Err(StoreError::Corrupt { .. })));
    assert!(matches!(
        storage.set("user", "demo@example.com"),
        Err(StoreError::Corrupt { .. })
    ));

    // The corrupt file is left untouched for inspection.
    let raw = std::fs::read_to_string(ctx.storage.storage_path()).unwrap();
    assert_eq!(raw, "{ definitely not json");
}

#[rstest]
fn durable_writes_persist_like_fast_writes(ctx: FileStoreCtx) {
    let mut storage =
        FileStorage::new(ctx.tmp.path()).with_durability(WriteDurability::Durable);
    storage.set("user", "demo@example.com").unwrap();

    let reread = FileStorage::new(ctx.tmp.path());
    assert_eq!(reread.get("user").unwrap().as_deref(), Some("demo@example.com"));
}
