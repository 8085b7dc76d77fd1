// ABOUTME: Integration tests for the file-backed recently-viewed ledger
// ABOUTME: Covers persistence across ledger instances and fail-open reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(missing_docs, clippy::unwrap_used)]

use ladle::models::Recipe;
use ladle::recently_viewed::{FileStorage, RecentlyViewedLedger, MAX_RECENTLY_VIEWED};
use uuid::Uuid;

fn recipe(n: u128, title: &str) -> Recipe {
    Recipe {
        id: Uuid::from_u128(n),
        title: title.to_owned(),
        ..Recipe::default()
    }
}

#[test]
fn test_ledger_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recently_viewed.json");

    let ledger = RecentlyViewedLedger::new(FileStorage::new(&path));
    ledger.record(&recipe(1, "Pho"));
    ledger.record(&recipe(2, "Ramen"));

    // A fresh ledger over the same file sees the same sequence
    let reopened = RecentlyViewedLedger::new(FileStorage::new(&path));
    let titles: Vec<String> = reopened.read().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Ramen", "Pho"]);
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = RecentlyViewedLedger::new(FileStorage::new(dir.path().join("absent.json")));
    assert!(ledger.read().is_empty());
}

#[test]
fn test_corrupt_file_fails_open_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recently_viewed.json");
    std::fs::write(&path, "{ definitely not a ledger").unwrap();

    let ledger = RecentlyViewedLedger::new(FileStorage::new(&path));
    assert!(ledger.read().is_empty());

    // Recording over corrupt data starts a fresh ledger
    ledger.record(&recipe(7, "Congee"));
    assert_eq!(ledger.read().len(), 1);
}

#[test]
fn test_cap_holds_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recently_viewed.json");

    let ledger = RecentlyViewedLedger::new(FileStorage::new(&path));
    for n in 1..=15 {
        ledger.record(&recipe(n, &format!("recipe {n}")));
    }

    let reopened = RecentlyViewedLedger::new(FileStorage::new(&path));
    assert_eq!(reopened.read().len(), MAX_RECENTLY_VIEWED);
    assert_eq!(reopened.ids()[0], Uuid::from_u128(15));
}
