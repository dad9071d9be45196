//! Integration tests for the document store
//!
//! Tests cover:
//! - Mushroom catalog listing and exact-name lookup
//! - Report create/get/delete
//! - Vote tallying, leader changes and credibility
//! - Optimistic concurrency under parallel votes

use myco_common::db::{SeedData, MAX_VOTE_ATTEMPTS};
use myco_common::{Error, Location, NewReport, ObjectId, SpeciesVote, Store};

const TEST_DATA: &str = include_str!("../../data/test-data.json");

/// Test helper: in-memory store loaded with the shared test data set
async fn seeded_store() -> Store {
    let store = Store::in_memory().await.expect("in-memory store should open");
    let data = SeedData::from_json_str(TEST_DATA).expect("test data should parse");
    store.seed(&data).await.expect("seeding should succeed");
    store
}

fn submission(species: &str) -> NewReport {
    NewReport {
        location: Some(Location { lat: 0.0, long: 0.0 }),
        img_url: Some("https://example.com/new.jpg".to_string()),
        username: Some("tester".to_string()),
        time_stamp: Some("2023-01-01T00:00:00Z".to_string()),
        notes: None,
        species: Some(SpeciesVote::new(species, 1)),
        prevalence: None,
    }
}

// =============================================================================
// Mushroom catalog
// =============================================================================

#[tokio::test]
async fn test_list_mushrooms_returns_whole_catalog() {
    let store = seeded_store().await;
    let mushrooms = store.list_mushrooms().await.unwrap();

    assert_eq!(mushrooms.len(), 5);
    assert_eq!(mushrooms[0].latin_name, "Agaricus bisporus");
}

#[tokio::test]
async fn test_find_by_name_returns_every_exact_match() {
    let store = seeded_store().await;
    let matches = store.find_mushrooms_by_name("Common Mushroom").await.unwrap();

    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.common_name == "Common Mushroom"));
}

#[tokio::test]
async fn test_find_by_name_is_case_sensitive() {
    let store = seeded_store().await;
    let result = store.find_mushrooms_by_name("common mushroom").await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_species_exists() {
    let store = seeded_store().await;

    assert!(store.species_exists("Fly Agaric").await.unwrap());
    assert!(!store.species_exists("Not a Mushroom").await.unwrap());
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_reports_listed_in_insertion_order() {
    let store = seeded_store().await;
    let reports = store.list_reports().await.unwrap();

    let users: Vec<&str> = reports.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(users, ["user1", "user2", "user3"]);
}

#[tokio::test]
async fn test_create_report_opens_single_candidate_tally() {
    let store = seeded_store().await;
    let created = store
        .create_report(submission("Chanterelle").validate().unwrap())
        .await
        .unwrap();

    assert_eq!(created.species, SpeciesVote::new("Chanterelle", 1));
    assert_eq!(created.alternate_species, vec![SpeciesVote::new("Chanterelle", 1)]);
    assert_eq!(created.credibility, 100);
    assert_eq!(created.version, 0);

    let fetched = store.get_report(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(store.list_reports().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_unknown_report_is_not_found() {
    let store = seeded_store().await;
    let id = ObjectId::parse("63f4e4c9c133f17e6b7fe312").unwrap();

    assert!(matches!(store.get_report(id).await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_delete_returns_stored_document_and_removes_it() {
    let store = seeded_store().await;
    let target = store.list_reports().await.unwrap().remove(0);

    let deleted = store.delete_report(target.id).await.unwrap();
    assert_eq!(deleted, target);

    assert!(matches!(store.get_report(target.id).await, Err(Error::NotFound(_))));
    assert!(matches!(store.delete_report(target.id).await, Err(Error::NotFound(_))));
}

// =============================================================================
// Voting
// =============================================================================

#[tokio::test]
async fn test_vote_creates_new_leader() {
    let store = seeded_store().await;
    let target = store.list_reports().await.unwrap().remove(0);

    let updated = store.cast_vote(target.id, "Shaggy Ink Cap").await.unwrap();

    assert_eq!(updated.species, SpeciesVote::new("Shaggy Ink Cap", 2));
    assert_eq!(updated.credibility, 66);
    assert_eq!(
        updated.alternate_species,
        vec![
            SpeciesVote::new("Common Mushroom", 1),
            SpeciesVote::new("Shaggy Ink Cap", 2),
        ]
    );
    assert_eq!(updated.version, target.version + 1);

    // Everything other than the tally is untouched
    assert_eq!(updated.location, target.location);
    assert_eq!(updated.img_url, target.img_url);
    assert_eq!(updated.username, target.username);
    assert_eq!(updated.time_stamp, target.time_stamp);

    assert_eq!(store.get_report(target.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_vote_for_new_catalog_species_appends_candidate() {
    let store = seeded_store().await;
    let target = store.list_reports().await.unwrap().remove(2);

    let updated = store.cast_vote(target.id, "Fly Agaric").await.unwrap();

    assert_eq!(
        updated.alternate_species,
        vec![SpeciesVote::new("Chanterelle", 1), SpeciesVote::new("Fly Agaric", 1)]
    );
    assert_eq!(updated.species, SpeciesVote::new("Chanterelle", 1));
    assert_eq!(updated.credibility, 50);
}

#[tokio::test]
async fn test_vote_for_unknown_species_is_rejected_without_change() {
    let store = seeded_store().await;
    let target = store.list_reports().await.unwrap().remove(0);

    let result = store.cast_vote(target.id, "Not a Mushroom").await;
    assert!(matches!(result, Err(Error::UnknownSpecies(_))));

    assert_eq!(store.get_report(target.id).await.unwrap(), target);
}

#[tokio::test]
async fn test_vote_on_missing_report_is_not_found() {
    let store = seeded_store().await;
    let id = ObjectId::parse("63f4e4c9c133f17e6b7fe312").unwrap();

    let result = store.cast_vote(id, "Fly Agaric").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_sequential_votes_count_exactly() {
    let store = seeded_store().await;
    let target = store.list_reports().await.unwrap().remove(1);

    for _ in 0..5 {
        store.cast_vote(target.id, "Chanterelle").await.unwrap();
    }

    let report = store.get_report(target.id).await.unwrap();
    assert_eq!(
        report.alternate_species,
        vec![SpeciesVote::new("Fly Agaric", 3), SpeciesVote::new("Chanterelle", 6)]
    );
    assert_eq!(report.species, SpeciesVote::new("Chanterelle", 6));
    assert_eq!(report.credibility, 66);
    assert_eq!(report.version, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_votes_are_all_counted() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("votes.db")).await.unwrap();
    store
        .seed(&SeedData::from_json_str(TEST_DATA).unwrap())
        .await
        .unwrap();
    let target = store.list_reports().await.unwrap().remove(0);

    // Each lost race means another voter committed, so this many voters
    // always finish within the retry budget
    let voters = MAX_VOTE_ATTEMPTS;
    let handles: Vec<_> = (0..voters)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.cast_vote(target.id, "Fly Agaric").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().expect("vote should succeed");
    }

    let report = store.get_report(target.id).await.unwrap();
    let fly_agaric = report
        .alternate_species
        .iter()
        .find(|c| c.species == "Fly Agaric")
        .unwrap();
    assert_eq!(fly_agaric.votes as usize, voters);
    assert_eq!(report.version as usize, voters);
    assert_eq!(report.species.species, "Fly Agaric");

    store.close().await;
}
