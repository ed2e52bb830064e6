//! Approval dashboard tabs, single-row patches, and failure handling.

mod common;

use common::{init_tracing, sample_project};
use showntell::app::{ModerationDesk, StatusFilter};
use showntell::models::ModerationStatus;
use showntell::store::{CatalogStore, FailureSwitches, MemoryCatalog, StoreError};

async fn setup() -> (MemoryCatalog, ModerationDesk<MemoryCatalog>) {
    init_tracing();
    let store = MemoryCatalog::new();
    store
        .seed_project(sample_project("Pending Poster", ModerationStatus::Pending))
        .await;
    store
        .seed_project(sample_project("Approved Atlas", ModerationStatus::Approved))
        .await;
    store
        .seed_project(sample_project("Rejected Relic", ModerationStatus::Rejected))
        .await;
    let desk = ModerationDesk::new(store.clone());
    (store, desk)
}

fn names(desk: &ModerationDesk<MemoryCatalog>) -> Vec<&str> {
    desk.projects().iter().map(|p| p.name.as_str()).collect()
}

mod tabs {
    use super::*;

    #[tokio::test]
    async fn dashboard_opens_on_the_pending_tab() {
        let (_store, mut desk) = setup().await;
        assert_eq!(desk.filter(), StatusFilter::Pending);

        desk.refresh().await;

        assert_eq!(names(&desk), vec!["Pending Poster"]);
    }

    #[tokio::test]
    async fn the_all_tab_lists_every_status() {
        let (_store, mut desk) = setup().await;

        desk.set_filter(StatusFilter::All).await;

        assert_eq!(
            names(&desk),
            vec!["Pending Poster", "Approved Atlas", "Rejected Relic"]
        );
    }

    #[tokio::test]
    async fn switching_tabs_issues_a_fresh_fetch() {
        let (store, mut desk) = setup().await;
        desk.refresh().await;

        desk.set_filter(StatusFilter::Rejected).await;

        assert_eq!(store.query_calls(), 2);
        assert_eq!(names(&desk), vec!["Rejected Relic"]);
    }
}

mod actions {
    use super::*;

    #[tokio::test]
    async fn approving_patches_the_row_without_refetching() {
        let (store, mut desk) = setup().await;
        desk.refresh().await;
        let id = desk.projects()[0].id;
        let fetches_before = store.query_calls();

        desk.set_status(id, ModerationStatus::Approved).await;

        assert_eq!(store.query_calls(), fetches_before);
        // The row stays on the Pending tab with its new status until the
        // next refresh.
        assert_eq!(desk.projects().len(), 1);
        assert_eq!(desk.projects()[0].status, ModerationStatus::Approved);
        let stored = store.find_project(id).await.unwrap();
        assert_eq!(stored.status, ModerationStatus::Approved);
    }

    #[tokio::test]
    async fn the_next_refresh_drops_rows_that_left_the_tab() {
        let (_store, mut desk) = setup().await;
        desk.refresh().await;
        let id = desk.projects()[0].id;

        desk.set_status(id, ModerationStatus::Approved).await;
        desk.refresh().await;

        assert!(desk.projects().is_empty());
    }

    #[tokio::test]
    async fn a_rejected_project_can_be_reset_to_pending() {
        let (store, mut desk) = setup().await;
        desk.set_filter(StatusFilter::Rejected).await;
        let id = desk.projects()[0].id;

        desk.set_status(id, ModerationStatus::Pending).await;

        let stored = store.find_project(id).await.unwrap();
        assert_eq!(stored.status, ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn a_failed_update_leaves_rows_untouched_and_sets_the_banner() {
        let (store, mut desk) = setup().await;
        desk.refresh().await;
        let id = desk.projects()[0].id;
        store
            .set_failures(FailureSwitches {
                update_status: true,
                ..Default::default()
            })
            .await;

        desk.set_status(id, ModerationStatus::Approved).await;

        assert_eq!(desk.projects()[0].status, ModerationStatus::Pending);
        let banner = desk.error().unwrap();
        assert!(banner.starts_with("Failed to update project:"), "{}", banner);
        let stored = store.find_project(id).await.unwrap();
        assert_eq!(stored.status, ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn updating_a_missing_project_reports_not_found() {
        let (_store, mut desk) = setup().await;
        desk.refresh().await;

        desk.set_status(uuid::Uuid::new_v4(), ModerationStatus::Approved)
            .await;

        assert!(desk.error().is_some());
        // The listed row is unaffected.
        assert_eq!(desk.projects()[0].status, ModerationStatus::Pending);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn a_failed_refresh_keeps_the_last_good_rows() {
        let (store, mut desk) = setup().await;
        desk.refresh().await;
        assert_eq!(desk.projects().len(), 1);

        store
            .set_failures(FailureSwitches {
                query_projects: true,
                ..Default::default()
            })
            .await;
        desk.refresh().await;

        assert_eq!(
            desk.error(),
            Some("Failed to load projects. Please try again.")
        );
        assert_eq!(names(&desk), vec!["Pending Poster"]);
        assert!(!desk.is_loading());
    }

    #[tokio::test]
    async fn a_successful_refresh_clears_the_banner() {
        let (store, mut desk) = setup().await;
        store
            .set_failures(FailureSwitches {
                query_projects: true,
                ..Default::default()
            })
            .await;
        desk.refresh().await;
        assert!(desk.error().is_some());

        store.set_failures(FailureSwitches::default()).await;
        desk.refresh().await;

        assert!(desk.error().is_none());
        assert_eq!(names(&desk), vec!["Pending Poster"]);
    }
}

mod sequencing {
    use super::*;

    #[tokio::test]
    async fn stale_results_never_overwrite_newer_ones() {
        let (store, mut desk) = setup().await;

        let stale = desk.begin_refresh();
        desk.set_filter(StatusFilter::All).await;

        let stale_rows = store.query_projects(stale.query()).await;
        desk.apply(stale, stale_rows);

        assert_eq!(desk.projects().len(), 3);
    }

    #[tokio::test]
    async fn a_stale_failure_does_not_raise_the_banner() {
        let (store, mut desk) = setup().await;

        let stale = desk.begin_refresh();
        desk.refresh().await;

        desk.apply(stale, Err(StoreError::Server("boom".to_string())));

        assert!(desk.error().is_none());
        assert_eq!(names(&desk), vec!["Pending Poster"]);
        assert!(!desk.is_loading());
    }
}
