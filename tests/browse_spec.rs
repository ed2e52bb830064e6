//! Filter/search behavior of the public project list.

mod common;

use common::{init_tracing, sample_project, tagged};
use showntell::app::ProjectBrowser;
use showntell::models::{ModerationStatus, TagCategory};
use showntell::store::{CatalogStore, FailureSwitches, MemoryCatalog, ProjectQuery};

/// Store seeded with three approved projects and one pending one.
async fn setup() -> (MemoryCatalog, ProjectBrowser<MemoryCatalog>) {
    init_tracing();
    let store = MemoryCatalog::new();
    store
        .seed_project(tagged(
            sample_project("Alpha Coding Lab", ModerationStatus::Approved),
            &["Coding", "STEM"],
            &["Web App"],
            &["K-12 Students"],
        ))
        .await;
    store
        .seed_project(tagged(
            sample_project("Beta History Walk", ModerationStatus::Approved),
            &["History"],
            &["Mobile App"],
            &["K-12 Educators"],
        ))
        .await;
    store
        .seed_project(tagged(
            sample_project("Gamma Robotics Kit", ModerationStatus::Approved),
            &["STEM"],
            &["Physical Device"],
            &["K-12 Students", "College Students"],
        ))
        .await;
    store
        .seed_project(tagged(
            sample_project("Delta Draft", ModerationStatus::Pending),
            &["STEM"],
            &["Web App"],
            &["K-12 Students"],
        ))
        .await;
    let browser = ProjectBrowser::new(store.clone());
    (store, browser)
}

fn names(browser: &ProjectBrowser<MemoryCatalog>) -> Vec<&str> {
    browser.projects().iter().map(|p| p.name.as_str()).collect()
}

mod toggling {
    use super::*;

    #[tokio::test]
    async fn double_toggle_restores_selection() {
        let (_store, mut browser) = setup().await;
        let before = browser.filters().clone();

        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        assert!(browser.filters().contains(TagCategory::Topic, "STEM"));

        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        assert_eq!(*browser.filters(), before);
    }

    #[tokio::test]
    async fn unknown_tag_is_rejected_without_changes() {
        let (_store, mut browser) = setup().await;

        let err = browser
            .toggle_tag(TagCategory::Topic, "Underwater Basket Weaving")
            .unwrap_err();
        assert_eq!(err.tag, "Underwater Basket Weaving");
        assert!(browser.filters().is_empty());
    }

    #[tokio::test]
    async fn categories_toggle_independently() {
        let (_store, mut browser) = setup().await;

        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        browser.toggle_tag(TagCategory::Form, "Web App").unwrap();
        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();

        assert!(!browser.filters().contains(TagCategory::Topic, "STEM"));
        assert!(browser.filters().contains(TagCategory::Form, "Web App"));
    }
}

mod querying {
    use super::*;

    #[tokio::test]
    async fn initial_fetch_lists_only_approved_projects() {
        let (_store, mut browser) = setup().await;

        browser.refresh().await;

        let listed = names(&browser);
        assert_eq!(listed.len(), 3);
        assert!(!listed.contains(&"Delta Draft"));
    }

    #[tokio::test]
    async fn selection_within_a_category_is_conjunctive() {
        let (_store, mut browser) = setup().await;
        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        browser.toggle_tag(TagCategory::Topic, "Coding").unwrap();

        browser.refresh().await;

        // Gamma has STEM but not Coding, so only Alpha qualifies.
        assert_eq!(names(&browser), vec!["Alpha Coding Lab"]);
    }

    #[tokio::test]
    async fn selection_across_categories_is_conjunctive() {
        let (_store, mut browser) = setup().await;
        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        browser
            .toggle_tag(TagCategory::Audience, "K-12 Students")
            .unwrap();

        browser.refresh().await;
        let both = names(&browser);
        assert_eq!(both, vec!["Alpha Coding Lab", "Gamma Robotics Kit"]);

        browser.toggle_tag(TagCategory::Form, "Web App").unwrap();
        browser.refresh().await;

        // Gamma is a physical device, so the form constraint excludes it.
        assert_eq!(names(&browser), vec!["Alpha Coding Lab"]);
    }

    #[tokio::test]
    async fn search_matches_names_case_insensitively() {
        let (_store, mut browser) = setup().await;

        browser.set_search("hIsToRy");
        browser.refresh().await;

        assert_eq!(names(&browser), vec!["Beta History Walk"]);
    }

    #[tokio::test]
    async fn search_reaches_long_form_content() {
        init_tracing();
        let store = MemoryCatalog::new();
        let mut project = sample_project("Quiet Name", ModerationStatus::Approved);
        project.content = "A microscopy classroom adventure.".to_string();
        store.seed_project(project).await;
        let mut browser = ProjectBrowser::new(store.clone());

        browser.set_search("MICROSCOPY");
        browser.refresh().await;

        assert_eq!(names(&browser), vec!["Quiet Name"]);
    }

    #[tokio::test]
    async fn clearing_filters_matches_the_initial_fetch() {
        let (_store, mut browser) = setup().await;
        browser.refresh().await;
        let initial = names(&browser)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        browser.toggle_tag(TagCategory::Topic, "History").unwrap();
        browser.refresh().await;
        assert_eq!(names(&browser).len(), 1);

        browser.clear_filters();
        browser.refresh().await;
        assert_eq!(names(&browser), initial);
    }

    #[tokio::test]
    async fn clear_filters_keeps_the_search_text() {
        let (_store, mut browser) = setup().await;
        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        browser.set_search("alpha");

        browser.clear_filters();

        assert!(browser.filters().is_empty());
        assert_eq!(browser.search(), "alpha");
    }

    #[tokio::test]
    async fn clear_search_keeps_the_filters() {
        let (_store, mut browser) = setup().await;
        browser.toggle_tag(TagCategory::Topic, "STEM").unwrap();
        browser.set_search("alpha");

        browser.clear_search();

        assert_eq!(browser.search(), "");
        assert!(browser.filters().contains(TagCategory::Topic, "STEM"));
    }
}

mod sequencing {
    use super::*;

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let (store, mut browser) = setup().await;

        // First refresh is issued, then the user narrows the filter before
        // the response lands.
        let stale = browser.begin_refresh();
        browser.toggle_tag(TagCategory::Topic, "History").unwrap();
        let fresh = browser.begin_refresh();

        let fresh_result = store.query_projects(fresh.query()).await;
        browser.apply(fresh, fresh_result);
        assert_eq!(names(&browser), vec!["Beta History Walk"]);

        // The slow unfiltered response arrives afterwards and must not win.
        let stale_result = store.query_projects(stale.query()).await;
        browser.apply(stale, stale_result);
        assert_eq!(names(&browser), vec!["Beta History Walk"]);
    }

    #[tokio::test]
    async fn stale_failure_does_not_disturb_fresh_results() {
        let (store, mut browser) = setup().await;

        let stale = browser.begin_refresh();
        let fresh = browser.begin_refresh();

        let fresh_result = store.query_projects(fresh.query()).await;
        browser.apply(fresh, fresh_result);

        browser.apply(stale, Err(showntell::store::StoreError::Server("late".into())));

        assert_eq!(names(&browser).len(), 3);
        assert!(browser.error().is_none());
    }

    #[tokio::test]
    async fn loading_clears_only_when_the_latest_refresh_lands() {
        let (store, mut browser) = setup().await;

        let first = browser.begin_refresh();
        let second = browser.begin_refresh();
        assert!(browser.is_loading());

        let second_result = store.query_projects(second.query()).await;
        browser.apply(second, second_result);
        assert!(!browser.is_loading());

        let first_result = store.query_projects(first.query()).await;
        browser.apply(first, first_result);
        assert!(!browser.is_loading());
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn query_failure_discards_results_and_sets_the_banner() {
        let (store, mut browser) = setup().await;
        browser.refresh().await;
        assert_eq!(browser.projects().len(), 3);

        store
            .set_failures(FailureSwitches {
                query_projects: true,
                ..Default::default()
            })
            .await;
        browser.refresh().await;

        assert!(browser.projects().is_empty());
        assert_eq!(
            browser.error(),
            Some("Failed to load projects. Please try again later.")
        );
        // One initial call plus the failed one; nothing was retried.
        assert_eq!(store.query_calls(), 2);
    }

    #[tokio::test]
    async fn next_successful_refresh_clears_the_banner() {
        let (store, mut browser) = setup().await;
        store
            .set_failures(FailureSwitches {
                query_projects: true,
                ..Default::default()
            })
            .await;
        browser.refresh().await;
        assert!(browser.error().is_some());

        store.set_failures(FailureSwitches::default()).await;
        browser.refresh().await;

        assert!(browser.error().is_none());
        assert_eq!(browser.projects().len(), 3);
    }
}

mod embedding {
    use super::*;
    use common::sample_author;

    #[tokio::test]
    async fn listed_projects_carry_their_authors() {
        init_tracing();
        let store = MemoryCatalog::new();
        let project = sample_project("Epsilon Atlas", ModerationStatus::Approved);
        let project_id = project.id;
        store.seed_project(project).await;
        store
            .seed_author(sample_author(project_id, "P. Mapper", "maps@school.edu"))
            .await;

        let mut browser = ProjectBrowser::new(store.clone());
        browser.refresh().await;

        assert_eq!(browser.projects()[0].authors.len(), 1);
        assert_eq!(browser.projects()[0].authors[0].name, "P. Mapper");
    }

    #[tokio::test]
    async fn moderation_style_queries_skip_the_embed() {
        init_tracing();
        let store = MemoryCatalog::new();
        let project = sample_project("Zeta Quiet", ModerationStatus::Approved);
        let project_id = project.id;
        store.seed_project(project).await;
        store
            .seed_author(sample_author(project_id, "Q. Writer", "q@school.edu"))
            .await;

        let rows = store
            .query_projects(&ProjectQuery::default())
            .await
            .unwrap();
        assert!(rows[0].authors.is_empty());
    }
}
