use std::sync::Arc;

use async_trait::async_trait;
use course_catalog::{
    CatalogClient, CatalogView, Course, CourseKind, StaticCatalog, StoreError,
};
use course_catalog::models::Chapter;

fn course(
    id: &str,
    title: &str,
    description: Option<&str>,
    kind: CourseKind,
    published_at: &str,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.map(str::to_string),
        kind,
        duration: None,
        thumbnail_url: None,
        slug: title.to_lowercase().replace(' ', "-"),
        published_at: Some(published_at.to_string()),
        chapters: Vec::new(),
    }
}

fn sample() -> Vec<Course> {
    vec![
        course(
            "c1",
            "Intro to Go",
            None,
            CourseKind::Free,
            "2024-03-01T00:00:00Z",
        ),
        course(
            "c2",
            "Advanced Rust",
            Some("Ownership and borrowing in depth"),
            CourseKind::Paid,
            "2024-02-01T00:00:00Z",
        ),
        course(
            "c3",
            "Go Concurrency",
            None,
            CourseKind::Paid,
            "2024-01-01T00:00:00Z",
        ),
    ]
}

fn titles(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.title.as_str()).collect()
}

struct FailingStore;

#[async_trait]
impl CatalogClient for FailingStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Err(StoreError::RemoteUnavailable(
            "connection refused".to_string(),
        ))
    }

    async fn course_by_slug(&self, _slug: &str) -> Result<Option<Course>, StoreError> {
        Err(StoreError::RemoteUnavailable(
            "connection refused".to_string(),
        ))
    }

    async fn chapter_by_slug(
        &self,
        _course_slug: &str,
        _chapter_slug: &str,
    ) -> Result<Option<Chapter>, StoreError> {
        Err(StoreError::RemoteUnavailable(
            "connection refused".to_string(),
        ))
    }

    async fn chapters_by_course(&self, _course_id: &str) -> Result<Vec<Chapter>, StoreError> {
        Err(StoreError::RemoteUnavailable(
            "connection refused".to_string(),
        ))
    }
}

#[tokio::test]
async fn filter_matches_title_case_insensitively_in_snapshot_order() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::new(sample())));
    view.refresh().await.expect("refresh failed");

    view.set_query("go");
    assert_eq!(
        titles(view.filtered_courses()),
        vec!["Intro to Go", "Go Concurrency"]
    );

    view.set_query("RUST");
    assert_eq!(titles(view.filtered_courses()), vec!["Advanced Rust"]);
}

#[tokio::test]
async fn filter_matches_description_too() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::new(sample())));
    view.refresh().await.expect("refresh failed");

    view.set_query("borrow");
    assert_eq!(titles(view.filtered_courses()), vec!["Advanced Rust"]);
}

#[tokio::test]
async fn empty_query_restores_full_snapshot() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::new(sample())));
    view.refresh().await.expect("refresh failed");

    view.set_query("go");
    view.set_query("rust");
    view.set_query("");
    assert_eq!(
        titles(view.filtered_courses()),
        vec!["Intro to Go", "Advanced Rust", "Go Concurrency"]
    );

    // Whitespace-only counts as blank as well.
    view.set_query("   ");
    assert_eq!(view.filtered_courses().len(), 3);
}

#[tokio::test]
async fn filtering_an_empty_snapshot_yields_empty_not_error() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::empty()));
    view.refresh().await.expect("refresh failed");

    view.set_query("anything");
    assert!(view.filtered_courses().is_empty());
}

#[tokio::test]
async fn failed_refresh_preserves_previous_snapshot() {
    let mut view = CatalogView::new(Arc::new(FailingStore));

    // Seed one good snapshot through the ticket API.
    let ticket = view.begin_refresh();
    view.complete_refresh(ticket, Ok(sample()))
        .expect("seed refresh failed");
    let before = view.filtered_courses().to_vec();

    let err = view.refresh().await.expect_err("refresh should fail");
    assert!(matches!(err.0, StoreError::RemoteUnavailable(_)));
    assert_eq!(view.filtered_courses(), before.as_slice());
}

#[tokio::test]
async fn failed_refresh_with_no_prior_snapshot_leaves_empty_state() {
    let mut view = CatalogView::new(Arc::new(FailingStore));

    view.refresh().await.expect_err("refresh should fail");
    assert!(view.filtered_courses().is_empty());
}

#[tokio::test]
async fn stale_refresh_result_is_discarded() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::empty()));

    let older = vec![course(
        "c9",
        "Stale Course",
        None,
        CourseKind::Free,
        "2023-01-01T00:00:00Z",
    )];
    let newer = sample();

    // Issued first, resolves last.
    let first = view.begin_refresh();
    let second = view.begin_refresh();

    view.complete_refresh(second, Ok(newer))
        .expect("second refresh failed");
    view.complete_refresh(first, Ok(older))
        .expect("first refresh failed");

    assert_eq!(
        titles(view.filtered_courses()),
        vec!["Intro to Go", "Advanced Rust", "Go Concurrency"]
    );
}

#[tokio::test]
async fn stale_refresh_failure_is_discarded_not_surfaced() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::empty()));

    // Issued first, resolves last — and with an error. The snapshot from the
    // later-issued refresh is already current, so no failure is reported.
    let first = view.begin_refresh();
    let second = view.begin_refresh();

    view.complete_refresh(second, Ok(sample()))
        .expect("second refresh failed");
    view.complete_refresh(
        first,
        Err(StoreError::RemoteUnavailable("timed out".to_string())),
    )
    .expect("stale failure should be discarded, not surfaced");

    assert_eq!(view.filtered_courses().len(), 3);
}

#[tokio::test]
async fn query_set_before_refresh_applies_to_the_new_snapshot() {
    let mut view = CatalogView::new(Arc::new(StaticCatalog::new(sample())));

    view.set_query("go");
    assert!(view.filtered_courses().is_empty());

    view.refresh().await.expect("refresh failed");
    assert_eq!(
        titles(view.filtered_courses()),
        vec!["Intro to Go", "Go Concurrency"]
    );
}

#[tokio::test]
async fn refresh_orders_courses_by_publication_time_descending() {
    // Input deliberately shuffled; the store contract sorts it.
    let shuffled = vec![sample()[2].clone(), sample()[0].clone(), sample()[1].clone()];
    let mut view = CatalogView::new(Arc::new(StaticCatalog::new(shuffled)));
    view.refresh().await.expect("refresh failed");

    assert_eq!(
        titles(view.filtered_courses()),
        vec!["Intro to Go", "Advanced Rust", "Go Concurrency"]
    );
}
