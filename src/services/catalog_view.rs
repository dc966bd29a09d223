use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{FetchFailed, StoreError};
use crate::models::Course;
use crate::store::CatalogClient;

/// Tags one in-flight refresh. Dropping the ticket cancels the pending
/// snapshot application.
#[must_use]
#[derive(Debug)]
pub struct RefreshTicket {
    seq: u64,
}

/// Holds the current catalog snapshot and a live text filter, and exposes the
/// filtered projection to presentation.
///
/// The snapshot is replaced wholesale on each successful refresh; a failed
/// refresh leaves the last-known-good snapshot visible. Refreshes are
/// sequence-numbered so that an earlier-issued refresh resolving late cannot
/// overwrite a newer snapshot.
pub struct CatalogView {
    client: Arc<dyn CatalogClient>,
    snapshot: Vec<Course>,
    filtered: Vec<Course>,
    query: String,
    next_seq: u64,
    applied_seq: u64,
}

impl CatalogView {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            snapshot: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            next_seq: 1,
            applied_seq: 0,
        }
    }

    /// Fetch the catalog and replace the snapshot. On failure the previous
    /// snapshot is retained and no retry is attempted here.
    pub async fn refresh(&mut self) -> Result<(), FetchFailed> {
        let ticket = self.begin_refresh();
        let result = self.client.list_courses().await;
        self.complete_refresh(ticket, result)
    }

    /// Start a refresh without awaiting it. Pair with `complete_refresh`;
    /// `refresh` composes the two for the common sequential case.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        RefreshTicket { seq }
    }

    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Course>, StoreError>,
    ) -> Result<(), FetchFailed> {
        // A newer snapshot has already been applied; whatever this refresh
        // came back with is no longer current, success or failure.
        if ticket.seq <= self.applied_seq {
            debug!(seq = ticket.seq, "discarding stale refresh result");
            return Ok(());
        }
        match result {
            Ok(courses) => {
                info!(seq = ticket.seq, courses = courses.len(), "catalog refreshed");
                self.applied_seq = ticket.seq;
                self.snapshot = courses;
                self.apply_filter();
                Ok(())
            }
            Err(e) => {
                warn!(seq = ticket.seq, "catalog refresh failed: {e}");
                Err(FetchFailed(e))
            }
        }
    }

    /// Update the filter and recompute the projection synchronously. A blank
    /// query matches every course; no query is an error.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.apply_filter();
    }

    /// The filtered projection, in snapshot order. Filtering never reorders.
    pub fn filtered_courses(&self) -> &[Course] {
        &self.filtered
    }

    fn apply_filter(&mut self) {
        if self.query.trim().is_empty() {
            self.filtered = self.snapshot.clone();
            return;
        }
        let needle = self.query.to_lowercase();
        self.filtered = self
            .snapshot
            .iter()
            .filter(|course| {
                course.title.to_lowercase().contains(&needle)
                    || course
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
    }
}
