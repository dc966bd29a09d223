use serde::{Deserialize, Serialize};

use crate::models::Chapter;

/// A course as the rest of the app sees it: thumbnail resolved to a concrete
/// URL and chapters resolved to full records, never reference stubs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: CourseKind,
    pub duration: Option<String>,
    pub thumbnail_url: Option<String>,
    /// URL-safe unique key, distinct from the opaque `id`.
    pub slug: String,
    /// RFC 3339. Catalog ordering is publication time descending.
    pub published_at: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseKind {
    Free,
    Paid,
}
