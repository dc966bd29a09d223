use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    /// Back-reference to the owning course, not ownership.
    pub course_id: String,
    /// Display sequence within the course.
    pub order: i32,
    /// Unique within the owning course.
    pub slug: String,
}
