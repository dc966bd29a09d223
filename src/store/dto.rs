use serde::Deserialize;

use crate::error::StoreError;
use crate::models::{Chapter, Course, CourseKind};

/// Envelope returned by the content store query endpoint.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
}

/// Raw course record as projected by the store query. Every field is optional
/// at the wire level; `into_course` decides what is actually required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub chapters: Option<Vec<ChapterRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CourseRecord {
    pub fn into_course(self) -> Result<Course, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::schema("<unknown>", "id"))?;
        let title = self
            .title
            .ok_or_else(|| StoreError::schema(id.clone(), "title"))?;
        let slug = self
            .slug
            .ok_or_else(|| StoreError::schema(id.clone(), "slug"))?;
        let kind = match self.kind.as_deref() {
            Some("free") => CourseKind::Free,
            Some("paid") => CourseKind::Paid,
            _ => return Err(StoreError::schema(id, "kind")),
        };

        let chapters = self
            .chapters
            .unwrap_or_default()
            .into_iter()
            .map(ChapterRecord::into_chapter)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Course {
            id,
            title,
            description: self.description,
            kind,
            duration: self.duration,
            thumbnail_url: self.thumbnail_url,
            slug,
            published_at: self.published_at,
            chapters,
        })
    }
}

impl ChapterRecord {
    pub fn into_chapter(self) -> Result<Chapter, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::schema("<unknown>", "id"))?;
        let title = self
            .title
            .ok_or_else(|| StoreError::schema(id.clone(), "title"))?;
        let video_url = self
            .video_url
            .ok_or_else(|| StoreError::schema(id.clone(), "videoUrl"))?;
        let course_id = self
            .course_id
            .ok_or_else(|| StoreError::schema(id.clone(), "courseId"))?;
        let order = self
            .order
            .ok_or_else(|| StoreError::schema(id.clone(), "order"))?;
        let slug = self
            .slug
            .ok_or_else(|| StoreError::schema(id.clone(), "slug"))?;

        Ok(Chapter {
            id,
            title,
            description: self.description,
            video_url,
            course_id,
            order,
            slug,
        })
    }
}
