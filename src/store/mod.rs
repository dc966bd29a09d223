pub mod dto;

use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::error::StoreError;
use crate::models::{Chapter, Course};

#[derive(Debug, Error)]
#[error("{0} is not set")]
pub struct MissingEnv(&'static str);

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, MissingEnv> {
        let project_id =
            env::var("SANITY_PROJECT_ID").map_err(|_| MissingEnv("SANITY_PROJECT_ID"))?;
        let dataset = env::var("SANITY_DATASET").unwrap_or_else(|_| "production".to_string());
        let api_version =
            env::var("SANITY_API_VERSION").unwrap_or_else(|_| "2024-01-01".to_string());

        Ok(Self {
            project_id,
            dataset,
            api_version,
        })
    }
}

/// Read operations against the course catalog. Results come back with every
/// reference already resolved: thumbnails as concrete URLs, chapter lists as
/// full records. Lookups return `None` for not-found so callers can tell
/// absence apart from transport failure.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// All courses, publication time descending.
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError>;

    /// Both slugs must match the same chapter. A chapter slug that exists
    /// under a different course yields `None`, never the wrong chapter.
    async fn chapter_by_slug(
        &self,
        course_slug: &str,
        chapter_slug: &str,
    ) -> Result<Option<Chapter>, StoreError>;

    /// Chapters of one course, ascending by `order`; ties keep store order.
    async fn chapters_by_course(&self, course_id: &str) -> Result<Vec<Chapter>, StoreError>;
}

const CHAPTER_PROJECTION: &str = r#"{
  "id": _id,
  title,
  description,
  videoUrl,
  "courseId": course._ref,
  order,
  "slug": slug.current
}"#;

fn course_projection() -> String {
    format!(
        r#"{{
  "id": _id,
  title,
  description,
  kind,
  duration,
  "thumbnailUrl": thumbnail.asset->url,
  "slug": slug.current,
  publishedAt,
  "chapters": chapters[]->{CHAPTER_PROJECTION}
}}"#
    )
}

/// Catalog client over the content store's GROQ query endpoint. Reference
/// resolution happens inside the query projection, not here.
pub struct SanityCatalogClient {
    http: Client,
    config: StoreConfig,
}

impl SanityCatalogClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = Client::builder()
            .build()
            .map_err(|e| StoreError::RemoteUnavailable(format!("failed to build http client: {e}")))?;
        Ok(Self { http, config })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let url = format!(
            "https://{}.apicdn.sanity.io/v{}/data/query/{}",
            self.config.project_id, self.config.api_version, self.config.dataset
        );

        let mut request = self.http.get(&url).query(&[("query", groq)]);
        for (name, value) in params {
            // Named parameters are JSON-encoded and $-prefixed.
            request = request.query(&[(
                format!("${name}"),
                serde_json::Value::from(*value).to_string(),
            )]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RemoteUnavailable(format!(
                "content store returned {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::RemoteUnavailable(e.to_string()))?;

        serde_json::from_str::<dto::QueryResponse<T>>(&body)
            .map(|envelope| envelope.result)
            .map_err(|e| {
                tracing::error!("failed to parse store response: {e}");
                StoreError::RemoteUnavailable(format!("malformed store response: {e}"))
            })
    }
}

#[async_trait]
impl CatalogClient for SanityCatalogClient {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let groq = format!(
            r#"*[_type == "course"] | order(publishedAt desc) {}"#,
            course_projection()
        );
        let records: Vec<dto::CourseRecord> = self.query(&groq, &[]).await?;

        let mut courses = Vec::with_capacity(records.len());
        for record in records {
            match record.into_course() {
                Ok(course) => courses.push(course),
                Err(e) => {
                    warn!("dropping course record: {e}");
                }
            }
        }
        Ok(courses)
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError> {
        let groq = format!(
            r#"*[_type == "course" && slug.current == $slug][0] {}"#,
            course_projection()
        );
        let record: Option<dto::CourseRecord> = self.query(&groq, &[("slug", slug)]).await?;
        record.map(dto::CourseRecord::into_course).transpose()
    }

    async fn chapter_by_slug(
        &self,
        course_slug: &str,
        chapter_slug: &str,
    ) -> Result<Option<Chapter>, StoreError> {
        let groq = format!(
            r#"*[_type == "chapter" && slug.current == $chapterSlug && course->slug.current == $courseSlug][0] {CHAPTER_PROJECTION}"#
        );
        let record: Option<dto::ChapterRecord> = self
            .query(
                &groq,
                &[("courseSlug", course_slug), ("chapterSlug", chapter_slug)],
            )
            .await?;
        record.map(dto::ChapterRecord::into_chapter).transpose()
    }

    async fn chapters_by_course(&self, course_id: &str) -> Result<Vec<Chapter>, StoreError> {
        let groq = format!(
            r#"*[_type == "chapter" && course._ref == $courseId] | order(order asc) {CHAPTER_PROJECTION}"#
        );
        let records: Vec<dto::ChapterRecord> =
            self.query(&groq, &[("courseId", course_id)]).await?;

        let mut chapters = Vec::with_capacity(records.len());
        for record in records {
            match record.into_chapter() {
                Ok(chapter) => chapters.push(chapter),
                Err(e) => {
                    warn!("dropping chapter record: {e}");
                }
            }
        }
        // The store does not guarantee a stable sort; pin tie order here.
        chapters.sort_by_key(|c| c.order);
        Ok(chapters)
    }
}

/// In-memory catalog with the same contract as the remote store. Used by
/// tests and offline development.
pub struct StaticCatalog {
    courses: Vec<Course>,
}

impl StaticCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CatalogClient for StaticCatalog {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let mut courses = self.courses.clone();
        courses.sort_by(|a, b| {
            let ka = a.published_at.as_deref().and_then(parse_timestamp);
            let kb = b.published_at.as_deref().and_then(parse_timestamp);
            kb.cmp(&ka)
        });
        Ok(courses)
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.iter().find(|c| c.slug == slug).cloned())
    }

    async fn chapter_by_slug(
        &self,
        course_slug: &str,
        chapter_slug: &str,
    ) -> Result<Option<Chapter>, StoreError> {
        Ok(self
            .courses
            .iter()
            .find(|c| c.slug == course_slug)
            .and_then(|c| c.chapters.iter().find(|ch| ch.slug == chapter_slug))
            .cloned())
    }

    async fn chapters_by_course(&self, course_id: &str) -> Result<Vec<Chapter>, StoreError> {
        let mut chapters: Vec<Chapter> = self
            .courses
            .iter()
            .filter(|c| c.id == course_id)
            .flat_map(|c| c.chapters.iter().cloned())
            .collect();
        chapters.sort_by_key(|c| c.order);
        Ok(chapters)
    }
}

/// Parse RFC3339 timestamp to comparable format
fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
