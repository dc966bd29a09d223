use thiserror::Error;

/// Errors surfaced by the catalog store client.
///
/// Not-found is never an error: lookup operations return `Option` so callers
/// branch on presence rather than catching a failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content store unreachable: {0}")]
    RemoteUnavailable(String),

    #[error("record {id}: missing required field `{field}`")]
    SchemaMismatch { id: String, field: &'static str },
}

impl StoreError {
    pub fn schema(id: impl Into<String>, field: &'static str) -> Self {
        StoreError::SchemaMismatch {
            id: id.into(),
            field,
        }
    }
}

/// Returned by `CatalogView::refresh` when the underlying fetch fails.
/// The previous snapshot is left untouched; retrying is up to the caller.
#[derive(Debug, Error)]
#[error("catalog refresh failed: {0}")]
pub struct FetchFailed(#[from] pub StoreError);
