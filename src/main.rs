use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_catalog::{CatalogView, CourseKind, SanityCatalogClient, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_catalog=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env()?;
    let client = Arc::new(SanityCatalogClient::new(config)?);

    let mut view = CatalogView::new(client);
    view.refresh().await?;

    if let Some(query) = std::env::args().nth(1) {
        view.set_query(query);
    }

    info!("{} course(s) match", view.filtered_courses().len());
    for course in view.filtered_courses() {
        let kind = match course.kind {
            CourseKind::Free => "free",
            CourseKind::Paid => "paid",
        };
        println!(
            "{:<40} [{}] {} chapter(s)",
            course.title,
            kind,
            course.chapters.len()
        );
    }

    Ok(())
}
