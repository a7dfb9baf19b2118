pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use books_kernel::{settings::Settings, InitCtx, Module};
use utoipa::OpenApi;

use service::BookDataService;

/// Books module: bestseller lists and catalog lookups served under `/books`
pub struct BooksModule {
    service: Arc<BookDataService>,
}

impl BooksModule {
    pub fn new(service: Arc<BookDataService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let providers = &ctx.settings.providers;
        if providers.nyt.api_key.is_empty() {
            tracing::warn!(module = self.name(), "NYT_API_KEY is not set");
        }
        if providers.google_books.api_key.is_empty() {
            tracing::warn!(module = self.name(), "GOOGLE_BOOKS_API_KEY is not set");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            nyt = %providers.nyt.base_url,
            google_books = %providers.google_books.base_url,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(routes::BooksApi::openapi())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module and its shared aggregation service
pub fn create_module(settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    let service = BookDataService::from_settings(&settings.providers)
        .context("failed to build upstream HTTP client")?;

    Ok(Arc::new(BooksModule::new(Arc::new(service))))
}
