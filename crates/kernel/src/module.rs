use async_trait::async_trait;
use axum::Router;
use utoipa::openapi::OpenApi;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that every Books API module implements
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module, also used as its route prefix
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Routes will be mounted under `/{module_name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI document describing this module's routes. Paths are absolute,
    /// i.e. they already include the `/{module_name}` prefix.
    fn openapi(&self) -> Option<OpenApi> {
        None
    }

    /// Start background work; called after every module is initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
