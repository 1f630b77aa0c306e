// Route exports
pub mod draws;
pub mod recommendations;

use crate::services::{AppwriteClient, CacheManager, GeneratorClient};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub generator: Arc<GeneratorClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(draws::configure)
            .configure(recommendations::configure),
    );
}
