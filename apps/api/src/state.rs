use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::scoring::NoiseSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative service. Default: GeminiClient.
    pub llm: Arc<dyn TextGenerator>,
    /// Perturbation source for heuristic scores. Default: ClockNoise.
    pub noise: Arc<dyn NoiseSource>,
    pub config: Config,
}
