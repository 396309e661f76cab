pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::processing::PredictionProcessor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<PredictionProcessor>,
}

impl AppState {
    pub fn new(processor: Arc<PredictionProcessor>) -> Self {
        Self { processor }
    }
}
