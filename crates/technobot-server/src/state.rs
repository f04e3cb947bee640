use std::sync::Arc;
use technobot_core::{CustomerCatalog, engine::ChatEngine};

/// Shared state managed by rocket.
#[derive(Clone)]
pub struct AppState {
    /// Chat dispatch engine holding the session store and providers.
    pub engine: Arc<ChatEngine>,
    /// Read-only customer catalog loaded at startup.
    pub catalog: Arc<CustomerCatalog>,
}

impl AppState {
    pub fn new(engine: Arc<ChatEngine>, catalog: Arc<CustomerCatalog>) -> Self {
        Self { engine, catalog }
    }
}
