//! Single-dependency entry point for embedding TECHNOBOT.
//!
//! Downstream code (demo harnesses, alternative front ends) can depend on
//! this crate alone and reach the wire types, configuration, domain logic,
//! and HTTP clients through one namespace.

pub use technobot_client as client;
pub use technobot_config as config;
pub use technobot_core as core;
pub use technobot_protocol as protocol;

/// The pieces needed to stand up a chat engine against live endpoints.
pub mod prelude {
    pub use technobot_client::{HttpExtractionClient, HttpGenerationClient, HttpIntentClient};
    pub use technobot_config::TechnobotConfig;
    pub use technobot_core::{ChatEngine, CustomerCatalog, Explainer, SessionStore};
    pub use technobot_protocol::{
        ExtractionProvider, GenerationProvider, IntentProvider, SessionId, TransferDetails,
    };
}
