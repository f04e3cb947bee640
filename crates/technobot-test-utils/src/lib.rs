//! Test helpers shared across TECHNOBOT crates.

pub mod providers;

pub use providers::{
    FailingExtractionProvider, FailingGenerationProvider, FailingIntentProvider,
    FixedExtractionProvider, FixedGenerationProvider, FixedIntentProvider,
    RecordingGenerationProvider,
};
